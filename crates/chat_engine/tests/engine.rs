use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use chat_engine::{
    ChannelEventSink, ChatClient, ChatError, ChatRequest, DocumentError, DocumentReader,
    EngineEvent, EngineHandle, RequestId,
};

struct EchoClient;

#[async_trait::async_trait]
impl ChatClient for EchoClient {
    async fn send(&self, _request_id: RequestId, request: &ChatRequest) -> Result<String, ChatError> {
        Ok(format!(
            "{} ({} turns, docs={})",
            request.user_question,
            request.history.len(),
            request.client_docs_text
        ))
    }
}

struct FixedReader;

#[async_trait::async_trait]
impl DocumentReader for FixedReader {
    async fn read_text(&self, path: &Path) -> Result<String, DocumentError> {
        Ok(format!("contents of {}", path.display()))
    }
}

fn engine() -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let handle = EngineHandle::with_services(
        Arc::new(EchoClient),
        Arc::new(FixedReader),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .unwrap();
    (handle, rx)
}

#[test]
fn chat_completion_is_reported_with_its_request_id() {
    let (engine, events) = engine();
    engine.post_chat(
        7,
        ChatRequest {
            client_docs_text: "DOC".to_string(),
            user_question: "q".to_string(),
            history: Vec::new(),
        },
    );

    match events.recv_timeout(Duration::from_secs(5)).unwrap() {
        EngineEvent::ChatCompleted { request_id, result } => {
            assert_eq!(request_id, 7);
            assert_eq!(result.unwrap(), "q (0 turns, docs=DOC)");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn document_read_is_reported_with_its_path() {
    let (engine, events) = engine();
    engine.read_document("permis.txt");

    match events.recv_timeout(Duration::from_secs(5)).unwrap() {
        EngineEvent::DocumentLoaded { path, result } => {
            assert_eq!(path, PathBuf::from("permis.txt"));
            assert_eq!(result.unwrap(), "contents of permis.txt");
        }
        other => panic!("unexpected event {other:?}"),
    }
}
