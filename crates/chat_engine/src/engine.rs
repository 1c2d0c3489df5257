use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use widget_logging::{chat_debug, chat_warn};

use crate::client::{ChatClient, ChatSettings, ReqwestChatClient};
use crate::document::{DocumentReader, FsDocumentReader};
use crate::{ChatRequest, EngineEvent, RequestId};

/// Receives completions from the engine's background runtime.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub chat: ChatSettings,
    /// Upper bound for client documents; `None` reads any size.
    pub max_document_bytes: Option<u64>,
}

enum EngineCommand {
    PostChat {
        request_id: RequestId,
        request: ChatRequest,
    },
    ReadDocument {
        path: PathBuf,
    },
}

/// Runs chat requests and document reads on a background tokio runtime.
///
/// Commands are spawned as independent tasks; completions are reported to
/// the sink in the order they finish.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_services(
            Arc::new(ReqwestChatClient::new(settings.chat)),
            Arc::new(FsDocumentReader::new(settings.max_document_bytes)),
            sink,
        )
    }

    pub fn with_services(
        client: Arc<dyn ChatClient>,
        reader: Arc<dyn DocumentReader>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("chat-engine")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("chat-engine-dispatch".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let reader = reader.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), reader.as_ref(), sink.as_ref(), command)
                            .await;
                    });
                }
                chat_debug!("Engine command channel closed; shutting down runtime");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn post_chat(&self, request_id: RequestId, request: ChatRequest) {
        self.send(EngineCommand::PostChat {
            request_id,
            request,
        });
    }

    pub fn read_document(&self, path: impl Into<PathBuf>) {
        self.send(EngineCommand::ReadDocument { path: path.into() });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            chat_warn!("Engine dispatch thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    client: &dyn ChatClient,
    reader: &dyn DocumentReader,
    sink: &dyn EventSink,
    command: EngineCommand,
) {
    match command {
        EngineCommand::PostChat {
            request_id,
            request,
        } => {
            let result = client.send(request_id, &request).await;
            sink.emit(EngineEvent::ChatCompleted { request_id, result });
        }
        EngineCommand::ReadDocument { path } => {
            let result = reader.read_text(&path).await;
            sink.emit(EngineEvent::DocumentLoaded { path, result });
        }
    }
}
