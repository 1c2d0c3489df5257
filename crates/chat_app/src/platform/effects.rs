use std::sync::mpsc;
use std::sync::Arc;

use chat_core::{ChatOutcome, ChatTurnRequest, DocumentOutcome, Effect, Msg};
use chat_engine::{
    ChatRequest, EngineEvent, EngineHandle, EngineSettings, EventSink, FailureKind, HistoryEntry,
};
use widget_logging::{chat_info, chat_warn, excerpt};

use super::app::Inbox;
use super::ui::UiCommand;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EngineSettings, inbox: mpsc::Sender<Inbox>) -> std::io::Result<Self> {
        let engine = EngineHandle::new(settings, inbox_sink(inbox))?;
        Ok(Self { engine })
    }

    #[cfg(test)]
    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Hands IO effects to the engine and returns the ones the surface shows.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<UiCommand> {
        let mut ui = Vec::new();
        for effect in effects {
            match effect {
                Effect::PostChat {
                    request_id,
                    request,
                } => {
                    chat_info!(
                        "PostChat request_id={} question={:?}",
                        request_id,
                        excerpt(&request.user_question, 80)
                    );
                    self.engine.post_chat(request_id, to_wire(request));
                }
                Effect::ReadDocument { path } => {
                    chat_info!("ReadDocument path={:?}", path);
                    self.engine.read_document(path);
                }
                Effect::Acknowledge { text } => ui.push(UiCommand::ShowAlert { text }),
            }
        }
        ui
    }
}

fn to_wire(request: ChatTurnRequest) -> ChatRequest {
    ChatRequest {
        client_docs_text: request.client_docs_text,
        user_question: request.user_question,
        history: request
            .history
            .into_iter()
            .map(|turn| HistoryEntry {
                question: turn.question,
                response: turn.response,
            })
            .collect(),
    }
}

/// Feeds engine completions back into the app's single dispatch queue.
pub fn inbox_sink(inbox: mpsc::Sender<Inbox>) -> Arc<dyn EventSink> {
    Arc::new(InboxSink { inbox })
}

struct InboxSink {
    inbox: mpsc::Sender<Inbox>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.inbox.send(Inbox::Msg(map_event(event)));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ChatCompleted { request_id, result } => Msg::ChatCompleted {
            request_id,
            result: match result {
                Ok(text) => ChatOutcome::Reply(text),
                Err(err) => {
                    chat_warn!("Chat request {} failed: {}", request_id, err);
                    ChatOutcome::Failed {
                        reason: describe_failure(&err.kind),
                    }
                }
            },
        },
        EngineEvent::DocumentLoaded { path, result } => Msg::DocumentLoaded {
            result: match result {
                Ok(text) => DocumentOutcome::Loaded(text),
                Err(err) => {
                    chat_warn!("Reading {:?} failed: {}", path, err);
                    DocumentOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            },
        },
    }
}

/// User-facing wording for a failed chat request.
fn describe_failure(kind: &FailureKind) -> String {
    match kind {
        FailureKind::InvalidUrl => "adresse du serveur invalide".to_string(),
        FailureKind::Encoding => "requête impossible à encoder".to_string(),
        FailureKind::HttpStatus(code) => format!("le serveur a répondu {code}"),
        FailureKind::Timeout => "délai de réponse dépassé".to_string(),
        FailureKind::TooLarge { .. } => "réponse trop volumineuse".to_string(),
        FailureKind::MalformedResponse => "réponse du serveur illisible".to_string(),
        FailureKind::Network => "serveur injoignable".to_string(),
    }
}
