use std::path::Path;

use widget_logging::{chat_debug, chat_warn};

use crate::{ChatOutcome, ChatState, DocumentOutcome, Effect, Msg, Role, UPLOAD_ACKNOWLEDGMENT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatState, msg: Msg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SendClicked => {
            let question = state.input().trim().to_owned();
            if question.is_empty() {
                return (state, Vec::new());
            }
            state.push_message(Role::User, question.clone());
            state.clear_input();
            state.submit(question).into_iter().collect()
        }
        Msg::ChatCompleted {
            request_id,
            result,
        } => {
            let Some(question) = state.complete(request_id) else {
                chat_warn!("Ignoring completion for unknown request {}", request_id);
                return (state, Vec::new());
            };
            match result {
                ChatOutcome::Reply(response) => {
                    state.push_message(Role::Bot, response.clone());
                    state.push_turn(question, response);
                }
                ChatOutcome::Failed { reason } => {
                    chat_warn!("Chat request {} failed: {}", request_id, reason);
                    state.push_message(Role::Notice, format!("La requête a échoué : {reason}"));
                }
            }
            state.dispatch_next().into_iter().collect()
        }
        Msg::DocumentSelected(path) => {
            state.select_document(path);
            Vec::new()
        }
        Msg::UploadClicked => match state.selected_document().map(Path::to_path_buf) {
            Some(path) => {
                state.begin_document_read();
                vec![Effect::ReadDocument { path }]
            }
            None => {
                chat_debug!("Upload clicked without a selected document");
                Vec::new()
            }
        },
        Msg::DocumentLoaded { result } => {
            state.finish_document_read();
            match result {
                DocumentOutcome::Loaded(text) => {
                    state.replace_client_docs(text);
                    vec![Effect::Acknowledge {
                        text: UPLOAD_ACKNOWLEDGMENT.to_string(),
                    }]
                }
                DocumentOutcome::Failed { reason } => {
                    chat_warn!("Client document could not be read: {}", reason);
                    Vec::new()
                }
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
