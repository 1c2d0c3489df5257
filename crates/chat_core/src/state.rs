use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use widget_logging::chat_debug;

use crate::effect::{ChatTurnRequest, Effect};
use crate::view_model::ChatViewModel;

pub type RequestId = u64;

/// Text shown once a client document has been read into the buffer.
pub const UPLOAD_ACKNOWLEDGMENT: &str = "Document client téléversé avec succès !";

/// One completed question/answer round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub question: String,
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
    /// A request that failed; rendered but never added to history.
    Notice,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
            Role::Notice => "notice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatState {
    input: String,
    messages: Vec<MessageEntry>,
    history: Vec<Turn>,
    client_docs_text: String,
    selected_document: Option<PathBuf>,
    in_flight: Option<InFlight>,
    queued: VecDeque<String>,
    reading_documents: usize,
    last_request_id: RequestId,
    dirty: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChatViewModel {
        ChatViewModel {
            messages: self.messages.clone(),
            input: self.input.clone(),
            selected_document: self.selected_document.clone(),
            document_chars: self.client_docs_text.chars().count(),
            history_len: self.history.len(),
            awaiting_reply: self.in_flight.is_some(),
            queued_questions: self.queued.len(),
            reading_documents: self.reading_documents,
            dirty: self.dirty,
        }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn client_docs_text(&self) -> &str {
        &self.client_docs_text
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected_document(&self) -> Option<&Path> {
        self.selected_document.as_deref()
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
        self.dirty = true;
    }

    pub(crate) fn push_message(&mut self, role: Role, text: String) {
        self.messages.push(MessageEntry { role, text });
        self.dirty = true;
    }

    pub(crate) fn push_turn(&mut self, question: String, response: String) {
        self.history.push(Turn { question, response });
    }

    pub(crate) fn select_document(&mut self, path: Option<PathBuf>) {
        self.selected_document = path;
        self.dirty = true;
    }

    pub(crate) fn begin_document_read(&mut self) {
        self.reading_documents += 1;
    }

    pub(crate) fn finish_document_read(&mut self) {
        self.reading_documents = self.reading_documents.saturating_sub(1);
    }

    pub(crate) fn replace_client_docs(&mut self, text: String) {
        self.client_docs_text = text;
        self.dirty = true;
    }

    /// Sends `question` now if the line is free, otherwise parks it behind the
    /// in-flight request.
    pub(crate) fn submit(&mut self, question: String) -> Option<Effect> {
        if self.in_flight.is_some() {
            chat_debug!(
                "Queueing question behind request {:?} (queued={})",
                self.in_flight.as_ref().map(|f| f.request_id),
                self.queued.len() + 1
            );
            self.queued.push_back(question);
            self.dirty = true;
            return None;
        }
        Some(self.dispatch(question))
    }

    /// Takes the in-flight question if `request_id` matches it.
    pub(crate) fn complete(&mut self, request_id: RequestId) -> Option<String> {
        match &self.in_flight {
            Some(current) if current.request_id == request_id => {
                self.in_flight.take().map(|done| done.question)
            }
            _ => None,
        }
    }

    pub(crate) fn dispatch_next(&mut self) -> Option<Effect> {
        let question = self.queued.pop_front()?;
        Some(self.dispatch(question))
    }

    fn dispatch(&mut self, question: String) -> Effect {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let request = ChatTurnRequest {
            client_docs_text: self.client_docs_text.clone(),
            user_question: question.clone(),
            history: self.history.clone(),
        };
        self.in_flight = Some(InFlight {
            request_id,
            question,
        });
        self.dirty = true;
        Effect::PostChat {
            request_id,
            request,
        }
    }
}
