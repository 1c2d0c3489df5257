use std::path::PathBuf;

use crate::MessageEntry;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub messages: Vec<MessageEntry>,
    pub input: String,
    pub selected_document: Option<PathBuf>,
    /// Length of the client document buffer, in characters.
    pub document_chars: usize,
    pub history_len: usize,
    pub awaiting_reply: bool,
    pub queued_questions: usize,
    /// Document reads issued and not yet completed.
    pub reading_documents: usize,
    pub dirty: bool,
}

impl ChatViewModel {
    /// No reply, queued question or document read is outstanding.
    pub fn is_idle(&self) -> bool {
        !self.awaiting_reply && self.queued_questions == 0 && self.reading_documents == 0
    }
}
