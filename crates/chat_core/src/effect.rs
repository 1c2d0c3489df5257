use std::path::PathBuf;

use crate::{RequestId, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post one question to the chat endpoint.
    PostChat {
        request_id: RequestId,
        request: ChatTurnRequest,
    },
    /// Read the whole file as text.
    ReadDocument { path: PathBuf },
    /// Show a blocking acknowledgment to the user.
    Acknowledge { text: String },
}

/// Everything the endpoint needs for one turn, captured at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnRequest {
    pub client_docs_text: String,
    pub user_question: String,
    pub history: Vec<Turn>,
}
