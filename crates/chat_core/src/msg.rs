use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question input box.
    InputChanged(String),
    /// User clicked Send.
    SendClicked,
    /// User picked a file in the document picker (`None` clears the selection).
    DocumentSelected(Option<PathBuf>),
    /// User clicked Upload.
    UploadClicked,
    /// Engine completion for a chat request.
    ChatCompleted {
        request_id: crate::RequestId,
        result: ChatOutcome,
    },
    /// Engine completion for a document read.
    DocumentLoaded { result: DocumentOutcome },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Result of one `/chat` round-trip as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Reply(String),
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Loaded(String),
    Failed { reason: String },
}
