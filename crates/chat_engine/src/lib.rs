//! Chat widget engine: HTTP and file IO for the controller's effects.
mod client;
mod decode;
mod document;
mod engine;
mod types;

pub use client::{ChatClient, ChatSettings, ReqwestChatClient};
pub use decode::{decode_document, DecodeError};
pub use document::{DocumentError, DocumentReader, FsDocumentReader};
pub use engine::{ChannelEventSink, EngineHandle, EngineSettings, EventSink};
pub use types::{
    ChatError, ChatRequest, ChatResponse, EngineEvent, FailureKind, HistoryEntry, RequestId,
};
