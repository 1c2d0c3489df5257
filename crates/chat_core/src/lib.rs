//! Chat widget core: pure controller state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{ChatTurnRequest, Effect};
pub use msg::{ChatOutcome, DocumentOutcome, Msg};
pub use state::{ChatState, MessageEntry, RequestId, Role, Turn, UPLOAD_ACKNOWLEDGMENT};
pub use update::update;
pub use view_model::ChatViewModel;
