pub mod constants;
pub mod render;
pub mod terminal;

use chat_core::Role;

/// Mutations of the host surface, addressed by control id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    AppendMessage {
        control_id: &'static str,
        role: Role,
        text: String,
    },
    SetStatus {
        text: String,
    },
    ShowAlert {
        text: String,
    },
}
