//! Control ids of the host page the widget is wired to.

pub const MESSAGES: &str = "chatbot-messages";
pub const INPUT_QUESTION: &str = "chatbot-input";
pub const BUTTON_SEND: &str = "chatbot-send";
pub const INPUT_DOCUMENT: &str = "client-docs";
pub const BUTTON_UPLOAD: &str = "upload-docs";

pub const HEADER_TITLE: &str = "🤖 Assurbot";
pub const INPUT_PLACEHOLDER: &str = "Posez votre question...";
