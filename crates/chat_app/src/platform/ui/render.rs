use chat_core::ChatViewModel;

use super::constants::MESSAGES;
use super::UiCommand;

/// Turns view models into surface commands, appending only what is new.
#[derive(Debug, Default)]
pub struct Renderer {
    rendered_messages: usize,
    last_status: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &ChatViewModel) -> Vec<UiCommand> {
        let mut cmds: Vec<UiCommand> = view
            .messages
            .iter()
            .skip(self.rendered_messages)
            .map(|entry| UiCommand::AppendMessage {
                control_id: MESSAGES,
                role: entry.role,
                text: entry.text.clone(),
            })
            .collect();
        self.rendered_messages = view.messages.len();

        let status = status_text(view);
        if self.last_status.as_deref() != Some(status.as_str()) {
            self.last_status = Some(status.clone());
            cmds.push(UiCommand::SetStatus { text: status });
        }

        cmds
    }
}

fn status_text(view: &ChatViewModel) -> String {
    let activity = match (view.awaiting_reply, view.queued_questions) {
        (false, _) => "Prêt".to_string(),
        (true, 0) => "En attente de la réponse".to_string(),
        (true, queued) => format!("En attente de la réponse, {queued} en file"),
    };
    let document = match &view.selected_document {
        Some(path) => format!(
            "Document : {} ({} car. chargés)",
            path.display(),
            view.document_chars
        ),
        None => format!("Document : {} car. chargés", view.document_chars),
    };
    format!(
        "{activity} | Échanges : {} | {document}",
        view.history_len
    )
}
