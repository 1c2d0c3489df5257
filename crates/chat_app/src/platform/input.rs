//! Maps terminal lines onto the host page's controls.

use std::path::PathBuf;

use super::ui::constants::{BUTTON_SEND, BUTTON_UPLOAD, INPUT_DOCUMENT, INPUT_QUESTION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    InputTextChanged {
        control_id: &'static str,
        text: String,
    },
    FileSelected {
        control_id: &'static str,
        path: Option<PathBuf>,
    },
    ButtonClicked {
        control_id: &'static str,
    },
    /// `/quit`: leave at once.
    CloseRequested,
    /// End of input: leave once outstanding replies have been shown.
    InputClosed,
}

pub const HELP: &str = "\
Tapez une question puis Entrée pour l'envoyer.
  /file <chemin>    choisir un document client (/file seul pour effacer)
  /upload [chemin]  téléverser le document choisi
  /quit             quitter";

/// Translates one line of terminal input into host events.
pub fn parse_line(line: &str) -> Vec<HostEvent> {
    let trimmed = line.trim();
    let (command, argument) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command {
        "/quit" | "/exit" => vec![HostEvent::CloseRequested],
        "/file" => vec![select_file(argument)],
        "/upload" if argument.is_empty() => vec![click(BUTTON_UPLOAD)],
        "/upload" => vec![select_file(argument), click(BUTTON_UPLOAD)],
        _ => vec![
            HostEvent::InputTextChanged {
                control_id: INPUT_QUESTION,
                text: line.to_string(),
            },
            click(BUTTON_SEND),
        ],
    }
}

fn select_file(argument: &str) -> HostEvent {
    HostEvent::FileSelected {
        control_id: INPUT_DOCUMENT,
        path: (!argument.is_empty()).then(|| PathBuf::from(argument)),
    }
}

fn click(control_id: &'static str) -> HostEvent {
    HostEvent::ButtonClicked { control_id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_types_and_sends() {
        assert_eq!(
            parse_line("  Quelles garanties ?"),
            vec![
                HostEvent::InputTextChanged {
                    control_id: INPUT_QUESTION,
                    text: "  Quelles garanties ?".to_string(),
                },
                HostEvent::ButtonClicked {
                    control_id: BUTTON_SEND
                },
            ]
        );
    }

    #[test]
    fn blank_line_still_clicks_send() {
        // The controller decides that blank input is a no-op.
        let events = parse_line("   ");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn file_command_selects_and_clears() {
        assert_eq!(
            parse_line("/file docs/carte grise.txt"),
            vec![HostEvent::FileSelected {
                control_id: INPUT_DOCUMENT,
                path: Some(PathBuf::from("docs/carte grise.txt")),
            }]
        );
        assert_eq!(
            parse_line("/file"),
            vec![HostEvent::FileSelected {
                control_id: INPUT_DOCUMENT,
                path: None,
            }]
        );
    }

    #[test]
    fn upload_with_path_selects_then_clicks() {
        assert_eq!(
            parse_line("/upload permis.txt"),
            vec![
                HostEvent::FileSelected {
                    control_id: INPUT_DOCUMENT,
                    path: Some(PathBuf::from("permis.txt")),
                },
                HostEvent::ButtonClicked {
                    control_id: BUTTON_UPLOAD
                },
            ]
        );
        assert_eq!(
            parse_line("/upload"),
            vec![HostEvent::ButtonClicked {
                control_id: BUTTON_UPLOAD
            }]
        );
    }

    #[test]
    fn quit_closes() {
        assert_eq!(parse_line("/quit"), vec![HostEvent::CloseRequested]);
        assert_eq!(parse_line("/exit\n"), vec![HostEvent::CloseRequested]);
    }
}
