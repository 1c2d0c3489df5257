use std::path::PathBuf;
use std::sync::Once;

use chat_core::{
    update, ChatState, DocumentOutcome, Effect, Msg, UPLOAD_ACKNOWLEDGMENT,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(widget_logging::initialize_for_tests);
}

fn load(state: ChatState, text: &str) -> (ChatState, Vec<Effect>) {
    update(
        state,
        Msg::DocumentLoaded {
            result: DocumentOutcome::Loaded(text.to_string()),
        },
    )
}

fn first_request_docs(effects: &[Effect]) -> Option<String> {
    effects.iter().find_map(|effect| match effect {
        Effect::PostChat { request, .. } => Some(request.client_docs_text.clone()),
        _ => None,
    })
}

#[test]
fn upload_without_selection_is_noop() {
    init_logging();
    let (state, _) = load(ChatState::new(), "earlier");
    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(effects.is_empty());
    assert_eq!(state.client_docs_text(), "earlier");
}

#[test]
fn upload_reads_the_selected_file() {
    init_logging();
    let path = PathBuf::from("carte_grise.txt");
    let (state, _) = update(ChatState::new(), Msg::DocumentSelected(Some(path.clone())));
    let (_state, effects) = update(state, Msg::UploadClicked);

    assert_eq!(effects, vec![Effect::ReadDocument { path }]);
}

#[test]
fn pending_reads_are_tracked_until_loaded() {
    init_logging();
    let (state, _) = update(
        ChatState::new(),
        Msg::DocumentSelected(Some(PathBuf::from("permis.txt"))),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    assert_eq!(state.view().reading_documents, 1);
    assert!(!state.view().is_idle());

    let (state, _) = update(
        state,
        Msg::DocumentLoaded {
            result: DocumentOutcome::Failed {
                reason: "gone".to_string(),
            },
        },
    );
    assert_eq!(state.view().reading_documents, 0);
    assert!(state.view().is_idle());
}

#[test]
fn loaded_document_replaces_buffer_and_acknowledges() {
    init_logging();
    let (state, _) = load(ChatState::new(), "first");
    let (mut state, effects) = load(state, "DOC");

    assert_eq!(state.client_docs_text(), "DOC");
    assert_eq!(state.view().document_chars, 3);
    assert_eq!(
        effects,
        vec![Effect::Acknowledge {
            text: UPLOAD_ACKNOWLEDGMENT.to_string()
        }]
    );
    assert!(state.consume_dirty());
}

#[test]
fn failed_read_keeps_buffer_and_stays_silent() {
    init_logging();
    let (mut state, _) = load(ChatState::new(), "DOC");
    state.consume_dirty();

    let (mut state, effects) = update(
        state,
        Msg::DocumentLoaded {
            result: DocumentOutcome::Failed {
                reason: "invalid utf-8".to_string(),
            },
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.client_docs_text(), "DOC");
    assert!(!state.consume_dirty());
}

#[test]
fn requests_carry_the_current_document_text() {
    init_logging();
    let (state, _) = update(ChatState::new(), Msg::InputChanged("q1".to_string()));
    let (state, effects) = update(state, Msg::SendClicked);
    assert_eq!(first_request_docs(&effects).as_deref(), Some(""));

    let (state, _) = update(
        state,
        Msg::ChatCompleted {
            request_id: 1,
            result: chat_core::ChatOutcome::Reply("r1".to_string()),
        },
    );
    let (state, _) = load(state, "DOC");
    let (state, _) = update(state, Msg::InputChanged("q2".to_string()));
    let (_state, effects) = update(state, Msg::SendClicked);
    assert_eq!(first_request_docs(&effects).as_deref(), Some("DOC"));
}
