use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chat_core::{update, ChatState, Msg};
use widget_logging::{chat_debug, chat_info, chat_warn};

use super::config::{self, Cli};
use super::effects::EffectRunner;
use super::input::{parse_line, HostEvent, HELP};
use super::logging;
use super::ui::constants::{BUTTON_SEND, BUTTON_UPLOAD, INPUT_DOCUMENT, INPUT_QUESTION};
use super::ui::render::Renderer;
use super::ui::terminal::TerminalSurface;

/// Everything the dispatch loop consumes, in arrival order.
pub enum Inbox {
    Host(HostEvent),
    Msg(Msg),
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(cli.log, cli.log_level);
    let config = config::resolve(&cli)?;
    chat_info!("Chat widget talking to {}", config.base_url);

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let runner = EffectRunner::new(config.engine_settings(), inbox_tx.clone())
        .context("failed to start the chat engine")?;
    spawn_stdin_reader(inbox_tx)?;

    let mut widget = ChatWidget::new(runner, TerminalSurface::new(io::stdout().lock()));
    widget.start()?;
    run_loop(&mut widget, &inbox_rx)?;

    chat_info!("Chat widget closed");
    Ok(())
}

/// Feeds inbox events through the widget until the user quits, or until input
/// has ended and nothing is outstanding.
fn run_loop<W: Write>(
    widget: &mut ChatWidget<W>,
    inbox: &mpsc::Receiver<Inbox>,
) -> io::Result<()> {
    let mut input_closed = false;
    while let Ok(event) = inbox.recv() {
        match event {
            Inbox::Host(HostEvent::CloseRequested) => break,
            Inbox::Host(HostEvent::InputClosed) => {
                chat_debug!("Input closed; waiting for outstanding replies");
                input_closed = true;
            }
            Inbox::Host(event) => {
                if let Some(msg) = map_host_event(event) {
                    widget.dispatch(msg)?;
                }
            }
            Inbox::Msg(msg) => widget.dispatch(msg)?,
        }
        if input_closed && widget.is_idle() {
            break;
        }
    }
    Ok(())
}

fn spawn_stdin_reader(inbox: mpsc::Sender<Inbox>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        chat_warn!("Failed to read terminal input: {}", err);
                        break;
                    }
                };
                for event in parse_line(&line) {
                    if inbox.send(Inbox::Host(event)).is_err() {
                        return;
                    }
                }
            }
            let _ = inbox.send(Inbox::Host(HostEvent::InputClosed));
        })?;
    Ok(())
}

fn map_host_event(event: HostEvent) -> Option<Msg> {
    match event {
        HostEvent::InputTextChanged { control_id, text } if control_id == INPUT_QUESTION => {
            Some(Msg::InputChanged(text))
        }
        HostEvent::ButtonClicked { control_id } if control_id == BUTTON_SEND => {
            Some(Msg::SendClicked)
        }
        HostEvent::FileSelected { control_id, path } if control_id == INPUT_DOCUMENT => {
            Some(Msg::DocumentSelected(path))
        }
        HostEvent::ButtonClicked { control_id } if control_id == BUTTON_UPLOAD => {
            Some(Msg::UploadClicked)
        }
        other => {
            chat_debug!("Unhandled host event {:?}", other);
            None
        }
    }
}

/// One widget instance: controller state plus the surface it renders to.
struct ChatWidget<W: Write> {
    state: ChatState,
    runner: EffectRunner,
    renderer: Renderer,
    surface: TerminalSurface<W>,
}

impl<W: Write> ChatWidget<W> {
    fn new(runner: EffectRunner, surface: TerminalSurface<W>) -> Self {
        Self {
            state: ChatState::new(),
            runner,
            renderer: Renderer::new(),
            surface,
        }
    }

    fn start(&mut self) -> io::Result<()> {
        self.surface.banner(HELP)?;
        let view = self.state.view();
        self.surface.apply(self.renderer.render(&view))?;
        self.surface.prompt()
    }

    fn is_idle(&self) -> bool {
        self.state.view().is_idle()
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let alerts = self.runner.run(effects);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        if !was_dirty && alerts.is_empty() {
            return Ok(());
        }
        if was_dirty {
            self.surface.apply(self.renderer.render(&view))?;
        }
        self.surface.apply(alerts)?;
        self.surface.prompt()
    }
}
