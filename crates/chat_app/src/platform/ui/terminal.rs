use std::io::{self, Write};

use chat_core::Role;
use widget_logging::chat_trace;

use super::constants::{HEADER_TITLE, INPUT_PLACEHOLDER};
use super::UiCommand;

/// Text-mode stand-in for the host page.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn banner(&mut self, help: &str) -> io::Result<()> {
        writeln!(self.out, "{HEADER_TITLE}")?;
        writeln!(self.out, "{help}")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn apply(&mut self, commands: impl IntoIterator<Item = UiCommand>) -> io::Result<()> {
        for command in commands {
            match command {
                UiCommand::AppendMessage {
                    control_id,
                    role,
                    text,
                } => {
                    chat_trace!("append {} message to #{}", role.as_str(), control_id);
                    writeln!(self.out, "{} {}", role_prefix(role), text)?;
                }
                UiCommand::SetStatus { text } => {
                    writeln!(self.out, "   [{text}]")?;
                }
                UiCommand::ShowAlert { text } => {
                    writeln!(self.out)?;
                    writeln!(self.out, "*** {text} ***")?;
                    writeln!(self.out)?;
                }
            }
        }
        self.out.flush()
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{INPUT_PLACEHOLDER} > ")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn role_prefix(role: Role) -> &'static str {
    match role {
        Role::User => "Vous     :",
        Role::Bot => "Assurbot :",
        Role::Notice => "(!)      ",
    }
}
