//! Read-eval loop
//!
//! Reads a line, splits it into a command name and its parameter, and runs
//! the matching handler. Unknown names fall back to the help command.

use std::sync::Arc;

use rsh_core::{Error, Result};
use tracing::{debug, info};

use super::{Flow, HELP_COMMAND, Session};

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplExit {
    /// A handler asked to stop
    Quit,
    /// The cancellation token fired
    Cancelled,
    /// Input was closed
    EndOfInput,
}

/// Split a line into `(command, param)` at its first space, trimming both
pub fn parse_line(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(' ') {
        Some((name, param)) => (name.trim(), param.trim()),
        None => (line, ""),
    }
}

/// Interactive loop over a [`Session`]
pub struct Repl {
    session: Session,
}

impl Repl {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until a handler stops the loop, input ends, or cancellation fires
    ///
    /// Cancellation is checked before every prompt and also interrupts a
    /// pending read. Errors returned here are fatal.
    pub async fn run(&mut self) -> Result<ReplExit> {
        loop {
            if self.session.is_cancelled() {
                info!("Cancellation requested, leaving shell");
                return Ok(ReplExit::Cancelled);
            }

            let prompt = self.session.prompt_text();
            self.session.out().prompt(&prompt);

            let line = match self.session.read_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("End of input");
                    self.session.out().blank_line();
                    return Ok(ReplExit::EndOfInput);
                }
                Err(Error::Interrupted) => {
                    info!("Cancellation requested while waiting for input");
                    return Ok(ReplExit::Cancelled);
                }
                Err(e) => return Err(e),
            };

            match self.dispatch(&line).await {
                Flow::Continue => {}
                Flow::Stop => return Ok(ReplExit::Quit),
                Flow::Fatal(e) => return Err(e),
            }
        }
    }

    /// Run the command named on `line`
    pub async fn dispatch(&mut self, line: &str) -> Flow {
        let (name, param) = parse_line(line);
        if name.is_empty() {
            return Flow::Continue;
        }

        let registry = self.session.registry();
        if let Some(command) = registry.lookup(name) {
            debug!(command = name, param, "Dispatching command");
            let handler = Arc::clone(&command.handler);
            return handler.run(&mut self.session, param).await;
        }

        debug!(command = name, "Unknown command, showing help");
        if let Some(help) = registry.lookup(HELP_COMMAND) {
            let handler = Arc::clone(&help.handler);
            if let Flow::Fatal(e) = handler.run(&mut self.session, "").await {
                return Flow::Fatal(e);
            }
        }
        Flow::Continue
    }
}
