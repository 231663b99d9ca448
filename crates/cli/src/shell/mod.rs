//! Interactive shell
//!
//! The read-eval loop, the command registry it dispatches through, and the
//! session every handler receives.

mod registry;
mod repl;
mod session;
mod signal;

pub use registry::{Command, CommandHandler, CommandRegistry, HELP_COMMAND};
pub use repl::{Repl, ReplExit, parse_line};
pub use session::Session;
pub use signal::spawn_termination_watcher;

use rsh_core::Error;

/// What the loop does after a handler returns
#[derive(Debug)]
pub enum Flow {
    /// Show the next prompt
    Continue,
    /// Leave the loop normally
    Stop,
    /// Leave the loop and terminate the process
    Fatal(Error),
}

impl Flow {
    /// Map a failure to read user input onto loop control
    ///
    /// A read interrupted by the cancellation signal is not fatal: the loop
    /// observes the signal itself before the next prompt.
    pub fn from_input_error(err: Error) -> Self {
        match err {
            Error::Interrupted => Flow::Continue,
            err => Flow::Fatal(err),
        }
    }
}
