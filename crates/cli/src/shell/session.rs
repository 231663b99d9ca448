//! Shell session
//!
//! A [`Session`] lives as long as the loop and is lent to each handler for
//! the duration of one call. It owns the user's input and output, the single
//! cancellation token of the process, and shared handles to the store and the
//! command registry.

use std::io;
use std::sync::Arc;

use rsh_core::{Error, ObjectStore, Result, ShellSettings};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use super::CommandRegistry;
use crate::output::Formatter;

/// Format of the timestamp shown in the prompt
const PROMPT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// State shared by the loop and every command handler
pub struct Session {
    cancel: CancellationToken,
    store: Arc<dyn ObjectStore>,
    registry: Arc<CommandRegistry>,
    settings: ShellSettings,
    input: Box<dyn AsyncBufRead + Unpin + Send>,
    out: Formatter,
}

impl Session {
    /// Create a session reading stdin and writing stdout
    pub fn new(
        store: Arc<dyn ObjectStore>,
        registry: Arc<CommandRegistry>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            cancel,
            store,
            registry,
            settings: ShellSettings::default(),
            input: Box::new(BufReader::new(tokio::io::stdin())),
            out: Formatter::default(),
        }
    }

    /// Use these shell settings instead of the defaults
    pub fn with_settings(mut self, settings: ShellSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Read commands from `input` instead of stdin
    pub fn with_input(mut self, input: impl AsyncBufRead + Unpin + Send + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Write output through `out` instead of stdout
    pub fn with_output(mut self, out: Formatter) -> Self {
        self.out = out;
        self
    }

    /// The process-wide cancellation token
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Shared handle to the storage backend
    pub fn store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.store)
    }

    /// The command registry, for listing commands
    pub fn registry(&self) -> Arc<CommandRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn out(&mut self) -> &mut Formatter {
        &mut self.out
    }

    /// Prompt text for the next line of input
    pub fn prompt_text(&self) -> String {
        if self.settings.timestamp_prompt {
            let now = jiff::Zoned::now();
            format!("{} > ", now.strftime(PROMPT_TIME_FORMAT))
        } else {
            "> ".to_string()
        }
    }

    /// Read one line of input, without its line terminator
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD. Returns
    /// `Ok(None)` at end of input and `Error::Interrupted` if the
    /// cancellation token fires while waiting.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let read = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Error::Interrupted),
            read = self.input.read_until(b'\n', &mut buf) => read?,
        };

        if read == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Ask a yes/no question until the user answers `y` or `n`
    ///
    /// There is no retry limit. End of input is an error, since no answer
    /// can arrive any more.
    pub async fn confirm(&mut self, message: &str) -> Result<bool> {
        loop {
            self.out.prompt(&format!("{message} (y/n): "));
            let Some(answer) = self.read_line().await? else {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed while waiting for confirmation",
                )));
            };

            match answer.trim() {
                "y" | "Y" => return Ok(true),
                "n" | "N" => return Ok(false),
                _ => self.out.println("Please answer y or n"),
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("commands", &self.registry.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
