//! Output formatter for the interactive shell
//!
//! Every line the shell prints goes through a [`Formatter`], so the same
//! handlers can write to stdout or to an in-memory buffer.

use std::io::Write;

use console::{Term, style};

use super::OutputConfig;

/// ANSI sequence used to clear the screen when no terminal handle is available
const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[1;1H";

/// Formatter for shell output
pub struct Formatter {
    config: OutputConfig,
    writer: Box<dyn Write + Send>,
    term: Option<Term>,
}

impl Formatter {
    /// Create a formatter writing to an arbitrary sink
    pub fn new(config: OutputConfig, writer: impl Write + Send + 'static) -> Self {
        Self {
            config,
            writer: Box::new(writer),
            term: None,
        }
    }

    /// Create a formatter writing to the process stdout
    pub fn stdout(config: OutputConfig) -> Self {
        Self {
            config,
            writer: Box::new(std::io::stdout()),
            term: Some(Term::stdout()),
        }
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color
    }

    /// Print a line of text
    pub fn println(&mut self, message: &str) {
        self.write(format_args!("{message}\n"));
    }

    /// Print an empty separator line
    pub fn blank_line(&mut self) {
        self.write(format_args!("\n"));
    }

    /// Output a success message
    pub fn success(&mut self, message: &str) {
        if self.colors_enabled() {
            let mark = style("✓").green().force_styling(true);
            self.write(format_args!("{mark} {message}\n"));
        } else {
            self.write(format_args!("✓ {message}\n"));
        }
    }

    /// Output an error message
    pub fn error(&mut self, message: &str) {
        if self.colors_enabled() {
            let mark = style("✗").red().force_styling(true);
            self.write(format_args!("{mark} {message}\n"));
        } else {
            self.write(format_args!("✗ {message}\n"));
        }
    }

    /// Print a prompt without a trailing newline and flush it
    pub fn prompt(&mut self, text: &str) {
        if self.colors_enabled() {
            let text = style(text).cyan().bold().force_styling(true);
            self.write(format_args!("{text}"));
        } else {
            self.write(format_args!("{text}"));
        }
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush output: {e}");
        }
    }

    /// Clear the screen
    pub fn clear_screen(&mut self) {
        if let Some(term) = &self.term {
            if let Err(e) = term.clear_screen() {
                self.error(&format!("Failed to clear screen: {e}"));
            }
            return;
        }
        self.write(format_args!("{CLEAR_SEQUENCE}"));
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = self.writer.write_fmt(args) {
            tracing::warn!("Failed to write output: {e}");
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::stdout(OutputConfig::default())
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("config", &self.config)
            .field("terminal", &self.term.is_some())
            .finish_non_exhaustive()
    }
}
