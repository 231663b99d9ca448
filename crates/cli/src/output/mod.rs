//! Output formatting utilities
//!
//! This module provides the formatter used by the shell for prompts,
//! command output, and colored success/error messages.

mod formatter;

pub use formatter::Formatter;

/// Output configuration derived from CLI flags and the `[shell]` settings
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Disable colored output
    pub no_color: bool,
}
