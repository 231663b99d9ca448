//! Error types for rsh-core
//!
//! Provides a unified error type shared by the storage adapter and the shell.

use thiserror::Error;

/// Result type alias for rsh-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for rsh-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty or malformed bucket/object name
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication or permission error
    #[error("Access denied: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict error (bucket exists, bucket not empty)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Network or other provider-side error
    #[error("Network error: {0}")]
    Network(String),

    /// Operation interrupted by the cancellation signal
    #[error("Interrupted")]
    Interrupted,

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Whether this error was raised by the storage provider rather than locally
    pub const fn is_provider(&self) -> bool {
        matches!(
            self,
            Error::Auth(_) | Error::NotFound(_) | Error::Conflict(_) | Error::Network(_)
        )
    }
}
