//! Exit code definitions for rsh
//!
//! The shell itself always returns to the prompt after a failed command, so
//! only startup failures, fatal input errors and cancellation reach the exit
//! status.

/// Exit codes for the rsh binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Shell ended through `q` or end of input
    Success = 0,

    /// General/unspecified error, including fatal input read failures
    GeneralError = 1,

    /// Missing or invalid configuration
    UsageError = 2,

    /// Storage endpoint unreachable at startup
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Shell stopped by SIGTERM or Ctrl+C
    Interrupted = 130,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Shell exited normally",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments or configuration",
            Self::NetworkError => "Network error",
            Self::AuthError => "Authentication or permission failure",
            Self::Interrupted => "Shell interrupted",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl From<&rsh_core::Error> for ExitCode {
    fn from(err: &rsh_core::Error) -> Self {
        use rsh_core::Error;

        match err {
            Error::Config(_) | Error::TomlParse(_) | Error::InvalidUrl(_) | Error::InvalidName(_) => {
                Self::UsageError
            }
            Error::Network(_) => Self::NetworkError,
            Error::Auth(_) => Self::AuthError,
            Error::Interrupted => Self::Interrupted,
            Error::Io(_) | Error::NotFound(_) | Error::Conflict(_) | Error::General(_) => {
                Self::GeneralError
            }
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
