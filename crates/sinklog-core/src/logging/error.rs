//! Logger error types

use thiserror::Error;

/// Errors that can occur while configuring or writing to a logger
#[derive(Error, Debug)]
pub enum LogError {
    /// A setter or constructor rejected its input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No logger is registered for the requested sink kind
    #[error("Unsupported logger kind: {0}")]
    UnsupportedKind(String),

    /// The logger was closed and cannot accept more writes
    #[error("Logger is closed")]
    Closed,

    /// Console or file system error, passed through unchanged
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logger configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LogError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type LogResult<T> = Result<T, LogError>;
