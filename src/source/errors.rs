//! # Record Source Errors
//!
//! A fetch failure is terminal for the session. The only recovery is a
//! full reload, so errors carry enough text to explain themselves.

use thiserror::Error;

/// Result type for record source operations
pub type FetchResult<T> = Result<T, FetchError>;

/// The record source failed to produce a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, TLS or timeout failure
    #[error("Failed to fetch loan data: {0}")]
    Transport(String),

    /// Source answered with a non-success status
    #[error("Failed to fetch loan data: source responded with status {0}")]
    Status(u16),

    /// Body was not a JSON array of loan records
    #[error("Malformed loan data: {0}")]
    Decode(String),

    /// Local file could not be read
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl FetchError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "FETCH_TRANSPORT",
            FetchError::Status(_) => "FETCH_STATUS",
            FetchError::Decode(_) => "FETCH_DECODE",
            FetchError::Io { .. } => "FETCH_IO",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Transport(err.to_string()),
        }
    }
}
