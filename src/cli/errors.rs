//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code, except
//! inside a session, where a bad command is reported and skipped.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::source::FetchError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub fn invalid_command(msg: impl Into<String>) -> Self {
        Self::InvalidCommand(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "LOANVIEW_CLI_CONFIG_ERROR",
            Self::Fetch(err) => err.code(),
            Self::Io(_) => "LOANVIEW_CLI_IO_ERROR",
            Self::Json(_) => "LOANVIEW_CLI_JSON_ERROR",
            Self::InvalidCommand(_) => "LOANVIEW_CLI_INVALID_COMMAND",
            Self::Runtime(_) => "LOANVIEW_CLI_RUNTIME_ERROR",
        }
    }
}
