//! CLI module for loanview
//!
//! Provides command-line interface for:
//! - show: one-shot page as a table or JSON report
//! - facets: distinct values of a field
//! - session: newline-delimited JSON commands against a live view

mod args;
mod commands;
mod errors;
mod io;
mod protocol;

pub use args::{parse_filter, parse_sort, Cli, Command, SourceArgs, ViewArgs};
pub use commands::{facets, load_config, run, run_command, run_session, session, show, SessionSource};
pub use errors::{CliError, CliResult};
pub use io::{read_requests, write_error, write_response};
pub use protocol::SessionCommand;
