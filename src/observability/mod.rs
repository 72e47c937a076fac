//! Observability for loanview
//!
//! Structured logging goes through `tracing`. Each log line carries an
//! `event` field naming one of the typed [`Event`]s.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on the view pipeline
//! 3. Subscriber setup belongs to the binary, never the library

mod events;

pub use events::Event;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr so stdout stays
/// reserved for view output. Calling this twice is harmless.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_tracing("warn");
        init_tracing("debug");
    }

    #[test]
    fn test_bad_filter_falls_back() {
        init_tracing("[[not a filter");
    }
}
