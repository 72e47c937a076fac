//! Session configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an
//! empty object (or no file at all) is a valid configuration.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::source::{CachePolicy, DEFAULT_SOURCE_URL};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    /// URL or file path of the record feed
    #[serde(default = "default_source")]
    pub source: String,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Seconds a fetched snapshot stays fresh
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,

    /// Seconds of disuse before a cached snapshot is dropped
    #[serde(default = "default_evict_after_secs")]
    pub evict_after_secs: u64,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default tracing filter; `RUST_LOG` overrides it
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE_URL.to_string()
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}
fn default_stale_after_secs() -> u64 {
    300
} // 5 minutes
fn default_evict_after_secs() -> u64 {
    600
} // 10 minutes
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            page_size: default_page_size(),
            stale_after_secs: default_stale_after_secs(),
            evict_after_secs: default_evict_after_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            log_filter: default_log_filter(),
        }
    }
}

impl ViewConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: ViewConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.source.trim().is_empty() {
            return Err(ConfigError::Invalid("source must not be empty".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".into()));
        }
        if self.evict_after_secs < self.stale_after_secs {
            return Err(ConfigError::Invalid(format!(
                "evict_after_secs ({}) must be >= stale_after_secs ({})",
                self.evict_after_secs, self.stale_after_secs
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    /// Validated page size
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::from_secs(self.stale_after_secs, self.evict_after_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
