//! Session command protocol
//!
//! Each stdin line is one command, tagged by `op`:
//!
//! ```text
//! {"op": "search", "text": "sacramento"}
//! {"op": "filter", "field": "PROPERTY_STATE", "value": "CA"}
//! {"op": "sort", "field": "ORIGINAL_LOAN_BAL"}
//! {"op": "page", "page": 3}
//! {"op": "next"} / {"op": "prev"} / {"op": "show"}
//! {"op": "facets", "field": "OWNERSHIP_TYPE"}
//! {"op": "summary"} / {"op": "stats"} / {"op": "reload"}
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// One session command
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Replace the search text
    Search { text: String },
    /// Set a categorical filter; "all" clears it
    Filter { field: String, value: String },
    /// Click a column header
    Sort { field: String },
    /// Jump to a page
    Page { page: usize },
    Next,
    Prev,
    /// Re-emit the current view
    Show,
    /// Distinct values of a field
    Facets { field: String },
    /// Headline counts
    Summary,
    /// Pipeline stage run counts
    Stats,
    /// Discard all state and fetch again
    Reload,
}

impl SessionCommand {
    pub fn from_value(value: Value) -> CliResult<Self> {
        serde_json::from_value(value).map_err(|e| CliError::invalid_command(e.to_string()))
    }

    /// True for commands answered with a view report
    pub fn returns_view(&self) -> bool {
        !matches!(
            self,
            SessionCommand::Facets { .. } | SessionCommand::Summary | SessionCommand::Stats
        )
    }
}
