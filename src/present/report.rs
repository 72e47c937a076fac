//! JSON view report
//!
//! One report per derived view. Records are emitted with their wire
//! field names so the output can be fed back in as a record file.

use serde::Serialize;

use super::StatusTone;
use crate::pagination::{PagePosition, PageWindow};
use crate::record::{Field, LoanRecord};
use crate::sort::SortDirection;
use crate::view::DerivedView;

/// Machine-readable form of a derived view
#[derive(Debug, Clone, Serialize)]
pub struct ViewReport<'a> {
    /// `loading`, `failed` or `ready`
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
    pub no_matches: bool,
    pub page: PagePosition,
    pub window: PageWindow,
    pub filtered_count: usize,
    pub total_records: usize,
    pub sort: SortReport<'a>,
    pub rows: Vec<RowReport<'a>>,
}

/// Fetch failure as shown to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortReport<'a> {
    pub field: Option<&'a str>,
    pub direction: SortDirection,
}

/// One record plus its status tone
#[derive(Debug, Clone, Serialize)]
pub struct RowReport<'a> {
    pub tone: StatusTone,
    pub record: &'a LoanRecord,
}

impl<'a> ViewReport<'a> {
    pub fn new(view: &'a DerivedView<'_>) -> Self {
        Self {
            status: view.status.as_str(),
            error: view.error().map(|err| ErrorReport {
                code: err.code(),
                message: err.to_string(),
            }),
            no_matches: view.is_no_matches(),
            page: view.position,
            window: view.window.clone(),
            filtered_count: view.filtered_count,
            total_records: view.total_records,
            sort: SortReport {
                field: view.sort.field().map(Field::as_str),
                direction: view.sort.direction(),
            },
            rows: view
                .rows
                .iter()
                .map(|&record| RowReport {
                    tone: StatusTone::classify(record.get(&Field::LoanStatus)),
                    record,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
