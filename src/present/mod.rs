//! Presentation helpers
//!
//! Turns a derived view into something a terminal or another program can
//! consume: a plain-text table or a JSON report. Nothing here feeds back
//! into the view state.

mod format;
mod report;
mod table;

pub use format::{format_currency, truncate, CITY_WIDTH, ID_WIDTH, PROPERTY_TYPE_WIDTH};
pub use report::{ErrorReport, RowReport, SortReport, ViewReport};
pub use table::render_table;

use crate::record::{Field, LoanRecord, ValueRef};

/// Table columns in display order, with header labels
pub const COLUMNS: [(Field, &str); 10] = [
    (Field::LoanId, "Loan ID"),
    (Field::LoanProgram, "Program"),
    (Field::PropertyState, "State"),
    (Field::PropertyCity, "City"),
    (Field::OwnershipType, "Ownership"),
    (Field::PropertyType, "Property Type"),
    (Field::LoanStatus, "Status"),
    (Field::OriginalInterestRate, "Rate"),
    (Field::PropertyOrigValue, "Original Value"),
    (Field::OriginalLoanBal, "Loan Balance"),
];

/// Visual class of a loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    /// `PAID_CLOSED`
    Closed,
    /// `ACTIVE`
    Active,
    /// Anything else, including a missing status
    Attention,
}

impl StatusTone {
    pub fn classify(status: Option<ValueRef<'_>>) -> Self {
        match status.and_then(|v| v.as_text()) {
            Some("PAID_CLOSED") => StatusTone::Closed,
            Some("ACTIVE") => StatusTone::Active,
            _ => StatusTone::Attention,
        }
    }

    /// One-character marker for plain-text output
    pub fn marker(&self) -> char {
        match self {
            StatusTone::Closed => '+',
            StatusTone::Active => '~',
            StatusTone::Attention => '!',
        }
    }
}

/// Display text of one table cell
pub fn format_cell(record: &LoanRecord, field: &Field) -> String {
    let value = record.get(field);
    match field {
        Field::LoanId => truncate(record.id.as_str(), ID_WIDTH),
        Field::PropertyCity => truncate(&text_of(value), CITY_WIDTH),
        Field::PropertyType => truncate(&text_of(value), PROPERTY_TYPE_WIDTH),
        Field::PropertyOrigValue | Field::OriginalLoanBal => format_currency(value),
        Field::LoanStatus => format!("{} {}", StatusTone::classify(value).marker(), text_of(value)),
        _ => text_of(value),
    }
}

fn text_of(value: Option<ValueRef<'_>>) -> String {
    match value {
        None | Some(ValueRef::Null) => String::new(),
        Some(v) => v.to_text(),
    }
}
