//! Sort engine
//!
//! Orders a record subset by one field and direction using type-aware
//! comparison, and owns the tri-state header click protocol.
//!
//! # Comparison rules
//!
//! - text vs text: locale-aware ordering
//! - number vs number: numeric
//! - anything else: both sides coerced to text, then locale-aware
//!   (a missing value coerces to the empty string)
//!
//! Sorting is stable. An inactive sort returns the input order untouched.

mod collate;
mod merge;

pub use collate::locale_compare;

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::record::{Field, LoanRecord, ValueRef};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    None,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
            SortDirection::None => "none",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a column header shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

/// Selected sort field and direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortState {
    field: Option<Field>,
    direction: SortDirection,
}

impl SortState {
    /// Unsorted: original record order
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn asc(field: impl Into<Field>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<Field>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Descending,
        }
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// A field without a direction (or vice versa) is unsorted
    pub fn is_active(&self) -> bool {
        self.field.is_some() && self.direction != SortDirection::None
    }

    /// Applies a header click.
    ///
    /// Same field cycles ascending → descending → unsorted. A different
    /// field always starts at ascending.
    pub fn click(&mut self, field: Field) {
        if self.field.as_ref() != Some(&field) {
            self.field = Some(field);
            self.direction = SortDirection::Ascending;
            return;
        }

        match self.direction {
            SortDirection::Ascending => self.direction = SortDirection::Descending,
            SortDirection::Descending => {
                self.field = None;
                self.direction = SortDirection::None;
            }
            SortDirection::None => self.direction = SortDirection::Ascending,
        }
    }

    /// Header indicator for a column
    pub fn indicator(&self, field: &Field) -> SortIndicator {
        if !self.is_active() || self.field.as_ref() != Some(field) {
            return SortIndicator::Unsorted;
        }
        match self.direction {
            SortDirection::Ascending => SortIndicator::Ascending,
            SortDirection::Descending => SortIndicator::Descending,
            SortDirection::None => SortIndicator::Unsorted,
        }
    }

    fn compare_records(&self, field: &Field, a: &LoanRecord, b: &LoanRecord) -> Ordering {
        let ordering = compare_values(a.get(field), b.get(field));
        match self.direction {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    }
}

/// Type-aware comparison of two field values
pub fn compare_values(a: Option<ValueRef<'_>>, b: Option<ValueRef<'_>>) -> Ordering {
    match (a, b) {
        (Some(ValueRef::Text(x)), Some(ValueRef::Text(y))) => locale_compare(x, y),
        (Some(ValueRef::Number(x)), Some(ValueRef::Number(y))) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (a, b) => locale_compare(&coerce_text(a), &coerce_text(b)),
    }
}

/// A missing value coerces to `""`, so it sorts ahead of any text ascending
fn coerce_text(value: Option<ValueRef<'_>>) -> String {
    value.map(|v| v.to_text()).unwrap_or_default()
}

/// Reorders indices into `records`. Returns a copy when the sort is inactive.
pub fn sort_indices(records: &[LoanRecord], indices: &[usize], state: &SortState) -> Vec<usize> {
    let mut ordered = indices.to_vec();
    if let (true, Some(field)) = (state.is_active(), state.field()) {
        merge::stable_sort_by(&mut ordered, |&a, &b| {
            state.compare_records(field, &records[a], &records[b])
        });
    }
    ordered
}

/// Returns the subset in sorted order without touching the input
pub fn sort<'a>(subset: &[&'a LoanRecord], state: &SortState) -> Vec<&'a LoanRecord> {
    let mut ordered = subset.to_vec();
    if let (true, Some(field)) = (state.is_active(), state.field()) {
        merge::stable_sort_by(&mut ordered, |a, b| state.compare_records(field, a, b));
    }
    ordered
}
