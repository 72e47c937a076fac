//! Facet values for categorical selectors
//!
//! Facets are always computed over the full snapshot, never the filtered
//! view, so a selector keeps offering every option.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::record::{Field, LoanRecord, ValueRef};

/// Sorted distinct text values of a field.
///
/// Only text values are offered: categorical filters match text exactly,
/// so a numeric value could never be selected successfully.
pub fn facet_values(records: &[LoanRecord], field: &Field) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| match r.get(field) {
            Some(ValueRef::Text(s)) => Some(s),
            _ => None,
        })
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Headline counts shown above the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacetSummary {
    /// Records in the snapshot
    pub total_loans: usize,
    /// Records passing the current filters
    pub filtered_loans: usize,
    /// Distinct property states across the snapshot
    pub states_covered: usize,
}

impl FacetSummary {
    pub fn compute(records: &[LoanRecord], filtered_loans: usize) -> Self {
        Self {
            total_loans: records.len(),
            filtered_loans,
            states_covered: facet_values(records, &Field::PropertyState).len(),
        }
    }
}
