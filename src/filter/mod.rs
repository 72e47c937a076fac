//! Filter engine
//!
//! Reduces a record set to the records matching a free-text query and
//! zero or more categorical equality filters.
//!
//! # Matching rules
//!
//! - Free text: empty query matches everything; otherwise any field's
//!   lower-cased text form must contain the lower-cased query
//! - Categorical: every constrained field must hold exactly the selected
//!   text (case-sensitive); `all` means unconstrained
//! - Search and categorical filters combine with AND
//!
//! Filtering is order-preserving and has no error conditions. A missing
//! field fails the match.

mod facets;

pub use facets::{facet_values, FacetSummary};

use std::collections::BTreeMap;
use std::fmt;

use crate::record::{Field, LoanRecord, ValueRef};

/// Sentinel selection value meaning "no constraint"
pub const ALL: &str = "all";

/// The selected value of one categorical filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Parses a selector value; `"all"` is the unconstrained sentinel
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Value(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Exact, case-sensitive equality against a text value
    pub fn matches(&self, value: Option<ValueRef<'_>>) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(expected) => {
                matches!(value, Some(ValueRef::Text(actual)) if actual == expected)
            }
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Value(v) => f.write_str(v),
        }
    }
}

/// Search text plus categorical selections
///
/// `All` selections are never stored, so two states that constrain the
/// same fields to the same values always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search_text: String,
    categorical: BTreeMap<Field, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.set_search_text(text);
        self
    }

    pub fn with_filter(mut self, field: impl Into<Field>, selection: impl Into<Selection>) -> Self {
        self.set_filter(field.into(), selection.into());
        self
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Returns true if the text differs from the current one
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.search_text {
            return false;
        }
        self.search_text = text;
        true
    }

    /// Returns true if the effective selection changed
    pub fn set_filter(&mut self, field: Field, selection: Selection) -> bool {
        match selection {
            Selection::All => self.categorical.remove(&field).is_some(),
            Selection::Value(value) => {
                if self.categorical.get(&field) == Some(&value) {
                    return false;
                }
                self.categorical.insert(field, value);
                true
            }
        }
    }

    /// Current selection for a field
    pub fn selection(&self, field: &Field) -> Selection {
        self.categorical
            .get(field)
            .map(|v| Selection::Value(v.clone()))
            .unwrap_or_default()
    }

    /// Constrained fields and their selected values
    pub fn constraints(&self) -> impl Iterator<Item = (&Field, &str)> {
        self.categorical.iter().map(|(f, v)| (f, v.as_str()))
    }

    /// True when every record passes
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty() && self.categorical.is_empty()
    }

    /// Checks one record against search and categorical filters
    pub fn matches(&self, record: &LoanRecord) -> bool {
        let needle = self.search_text.to_lowercase();
        self.matches_categorical(record) && matches_search(record, &needle)
    }

    fn matches_categorical(&self, record: &LoanRecord) -> bool {
        self.categorical.iter().all(|(field, expected)| {
            matches!(record.get(field), Some(ValueRef::Text(actual)) if actual == expected)
        })
    }
}

/// Free-text match; `needle` must already be lower-cased
fn matches_search(record: &LoanRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .fields()
        .any(|(_, value)| value.to_text().to_lowercase().contains(needle))
}

/// Indices of the matching records, in input order
pub fn filter_indices(records: &[LoanRecord], state: &FilterState) -> Vec<usize> {
    if state.is_unconstrained() {
        return (0..records.len()).collect();
    }

    let needle = state.search_text.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| state.matches_categorical(r) && matches_search(r, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Matching records, in input order
pub fn filter<'a, I>(records: I, state: &FilterState) -> Vec<&'a LoanRecord>
where
    I: IntoIterator<Item = &'a LoanRecord>,
{
    let needle = state.search_text.to_lowercase();
    records
        .into_iter()
        .filter(|r| state.matches_categorical(r) && matches_search(r, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loans() -> Vec<LoanRecord> {
        vec![
            LoanRecord::new("a")
                .with("PROPERTY_STATE", "CA")
                .with("PROPERTY_CITY", "San Jose")
                .with("ORIGINAL_LOAN_BAL", 100i64),
            LoanRecord::new("b")
                .with("PROPERTY_STATE", "NY")
                .with("PROPERTY_CITY", "Albany")
                .with("ORIGINAL_LOAN_BAL", 50i64),
            LoanRecord::new("c")
                .with("PROPERTY_STATE", "CA")
                .with("OWNERSHIP_TYPE", "INVESTOR"),
        ]
    }

    fn ids(records: &[&LoanRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_unconstrained_returns_everything() {
        let records = loans();
        assert_eq!(filter(&records, &FilterState::new()).len(), 3);
        assert_eq!(filter_indices(&records, &FilterState::new()), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_input() {
        let state = FilterState::new().with_search("x").with_filter("PROPERTY_STATE", "CA");
        assert!(filter(&[], &state).is_empty());
        assert!(filter_indices(&[], &state).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = loans();
        let hits = filter(&records, &FilterState::new().with_search("san JOSE"));
        assert_eq!(ids(&hits), vec!["a"]);

        let hits = filter(&records, &FilterState::new().with_search("invest"));
        assert_eq!(ids(&hits), vec!["c"]);
    }

    #[test]
    fn test_search_matches_number_text() {
        let records = loans();
        let hits = filter(&records, &FilterState::new().with_search("10"));
        assert_eq!(ids(&hits), vec!["a"]);

        // 100 renders as "100", never "100.0"
        let hits = filter(&records, &FilterState::new().with_search(".0"));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_search_matches_id() {
        let records = loans();
        let hits = filter(&records, &FilterState::new().with_search("B"));
        assert_eq!(ids(&hits), vec!["b"]);
    }

    #[test]
    fn test_categorical_is_exact_and_case_sensitive() {
        let records = loans();
        let hits = filter(&records, &FilterState::new().with_filter("PROPERTY_STATE", "CA"));
        assert_eq!(ids(&hits), vec!["a", "c"]);

        let hits = filter(&records, &FilterState::new().with_filter("PROPERTY_STATE", "ca"));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_missing_field_fails_categorical() {
        let records = loans();
        let hits = filter(
            &records,
            &FilterState::new().with_filter("OWNERSHIP_TYPE", "INVESTOR"),
        );
        assert_eq!(ids(&hits), vec!["c"]);
    }

    #[test]
    fn test_search_and_categorical_combine_with_and() {
        let records = loans();
        let state = FilterState::new()
            .with_search("albany")
            .with_filter("PROPERTY_STATE", "CA");
        assert!(filter(&records, &state).is_empty());

        let state = FilterState::new()
            .with_search("san")
            .with_filter("PROPERTY_STATE", "CA");
        assert_eq!(ids(&filter(&records, &state)), vec!["a"]);
    }

    #[test]
    fn test_all_selection_removes_constraint() {
        let mut state = FilterState::new().with_filter("PROPERTY_STATE", "CA");
        assert!(state.set_filter(Field::PropertyState, Selection::parse("all")));
        assert!(state.is_unconstrained());
        assert_eq!(state, FilterState::new());
        assert!(!state.set_filter(Field::PropertyState, Selection::All));
    }

    #[test]
    fn test_setters_report_changes() {
        let mut state = FilterState::new();
        assert!(state.set_search_text("ca"));
        assert!(!state.set_search_text("ca"));
        assert!(state.set_filter(Field::PropertyState, Selection::parse("NY")));
        assert!(!state.set_filter(Field::PropertyState, Selection::parse("NY")));
        assert_eq!(
            state.selection(&Field::PropertyState),
            Selection::Value("NY".to_string())
        );
        assert_eq!(state.selection(&Field::OwnershipType), Selection::All);
    }

    #[test]
    fn test_indices_and_records_agree() {
        let records = loans();
        let state = FilterState::new().with_search("a");
        let by_index: Vec<&LoanRecord> = filter_indices(&records, &state)
            .into_iter()
            .map(|i| &records[i])
            .collect();
        assert_eq!(by_index, filter(&records, &state));
    }
}
