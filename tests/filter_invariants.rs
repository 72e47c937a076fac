//! Filter engine invariant tests
//!
//! Test Categories:
//! 1. Idempotence
//! 2. Search containment
//! 3. Categorical equality and the "all" sentinel
//! 4. Facets

use loanview::filter::{facet_values, filter, filter_indices, FilterState, Selection};
use loanview::record::{Field, FieldValue, LoanRecord};

fn portfolio() -> Vec<LoanRecord> {
    vec![
        LoanRecord::new("LN-1001")
            .with(Field::LoanProgram, "CONVENTIONAL")
            .with(Field::PropertyState, "CA")
            .with(Field::PropertyCity, "Sacramento")
            .with(Field::OwnershipType, "PRIMARY")
            .with(Field::LoanStatus, "ACTIVE")
            .with(Field::OriginalLoanBal, 350000.0),
        LoanRecord::new("LN-1002")
            .with(Field::LoanProgram, "FHA")
            .with(Field::PropertyState, "NY")
            .with(Field::PropertyCity, "Albany")
            .with(Field::OwnershipType, "INVESTMENT")
            .with(Field::LoanStatus, "PAID_CLOSED")
            .with(Field::OriginalLoanBal, 120500.0),
        LoanRecord::new("LN-1003")
            .with(Field::LoanProgram, "VA")
            .with(Field::PropertyState, "CA")
            .with(Field::PropertyCity, "San Diego")
            .with(Field::OwnershipType, "INVESTMENT")
            .with(Field::LoanStatus, "DELINQUENT")
            .with(Field::OriginalLoanBal, 99000.0),
        LoanRecord::new("LN-1004")
            .with(Field::PropertyState, "TX")
            .with("SERVICER", "Acme Mortgage"),
        LoanRecord::new("LN-1005")
            .with(Field::PropertyState, FieldValue::Null)
            .with(Field::PropertyCity, "Austin")
            .with(Field::OriginalLoanBal, "1,250,000"),
    ]
}

fn filter_states() -> Vec<FilterState> {
    vec![
        FilterState::new(),
        FilterState::new().with_search("ca"),
        FilterState::new().with_search("SAN"),
        FilterState::new().with_search("120500"),
        FilterState::new().with_filter(Field::PropertyState, "CA"),
        FilterState::new()
            .with_filter(Field::PropertyState, "CA")
            .with_filter(Field::OwnershipType, "INVESTMENT"),
        FilterState::new()
            .with_search("a")
            .with_filter(Field::OwnershipType, "all"),
        FilterState::new().with_search("no such text"),
    ]
}

fn ids(records: &[&LoanRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

// =============================================================================
// IDEMPOTENCE
// =============================================================================

/// Test: filter(filter(R, F), F) == filter(R, F) for every state.
#[test]
fn test_filter_is_idempotent() {
    let records = portfolio();
    for state in filter_states() {
        let once = filter(&records, &state);
        let twice = filter(once.iter().copied(), &state);
        assert_eq!(ids(&once), ids(&twice), "state {:?}", state);
    }
}

/// Test: index and reference forms agree and preserve input order.
#[test]
fn test_index_form_matches_reference_form() {
    let records = portfolio();
    for state in filter_states() {
        let by_index: Vec<&LoanRecord> = filter_indices(&records, &state)
            .into_iter()
            .map(|i| &records[i])
            .collect();
        assert_eq!(ids(&by_index), ids(&filter(&records, &state)));

        let indices = filter_indices(&records, &state);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}

// =============================================================================
// SEARCH CONTAINMENT
// =============================================================================

/// Test: included records contain the text in some field; excluded in none.
#[test]
fn test_search_containment() {
    let records = portfolio();
    for text in ["ca", "SAN", "acme", "1,250", "null", "ln-100", "zzz"] {
        let state = FilterState::new().with_search(text);
        let kept = filter_indices(&records, &state);
        let needle = text.to_lowercase();

        for (i, record) in records.iter().enumerate() {
            let contains = record
                .fields()
                .any(|(_, v)| v.to_text().to_lowercase().contains(&needle));
            assert_eq!(kept.contains(&i), contains, "text {:?}, record {}", text, record.id);
        }
    }
}

/// Test: passthrough attributes are searched too.
#[test]
fn test_search_reaches_passthrough_fields() {
    let records = portfolio();
    let state = FilterState::new().with_search("acme");
    assert_eq!(ids(&filter(&records, &state)), vec!["LN-1004"]);
}

/// Test: numbers are searched in their plain string form.
#[test]
fn test_search_numbers_without_fraction() {
    let records = portfolio();
    let state = FilterState::new().with_search("350000");
    assert_eq!(ids(&filter(&records, &state)), vec!["LN-1001"]);

    let state = FilterState::new().with_search("350000.0");
    assert!(filter(&records, &state).is_empty());
}

// =============================================================================
// CATEGORICAL FILTERS
// =============================================================================

/// Test: the CA/NY scenario.
#[test]
fn test_state_filter_scenario() {
    let records = vec![
        LoanRecord::new("a")
            .with(Field::PropertyState, "CA")
            .with(Field::OriginalLoanBal, 100.0),
        LoanRecord::new("b")
            .with(Field::PropertyState, "NY")
            .with(Field::OriginalLoanBal, 50.0),
    ];
    let state = FilterState::new().with_filter(Field::PropertyState, "CA");
    assert_eq!(ids(&filter(&records, &state)), vec!["a"]);
}

/// Test: categorical filters are exact and case-sensitive.
#[test]
fn test_categorical_is_exact() {
    let records = portfolio();
    let state = FilterState::new().with_filter(Field::PropertyState, "ca");
    assert!(filter(&records, &state).is_empty());

    let state = FilterState::new().with_filter(Field::PropertyState, "C");
    assert!(filter(&records, &state).is_empty());
}

/// Test: constraints combine with AND.
#[test]
fn test_categorical_conjunction() {
    let records = portfolio();
    let state = FilterState::new()
        .with_filter(Field::PropertyState, "CA")
        .with_filter(Field::OwnershipType, "INVESTMENT");
    assert_eq!(ids(&filter(&records, &state)), vec!["LN-1003"]);
}

/// Test: "all" removes a constraint rather than matching the text "all".
#[test]
fn test_all_sentinel_clears_constraint() {
    let mut state = FilterState::new().with_filter(Field::PropertyState, "CA");
    assert!(state.set_filter(Field::PropertyState, Selection::parse("all")));
    assert!(state.is_unconstrained());
    assert_eq!(state.selection(&Field::PropertyState), Selection::All);
    assert_eq!(filter_indices(&portfolio(), &state).len(), 5);
}

/// Test: records missing the field, or holding a non-text value, fail the match.
#[test]
fn test_missing_and_null_fail_categorical() {
    let records = portfolio();
    let state = FilterState::new().with_filter(Field::PropertyState, "null");
    assert!(filter(&records, &state).is_empty());

    let state = FilterState::new().with_filter(Field::OwnershipType, "PRIMARY");
    assert_eq!(ids(&filter(&records, &state)), vec!["LN-1001"]);
}

// =============================================================================
// FACETS
// =============================================================================

/// Test: facets list sorted distinct text values over the full set.
#[test]
fn test_facets_sorted_and_distinct() {
    let records = portfolio();
    assert_eq!(facet_values(&records, &Field::PropertyState), vec!["CA", "NY", "TX"]);
    assert_eq!(
        facet_values(&records, &Field::OwnershipType),
        vec!["INVESTMENT", "PRIMARY"]
    );
    assert!(facet_values(&records, &Field::Other("MISSING".into())).is_empty());
}
