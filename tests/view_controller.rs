//! View controller tests
//!
//! Test Categories:
//! 1. Load states (loading, failed, ready, no matches)
//! 2. Page-reset rule
//! 3. Memoization
//! 4. End-to-end scenarios

use std::num::NonZeroUsize;

use loanview::config::ViewConfig;
use loanview::filter::Selection;
use loanview::pagination::DEFAULT_PAGE_SIZE;
use loanview::record::{Field, LoanRecord, RecordSnapshot};
use loanview::source::{FetchError, StaticRecordSource};
use loanview::view::{load_session, reload, PipelineStats, ViewController, ViewStatus};

fn portfolio(n: usize) -> Vec<LoanRecord> {
    let states = ["CA", "NY", "TX"];
    (0..n)
        .map(|i| {
            LoanRecord::new(format!("LN-{:04}", i))
                .with(Field::PropertyState, states[i % states.len()])
                .with(Field::OwnershipType, if i % 2 == 0 { "PRIMARY" } else { "INVESTMENT" })
                .with(Field::OriginalLoanBal, 1000.0 * ((i * 7) % 50) as f64)
        })
        .collect()
}

fn controller(n: usize) -> ViewController {
    ViewController::with_snapshot(RecordSnapshot::new(portfolio(n)), DEFAULT_PAGE_SIZE)
}

fn page_ids(controller: &mut ViewController) -> Vec<String> {
    controller
        .view()
        .rows
        .iter()
        .map(|r| r.id.to_string())
        .collect()
}

// =============================================================================
// LOAD STATES
// =============================================================================

/// Test: loading is distinct from "no matches".
#[test]
fn test_loading_is_not_zero_results() {
    let mut controller = ViewController::new(DEFAULT_PAGE_SIZE);
    let view = controller.view();
    assert_eq!(view.status, ViewStatus::Loading);
    assert!(!view.is_no_matches());
    assert_eq!(view.filtered_count, 0);
}

/// Test: a failed fetch is terminal until reload.
#[tokio::test]
async fn test_failed_fetch_until_reload() {
    let source = StaticRecordSource::failing(FetchError::Status(503));
    let mut controller = load_session(&source, &ViewConfig::default()).await;

    controller.set_search_text("CA");
    controller.next_page();
    assert!(matches!(controller.view().status, ViewStatus::Failed(FetchError::Status(503))));
    assert_eq!(controller.stats(), PipelineStats::default());

    source.set_outcome(Ok(portfolio(12)));
    reload(&mut controller, &source).await;

    let view = controller.view();
    assert_eq!(view.status, ViewStatus::Ready);
    assert_eq!(view.total_records, 12);
    // Reload starts from default state
    assert_eq!(view.filtered_count, 12);
}

/// Test: zero matches on a loaded set reports "no matches".
#[test]
fn test_no_matches_when_ready() {
    let mut controller = controller(10);
    controller.set_categorical_filter(Field::PropertyState, Selection::parse("WA"));
    let view = controller.view();
    assert!(view.is_no_matches());
    assert_eq!(view.position.total_pages, 1);
    assert_eq!(view.position.page, 1);
}

// =============================================================================
// PAGE RESET
// =============================================================================

/// Test: any filter change resets to page 1 before the next view.
#[test]
fn test_filter_change_resets_page() {
    let mut controller = controller(90);
    controller.go_to_page(5);
    assert_eq!(controller.view().position.page, 5);

    controller.set_search_text("LN-00");
    assert_eq!(controller.view().position.page, 1);

    controller.go_to_page(3);
    controller.set_categorical_filter(Field::OwnershipType, Selection::parse("PRIMARY"));
    assert_eq!(controller.view().position.page, 1);

    controller.go_to_page(2);
    controller.set_categorical_filter(Field::OwnershipType, Selection::All);
    assert_eq!(controller.view().position.page, 1);
}

/// Test: re-setting the same value changes nothing.
#[test]
fn test_identical_filter_is_noop() {
    let mut controller = controller(90);
    controller.set_categorical_filter(Field::PropertyState, Selection::parse("CA"));
    controller.go_to_page(2);

    assert!(!controller.set_categorical_filter(Field::PropertyState, Selection::parse("CA")));
    assert_eq!(controller.view().position.page, 2);
}

/// Test: sorting keeps the current page.
#[test]
fn test_sort_keeps_page() {
    let mut controller = controller(90);
    controller.go_to_page(4);
    controller.click_sort_header(Field::OriginalLoanBal);
    assert_eq!(controller.view().position.page, 4);
}

/// Test: navigation is bounded by the filtered page count.
#[test]
fn test_navigation_uses_filtered_count() {
    let mut controller = controller(90);
    controller.set_categorical_filter(Field::PropertyState, Selection::parse("TX"));
    assert!(controller.go_to_page(3));
    assert!(!controller.next_page());
    assert!(!controller.go_to_page(40));
    assert_eq!(controller.view().position.page, 3);
}

// =============================================================================
// MEMOIZATION
// =============================================================================

/// Test: paging and repeated views reuse the filtered and sorted stages.
#[test]
fn test_paging_reuses_stages() {
    let mut controller = controller(90);
    controller.click_sort_header(Field::OriginalLoanBal);
    controller.view();
    for page in 1..=9 {
        controller.go_to_page(page);
        controller.view();
    }
    controller.previous_page();
    controller.view();

    assert_eq!(
        controller.stats(),
        PipelineStats {
            filter_runs: 1,
            sort_runs: 1
        }
    );
}

/// Test: a sort change reruns only the sort stage.
#[test]
fn test_sort_change_reruns_sort_only() {
    let mut controller = controller(30);
    controller.click_sort_header(Field::OriginalLoanBal);
    controller.view();
    controller.click_sort_header(Field::OriginalLoanBal);
    controller.view();

    let stats = controller.stats();
    assert_eq!(stats.filter_runs, 1);
    assert_eq!(stats.sort_runs, 2);
}

/// Test: a no-op filter change reruns nothing.
#[test]
fn test_noop_filter_reruns_nothing() {
    let mut controller = controller(30);
    controller.set_search_text("LN");
    controller.view();
    controller.set_search_text("LN");
    controller.view();
    assert_eq!(controller.stats().filter_runs, 1);
}

// =============================================================================
// SCENARIOS
// =============================================================================

/// Test: the CA/NY scenario through the controller.
#[test]
fn test_state_filter_sort_paginate() {
    let records = vec![
        LoanRecord::new("a")
            .with(Field::PropertyState, "CA")
            .with(Field::OriginalLoanBal, 100.0),
        LoanRecord::new("b")
            .with(Field::PropertyState, "NY")
            .with(Field::OriginalLoanBal, 50.0),
    ];
    let mut controller =
        ViewController::with_snapshot(RecordSnapshot::new(records), DEFAULT_PAGE_SIZE);

    controller.set_categorical_filter(Field::PropertyState, Selection::parse("CA"));
    assert_eq!(page_ids(&mut controller), vec!["a"]);

    controller.click_sort_header(Field::OriginalLoanBal);
    let view = controller.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].id.as_str(), "a");
    assert_eq!(view.position.total_pages, 1);
    assert_eq!(view.position.page, 1);
}

/// Test: sorted, filtered, paged output matches a straightforward reference.
#[test]
fn test_matches_reference_pipeline() {
    let records = portfolio(57);
    let mut controller = ViewController::with_snapshot(
        RecordSnapshot::new(records.clone()),
        NonZeroUsize::new(8).unwrap(),
    );
    controller.set_categorical_filter(Field::OwnershipType, Selection::parse("INVESTMENT"));
    controller.click_sort_header(Field::OriginalLoanBal);
    controller.click_sort_header(Field::OriginalLoanBal);
    controller.go_to_page(2);

    let mut expected: Vec<&LoanRecord> = records
        .iter()
        .filter(|r| r.get(&Field::OwnershipType).and_then(|v| v.as_text()) == Some("INVESTMENT"))
        .collect();
    // Stable descending by balance
    expected.sort_by(|a, b| {
        let a = a.get(&Field::OriginalLoanBal).and_then(|v| v.as_number()).unwrap_or(0.0);
        let b = b.get(&Field::OriginalLoanBal).and_then(|v| v.as_number()).unwrap_or(0.0);
        b.partial_cmp(&a).unwrap()
    });
    let expected: Vec<String> = expected[8..16].iter().map(|r| r.id.to_string()).collect();

    assert_eq!(page_ids(&mut controller), expected);
}
