//! View controller
//!
//! Owns the load state, the view state and the pipeline. Every input
//! from the presentation layer goes through here; `view()` derives what
//! should be on screen.
//!
//! While loading (or after a failed fetch) there are no records, and the
//! pipeline is never run.

use std::num::NonZeroUsize;

use super::pipeline::{Pipeline, PipelineStats};
use super::state::ViewState;
use crate::filter::{facet_values, FacetSummary, Selection};
use crate::observability::Event;
use crate::pagination::{self, page_window, paginate, PagePosition, PageWindow};
use crate::record::{Field, LoanRecord, RecordSnapshot};
use crate::sort::SortState;
use crate::source::{FetchError, FetchResult};

/// Where the session is in its single fetch
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(RecordSnapshot),
    /// Terminal until a full reload
    Failed(FetchError),
}

impl LoadState {
    pub fn snapshot(&self) -> Option<&RecordSnapshot> {
        match self {
            LoadState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Status half of a derived view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus<'a> {
    Loading,
    Failed(&'a FetchError),
    Ready,
}

impl ViewStatus<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewStatus::Loading => "loading",
            ViewStatus::Failed(_) => "failed",
            ViewStatus::Ready => "ready",
        }
    }
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone)]
pub struct DerivedView<'a> {
    pub status: ViewStatus<'a>,
    /// Records on the current page, in display order
    pub rows: Vec<&'a LoanRecord>,
    pub position: PagePosition,
    pub window: PageWindow,
    /// Records passing the current filters
    pub filtered_count: usize,
    /// Records in the snapshot
    pub total_records: usize,
    /// Sort applied to `rows`, for header indicators
    pub sort: SortState,
}

impl DerivedView<'_> {
    /// Ready, but nothing passes the filters.
    ///
    /// Never true while loading: an empty view there means "no data yet".
    pub fn is_no_matches(&self) -> bool {
        self.status == ViewStatus::Ready && self.filtered_count == 0
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self.status {
            ViewStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A single browsing session
#[derive(Debug)]
pub struct ViewController {
    load: LoadState,
    state: ViewState,
    pipeline: Pipeline,
    page_size: NonZeroUsize,
}

impl ViewController {
    /// A controller waiting for its records
    pub fn new(page_size: NonZeroUsize) -> Self {
        tracing::debug!(
            event = Event::SessionStart.as_str(),
            page_size = page_size.get(),
            "view session created"
        );
        Self {
            load: LoadState::Loading,
            state: ViewState::new(page_size),
            pipeline: Pipeline::new(),
            page_size,
        }
    }

    /// A controller that is already ready
    pub fn with_snapshot(snapshot: RecordSnapshot, page_size: NonZeroUsize) -> Self {
        let mut controller = Self::new(page_size);
        controller.finish_loading(Ok(snapshot));
        controller
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn stats(&self) -> PipelineStats {
        self.pipeline.stats()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.load, LoadState::Ready(_))
    }

    /// Records the outcome of the fetch
    pub fn finish_loading(&mut self, result: FetchResult<RecordSnapshot>) {
        self.pipeline.clear();
        self.load = match result {
            Ok(snapshot) => LoadState::Ready(snapshot),
            Err(err) => LoadState::Failed(err),
        };
    }

    /// Full reload: back to loading with default state
    pub fn reset(&mut self) {
        tracing::info!(event = Event::SessionReload.as_str(), "view session reset");
        self.load = LoadState::Loading;
        self.state = ViewState::new(self.page_size);
        self.pipeline.clear();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let changed = self.state.set_search_text(text);
        if changed {
            tracing::debug!(
                event = Event::FilterChanged.as_str(),
                search = self.state.filter().search_text(),
                "search text changed"
            );
        }
        changed
    }

    pub fn set_categorical_filter(&mut self, field: Field, selection: Selection) -> bool {
        let name = field.to_string();
        let value = selection.to_string();
        let changed = self.state.set_categorical_filter(field, selection);
        if changed {
            tracing::debug!(
                event = Event::FilterChanged.as_str(),
                field = %name,
                value = %value,
                "categorical filter changed"
            );
        }
        changed
    }

    pub fn click_sort_header(&mut self, field: Field) {
        self.state.click_sort_header(field);
        tracing::debug!(
            event = Event::SortChanged.as_str(),
            field = self.state.sort().field().map(|f| f.as_str()).unwrap_or(""),
            direction = self.state.sort().direction().as_str(),
            "sort changed"
        );
    }

    pub fn go_to_page(&mut self, n: usize) -> bool {
        let total = self.total_pages();
        let changed = self.state.go_to_page(n, total);
        self.log_page(changed);
        changed
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.total_pages();
        let changed = self.state.next_page(total);
        self.log_page(changed);
        changed
    }

    pub fn previous_page(&mut self) -> bool {
        let changed = self.state.previous_page();
        self.log_page(changed);
        changed
    }

    /// Pages in the filtered subset; one while there are no records
    pub fn total_pages(&mut self) -> usize {
        let count = match &self.load {
            LoadState::Ready(snapshot) => self.pipeline.filtered(snapshot, &self.state).len(),
            _ => 0,
        };
        pagination::total_pages(count, self.page_size)
    }

    /// Distinct text values of `field` across the whole snapshot
    pub fn facet_values(&self, field: &Field) -> Vec<String> {
        self.load
            .snapshot()
            .map(|snapshot| facet_values(snapshot.records(), field))
            .unwrap_or_default()
    }

    /// Headline counts; `None` until records are loaded
    pub fn summary(&mut self) -> Option<FacetSummary> {
        let LoadState::Ready(snapshot) = &self.load else {
            return None;
        };
        let filtered = self.pipeline.filtered(snapshot, &self.state).len();
        Some(FacetSummary::compute(snapshot.records(), filtered))
    }

    /// Derives the current page
    pub fn view(&mut self) -> DerivedView<'_> {
        let current_page = self.state.pagination().current_page();
        let sort = self.state.sort().clone();
        let snapshot = match &self.load {
            LoadState::Loading => {
                return DerivedView::empty(ViewStatus::Loading, sort, self.page_size)
            }
            LoadState::Failed(err) => {
                return DerivedView::empty(ViewStatus::Failed(err), sort, self.page_size)
            }
            LoadState::Ready(snapshot) => snapshot,
        };

        let records = snapshot.records();
        let ordered = self.pipeline.ordered(snapshot, &self.state);
        let page = paginate(ordered, self.page_size, current_page);

        DerivedView {
            status: ViewStatus::Ready,
            rows: page.items.iter().map(|&i| &records[i]).collect(),
            position: page.position,
            window: page.position.window(),
            filtered_count: ordered.len(),
            total_records: records.len(),
            sort,
        }
    }

    fn log_page(&self, changed: bool) {
        if changed {
            tracing::debug!(
                event = Event::PageChanged.as_str(),
                page = self.state.pagination().current_page(),
                "page changed"
            );
        }
    }
}

impl<'a> DerivedView<'a> {
    fn empty(status: ViewStatus<'a>, sort: SortState, page_size: NonZeroUsize) -> Self {
        let page = paginate::<usize>(&[], page_size, 1);
        Self {
            status,
            rows: Vec::new(),
            position: page.position,
            window: page_window(page.position.total_pages, page.position.page),
            filtered_count: 0,
            total_records: 0,
            sort,
        }
    }
}
