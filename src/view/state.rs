//! The single state container for a browsing session
//!
//! Filter, sort and pagination state live together so the page-reset
//! rule can be enforced (and tested) in one place.

use std::num::NonZeroUsize;

use crate::filter::{FilterState, Selection};
use crate::pagination::{self, DEFAULT_PAGE_SIZE};
use crate::record::Field;
use crate::sort::SortState;

/// Page size and the requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: NonZeroUsize,
    current_page: usize,
}

impl Pagination {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Filter, sort and pagination state plus change counters.
///
/// The counters only move when a value actually changes; the pipeline
/// uses them as memo keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    filter: FilterState,
    sort: SortState,
    pagination: Pagination,
    filter_version: u64,
    sort_version: u64,
}

impl ViewState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn filter_version(&self) -> u64 {
        self.filter_version
    }

    pub fn sort_version(&self) -> u64 {
        self.sort_version
    }

    /// Updates the search text. A change resets to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let changed = self.filter.set_search_text(text);
        if changed {
            self.filter_changed();
        }
        changed
    }

    /// Updates one categorical filter. A change resets to page 1.
    pub fn set_categorical_filter(&mut self, field: Field, selection: Selection) -> bool {
        let changed = self.filter.set_filter(field, selection);
        if changed {
            self.filter_changed();
        }
        changed
    }

    /// Applies a header click. The current page is left alone.
    pub fn click_sort_header(&mut self, field: Field) {
        self.sort.click(field);
        self.sort_version += 1;
    }

    /// Moves to page `n`, clamped into `1..=total_pages`
    pub fn go_to_page(&mut self, n: usize, total_pages: usize) -> bool {
        self.set_page(pagination::clamp_page(n, total_pages))
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        self.set_page(pagination::next_page(self.pagination.current_page, total_pages))
    }

    pub fn previous_page(&mut self) -> bool {
        self.set_page(pagination::previous_page(self.pagination.current_page))
    }

    fn set_page(&mut self, page: usize) -> bool {
        if page == self.pagination.current_page {
            return false;
        }
        self.pagination.current_page = page;
        true
    }

    fn filter_changed(&mut self) {
        self.filter_version += 1;
        self.pagination.current_page = 1;
    }
}
