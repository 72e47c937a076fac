//! Pagination engine
//!
//! Slices an ordered subset into fixed-size pages and computes the
//! sliding window of page numbers shown in navigation controls.
//!
//! # Invariants
//!
//! - `total_pages >= 1`, even for an empty subset
//! - The served page is always clamped into `1..=total_pages`
//! - The window never shows more than `WINDOW_WIDTH` page numbers

mod window;

pub use window::{page_window, PageWindow, WINDOW_WIDTH};

use std::num::NonZeroUsize;

use serde::Serialize;

/// Records per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Number of pages needed for `count` items; never less than one
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

/// Clamps a requested page into `1..=total_pages`
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.max(1).min(total_pages.max(1))
}

/// Where a page sits within the whole ordered subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagePosition {
    /// Clamped 1-based page number
    pub page: usize,
    /// Total pages, at least one
    pub total_pages: usize,
    /// Items across all pages
    pub total_items: usize,
    /// Zero-based offset of the first item on this page
    pub start: usize,
    /// Items on this page
    pub len: usize,
}

impl PagePosition {
    /// "Previous" is disabled on the first page
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// "Next" is disabled on the last page
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Target of "previous"; stays put on the first page
    pub fn previous_page(&self) -> usize {
        previous_page(self.page)
    }

    /// Target of "next"; stays put on the last page
    pub fn next_page(&self) -> usize {
        next_page(self.page, self.total_pages)
    }

    /// 1-based (first, last, total) for a "Showing X to Y of Z" summary.
    ///
    /// `None` when there is nothing to show.
    pub fn showing(&self) -> Option<(usize, usize, usize)> {
        if self.len == 0 {
            return None;
        }
        Some((self.start + 1, self.start + self.len, self.total_items))
    }

    /// Page-number controls are only rendered for multi-page results
    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// Window of page numbers around this page
    pub fn window(&self) -> PageWindow {
        page_window(self.total_pages, self.page)
    }
}

/// One page of an ordered subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub position: PagePosition,
}

/// Slices `ordered` to the requested page, clamping out-of-range requests
pub fn paginate<T>(ordered: &[T], page_size: NonZeroUsize, current_page: usize) -> Page<'_, T> {
    let total_items = ordered.len();
    let total_pages = total_pages(total_items, page_size);
    let page = clamp_page(current_page, total_pages);

    let start = ((page - 1) * page_size.get()).min(total_items);
    let end = (start + page_size.get()).min(total_items);

    Page {
        items: &ordered[start..end],
        position: PagePosition {
            page,
            total_pages,
            total_items,
            start,
            len: end - start,
        },
    }
}

/// Page after `current`, bounded by the last page
pub fn next_page(current: usize, total_pages: usize) -> usize {
    clamp_page(current.saturating_add(1), total_pages)
}

/// Page before `current`, bounded by the first page
pub fn previous_page(current: usize) -> usize {
    current.saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_total_pages_never_zero() {
        assert_eq!(total_pages(0, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(total_pages(1, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(total_pages(10, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(total_pages(11, DEFAULT_PAGE_SIZE), 2);
        assert_eq!(total_pages(23, DEFAULT_PAGE_SIZE), 3);
    }

    #[test]
    fn test_last_partial_page() {
        let items: Vec<usize> = (0..23).collect();
        let page = paginate(&items, DEFAULT_PAGE_SIZE, 3);
        assert_eq!(page.items, &[20, 21, 22]);
        assert_eq!(page.position.total_pages, 3);
        assert!(!page.position.has_next());
        assert!(page.position.has_previous());
        assert_eq!(page.position.previous_page(), 2);
        assert_eq!(page.position.next_page(), 3);
        assert_eq!(page.position.showing(), Some((21, 23, 23)));
    }

    #[test]
    fn test_full_first_page() {
        let items: Vec<usize> = (0..23).collect();
        let page = paginate(&items, DEFAULT_PAGE_SIZE, 1);
        assert_eq!(page.items, &(0..10).collect::<Vec<_>>()[..]);
        assert_eq!(page.position.showing(), Some((1, 10, 23)));
        assert!(page.position.show_controls());
        assert_eq!(page.position.window().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_request_past_end_is_clamped() {
        let items: Vec<usize> = (0..5).collect();
        let page = paginate(&items, size(2), 9);
        assert_eq!(page.position.page, 3);
        assert_eq!(page.items, &[4]);
    }

    #[test]
    fn test_page_zero_is_clamped() {
        let items: Vec<usize> = (0..5).collect();
        let page = paginate(&items, size(2), 0);
        assert_eq!(page.position.page, 1);
        assert_eq!(page.items, &[0, 1]);
        assert!(!page.position.has_previous());
        assert_eq!(page.position.previous_page(), 1);
    }

    #[test]
    fn test_empty_subset() {
        let items: Vec<usize> = Vec::new();
        let page = paginate(&items, DEFAULT_PAGE_SIZE, 4);
        assert_eq!(page.position.page, 1);
        assert_eq!(page.position.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.position.showing(), None);
        assert!(!page.position.show_controls());
        assert!(!page.position.has_next());
    }

    #[test]
    fn test_navigation_helpers() {
        assert_eq!(next_page(1, 3), 2);
        assert_eq!(next_page(3, 3), 3);
        assert_eq!(next_page(1, 0), 1);
        assert_eq!(previous_page(2), 1);
        assert_eq!(previous_page(1), 1);
        assert_eq!(previous_page(0), 1);
    }
}
