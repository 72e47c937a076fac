//! Sliding window of page-number buttons

use std::ops::RangeInclusive;

use serde::Serialize;

/// Maximum page numbers displayed at once
pub const WINDOW_WIDTH: usize = 5;

/// Page numbers to display, plus whether more pages follow the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub first: usize,
    pub last: usize,
    /// More pages exist past the window, toward the end
    pub overflow: bool,
}

impl PageWindow {
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.pages().collect()
    }
}

/// Computes the displayed page numbers.
///
/// - up to `WINDOW_WIDTH` pages: all of them
/// - near the start: the first `WINDOW_WIDTH`
/// - near the end: the last `WINDOW_WIDTH`
/// - otherwise centered on the current page
pub fn page_window(total_pages: usize, current_page: usize) -> PageWindow {
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);
    let half = WINDOW_WIDTH / 2;

    let first = if total <= WINDOW_WIDTH || current <= half + 1 {
        1
    } else if current + half >= total {
        total + 1 - WINDOW_WIDTH
    } else {
        current - half
    };
    let last = (first + WINDOW_WIDTH - 1).min(total);

    PageWindow {
        first,
        last,
        overflow: total > WINDOW_WIDTH && current + half < total,
    }
}
