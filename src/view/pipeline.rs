//! Memoized filter and sort stages
//!
//! Each stage remembers the inputs it was computed from. A stage only
//! reruns when one of those inputs moved:
//!
//! - filtered: snapshot generation, filter version
//! - ordered: the filtered key plus the sort version
//!
//! Page navigation touches neither key, so paging is a slice of the
//! cached ordering.

use serde::Serialize;

use super::state::ViewState;
use crate::filter::filter_indices;
use crate::observability::Event;
use crate::record::RecordSnapshot;
use crate::sort::sort_indices;

/// How many times each stage actually ran
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub filter_runs: u64,
    pub sort_runs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FilterKey {
    generation: u64,
    filter_version: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SortKey {
    filtered: FilterKey,
    sort_version: u64,
}

#[derive(Debug)]
struct Memo<K> {
    key: K,
    indices: Vec<usize>,
}

/// Derived record orderings, recomputed only when their inputs change
#[derive(Debug, Default)]
pub struct Pipeline {
    filtered: Option<Memo<FilterKey>>,
    ordered: Option<Memo<SortKey>>,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Forgets every cached stage
    pub fn clear(&mut self) {
        self.filtered = None;
        self.ordered = None;
    }

    /// Indices of records passing the current filter, in source order
    pub fn filtered(&mut self, snapshot: &RecordSnapshot, state: &ViewState) -> &[usize] {
        let key = FilterKey {
            generation: snapshot.generation(),
            filter_version: state.filter_version(),
        };

        if !matches!(&self.filtered, Some(memo) if memo.key == key) {
            let indices = filter_indices(snapshot.records(), state.filter());
            self.stats.filter_runs += 1;
            tracing::debug!(
                event = Event::FilterRecomputed.as_str(),
                generation = key.generation,
                matched = indices.len(),
                total = snapshot.len(),
                "filter stage recomputed"
            );
            self.filtered = Some(Memo { key, indices });
        }

        self.filtered
            .as_ref()
            .map(|memo| memo.indices.as_slice())
            .unwrap_or(&[])
    }

    /// Indices of filtered records in display order
    pub fn ordered(&mut self, snapshot: &RecordSnapshot, state: &ViewState) -> &[usize] {
        let key = SortKey {
            filtered: FilterKey {
                generation: snapshot.generation(),
                filter_version: state.filter_version(),
            },
            sort_version: state.sort_version(),
        };

        if !matches!(&self.ordered, Some(memo) if memo.key == key) {
            let filtered = self.filtered(snapshot, state).to_vec();
            let indices = if state.sort().is_active() {
                self.stats.sort_runs += 1;
                tracing::debug!(
                    event = Event::SortRecomputed.as_str(),
                    field = state.sort().field().map(|f| f.as_str()).unwrap_or(""),
                    direction = state.sort().direction().as_str(),
                    rows = filtered.len(),
                    "sort stage recomputed"
                );
                sort_indices(snapshot.records(), &filtered, state.sort())
            } else {
                filtered
            };
            self.ordered = Some(Memo { key, indices });
        }

        self.ordered
            .as_ref()
            .map(|memo| memo.indices.as_slice())
            .unwrap_or(&[])
    }
}
