//! Immutable record snapshots
//!
//! A snapshot is what one successful fetch produces. The view engine
//! never mutates it; derived views hold indices into it.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{LoanId, LoanRecord};
use crate::observability::Event;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// An immutable, cheaply clonable set of records
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    records: Arc<[LoanRecord]>,
    fetched_at: DateTime<Utc>,
    generation: u64,
}

impl RecordSnapshot {
    /// Creates a snapshot stamped with the current time
    pub fn new(records: Vec<LoanRecord>) -> Self {
        Self::fetched_at(records, Utc::now())
    }

    /// Creates a snapshot with an explicit fetch time
    pub fn fetched_at(records: Vec<LoanRecord>, fetched_at: DateTime<Utc>) -> Self {
        let snapshot = Self {
            records: records.into(),
            fetched_at,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        };

        let duplicates = snapshot.duplicate_ids();
        if !duplicates.is_empty() {
            tracing::warn!(
                event = Event::DuplicateRecordIds.as_str(),
                count = duplicates.len(),
                first = %duplicates[0],
                "snapshot contains records sharing an id"
            );
        }

        snapshot
    }

    /// All records in source order
    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fetched_time(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Unique per snapshot; used as a memo key by the view pipeline
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ids that occur more than once, in order of their second occurrence
    pub fn duplicate_ids(&self) -> Vec<&LoanId> {
        let mut seen = HashSet::with_capacity(self.records.len());
        let mut reported = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| {
                if !seen.insert(&r.id) && reported.insert(&r.id) {
                    Some(&r.id)
                } else {
                    None
                }
            })
            .collect()
    }
}
