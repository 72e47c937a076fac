//! In-memory record source

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::errors::{FetchError, FetchResult};
use super::RecordSource;
use crate::record::{LoanRecord, RecordSnapshot};

/// Serves a fixed record set, or a fixed failure
#[derive(Debug)]
pub struct StaticRecordSource {
    outcome: Mutex<Result<Vec<LoanRecord>, FetchError>>,
    fetches: AtomicUsize,
}

impl StaticRecordSource {
    pub fn new(records: Vec<LoanRecord>) -> Self {
        Self {
            outcome: Mutex::new(Ok(records)),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            outcome: Mutex::new(Err(error)),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Replaces what later fetches return. Recovers a poisoned lock,
    /// since the new outcome overwrites whatever was left behind.
    pub fn set_outcome(&self, outcome: Result<Vec<LoanRecord>, FetchError>) {
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = outcome;
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn fetch_records(&self) -> FetchResult<RecordSnapshot> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let outcome = self
            .outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        outcome.map(RecordSnapshot::new)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
