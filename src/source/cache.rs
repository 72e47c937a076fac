//! Snapshot cache with a staleness window
//!
//! # Policy
//!
//! - Younger than `stale_after`: served from cache, no fetch
//! - Older than `stale_after`: refetched; if that fails, the stale
//!   snapshot is served instead of the error
//! - Not accessed for `evict_after`: dropped, next access fetches afresh
//!
//! The policy lives here, with the source. The view engine never sees it.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use super::errors::FetchResult;
use super::RecordSource;
use crate::observability::Event;
use crate::record::RecordSnapshot;

/// Freshness and eviction windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub stale_after: Duration,
    pub evict_after: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::minutes(5),
            evict_after: Duration::minutes(10),
        }
    }
}

impl CachePolicy {
    pub fn from_secs(stale_after_secs: u64, evict_after_secs: u64) -> Self {
        Self {
            stale_after: Duration::seconds(stale_after_secs.min(i64::MAX as u64) as i64),
            evict_after: Duration::seconds(evict_after_secs.min(i64::MAX as u64) as i64),
        }
    }
}

/// Time source, swappable in tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug)]
struct CacheEntry {
    snapshot: RecordSnapshot,
    cached_at: DateTime<Utc>,
    last_access: DateTime<Utc>,
}

/// Wraps a source with the staleness policy
pub struct CachedRecordSource<S> {
    inner: S,
    policy: CachePolicy,
    clock: Arc<dyn Clock>,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: RecordSource> CachedRecordSource<S> {
    pub fn new(inner: S, policy: CachePolicy) -> Self {
        Self::with_clock(inner, policy, Arc::new(SystemClock))
    }

    pub fn with_clock(inner: S, policy: CachePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            policy,
            clock,
            entry: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> fmt::Debug for CachedRecordSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedRecordSource")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: RecordSource> RecordSource for CachedRecordSource<S> {
    async fn fetch_records(&self) -> FetchResult<RecordSnapshot> {
        let now = self.clock.now();
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if now - cached.last_access >= self.policy.evict_after {
                tracing::debug!(event = Event::CacheEvicted.as_str(), "cached snapshot evicted");
                *entry = None;
            }
        }

        if let Some(cached) = entry.as_mut() {
            if now - cached.cached_at < self.policy.stale_after {
                cached.last_access = now;
                tracing::debug!(
                    event = Event::CacheHit.as_str(),
                    generation = cached.snapshot.generation(),
                    "serving cached snapshot"
                );
                return Ok(cached.snapshot.clone());
            }
            tracing::debug!(event = Event::CacheStale.as_str(), "cached snapshot is stale");
        }

        match self.inner.fetch_records().await {
            Ok(snapshot) => {
                *entry = Some(CacheEntry {
                    snapshot: snapshot.clone(),
                    cached_at: now,
                    last_access: now,
                });
                Ok(snapshot)
            }
            Err(err) => match entry.as_mut() {
                Some(stale) => {
                    tracing::warn!(
                        event = Event::CacheServedStale.as_str(),
                        error = %err,
                        "refetch failed, serving stale snapshot"
                    );
                    stale.last_access = now;
                    Ok(stale.snapshot.clone())
                }
                None => Err(err),
            },
        }
    }

    fn describe(&self) -> String {
        format!("cached({})", self.inner.describe())
    }

    /// Drops any cached snapshot; the next fetch goes to the source
    async fn invalidate(&self) {
        *self.entry.lock().await = None;
        self.inner.invalidate().await;
    }
}
