//! Observable events for loanview
//!
//! Every log line the crate emits carries one of these names in its
//! `event` field, so logs can be filtered by event regardless of message.

use std::fmt;

/// Observable events in a browsing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Session lifecycle
    /// Session created, records not yet loaded
    SessionStart,
    /// Session torn down for a full reload
    SessionReload,
    /// Configuration loaded
    ConfigLoaded,

    // Record source
    /// Fetch from the record source begins
    FetchBegin,
    /// Fetch produced a snapshot
    FetchComplete,
    /// Fetch failed; terminal for the session
    FetchFailed,
    /// Snapshot contains duplicate ids
    DuplicateRecordIds,

    // Source cache
    /// Cached snapshot served while fresh
    CacheHit,
    /// Cached snapshot is stale and is being refetched
    CacheStale,
    /// Cached snapshot evicted after idling
    CacheEvicted,
    /// Refetch failed; stale snapshot served instead
    CacheServedStale,

    // View state
    /// Search text or a categorical filter changed
    FilterChanged,
    /// Sort header clicked
    SortChanged,
    /// Current page changed by navigation
    PageChanged,

    // Pipeline
    /// Filter stage recomputed
    FilterRecomputed,
    /// Sort stage recomputed
    SortRecomputed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SessionStart => "SESSION_START",
            Event::SessionReload => "SESSION_RELOAD",
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::FetchBegin => "FETCH_BEGIN",
            Event::FetchComplete => "FETCH_COMPLETE",
            Event::FetchFailed => "FETCH_FAILED",
            Event::DuplicateRecordIds => "DUPLICATE_RECORD_IDS",

            Event::CacheHit => "CACHE_HIT",
            Event::CacheStale => "CACHE_STALE",
            Event::CacheEvicted => "CACHE_EVICTED",
            Event::CacheServedStale => "CACHE_SERVED_STALE",

            Event::FilterChanged => "FILTER_CHANGED",
            Event::SortChanged => "SORT_CHANGED",
            Event::PageChanged => "PAGE_CHANGED",

            Event::FilterRecomputed => "FILTER_RECOMPUTED",
            Event::SortRecomputed => "SORT_RECOMPUTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::SessionStart,
            Event::SessionReload,
            Event::ConfigLoaded,
            Event::FetchBegin,
            Event::FetchComplete,
            Event::FetchFailed,
            Event::DuplicateRecordIds,
            Event::CacheHit,
            Event::CacheStale,
            Event::CacheEvicted,
            Event::CacheServedStale,
            Event::FilterChanged,
            Event::SortChanged,
            Event::PageChanged,
            Event::FilterRecomputed,
            Event::SortRecomputed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }
}
