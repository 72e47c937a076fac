//! Record source subsystem
//!
//! Supplies the immutable record snapshot a session browses. This is the
//! one asynchronous step in the system; everything downstream of it is
//! synchronous.
//!
//! # Sources
//!
//! - `HttpRecordSource`: JSON array over HTTP(S)
//! - `FileRecordSource`: JSON array on local disk
//! - `StaticRecordSource`: in-memory records
//! - `CachedRecordSource`: staleness/eviction policy around any of the above
//!
//! No retry or backoff: a failed fetch is reported as-is.

mod cache;
mod errors;
mod file;
mod http;
mod memory;

pub use cache::{CachePolicy, CachedRecordSource, Clock, SystemClock};
pub use errors::{FetchError, FetchResult};
pub use file::FileRecordSource;
pub use http::{HttpRecordSource, DEFAULT_SOURCE_URL};
pub use memory::StaticRecordSource;

use async_trait::async_trait;

use crate::record::{LoanRecord, RecordSnapshot};

/// Something that can produce a record snapshot
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches the full record set
    async fn fetch_records(&self) -> FetchResult<RecordSnapshot>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;

    /// Forgets anything held between fetches, so the next fetch reaches
    /// the underlying location. No-op for sources that hold nothing.
    async fn invalidate(&self) {}
}

#[async_trait]
impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    async fn fetch_records(&self) -> FetchResult<RecordSnapshot> {
        (**self).fetch_records().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn invalidate(&self) {
        (**self).invalidate().await
    }
}

/// Decodes a JSON array of loan records
pub fn decode_records(body: &[u8]) -> FetchResult<Vec<LoanRecord>> {
    Ok(serde_json::from_slice(body)?)
}

/// Picks a source from a location string: `http(s)://` URLs go over the
/// network, anything else is treated as a file path.
pub fn source_for(location: &str, timeout: std::time::Duration) -> Box<dyn RecordSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpRecordSource::new(location, timeout))
    } else {
        Box::new(FileRecordSource::new(location))
    }
}
