//! Fetching records into a controller
//!
//! The fetch is the only suspension point. Everything after it is
//! synchronous.

use std::time::Instant;

use super::controller::ViewController;
use crate::config::ViewConfig;
use crate::observability::Event;
use crate::record::RecordSnapshot;
use crate::source::{FetchResult, RecordSource};

/// Fetches once and returns a controller in the ready or failed state
pub async fn load_session<S>(source: &S, config: &ViewConfig) -> ViewController
where
    S: RecordSource + ?Sized,
{
    let mut controller = ViewController::new(config.page_size());
    let result = fetch(source).await;
    controller.finish_loading(result);
    controller
}

/// Full reload: discards all view state and any snapshot the source
/// holds, then fetches again
pub async fn reload<S>(controller: &mut ViewController, source: &S)
where
    S: RecordSource + ?Sized,
{
    controller.reset();
    source.invalidate().await;
    let result = fetch(source).await;
    controller.finish_loading(result);
}

async fn fetch<S>(source: &S) -> FetchResult<RecordSnapshot>
where
    S: RecordSource + ?Sized,
{
    let location = source.describe();
    tracing::info!(event = Event::FetchBegin.as_str(), source = %location, "fetching records");

    let started = Instant::now();
    let result = source.fetch_records().await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(snapshot) => tracing::info!(
            event = Event::FetchComplete.as_str(),
            source = %location,
            records = snapshot.len(),
            generation = snapshot.generation(),
            elapsed_ms,
            "records loaded"
        ),
        Err(err) => tracing::error!(
            event = Event::FetchFailed.as_str(),
            source = %location,
            code = err.code(),
            error = %err,
            elapsed_ms,
            "record fetch failed"
        ),
    }

    result
}
