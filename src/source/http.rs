//! HTTP record source

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::errors::{FetchError, FetchResult};
use super::{decode_records, RecordSource};
use crate::observability::Event;
use crate::record::RecordSnapshot;

/// Public loan portfolio feed
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/rahulsoni-data/data/refs/heads/main/data.json";

/// Fetches a JSON array of records with a single GET
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: Client,
    url: String,
}

impl HttpRecordSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            url: url.into(),
        }
    }

    /// Reuses an existing client
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_records(&self) -> FetchResult<RecordSnapshot> {
        tracing::debug!(event = Event::FetchBegin.as_str(), url = %self.url, "GET");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let records = decode_records(&body)?;
        Ok(RecordSnapshot::new(records))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
