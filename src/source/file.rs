//! File-backed record source

use std::path::PathBuf;

use async_trait::async_trait;

use super::errors::{FetchError, FetchResult};
use super::{decode_records, RecordSource};
use crate::record::RecordSnapshot;

/// Reads a JSON array of records from disk
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn fetch_records(&self) -> FetchResult<RecordSnapshot> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| FetchError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let records = decode_records(&body)?;
        Ok(RecordSnapshot::new(records))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
