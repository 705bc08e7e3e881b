//! Dataset Loader Module
//! Fetches the cyclist JSON over HTTP and turns it into a [`Dataset`].

use crate::config::ChartConfig;
use crate::data::record::{Dataset, RaceRecord, RecordError};
use log::{debug, info};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Network request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server answered with status {0}")]
    Status(StatusCode),
    #[error("Failed to decode dataset: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),
}

/// The published file is a bare array; a `{ "data": [...] }` wrapper is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Wrapped { data: Vec<RaceRecord> },
    Bare(Vec<RaceRecord>),
}

impl DatasetFile {
    fn into_records(self) -> Vec<RaceRecord> {
        match self {
            DatasetFile::Wrapped { data } => data,
            DatasetFile::Bare(records) => records,
        }
    }
}

/// One-shot HTTP loader for the cyclist dataset.
pub struct DataLoader {
    url: String,
    timeout: Duration,
}

impl DataLoader {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            url: config.data_url.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// GET the dataset. Blocks; call it from a background thread.
    pub fn fetch(&self) -> Result<Dataset, LoaderError> {
        info!("fetching dataset from {}", self.url);

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status(status));
        }

        let body = response.bytes()?;
        debug!("received {} bytes", body.len());

        let dataset = Self::parse(&body)?;
        info!(
            "loaded {} records ({} with doping allegations)",
            dataset.len(),
            dataset.allegation_count()
        );
        Ok(dataset)
    }

    /// Decode a JSON body into a validated dataset.
    pub fn parse(body: &[u8]) -> Result<Dataset, LoaderError> {
        let file: DatasetFile = serde_json::from_slice(body)?;
        Ok(Dataset::new(file.into_records())?)
    }
}
