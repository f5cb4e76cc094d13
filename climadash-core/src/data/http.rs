//! HTTP dataset source.
//!
//! Fetches the CSV in a single blocking GET. There is no retry loop: a failed
//! fetch is terminal for the request and the caller decides what to do next.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::provider::{DataError, DataSource, DatasetSource, RawDataset};
use crate::config::SourceConfig;

/// Plain HTTPS source for the remote CSV.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DatasetSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self) -> Result<RawDataset, DataError> {
        let started = Instant::now();
        debug!(url = %self.url, "GET dataset");

        let resp = self.client.get(&self.url).send().map_err(|e| {
            warn!(url = %self.url, error = %e, "dataset request failed");
            if e.is_timeout() {
                DataError::NetworkUnreachable(format!("timed out fetching {}: {e}", self.url))
            } else {
                DataError::NetworkUnreachable(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %self.url, %status, "dataset request rejected");
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        // Body is read fully here; the connection is released when `resp` drops.
        let bytes = resp
            .bytes()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to read body: {e}")))?;

        debug!(
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset downloaded"
        );

        Ok(RawDataset {
            source: DataSource::Http,
            origin: self.url.clone(),
            bytes: bytes.to_vec(),
        })
    }
}
