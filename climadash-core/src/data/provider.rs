//! Dataset source trait and structured error types.
//!
//! The DatasetSource trait abstracts over where the raw CSV comes from (HTTP,
//! a local file, the synthetic generator) so the cache can be built over any
//! of them and mocked for tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("missing required column '{column}' (upstream schema changed?)")]
    MissingColumn { column: String },
}

impl DataError {
    /// The payload could not be obtained at all.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            DataError::NetworkUnreachable(_) | DataError::HttpStatus { .. } | DataError::Io(_)
        )
    }

    /// The payload arrived but is not the table we expect.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            DataError::MalformedPayload(_) | DataError::MissingColumn { .. }
        )
    }
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Http,
    File,
    Synthetic,
}

/// Raw payload returned by a source, before ingest.
#[derive(Debug, Clone)]
pub struct RawDataset {
    pub source: DataSource,
    /// URL, path, or seed description, for logs and the status bar.
    pub origin: String,
    pub bytes: Vec<u8>,
}

/// Trait for dataset sources.
///
/// Implementations only fetch bytes. Parsing and caching sit above this trait.
pub trait DatasetSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the full CSV payload.
    fn fetch(&self) -> Result<RawDataset, DataError>;
}

impl<S: DatasetSource + ?Sized> DatasetSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self) -> Result<RawDataset, DataError> {
        (**self).fetch()
    }
}
