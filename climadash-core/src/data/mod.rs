//! Dataset fetching, ingest, and the single-entry table cache.

pub mod cache;
pub mod file;
pub mod http;
pub mod ingest;
pub mod provider;
pub mod synthetic;
pub mod table;

use std::path::PathBuf;

pub use cache::TableCache;
pub use file::FileSource;
pub use http::HttpSource;
pub use ingest::parse_table;
pub use provider::{DataError, DataSource, DatasetSource, RawDataset};
pub use synthetic::SyntheticSource;
pub use table::{LoadReport, Record, Table};

use crate::config::SourceConfig;

/// Seed used by `--synthetic` when none is given.
pub const DEFAULT_SYNTHETIC_SEED: u64 = 42;

/// Which source a binary should read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceChoice {
    Http,
    File(PathBuf),
    Synthetic { seed: u64 },
}

impl SourceChoice {
    /// `--synthetic` wins over `--file`, which wins over HTTP.
    pub fn from_flags(file: Option<PathBuf>, synthetic: bool) -> Self {
        match (synthetic, file) {
            (true, _) => SourceChoice::Synthetic {
                seed: DEFAULT_SYNTHETIC_SEED,
            },
            (false, Some(path)) => SourceChoice::File(path),
            (false, None) => SourceChoice::Http,
        }
    }
}

/// Build the boxed source for a choice.
pub fn open_source(
    choice: &SourceChoice,
    config: &SourceConfig,
) -> Result<Box<dyn DatasetSource>, DataError> {
    Ok(match choice {
        SourceChoice::Http => Box::new(HttpSource::new(config)?),
        SourceChoice::File(path) => Box::new(FileSource::new(path.clone())),
        SourceChoice::Synthetic { seed } => {
            Box::new(SyntheticSource::new(*seed).with_category(config.category.clone()))
        }
    })
}

/// Cache over whichever source the flags selected.
pub fn open_cache(
    choice: &SourceChoice,
    config: &SourceConfig,
) -> Result<TableCache<Box<dyn DatasetSource>>, DataError> {
    let source = open_source(choice, config)?;
    Ok(TableCache::new(source, config.category.clone()))
}
