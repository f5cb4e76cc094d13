//! Local CSV file source, for offline use and fixtures.

use std::path::{Path, PathBuf};

use super::provider::{DataError, DataSource, DatasetSource, RawDataset};

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self) -> Result<RawDataset, DataError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| DataError::Io(format!("{}: {e}", self.path.display())))?;
        Ok(RawDataset {
            source: DataSource::File,
            origin: self.path.display().to_string(),
            bytes,
        })
    }
}
