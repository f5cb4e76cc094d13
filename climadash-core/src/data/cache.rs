//! Single-entry table cache.
//!
//! Lazy-init-once, read-many. The first successful `get_table` fetches and
//! parses; every later call hands out the same `Arc<Table>`. There is no TTL
//! and no invalidation. A failed load stores nothing, so the next call fetches
//! again.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Instant;

use tracing::{info, trace};

use super::ingest::parse_table;
use super::provider::{DataError, DatasetSource};
use super::table::Table;

pub struct TableCache<S> {
    source: S,
    category: String,
    table: OnceLock<Arc<Table>>,
    /// Serializes first loads so concurrent callers fetch once.
    fetch_lock: Mutex<()>,
}

impl<S: DatasetSource> TableCache<S> {
    pub fn new(source: S, category: impl Into<String>) -> Self {
        Self {
            source,
            category: category.into(),
            table: OnceLock::new(),
            fetch_lock: Mutex::new(()),
        }
    }

    /// Return the cached table, loading it on first use.
    pub fn get_table(&self) -> Result<Arc<Table>, DataError> {
        if let Some(table) = self.table.get() {
            trace!("table cache hit");
            return Ok(Arc::clone(table));
        }

        let _guard = self
            .fetch_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished the load while we waited.
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let started = Instant::now();
        info!(source = self.source.name(), category = %self.category, "loading table");

        let raw = self.source.fetch()?;
        let table = Arc::new(parse_table(&raw, &self.category)?);

        let report = table.report();
        info!(
            origin = %raw.origin,
            rows = table.len(),
            skipped = report.skipped_rows,
            fingerprint = %&report.fingerprint[..12.min(report.fingerprint.len())],
            elapsed_ms = started.elapsed().as_millis() as u64,
            "table loaded"
        );

        let _ = self.table.set(Arc::clone(&table));
        Ok(table)
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{DataSource, RawDataset};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that fails the first `failures` calls, then succeeds.
    struct FlakySource {
        calls: AtomicUsize,
        failures: usize,
    }

    impl DatasetSource for FlakySource {
        fn name(&self) -> &str {
            "flaky"
        }

        fn fetch(&self) -> Result<RawDataset, DataError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(DataError::NetworkUnreachable("offline".into()));
            }
            Ok(RawDataset {
                source: DataSource::Synthetic,
                origin: "flaky".into(),
                bytes: b"country,year,co2,temperature_change_from_co2\nWorld,2000,1.5,0.1\n".to_vec(),
            })
        }
    }

    #[test]
    fn failure_is_not_cached() {
        let cache = TableCache::new(
            FlakySource {
                calls: AtomicUsize::new(0),
                failures: 1,
            },
            "World",
        );

        assert!(cache.get_table().is_err());
        assert!(!cache.is_loaded());

        let table = cache.get_table().unwrap();
        assert_eq!(table.len(), 1);
        assert!(cache.is_loaded());
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn hit_returns_same_arc() {
        let cache = TableCache::new(
            FlakySource {
                calls: AtomicUsize::new(0),
                failures: 0,
            },
            "World",
        );
        let a = cache.get_table().unwrap();
        let b = cache.get_table().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn parse_error_is_surfaced() {
        struct Html;
        impl DatasetSource for Html {
            fn name(&self) -> &str {
                "html"
            }
            fn fetch(&self) -> Result<RawDataset, DataError> {
                Ok(RawDataset {
                    source: DataSource::Http,
                    origin: "html".into(),
                    bytes: b"<html>rate limited</html>".to_vec(),
                })
            }
        }

        let cache = TableCache::new(Html, "World");
        let err = cache.get_table().unwrap_err();
        assert!(err.is_parse());
        assert!(!cache.is_loaded());
    }
}
