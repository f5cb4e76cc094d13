//! Integration tests for the single-entry table cache.
//!
//! The cache must never refresh mid-process, even when the upstream payload
//! changes between calls, and concurrent first calls must share one load.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use climadash_core::data::{DataError, DataSource, DatasetSource, RawDataset, TableCache};

/// Returns a different payload on every call and counts fetches.
struct DriftingSource {
    calls: AtomicUsize,
    delay: Duration,
}

impl DriftingSource {
    fn new(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
        }
    }
}

impl DatasetSource for DriftingSource {
    fn name(&self) -> &str {
        "drifting"
    }

    fn fetch(&self) -> Result<RawDataset, DataError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.delay);
        let csv = format!(
            "country,year,co2,temperature_change_from_co2\n\
             World,2000,{},0.9\n\
             World,2001,{},0.91\n\
             France,2000,1,0\n",
            25_000 + n,
            25_500 + n
        );
        Ok(RawDataset {
            source: DataSource::Synthetic,
            origin: format!("drift#{n}"),
            bytes: csv.into_bytes(),
        })
    }
}

#[test]
fn second_call_returns_identical_table_without_refetch() {
    let cache = TableCache::new(DriftingSource::new(Duration::ZERO), "World");

    let first = cache.get_table().unwrap();
    let second = cache.get_table().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    assert_eq!(first.records()[0].co2, Some(25_000.0));
    assert_eq!(first.report().fingerprint, second.report().fingerprint);
    assert_eq!(cache.source().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn loaded_table_holds_only_the_category() {
    let cache = TableCache::new(DriftingSource::new(Duration::ZERO), "World");
    let table = cache.get_table().unwrap();

    let country = table.column_index("country").unwrap();
    assert_eq!(table.category(), "World");
    assert_eq!(table.len(), 2);
    assert!(table.records().iter().all(|r| r.fields[country] == "World"));
}

#[test]
fn concurrent_first_calls_fetch_once() {
    let source = DriftingSource::new(Duration::from_millis(50));
    let cache = Arc::new(TableCache::new(source, "World"));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get_table().unwrap()
            })
        })
        .collect();

    let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for t in &tables[1..] {
        assert!(Arc::ptr_eq(&tables[0], t));
    }
    assert_eq!(cache.source().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_category_yields_empty_table() {
    let cache = TableCache::new(DriftingSource::new(Duration::ZERO), "Antarctica");
    let table = cache.get_table().unwrap();
    assert!(table.is_empty());
    assert!(cache.is_loaded());
}
