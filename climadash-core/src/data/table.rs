//! The loaded, category-filtered table.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One source row that passed the category filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// January 1st of the source year.
    pub year: NaiveDate,
    /// Million tonnes.
    pub co2: Option<f64>,
    /// Degrees Celsius.
    pub temperature_change_from_co2: Option<f64>,
    /// Every raw cell of the source row, in header order.
    pub fields: Vec<String>,
}

impl Record {
    pub fn year(&self) -> i32 {
        self.year.year()
    }
}

/// Convert a calendar year to the date the table stores for it.
pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// What happened while building the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows in the payload, all categories.
    pub source_rows: usize,
    /// Rows whose category matched.
    pub matched_rows: usize,
    /// Matched rows dropped because their year did not convert.
    pub skipped_rows: usize,
    /// Non-empty numeric cells that did not parse and became null.
    pub coerced_cells: usize,
    /// Matched rows dropped because an earlier row had the same year.
    pub duplicate_rows: usize,
    /// BLAKE3 of the raw payload.
    pub fingerprint: String,
}

/// Immutable after construction; shared as `Arc<Table>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    category: String,
    columns: Vec<String>,
    records: Vec<Record>,
    report: LoadReport,
}

impl Table {
    /// Records are sorted ascending by year and years are unique: for a
    /// repeated year only the first record in input order is kept.
    pub fn new(
        category: impl Into<String>,
        columns: Vec<String>,
        mut records: Vec<Record>,
        report: LoadReport,
    ) -> Self {
        records.sort_by_key(|r| r.year);
        records.dedup_by_key(|r| r.year);
        Self {
            category: category.into(),
            columns,
            records,
            report,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last year present.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.year(), last.year()))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
