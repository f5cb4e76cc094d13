//! CSV payload → category-filtered `Table`.
//!
//! Row policy: a matched row whose `year` does not convert to a date is
//! skipped and counted, as is a matched row repeating an earlier year;
//! numeric cells that do not parse become null and are counted. Only a payload that is not the expected table aborts the load.

use std::collections::HashSet;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use super::provider::{DataError, RawDataset};
use super::table::{year_start, LoadReport, Record, Table};

pub const COUNTRY_COLUMN: &str = "country";
pub const YEAR_COLUMN: &str = "year";
pub const CO2_COLUMN: &str = "co2";
pub const TEMPERATURE_COLUMN: &str = "temperature_change_from_co2";

pub const REQUIRED_COLUMNS: [&str; 4] =
    [COUNTRY_COLUMN, YEAR_COLUMN, CO2_COLUMN, TEMPERATURE_COLUMN];

/// Column positions resolved from the header.
struct Layout {
    country: usize,
    year: usize,
    co2: usize,
    temperature: usize,
}

impl Layout {
    fn resolve(columns: &[String]) -> Result<Self, DataError> {
        let find = |name: &str| columns.iter().position(|c| c == name);

        // None of the expected columns: probably an HTML error page or similar.
        if REQUIRED_COLUMNS.iter().all(|name| find(name).is_none()) {
            return Err(DataError::MalformedPayload(format!(
                "header has none of the expected columns ({} columns found)",
                columns.len()
            )));
        }

        let require = |name: &str| {
            find(name).ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
            })
        };

        Ok(Self {
            country: require(COUNTRY_COLUMN)?,
            year: require(YEAR_COLUMN)?,
            co2: require(CO2_COLUMN)?,
            temperature: require(TEMPERATURE_COLUMN)?,
        })
    }
}

/// Parse the raw payload and keep only rows whose `country` is `category`.
///
/// An absent category yields an empty table, not an error.
pub fn parse_table(raw: &RawDataset, category: &str) -> Result<Table, DataError> {
    if raw.bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DataError::MalformedPayload(format!(
            "empty payload from {}",
            raw.origin
        )));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(raw.bytes.as_slice());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::MalformedPayload(format!("unreadable header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let layout = Layout::resolve(&columns)?;

    let mut report = LoadReport {
        fingerprint: blake3::hash(&raw.bytes).to_hex().to_string(),
        ..LoadReport::default()
    };
    let mut records = Vec::new();
    let mut seen_years = HashSet::new();

    for row in reader.records() {
        let row = row.map_err(|e| DataError::MalformedPayload(e.to_string()))?;
        report.source_rows += 1;

        if row.get(layout.country).map(str::trim) != Some(category) {
            continue;
        }
        report.matched_rows += 1;

        let raw_year = row.get(layout.year).unwrap_or("").trim();
        let Some(year) = parse_year(raw_year) else {
            warn!(
                line = row.position().map(|p| p.line()),
                year = raw_year,
                "skipping row with unconvertible year"
            );
            report.skipped_rows += 1;
            continue;
        };

        if !seen_years.insert(year) {
            warn!(
                line = row.position().map(|p| p.line()),
                year = raw_year,
                "skipping row that repeats an earlier year"
            );
            report.duplicate_rows += 1;
            continue;
        }

        let co2 = parse_value(row.get(layout.co2), &mut report.coerced_cells);
        let temperature = parse_value(row.get(layout.temperature), &mut report.coerced_cells);

        records.push(Record {
            year,
            co2,
            temperature_change_from_co2: temperature,
            fields: row.iter().map(str::to_string).collect(),
        });
    }

    debug!(
        source_rows = report.source_rows,
        matched = report.matched_rows,
        skipped = report.skipped_rows,
        coerced = report.coerced_cells,
        duplicates = report.duplicate_rows,
        category,
        "payload parsed"
    );

    Ok(Table::new(category, columns, records, report))
}

fn parse_year(cell: &str) -> Option<chrono::NaiveDate> {
    cell.parse::<i32>().ok().and_then(year_start)
}

/// Empty → null. Unparseable or non-finite → null, counted.
fn parse_value(cell: Option<&str>, coerced: &mut usize) -> Option<f64> {
    let cell = cell?.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            *coerced += 1;
            None
        }
    }
}
