//! Year-range views over the cached table and their presentation projections.
//!
//! `View` is the filtered subsequence; `chart_co2`, `chart_temp`,
//! `chart_combined` and `data_view` are independent pure functions over it.
//! Nothing here mutates the table or fails: an empty range is a valid result.

pub mod chart;
pub mod data_view;

use serde::{Deserialize, Serialize};

use crate::data::table::{Record, Table};

pub use chart::{chart_co2, chart_combined, chart_temp, AxisSeries, AxisSide, DualAxisChart, LineChart, Series, SeriesPoint};
pub use data_view::{data_view, ColumnKind, DataColumn, DataRow, DataView};

/// Inclusive year bounds. `start > end` is allowed and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of calendar years covered.
    pub fn span(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            u64::from(self.end.abs_diff(self.start)) + 1
        }
    }

    /// Clamp both ends into `[min, max]`. Order is preserved, so a reversed
    /// range stays reversed (or collapses onto a bound). Swapped bounds are
    /// put back in order first.
    pub fn clamped(self, min: i32, max: i32) -> Self {
        let (min, max) = (min.min(max), max.max(min));
        Self {
            start: self.start.clamp(min, max),
            end: self.end.clamp(min, max),
        }
    }

    /// Move the start by `delta`, keeping `min <= start <= end`.
    pub fn shift_start(self, delta: i32, (min, _max): (i32, i32)) -> Self {
        let start = self.start.saturating_add(delta).clamp(min, self.end.max(min));
        Self { start, ..self }
    }

    /// Move the end by `delta`, keeping `start <= end <= max`.
    pub fn shift_end(self, delta: i32, (_min, max): (i32, i32)) -> Self {
        let end = self.end.saturating_add(delta).clamp(self.start.min(max), max);
        Self { end, ..self }
    }

    /// Slide the whole window by `delta`, stopping at the bounds with its width intact.
    pub fn shift(self, delta: i32, (min, max): (i32, i32)) -> Self {
        let delta = if delta < 0 {
            delta.max(min - self.start)
        } else {
            delta.min(max - self.end)
        };
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

/// Records of a table whose year lies in a range, ascending by year.
#[derive(Debug, Clone)]
pub struct View<'a> {
    range: YearRange,
    columns: &'a [String],
    records: Vec<&'a Record>,
}

impl<'a> View<'a> {
    pub fn new(table: &'a Table, range: YearRange) -> Self {
        let records = table
            .records()
            .iter()
            .filter(|r| range.contains(r.year()))
            .collect();
        Self {
            range,
            columns: table.columns(),
            records,
        }
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The four artifacts of one render request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub range: YearRange,
    pub chart_co2: LineChart,
    pub chart_temp: LineChart,
    pub chart_combined: DualAxisChart,
    pub data_view: DataView,
}

/// Filter `table` to `[start_year, end_year]` and project it four ways.
pub fn render(table: &Table, start_year: i32, end_year: i32) -> Rendered {
    render_range(table, YearRange::new(start_year, end_year))
}

pub fn render_range(table: &Table, range: YearRange) -> Rendered {
    let view = View::new(table, range);
    Rendered {
        range,
        chart_co2: chart_co2(&view),
        chart_temp: chart_temp(&view),
        chart_combined: chart_combined(&view),
        data_view: data_view(&view),
    }
}
