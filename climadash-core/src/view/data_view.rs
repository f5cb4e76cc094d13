//! Tabular projection: the view newest-first with every source column.

use chrono::NaiveDate;
use serde::Serialize;

use super::View;
use crate::data::ingest::{CO2_COLUMN, TEMPERATURE_COLUMN, YEAR_COLUMN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Date,
    Number,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataColumn {
    /// Source header.
    pub name: String,
    /// Display label.
    pub label: String,
    pub kind: ColumnKind,
}

impl DataColumn {
    fn from_header(name: &str) -> Self {
        let (label, kind) = match name {
            YEAR_COLUMN => ("Year", ColumnKind::Date),
            CO2_COLUMN => ("CO₂ (mt)", ColumnKind::Number),
            TEMPERATURE_COLUMN => ("Temp Change (°C)", ColumnKind::Number),
            other => (other, ColumnKind::Text),
        };
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataRow {
    pub year: NaiveDate,
    pub co2: Option<f64>,
    pub temperature_change_from_co2: Option<f64>,
    /// One display cell per column; the year cell is rendered `YYYY-MM-DD`.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataView {
    pub columns: Vec<DataColumn>,
    pub rows: Vec<DataRow>,
}

impl DataView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

pub fn data_view(view: &View<'_>) -> DataView {
    let columns: Vec<DataColumn> = view
        .columns()
        .iter()
        .map(|c| DataColumn::from_header(c))
        .collect();
    let year_idx = columns.iter().position(|c| c.kind == ColumnKind::Date);

    // View is ascending with unique years (Table::new dedups), so reversing is strictly descending.
    let rows = view
        .records()
        .iter()
        .rev()
        .map(|r| {
            let mut cells = r.fields.clone();
            if let Some(cell) = year_idx.and_then(|i| cells.get_mut(i)) {
                *cell = r.year.format("%Y-%m-%d").to_string();
            }
            DataRow {
                year: r.year,
                co2: r.co2,
                temperature_change_from_co2: r.temperature_change_from_co2,
                cells,
            }
        })
        .collect();

    DataView { columns, rows }
}
