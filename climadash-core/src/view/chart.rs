//! Chart projections: two single-series line charts and one dual-axis chart.
//!
//! Series are ascending by year. Null values pass through as `None`; what to
//! draw for a gap is the renderer's call.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::View;
use crate::data::table::Record;

pub const YEAR_LABEL: &str = "Year";

pub const CO2_TITLE: &str = "Global CO₂ Emissions Over Time";
pub const CO2_AXIS: &str = "CO₂ Emissions (million tonnes)";
pub const TEMP_TITLE: &str = "Temperature Change from CO₂";
pub const TEMP_AXIS: &str = "Temperature Change (°C)";
pub const COMBINED_TITLE: &str = "CO₂ and Temperature Correlation";
pub const COMBINED_CO2_AXIS: &str = "CO₂ (million tonnes)";
pub const CO2_SERIES: &str = "CO₂ Emissions";
pub const TEMP_SERIES: &str = "Temperature Change";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    fn from_view(name: &str, view: &View<'_>, value: impl Fn(&Record) -> Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            points: view
                .records()
                .iter()
                .map(|r| SeriesPoint {
                    year: r.year,
                    value: value(r),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(year, value)` for every non-null point.
    pub fn defined(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.value.map(|v| (p.year.year(), v)))
    }

    /// Min and max over non-null values.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.defined().fold(None, |acc, (_, v)| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// First and last year on the x axis, nulls included.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((self.points.first()?.year.year(), self.points.last()?.year.year()))
    }
}

/// Single-series line plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Series,
}

impl LineChart {
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series.value_bounds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Left,
    Right,
}

/// One independently scaled y axis and the series plotted against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSeries {
    pub side: AxisSide,
    pub title: String,
    pub series: Series,
}

/// Two series sharing the x axis, each on its own y axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualAxisChart {
    pub title: String,
    pub x_label: String,
    pub left: AxisSeries,
    pub right: AxisSeries,
}

pub fn chart_co2(view: &View<'_>) -> LineChart {
    LineChart {
        title: CO2_TITLE.to_string(),
        x_label: YEAR_LABEL.to_string(),
        y_label: CO2_AXIS.to_string(),
        series: Series::from_view(CO2_SERIES, view, |r| r.co2),
    }
}

pub fn chart_temp(view: &View<'_>) -> LineChart {
    LineChart {
        title: TEMP_TITLE.to_string(),
        x_label: YEAR_LABEL.to_string(),
        y_label: TEMP_AXIS.to_string(),
        series: Series::from_view(TEMP_SERIES, view, |r| r.temperature_change_from_co2),
    }
}

pub fn chart_combined(view: &View<'_>) -> DualAxisChart {
    DualAxisChart {
        title: COMBINED_TITLE.to_string(),
        x_label: YEAR_LABEL.to_string(),
        left: AxisSeries {
            side: AxisSide::Left,
            title: COMBINED_CO2_AXIS.to_string(),
            series: Series::from_view(CO2_SERIES, view, |r| r.co2),
        },
        right: AxisSeries {
            side: AxisSide::Right,
            title: TEMP_AXIS.to_string(),
            series: Series::from_view(TEMP_SERIES, view, |r| r.temperature_change_from_co2),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{year_start, LoadReport, Table};
    use crate::view::YearRange;

    fn table() -> Table {
        let rows = [
            (1850, Some(200.0), None),
            (1851, Some(210.0), Some(0.001)),
            (1852, None, Some(0.002)),
            (1853, Some(190.0), Some(0.003)),
        ];
        let records = rows
            .iter()
            .map(|&(y, co2, t)| Record {
                year: year_start(y).unwrap(),
                co2,
                temperature_change_from_co2: t,
                fields: vec![y.to_string()],
            })
            .collect();
        Table::new("World", vec!["year".into()], records, LoadReport::default())
    }

    #[test]
    fn nulls_pass_through() {
        let table = table();
        let view = View::new(&table, YearRange::new(1850, 1853));
        let chart = chart_co2(&view);
        assert_eq!(chart.series.len(), 4);
        assert_eq!(chart.series.points[2].value, None);
        assert_eq!(chart.value_bounds(), Some((190.0, 210.0)));
    }

    #[test]
    fn combined_axes_have_independent_nulls() {
        let table = table();
        let view = View::new(&table, YearRange::new(1850, 1853));
        let chart = chart_combined(&view);
        assert_eq!(chart.left.side, AxisSide::Left);
        assert_eq!(chart.right.side, AxisSide::Right);
        assert_eq!(chart.left.series.defined().count(), 3);
        assert_eq!(chart.right.series.defined().count(), 3);
        assert_eq!(chart.left.series.year_bounds(), Some((1850, 1853)));
        assert_eq!(chart.right.series.value_bounds(), Some((0.001, 0.003)));
    }

    #[test]
    fn titles_match_dashboard_labels() {
        let table = table();
        let view = View::new(&table, YearRange::new(1850, 1853));
        assert_eq!(chart_co2(&view).y_label, CO2_AXIS);
        assert_eq!(chart_temp(&view).title, TEMP_TITLE);
        assert_eq!(chart_combined(&view).left.title, COMBINED_CO2_AXIS);
        assert_eq!(chart_combined(&view).right.title, TEMP_AXIS);
    }

    #[test]
    fn all_null_series_has_no_bounds() {
        let table = table();
        let view = View::new(&table, YearRange::new(1850, 1850));
        assert_eq!(chart_temp(&view).value_bounds(), None);
        assert_eq!(chart_temp(&view).series.year_bounds(), Some((1850, 1850)));
    }
}
