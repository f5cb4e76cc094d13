//! Panels 2-4 — CO₂, temperature and combined line charts.

use chrono::Datelike;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use climadash_core::view::{DualAxisChart, LineChart, Series};

use crate::theme;

const RIGHT_AXIS_WIDTH: u16 = 12;

/// Split a series at its nulls so gaps are not bridged by a line.
pub fn segments(series: &Series) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for point in &series.points {
        match point.value {
            Some(v) => current.push((f64::from(point.year.year()), v)),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Pad a value range by 5% so the line does not touch the frame.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = (hi - lo).abs();
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (hi.abs() * 0.05).max(0.5)
    };
    (lo - pad, hi + pad)
}

fn x_bounds(series: &Series) -> (f64, f64) {
    let (a, b) = series.year_bounds().unwrap_or((0, 1));
    let (a, b) = (f64::from(a), f64::from(b));
    if b > a {
        (a, b)
    } else {
        (a - 0.5, b + 0.5)
    }
}

fn axis_labels(lo: f64, hi: f64, precision: usize) -> Vec<Span<'static>> {
    let mid = (lo + hi) / 2.0;
    [lo, mid, hi]
        .iter()
        .map(|v| Span::styled(format!("{v:.precision$}"), theme::muted()))
        .collect()
}

fn year_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{lo:.0}"), theme::muted()),
        Span::styled(format!("{:.0}", (lo + hi) / 2.0), theme::muted()),
        Span::styled(format!("{hi:.0}"), theme::muted()),
    ]
}

/// Precision that keeps small temperature deltas readable.
fn precision_for((lo, hi): (f64, f64)) -> usize {
    let span = (hi - lo).abs();
    if span >= 100.0 {
        0
    } else if span >= 1.0 {
        2
    } else {
        3
    }
}

fn datasets<'a>(name: &'a str, segs: &'a [Vec<(f64, f64)>], color: Color) -> Vec<Dataset<'a>> {
    segs.iter()
        .enumerate()
        .map(|(i, seg)| {
            let ds = Dataset::default()
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(color))
                .graph_type(GraphType::Line)
                .data(seg);
            if i == 0 {
                ds.name(name)
            } else {
                ds
            }
        })
        .collect()
}

fn render_empty(f: &mut Frame, area: Rect, title: &str) {
    let lines = vec![
        Line::from(Span::styled(title.to_string(), theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "No values in the selected year range.",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "Widen it with [ ] { } or press 0 to reset.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn split_title(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn render_line(f: &mut Frame, area: Rect, chart: &LineChart, color: Color) {
    let Some(bounds) = chart.value_bounds() else {
        render_empty(f, area, &chart.title);
        return;
    };
    let (title_area, chart_area) = split_title(area);
    f.render_widget(
        Paragraph::new(Span::styled(chart.title.as_str(), theme::accent_bold())),
        title_area,
    );

    let (y_lo, y_hi) = padded(bounds);
    let (x_lo, x_hi) = x_bounds(&chart.series);
    let segs = segments(&chart.series);

    let widget = Chart::new(datasets(&chart.series.name, &segs, color))
        .x_axis(
            Axis::default()
                .title(Span::styled(chart.x_label.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([x_lo, x_hi])
                .labels(year_labels(x_lo, x_hi)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.y_label.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([y_lo, y_hi])
                .labels(axis_labels(y_lo, y_hi, precision_for(bounds))),
        );
    f.render_widget(widget, chart_area);
}

/// Map `v` from one value range onto another.
pub fn rescale(v: f64, (from_lo, from_hi): (f64, f64), (to_lo, to_hi): (f64, f64)) -> f64 {
    let span = from_hi - from_lo;
    if span.abs() < f64::EPSILON {
        return (to_lo + to_hi) / 2.0;
    }
    to_lo + (v - from_lo) / span * (to_hi - to_lo)
}

/// Dual y axes: the right series is rescaled into the left axis bounds and
/// its own labels are drawn in a narrow column beside the plot.
pub fn render_dual(f: &mut Frame, area: Rect, chart: &DualAxisChart) {
    let left_bounds = chart.left.series.value_bounds();
    let right_bounds = chart.right.series.value_bounds();
    if left_bounds.is_none() && right_bounds.is_none() {
        render_empty(f, area, &chart.title);
        return;
    }

    let (title_area, body) = split_title(area);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(chart.title.as_str(), theme::accent_bold()),
            Span::raw("  "),
            Span::styled(format!("■ {}", chart.left.title), Style::default().fg(theme::CO2_SERIES)),
            Span::raw("  "),
            Span::styled(format!("■ {}", chart.right.title), Style::default().fg(theme::TEMP_SERIES)),
        ])),
        title_area,
    );

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(RIGHT_AXIS_WIDTH)])
        .split(body);

    let left_y = padded(left_bounds.or(right_bounds).unwrap_or((0.0, 1.0)));
    let right_y = right_bounds.map(padded);
    let (x_lo, x_hi) = x_bounds(&chart.left.series);

    let left_segs = segments(&chart.left.series);
    let right_segs: Vec<Vec<(f64, f64)>> = match right_y {
        Some(ry) => segments(&chart.right.series)
            .into_iter()
            .map(|seg| seg.into_iter().map(|(x, y)| (x, rescale(y, ry, left_y))).collect())
            .collect(),
        None => Vec::new(),
    };

    let mut sets = datasets(&chart.left.series.name, &left_segs, theme::CO2_SERIES);
    sets.extend(datasets(&chart.right.series.name, &right_segs, theme::TEMP_SERIES));

    let widget = Chart::new(sets)
        .x_axis(
            Axis::default()
                .title(Span::styled(chart.x_label.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([x_lo, x_hi])
                .labels(year_labels(x_lo, x_hi)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.left.title.as_str(), theme::muted()))
                .style(theme::muted())
                .bounds([left_y.0, left_y.1])
                .labels(axis_labels(left_y.0, left_y.1, precision_for(left_y))),
        );
    f.render_widget(widget, cols[0]);

    if let Some((lo, hi)) = right_y {
        render_right_axis(f, cols[1], (lo, hi));
    }
}

/// Right axis labels, top to bottom, aligned with the plot's top and bottom rows.
fn render_right_axis(f: &mut Frame, area: Rect, (lo, hi): (f64, f64)) {
    if area.height < 3 {
        return;
    }
    let precision = precision_for((lo, hi));
    // The x axis line, its labels and its title take the bottom rows of the chart.
    let plot_rows = area.height.saturating_sub(3).max(1) as usize;
    let mut lines = vec![Line::from(""); plot_rows];
    lines[0] = Line::from(Span::styled(format!("{hi:.precision$}"), Style::default().fg(theme::TEMP_SERIES)));
    if plot_rows > 2 {
        lines[plot_rows / 2] = Line::from(Span::styled(
            format!("{:.precision$}", (lo + hi) / 2.0),
            Style::default().fg(theme::TEMP_SERIES),
        ));
    }
    if plot_rows > 1 {
        lines[plot_rows - 1] = Line::from(Span::styled(format!("{lo:.precision$}"), Style::default().fg(theme::TEMP_SERIES)));
    }
    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use climadash_core::view::SeriesPoint;

    fn series(values: &[(i32, Option<f64>)]) -> Series {
        Series {
            name: "s".into(),
            points: values
                .iter()
                .map(|&(y, value)| SeriesPoint {
                    year: NaiveDate::from_ymd_opt(y, 1, 1).unwrap(),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn segments_break_at_nulls() {
        let s = series(&[
            (1900, Some(1.0)),
            (1901, None),
            (1902, Some(2.0)),
            (1903, Some(3.0)),
            (1904, None),
        ]);
        let segs = segments(&s);
        assert_eq!(segs, vec![vec![(1900.0, 1.0)], vec![(1902.0, 2.0), (1903.0, 3.0)]]);
    }

    #[test]
    fn all_null_series_has_no_segments() {
        let s = series(&[(1900, None), (1901, None)]);
        assert!(segments(&s).is_empty());
    }

    #[test]
    fn rescale_maps_endpoints() {
        assert_eq!(rescale(0.0, (0.0, 1.0), (100.0, 200.0)), 100.0);
        assert_eq!(rescale(1.0, (0.0, 1.0), (100.0, 200.0)), 200.0);
        assert_eq!(rescale(0.5, (0.5, 0.5), (0.0, 10.0)), 5.0);
    }

    #[test]
    fn single_year_gets_nonzero_x_span() {
        let s = series(&[(1990, Some(1.0))]);
        let (lo, hi) = x_bounds(&s);
        assert!(hi > lo);
    }
}
