//! Panel 5 — Raw Data: the selected years, newest first, every column.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use climadash_core::view::{ColumnKind, DataView};

use crate::app::DataPanelState;
use crate::theme;

const YEAR_WIDTH: u16 = 12;
const MIN_COL_WIDTH: u16 = 8;
const MAX_COL_WIDTH: u16 = 22;

/// Column order on screen: the year column pinned first, then the rest
/// starting at `col_offset`.
pub fn visible_columns(view: &DataView, col_offset: usize) -> Vec<usize> {
    let year = view.columns.iter().position(|c| c.kind == ColumnKind::Date);
    let rest: Vec<usize> = (0..view.columns.len()).filter(|&i| Some(i) != year).collect();
    year.into_iter()
        .chain(rest.into_iter().skip(col_offset))
        .collect()
}

fn column_width(view: &DataView, idx: usize) -> u16 {
    if view.columns[idx].kind == ColumnKind::Date {
        return YEAR_WIDTH;
    }
    let label = view.columns[idx].label.chars().count();
    let widest = view
        .rows
        .iter()
        .filter_map(|r| r.cells.get(idx))
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    (label.max(widest) as u16 + 1).clamp(MIN_COL_WIDTH, MAX_COL_WIDTH)
}

pub fn render(f: &mut Frame, area: Rect, view: &DataView, state: &DataPanelState) {
    if view.is_empty() {
        let para = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No rows in the selected year range.", theme::muted())),
        ]);
        f.render_widget(para, area);
        return;
    }

    // Keep only as many columns as fit the width.
    let mut used = 0u16;
    let mut columns = Vec::new();
    for idx in visible_columns(view, state.col_offset) {
        let w = column_width(view, idx);
        if used + w > area.width && !columns.is_empty() {
            break;
        }
        used = used.saturating_add(w + 1);
        columns.push((idx, w));
    }

    let header = Row::new(columns.iter().map(|&(idx, _)| {
        Cell::from(view.columns[idx].label.clone())
            .style(theme::accent_bold().add_modifier(Modifier::UNDERLINED))
    }));

    let body_height = area.height.saturating_sub(2) as usize;
    let rows = view
        .rows
        .iter()
        .skip(state.scroll)
        .take(body_height)
        .map(|r| {
            Row::new(columns.iter().map(|&(idx, _)| {
                let text = r.cells.get(idx).cloned().unwrap_or_default();
                let style = match view.columns[idx].kind {
                    ColumnKind::Date => theme::neutral(),
                    ColumnKind::Number if text.is_empty() => theme::muted(),
                    _ => ratatui::style::Style::default(),
                };
                Cell::from(text).style(style)
            }))
        });

    let widths: Vec<Constraint> = columns.iter().map(|&(_, w)| Constraint::Length(w)).collect();
    let table = Table::new(rows, widths).header(header).column_spacing(1);
    f.render_widget(table, area);

    let footer = format!(
        " rows {}-{} of {} | cols +{} | j/k PgUp/PgDn g/G h/l ",
        (state.scroll + 1).min(view.len()),
        (state.scroll + body_height).min(view.len()),
        view.len(),
        state.col_offset,
    );
    if area.height > 2 {
        let footer_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        f.render_widget(Paragraph::new(Span::styled(footer, theme::muted())), footer_area);
    }
}
