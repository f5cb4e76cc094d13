//! Panel 1 — Overview: dashboard title, about section, headline indicators,
//! load summary.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use climadash_core::indicators::{key_indicators, ABOUT, DASHBOARD_TITLE, DATA_SOURCE_CAPTION};

use crate::app::{AppState, LoadState};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(about_height()),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(about_lines()).wrap(Wrap { trim: true }), chunks[0]);

    render_indicators(f, chunks[1]);
    render_load_summary(f, chunks[2], app);

    f.render_widget(
        Paragraph::new(Span::styled(DATA_SOURCE_CAPTION, theme::muted())),
        chunks[3],
    );
}

/// One row each for the title, heading, name, affiliation, interests heading,
/// every interest, and the summary.
fn about_height() -> u16 {
    (ABOUT.research_interests.len() + 6) as u16
}

fn about_lines() -> Vec<Line<'static>> {
    let field = |label: &'static str, value: &'static str| {
        Line::from(vec![
            Span::styled(label, theme::accent()),
            Span::styled(value, theme::neutral()),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(format!("🌍 {DASHBOARD_TITLE}"), theme::accent_bold())),
        Line::from(Span::styled("About Me", theme::muted())),
        field("Name: ", ABOUT.name),
        field("Affiliation: ", ABOUT.affiliation),
        Line::from(Span::styled("Research Interests:", theme::accent())),
    ];
    lines.extend(
        ABOUT
            .research_interests
            .iter()
            .map(|interest| Line::from(Span::styled(format!("  - {interest}"), theme::muted()))),
    );
    lines.push(Line::from(Span::styled(ABOUT.summary, theme::muted())));
    lines
}

fn render_indicators(f: &mut Frame, area: Rect) {
    let indicators = key_indicators();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, indicators.len() as u32); indicators.len()])
        .split(area);

    for (ind, col) in indicators.iter().zip(cols.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(format!(" {} ", ind.label))
            .title_style(theme::muted());
        let para = Paragraph::new(vec![
            Line::from(Span::styled(ind.value, theme::accent_bold())),
            Line::from(Span::styled(ind.delta, theme::positive())),
        ])
        .block(block);
        f.render_widget(para, *col);
    }
}

fn render_load_summary(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines = vec![Line::from(vec![
        Span::styled("Source: ", theme::muted()),
        Span::styled(app.source_name.as_str(), theme::neutral()),
    ])];

    match &app.load {
        LoadState::Loading => {
            lines.push(Line::from(Span::styled("Loading dataset...", theme::warning())));
        }
        LoadState::Failed(err) => {
            lines.push(Line::from(Span::styled(format!("Load failed: {err}"), theme::negative())));
            lines.push(Line::from(Span::styled("Press r to retry.", theme::muted())));
        }
        LoadState::Ready(table) => {
            let report = table.report();
            let span = table
                .year_span()
                .map(|(a, b)| format!("{a}–{b}"))
                .unwrap_or_else(|| "none".into());
            lines.push(Line::from(vec![
                Span::styled("Rows: ", theme::muted()),
                Span::styled(
                    format!("{} {} of {} in payload", table.len(), table.category(), report.source_rows),
                    theme::positive(),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Years: ", theme::muted()),
                Span::styled(span, theme::positive()),
                Span::styled(format!("  ({} columns)", table.columns().len()), theme::muted()),
            ]));
            if report.skipped_rows > 0 || report.duplicate_rows > 0 || report.coerced_cells > 0 {
                lines.push(Line::from(Span::styled(
                    format!(
                        "Skipped {} rows with bad years and {} repeated years, nulled {} non-numeric cells",
                        report.skipped_rows, report.duplicate_rows, report.coerced_cells
                    ),
                    theme::warning(),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled("Fingerprint: ", theme::muted()),
                Span::styled(report.fingerprint.chars().take(16).collect::<String>(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
