//! Top-level UI layout — range bar, active panel, status bar.

pub mod chart_panel;
pub mod data_panel;
pub mod help_panel;
pub mod overlays;
pub mod overview_panel;
pub mod status_bar;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use climadash_core::view::Rendered;

use crate::app::{AppState, LoadState, Overlay, Panel};
use crate::theme;
use crate::ui::widgets::RangeSlider;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_range_bar(f, chunks[0], app);

    // Every frame re-derives from the shared table; nothing rendered is kept.
    let rendered = app.rendered();
    draw_panel(f, chunks[1], app, rendered.as_ref());

    status_bar::render(f, chunks[2], app);

    if app.overlay == Overlay::ErrorHistory {
        overlays::render_error_history(f, chunks[1], app);
    }
}

fn draw_range_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Select Year Range ")
        .title_style(theme::muted());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(10)])
        .split(inner);

    let label = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {}", app.range), theme::accent_bold()),
        Span::styled(format!(" ({}y)", app.range.span()), theme::muted()),
    ]));
    f.render_widget(label, cols[0]);
    f.render_widget(RangeSlider::new(app.range, app.bounds), cols[1]);
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState, rendered: Option<&Rendered>) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Overview => overview_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner),
        _ => match rendered {
            Some(rendered) => match panel {
                Panel::Co2 => chart_panel::render_line(f, inner, &rendered.chart_co2, theme::CO2_SERIES),
                Panel::Temperature => {
                    chart_panel::render_line(f, inner, &rendered.chart_temp, theme::TEMP_SERIES)
                }
                Panel::Combined => chart_panel::render_dual(f, inner, &rendered.chart_combined),
                _ => data_panel::render(f, inner, &rendered.data_view, &app.data),
            },
            None => render_not_ready(f, inner, &app.load),
        },
    }
}

/// Placeholder for panels that need the table.
fn render_not_ready(f: &mut Frame, area: Rect, load: &LoadState) {
    let lines = match load {
        LoadState::Failed(err) => vec![
            Line::from(""),
            Line::from(Span::styled("Failed to load the dataset.", theme::negative())),
            Line::from(""),
            Line::from(Span::styled(err.clone(), theme::muted())),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to retry, e for error history.",
                theme::neutral(),
            )),
        ],
        _ => vec![
            Line::from(""),
            Line::from(Span::styled("Loading dataset...", theme::warning())),
        ],
    };
    f.render_widget(Paragraph::new(lines), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{synthetic_table, test_app};
    use crate::worker::WorkerResponse;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn every_panel_draws_after_load() {
        let (mut app, _rx) = test_app();
        app.handle_worker_response(WorkerResponse::TableLoaded {
            table: synthetic_table(),
        });
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        for panel in Panel::ALL {
            app.active_panel = panel;
            terminal.draw(|f| draw(f, &app)).unwrap();
            let text = screen_text(&terminal);
            assert!(text.contains(panel.label()), "{panel:?} title missing");
            assert!(text.contains("1900–2020"));
        }
    }

    #[test]
    fn chart_panels_show_loading_placeholder() {
        let (mut app, _rx) = test_app();
        app.active_panel = Panel::Co2;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Loading dataset"));
    }

    #[test]
    fn failed_load_shows_retry_hint() {
        let (mut app, _rx) = test_app();
        app.handle_worker_response(WorkerResponse::LoadFailed {
            error: "http status 503".into(),
            is_fetch: true,
        });
        app.active_panel = Panel::Data;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Press r to retry"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (app, _rx) = test_app();
        let mut terminal = Terminal::new(TestBackend::new(12, 6)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
