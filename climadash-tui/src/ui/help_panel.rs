//! Panel 6 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-6", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Year Range");
    key(&mut lines, "[ / ]", "Move start year back / forward");
    key(&mut lines, "{ / }", "Move end year back / forward");
    key(&mut lines, "- / =", "Slide the whole window by 10 years");
    key(&mut lines, "0", "Reset to the default range");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 5 — Raw Data");
    key(&mut lines, "j / k", "Scroll rows");
    key(&mut lines, "PgUp / PgDn", "Scroll a page");
    key(&mut lines, "g / G", "Jump to newest / oldest year");
    key(&mut lines, "h / l", "Scroll columns (year stays pinned)");
    lines.push(Line::from(""));

    section(&mut lines, "Data");
    key(&mut lines, "r", "Retry after a failed load");
    key(&mut lines, "e", "Open error history overlay");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
