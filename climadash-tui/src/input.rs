//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use climadash_core::view::View;

use crate::app::{AppState, Overlay, Panel};

const YEAR_STEP: i32 = 1;
const WINDOW_STEP: i32 = 10;
const PAGE_ROWS: usize = 10;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::ErrorHistory {
        handle_error_overlay(app, key);
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='6') => {
            if let Some(panel) = Panel::from_index(c as usize - '1' as usize) {
                app.active_panel = panel;
            }
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('[') => {
            app.shift_start(-YEAR_STEP);
            return;
        }
        KeyCode::Char(']') => {
            app.shift_start(YEAR_STEP);
            return;
        }
        KeyCode::Char('{') => {
            app.shift_end(-YEAR_STEP);
            return;
        }
        KeyCode::Char('}') => {
            app.shift_end(YEAR_STEP);
            return;
        }
        KeyCode::Char('-') => {
            app.shift_window(-WINDOW_STEP);
            return;
        }
        KeyCode::Char('=') | KeyCode::Char('+') => {
            app.shift_window(WINDOW_STEP);
            return;
        }
        KeyCode::Char('0') => {
            app.reset_range();
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    if app.active_panel == Panel::Data {
        handle_data_key(app, key);
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_data_key(app: &mut AppState, key: KeyEvent) {
    let Some(table) = app.table() else {
        return;
    };
    let row_count = View::new(table, app.range).len();
    let col_count = table.columns().len().saturating_sub(1);
    let last_row = row_count.saturating_sub(1);

    let data = &mut app.data;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            data.scroll = (data.scroll + 1).min(last_row);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            data.scroll = data.scroll.saturating_sub(1);
        }
        KeyCode::PageDown => {
            data.scroll = (data.scroll + PAGE_ROWS).min(last_row);
        }
        KeyCode::PageUp => {
            data.scroll = data.scroll.saturating_sub(PAGE_ROWS);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            data.scroll = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            data.scroll = last_row;
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if data.col_offset + 1 < col_count {
                data.col_offset += 1;
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            data.col_offset = data.col_offset.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{synthetic_table, test_app};
    use crate::worker::{WorkerCommand, WorkerResponse};
    use climadash_core::view::YearRange;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn loaded_app() -> AppState {
        let (mut app, _rx) = test_app();
        app.handle_worker_response(WorkerResponse::TableLoaded {
            table: synthetic_table(),
        });
        app
    }

    #[test]
    fn number_keys_switch_panels() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.active_panel, Panel::Data);
        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.active_panel, Panel::Help);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_panel, Panel::Overview);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_panel, Panel::Help);
    }

    #[test]
    fn bracket_keys_move_range_edges() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char('{'));
        assert_eq!(app.range, YearRange::new(1901, 2019));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.range, YearRange::new(1891, 2009));
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.range, YearRange::new(1900, 2020));
    }

    #[test]
    fn quit_key_stops_app() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn error_overlay_swallows_keys() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn retry_key_requests_reload_after_failure() {
        let (mut app, rx) = test_app();
        app.handle_worker_response(WorkerResponse::LoadFailed {
            error: "boom".into(),
            is_fetch: false,
        });
        press(&mut app, KeyCode::Char('r'));
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::LoadTable)));
    }

    #[test]
    fn data_panel_scroll_is_bounded() {
        let mut app = loaded_app();
        app.set_range(YearRange::new(2010, 2020));
        press(&mut app, KeyCode::Char('5'));

        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.data.scroll, 10);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.data.scroll, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.data.scroll, 10);

        for _ in 0..20 {
            press(&mut app, KeyCode::Char('l'));
        }
        // Synthetic payload has 7 columns, year is pinned.
        assert_eq!(app.data.col_offset, 5);
    }

    #[test]
    fn data_keys_ignored_before_load() {
        let (mut app, _rx) = test_app();
        app.active_panel = Panel::Data;
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.data.scroll, 0);
    }
}
