//! Two-handle year range slider.
//!
//! Draws `min ━━━●━━━━━●━━━ max` with the selected span highlighted.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use climadash_core::view::YearRange;

use crate::theme;

const TRACK: &str = "─";
const SELECTED: &str = "━";
const HANDLE: &str = "●";

pub struct RangeSlider {
    range: YearRange,
    bounds: (i32, i32),
    track_style: Style,
    selected_style: Style,
    handle_style: Style,
}

impl RangeSlider {
    pub fn new(range: YearRange, bounds: (i32, i32)) -> Self {
        Self {
            range,
            bounds,
            track_style: theme::muted(),
            selected_style: theme::accent(),
            handle_style: theme::accent_bold(),
        }
    }
}

/// Column of `year` on a track `width` cells wide.
pub fn track_position(year: i32, (min, max): (i32, i32), width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let last = width - 1;
    if max <= min {
        return 0;
    }
    let year = year.clamp(min, max);
    let frac = f64::from(year - min) / f64::from(max - min);
    (frac * f64::from(last)).round() as u16
}

impl Widget for RangeSlider {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let (min, max) = self.bounds;
        let min_label = format!("{min} ");
        let max_label = format!(" {max}");
        let labels = (min_label.chars().count() + max_label.chars().count()) as u16;
        if area.width <= labels + 2 {
            return;
        }

        let y = area.y;
        buf.set_string(area.x, y, &min_label, self.track_style);
        let track_x = area.x + min_label.chars().count() as u16;
        let track_w = area.width - labels;
        buf.set_string(track_x + track_w, y, &max_label, self.track_style);

        let lo = track_position(self.range.start, self.bounds, track_w);
        let hi = track_position(self.range.end, self.bounds, track_w);
        for i in 0..track_w {
            let (symbol, style) = if i == lo || i == hi {
                (HANDLE, self.handle_style)
            } else if i > lo && i < hi {
                (SELECTED, self.selected_style)
            } else {
                (TRACK, self.track_style)
            };
            buf.set_string(track_x + i, y, symbol, style);
        }
    }
}
