//! Neon-on-charcoal palette and style helpers.
//!
//! - **Accent**: electric cyan (focus, temperature series)
//! - **Positive**: neon green (success, loaded state)
//! - **Negative**: hot pink (errors, CO₂ series)
//! - **Warning**: neon orange (alerts, partial loads)
//! - **Neutral**: cool purple (secondary info)
//! - **Muted**: steel blue (hints, axis labels)

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);

pub const CO2_SERIES: Color = NEGATIVE;
pub const TEMP_SERIES: Color = ACCENT;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
