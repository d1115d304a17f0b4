//! Color constants and axis helpers for the TUI.

use chrono::{Datelike, NaiveDate};
use ratatui::style::Color;

/// Capacity-factor line color.
pub const SERIES_COLOR: Color = Color::Cyan;
/// Highlighted plant in the selector.
pub const SELECTED_FG: Color = Color::Yellow;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Status line color after a save.
pub const STATUS_FG: Color = Color::Green;

/// Fixed capacity-factor axis bounds.
pub const CF_BOUNDS: [f64; 2] = [0.0, 1.1];

/// Chart x coordinate of a month: months since year 0.
pub fn month_x(date: NaiveDate) -> f64 {
    f64::from(date.year()) * 12.0 + f64::from(date.month0())
}

/// X-axis bounds covering the series, at least one month wide.
pub fn x_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let lo = points.first().map_or(0.0, |p| p.0);
    let hi = points.last().map_or(1.0, |p| p.0).max(lo + 1.0);
    [lo, hi]
}
