//! Monthly capacity-factor plots for a plant and year window.

pub mod chart;
pub mod series;

pub use chart::save_plot;
pub use series::{Selection, full_range, plant_names, series, years};
