//! Explorer application state.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::Result;
use crate::pipeline::capacity_factor::MonthlyCapacityFactor;
use crate::plot::{self, Selection};

/// TUI application state.
pub struct App {
    /// Monthly capacity-factor rows backing every chart.
    monthly: Vec<MonthlyCapacityFactor>,
    /// Sorted plant names offered by the selector.
    pub plants: Vec<String>,
    /// Sorted report years offered by the range control.
    pub years: Vec<i32>,
    /// Index into `plants`.
    pub selected: usize,
    /// Index into `years` of the first year shown.
    pub first_idx: usize,
    /// Index into `years` of the last year shown.
    pub last_idx: usize,
    /// Directory saved figures are written to.
    output_dir: PathBuf,
    /// Last save outcome shown in the status line.
    pub status: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates an app over the monthly table, selecting the first plant and
    /// the full year range.
    pub fn new(monthly: Vec<MonthlyCapacityFactor>, output_dir: PathBuf) -> Self {
        let plants = plot::plant_names(&monthly);
        let years = plot::years(&monthly);
        let last_idx = years.len().saturating_sub(1);
        Self {
            monthly,
            plants,
            years,
            selected: 0,
            first_idx: 0,
            last_idx,
            output_dir,
            status: None,
            quit: false,
        }
    }

    /// Name of the selected plant, if any plant exists.
    pub fn plant(&self) -> Option<&str> {
        self.plants.get(self.selected).map(String::as_str)
    }

    /// The current plant and year window.
    pub fn selection(&self) -> Option<Selection> {
        let plant = self.plant()?;
        let first = *self.years.get(self.first_idx)?;
        let last = *self.years.get(self.last_idx)?;
        Selection::new(plant, first, last).ok()
    }

    /// Monthly capacity factors for the current selection, in date order.
    pub fn current_series(&self) -> Vec<(NaiveDate, f64)> {
        self.selection()
            .map(|sel| plot::series(&self.monthly, &sel))
            .unwrap_or_default()
    }

    /// Selects the next plant, wrapping around.
    pub fn next_plant(&mut self) {
        if !self.plants.is_empty() {
            self.selected = (self.selected + 1) % self.plants.len();
        }
    }

    /// Selects the previous plant, wrapping around.
    pub fn prev_plant(&mut self) {
        if !self.plants.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.plants.len() - 1);
        }
    }

    /// Moves the first year earlier.
    pub fn first_year_down(&mut self) {
        self.first_idx = self.first_idx.saturating_sub(1);
    }

    /// Moves the first year later, never past the last year.
    pub fn first_year_up(&mut self) {
        if self.first_idx < self.last_idx {
            self.first_idx += 1;
        }
    }

    /// Moves the last year earlier, never before the first year.
    pub fn last_year_down(&mut self) {
        if self.last_idx > self.first_idx {
            self.last_idx -= 1;
        }
    }

    /// Moves the last year later.
    pub fn last_year_up(&mut self) {
        if self.last_idx + 1 < self.years.len() {
            self.last_idx += 1;
        }
    }

    /// Saves the current figure and records the outcome in the status line.
    pub fn save(&mut self) -> Result<Option<PathBuf>> {
        let Some(sel) = self.selection() else {
            return Ok(None);
        };
        let points = plot::series(&self.monthly, &sel);
        match plot::save_plot(&self.output_dir, &sel, &points) {
            Ok(path) => {
                self.status = Some(format!("Saved: {}", path.display()));
                Ok(Some(path))
            }
            Err(e) => {
                self.status = Some(format!("error: {e}"));
                Err(e)
            }
        }
    }
}
