//! Plant and year-window selection over the monthly capacity-factor table.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{PipelineError, Result};
use crate::pipeline::capacity_factor::MonthlyCapacityFactor;

/// A plant and an inclusive report-year window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub plant: String,
    pub first_year: i32,
    pub last_year: i32,
}

impl Selection {
    /// Creates a selection, rejecting windows whose first year is after the
    /// last.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidYearRange`] when `first_year > last_year`.
    pub fn new(plant: impl Into<String>, first_year: i32, last_year: i32) -> Result<Self> {
        if first_year > last_year {
            return Err(PipelineError::InvalidYearRange {
                first: first_year,
                last: last_year,
            });
        }
        Ok(Self {
            plant: plant.into(),
            first_year,
            last_year,
        })
    }

    /// Chart title, e.g. `Monthly Capacity Factor – Alpha (2021-2024)`.
    pub fn title(&self) -> String {
        format!(
            "Monthly Capacity Factor \u{2013} {} ({}-{})",
            self.plant, self.first_year, self.last_year
        )
    }

    /// File name of the saved figure.
    ///
    /// Spaces become underscores; path separators are replaced as well so the
    /// file always lands in the output directory.
    pub fn file_name(&self) -> String {
        let plant: String = self
            .plant
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                c => c,
            })
            .collect();
        format!(
            "capacity_factor_{plant}_{}_{}.png",
            self.first_year, self.last_year
        )
    }
}

/// Sorted, de-duplicated plant names.
pub fn plant_names(monthly: &[MonthlyCapacityFactor]) -> Vec<String> {
    monthly
        .iter()
        .map(|m| m.plant.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted, de-duplicated report years.
pub fn years(monthly: &[MonthlyCapacityFactor]) -> Vec<i32> {
    monthly
        .iter()
        .map(|m| m.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The selected plant's monthly capacity factors in date order.
pub fn series(monthly: &[MonthlyCapacityFactor], selection: &Selection) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> = monthly
        .iter()
        .filter(|m| {
            m.plant == selection.plant
                && (selection.first_year..=selection.last_year).contains(&m.year)
        })
        .map(|m| (m.date, m.capacity_factor))
        .collect();
    points.sort_by_key(|&(date, _)| date);
    points
}

/// Builds a selection covering every year in the table for `plant`.
///
/// # Errors
///
/// Returns [`PipelineError::UnknownPlant`] if the plant has no monthly rows.
pub fn full_range(monthly: &[MonthlyCapacityFactor], plant: &str) -> Result<Selection> {
    if !monthly.iter().any(|m| m.plant == plant) {
        return Err(PipelineError::UnknownPlant(plant.to_string()));
    }
    let all_years = years(monthly);
    let (Some(&first), Some(&last)) = (all_years.first(), all_years.last()) else {
        return Err(PipelineError::Empty);
    };
    Selection::new(plant, first, last)
}
