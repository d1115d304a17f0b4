//! Monthly capacity factors from joined generation and capacity.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::ingest::capacity::CapacityTable;

use super::calendar::Month;
use super::reshape::MonthlyGeneration;

/// One plant-month with every derived capacity-factor column.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCapacityFactor {
    pub plant: String,
    pub year: i32,
    pub month: Month,
    /// First day of the month, for chronological ordering and plotting.
    pub date: NaiveDate,
    /// Net generation clipped at zero (MWh).
    pub netgen_mwh: f64,
    /// Plant summer capacity (MW).
    pub capacity_mw: f64,
    pub days_in_month: u32,
    pub hours_in_month: f64,
    /// Capacity times hours in the month (MWh).
    pub max_possible_mwh: f64,
    /// Unclipped ratio, used only to reject bad data.
    pub raw_capacity_factor: f64,
    /// Reported capacity factor in `[0, 1]`.
    pub capacity_factor: f64,
}

/// Counts of joined rows removed at each filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Rows considered.
    pub input: usize,
    /// Plant absent from the capacity extract.
    pub unmatched: usize,
    /// Month label that is not a calendar month.
    pub unknown_month: usize,
    /// Plant capacity is zero or negative.
    pub nonpositive_capacity: usize,
    /// Raw capacity factor above the ceiling or not finite.
    pub outliers: usize,
    /// Rows kept.
    pub kept: usize,
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} plant-months kept (unmatched={}, unknown_month={}, \
             nonpositive_capacity={}, outliers={})",
            self.kept,
            self.input,
            self.unmatched,
            self.unknown_month,
            self.nonpositive_capacity,
            self.outliers
        )
    }
}

/// Joins monthly generation onto plant capacity and derives capacity factors.
///
/// Negative net generation is clipped to zero before the ratio is taken.
/// Rows whose raw factor exceeds `max_raw_capacity_factor` are rejected;
/// survivors report the factor clamped to `[0, 1]`. Output is ordered by
/// plant, then date.
///
/// # Examples
///
/// ```
/// use nuclear_cf::ingest::CapacityTable;
/// use nuclear_cf::pipeline::capacity_factor::compute_monthly;
/// use nuclear_cf::pipeline::reshape::MonthlyGeneration;
///
/// let capacity = CapacityTable::from_pairs("Summer Capacity (MW)", [("Alpha", 1000.0)]);
/// let generation = vec![MonthlyGeneration {
///     plant: "Alpha".into(),
///     year: 2023,
///     month: "April".into(),
///     netgen_mwh: 360_000.0,
/// }];
/// let (rows, stats) = compute_monthly(&generation, &capacity, 1.2);
/// assert_eq!(stats.kept, 1);
/// assert!((rows[0].capacity_factor - 0.5).abs() < 1e-12);
/// ```
pub fn compute_monthly(
    generation: &[MonthlyGeneration],
    capacity: &CapacityTable,
    max_raw_capacity_factor: f64,
) -> (Vec<MonthlyCapacityFactor>, FilterStats) {
    let mut stats = FilterStats {
        input: generation.len(),
        ..FilterStats::default()
    };
    let mut out = Vec::with_capacity(generation.len());

    for row in generation {
        let Some(capacity_mw) = capacity.capacity_mw(&row.plant) else {
            stats.unmatched += 1;
            continue;
        };
        let Some(month) = Month::from_name(&row.month) else {
            stats.unknown_month += 1;
            continue;
        };
        let (Some(days), Some(date)) = (month.days_in(row.year), month.first_day(row.year))
        else {
            stats.unknown_month += 1;
            continue;
        };
        if capacity_mw <= 0.0 {
            stats.nonpositive_capacity += 1;
            continue;
        }

        let hours = f64::from(days * 24);
        let netgen_mwh = row.netgen_mwh.max(0.0);
        let max_possible_mwh = capacity_mw * hours;
        let raw = netgen_mwh / max_possible_mwh;
        if !raw.is_finite() || raw > max_raw_capacity_factor {
            debug!(
                plant = %row.plant,
                year = row.year,
                month = %month,
                raw,
                "rejected capacity factor outlier"
            );
            stats.outliers += 1;
            continue;
        }

        out.push(MonthlyCapacityFactor {
            plant: row.plant.clone(),
            year: row.year,
            month,
            date,
            netgen_mwh,
            capacity_mw,
            days_in_month: days,
            hours_in_month: hours,
            max_possible_mwh,
            raw_capacity_factor: raw,
            capacity_factor: raw.clamp(0.0, 1.0),
        });
    }

    out.sort_by(|a, b| a.plant.cmp(&b.plant).then(a.date.cmp(&b.date)));
    stats.kept = out.len();

    if stats.unmatched > 0 {
        warn!(
            rows = stats.unmatched,
            "plant-months without a capacity match were dropped"
        );
    }
    if stats.unknown_month > 0 {
        warn!(
            rows = stats.unknown_month,
            "plant-months with an unrecognized month label were dropped"
        );
    }
    (out, stats)
}
