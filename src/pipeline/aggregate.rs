//! Plant-level aggregation of monthly net generation.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::ingest::capacity::PLANT_NAME_COLUMN;
use crate::ingest::number::{parse_number, parse_year};
use crate::ingest::table::Table;

/// Prefix shared by the monthly net generation headers.
pub const NETGEN_PREFIX: &str = "Netgen";

/// Report year column in the generation extracts.
pub const YEAR_COLUMN: &str = "YEAR";

/// File name of the plant-level intermediate.
pub const PLANT_LEVEL_FILE_NAME: &str = "nuclear_generation_plant_level.csv";

/// Monthly net generation summed over all nuclear units of one plant-year.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantYear {
    /// Trimmed plant name.
    pub plant: String,
    /// Report year.
    pub year: i32,
    /// One total per netgen column, in column order (MWh).
    pub netgen_mwh: Vec<f64>,
}

/// Plant-year totals plus the netgen headers they were summed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantLevel {
    /// Netgen headers in source column order (e.g. `"Netgen January"`).
    pub columns: Vec<String>,
    /// Plant-years ordered by plant, then year.
    pub rows: Vec<PlantYear>,
}

impl PlantLevel {
    /// Converts back to an untyped table for persistence.
    pub fn to_table(&self) -> Table {
        let mut headers = vec![PLANT_NAME_COLUMN.to_string(), YEAR_COLUMN.to_string()];
        headers.extend(self.columns.iter().cloned());
        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut cells = vec![r.plant.clone(), r.year.to_string()];
                cells.extend(r.netgen_mwh.iter().map(|v| v.to_string()));
                cells
            })
            .collect();
        Table::new(headers, rows)
    }
}

/// Groups a consolidated generation table by (plant, year) and sums every
/// netgen column.
///
/// Missing or malformed cells are skipped, so a plant-year whose cells are
/// all missing totals zero. Rows with a blank plant or unreadable year are
/// left out of the grouping.
///
/// # Errors
///
/// Fails if the plant name or year column is absent.
pub fn aggregate_plants(table: &Table, origin: &Path) -> Result<PlantLevel> {
    let plant_col = table.require_column(PLANT_NAME_COLUMN, origin)?;
    let year_col = table.require_column(YEAR_COLUMN, origin)?;
    let netgen: Vec<(usize, String)> = table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with(NETGEN_PREFIX))
        .map(|(i, h)| (i, h.clone()))
        .collect();
    debug!(columns = netgen.len(), "identified netgen columns");

    let mut groups: BTreeMap<(String, i32), Vec<f64>> = BTreeMap::new();
    let mut ungrouped = 0_usize;
    for row in table.rows() {
        let plant = row[plant_col].trim();
        let Some(year) = parse_year(&row[year_col]) else {
            ungrouped += 1;
            continue;
        };
        if plant.is_empty() {
            ungrouped += 1;
            continue;
        }

        let totals = groups
            .entry((plant.to_string(), year))
            .or_insert_with(|| vec![0.0; netgen.len()]);
        for (slot, (col, _)) in totals.iter_mut().zip(&netgen) {
            if let Some(mwh) = parse_number(&row[*col]) {
                *slot += mwh;
            }
        }
    }
    if ungrouped > 0 {
        warn!(rows = ungrouped, "rows without plant name or year were skipped");
    }

    Ok(PlantLevel {
        columns: netgen.into_iter().map(|(_, h)| h).collect(),
        rows: groups
            .into_iter()
            .map(|((plant, year), netgen_mwh)| PlantYear {
                plant,
                year,
                netgen_mwh,
            })
            .collect(),
    })
}
