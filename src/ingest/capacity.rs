//! Plant-level summer capacity from the generator capacity extract.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};

use super::number::parse_number;
use super::table::Table;

/// Plant name column shared by the generation and capacity extracts.
pub const PLANT_NAME_COLUMN: &str = "Plant Name";

/// Preferred summer capacity header.
pub const SUMMER_CAPACITY_COLUMN: &str = "Summer Capacity (MW)";

/// Summer capacity per plant, summed over its generators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapacityTable {
    /// Header the capacity values were taken from.
    pub source_column: String,
    by_plant: BTreeMap<String, f64>,
}

impl CapacityTable {
    /// Builds a capacity table from `(plant, capacity_mw)` pairs.
    pub fn from_pairs<I, S>(source_column: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut by_plant = BTreeMap::new();
        for (plant, mw) in pairs {
            *by_plant.entry(plant.into()).or_insert(0.0) += mw;
        }
        Self {
            source_column: source_column.to_string(),
            by_plant,
        }
    }

    /// Summed capacity for a plant (MW), if the plant is listed.
    pub fn capacity_mw(&self, plant: &str) -> Option<f64> {
        self.by_plant.get(plant).copied()
    }

    /// Number of distinct plants.
    pub fn len(&self) -> usize {
        self.by_plant.len()
    }

    /// Returns `true` when no plants are listed.
    pub fn is_empty(&self) -> bool {
        self.by_plant.is_empty()
    }
}

/// Picks the summer capacity column.
///
/// Candidates contain both `"Capacity"` and `"Summer"`; the exact
/// [`SUMMER_CAPACITY_COLUMN`] wins, otherwise the first candidate.
pub fn locate_capacity_column(headers: &[String]) -> Option<usize> {
    let candidates: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.contains("Capacity") && h.contains("Summer"))
        .map(|(i, _)| i)
        .collect();

    candidates
        .iter()
        .copied()
        .find(|&i| headers[i] == SUMMER_CAPACITY_COLUMN)
        .or_else(|| candidates.first().copied())
}

/// Sums a normalized capacity table by trimmed plant name.
///
/// Unparseable capacity cells count as missing and are skipped; rows with a
/// blank plant name are ignored.
///
/// # Errors
///
/// Fails if the plant name column or a summer capacity column is absent.
pub fn summarize(table: &Table, origin: &Path) -> Result<CapacityTable> {
    let plant_col = table.require_column(PLANT_NAME_COLUMN, origin)?;
    let cap_col = locate_capacity_column(table.headers()).ok_or_else(|| {
        PipelineError::NoCapacityColumn {
            path: origin.to_path_buf(),
        }
    })?;
    let source_column = table.headers()[cap_col].clone();
    debug!(column = %source_column, "located summer capacity column");

    let mut missing = 0_usize;
    let mut by_plant: BTreeMap<String, f64> = BTreeMap::new();
    for row in table.rows() {
        let plant = row[plant_col].trim();
        if plant.is_empty() {
            continue;
        }
        let total = by_plant.entry(plant.to_string()).or_insert(0.0);
        match parse_number(&row[cap_col]) {
            Some(mw) => *total += mw,
            None => missing += 1,
        }
    }
    if missing > 0 {
        warn!(missing, "capacity cells could not be parsed and were skipped");
    }

    Ok(CapacityTable {
        source_column,
        by_plant,
    })
}

/// Reads the capacity extract and sums summer capacity by plant.
///
/// # Errors
///
/// Fails if the extract is unreadable, malformed, or lacks required columns.
pub fn load_capacity(path: &Path, skip_lines: usize) -> Result<CapacityTable> {
    let mut table = Table::read_path(path, skip_lines)?;
    table.normalize_headers();
    let capacity = summarize(&table, path)?;
    info!(
        path = %path.display(),
        generators = table.len(),
        plants = capacity.len(),
        column = %capacity.source_column,
        "loaded plant capacity"
    );
    Ok(capacity)
}
