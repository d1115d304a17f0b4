//! Extraction and consolidation of nuclear rows from generation extracts.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::Result;

use super::table::Table;

/// Column carrying the fuel type of each generation row.
pub const FUEL_TYPE_COLUMN: &str = "Reported Fuel Type Code";

/// File name of the per-year filtered extract.
pub fn filtered_file_name(year: i32) -> String {
    format!("nuclear_generation_{year}.csv")
}

/// File name of the consolidated multi-year extract.
pub const COMBINED_FILE_NAME: &str = "nuclear_generation_combined.csv";

/// Keeps the rows of a normalized generation table whose fuel code matches.
///
/// # Errors
///
/// Returns a missing-column error if the table has no fuel type column.
pub fn filter_fuel_type(table: &Table, fuel_code: &str, origin: &Path) -> Result<Table> {
    let col = table.require_column(FUEL_TYPE_COLUMN, origin)?;
    let code = fuel_code.trim();
    Ok(table.filter_rows(|row| row[col].trim() == code))
}

/// Loads one report year's generation extract and keeps its nuclear rows.
///
/// Writes `nuclear_generation_{year}.csv` into the work directory when
/// intermediates are enabled.
///
/// # Errors
///
/// Fails if the extract is unreadable, malformed, or lacks the fuel column.
pub fn extract_year(config: &AnalysisConfig, year: i32) -> Result<Table> {
    let path = config.input.generation_path(year);
    let mut table = Table::read_path(&path, config.input.generation_skip_lines)?;
    table.normalize_headers();

    let filtered = filter_fuel_type(&table, &config.filter.fuel_type_code, &path)?;
    info!(
        year,
        total = table.len(),
        kept = filtered.len(),
        fuel = %config.filter.fuel_type_code,
        "extracted generation rows"
    );

    if config.output.write_intermediates {
        filtered.write_path(&intermediate_path(config, &filtered_file_name(year)))?;
    }
    Ok(filtered)
}

/// Concatenates the per-year tables and re-normalizes their headers.
///
/// Writes `nuclear_generation_combined.csv` when intermediates are enabled.
///
/// # Errors
///
/// Fails only if the combined CSV cannot be written.
pub fn consolidate(config: &AnalysisConfig, per_year: &[Table]) -> Result<Table> {
    let mut combined = Table::concat(per_year);
    combined.normalize_headers();
    debug!(
        tables = per_year.len(),
        rows = combined.len(),
        "consolidated generation tables"
    );

    if config.output.write_intermediates {
        combined.write_path(&intermediate_path(config, COMBINED_FILE_NAME))?;
    }
    Ok(combined)
}

/// Path of an intermediate stage file inside the work directory.
pub fn intermediate_path(config: &AnalysisConfig, file_name: &str) -> PathBuf {
    config.output.work_dir.join(file_name)
}
