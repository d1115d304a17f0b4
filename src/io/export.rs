//! CSV export for rankings and capacity-factor tables.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::pipeline::PipelineOutput;
use crate::pipeline::capacity_factor::MonthlyCapacityFactor;
use crate::pipeline::ranking::{AnnualCapacityFactor, PlantRanking, bottom, top};

/// Column header for ranking exports.
const RANKING_HEADER: &str = "Plant Name,CapacityFactor";

/// Column header for the monthly capacity-factor export.
const MONTHLY_HEADER: &str = "Plant Name,YEAR,Month,Date,Netgen_MWh,\
                              Net Summer Capacity (MW),DaysInMonth,HoursInMonth,\
                              MaxPossible_MWh,RawCapacityFactor,CapacityFactor";

/// Column header for the annual capacity-factor export.
const ANNUAL_HEADER: &str = "Plant Name,YEAR,Netgen_MWh,MaxPossible_MWh,CapacityFactor";

/// Full ranking file name.
pub const RANKING_FILE_NAME: &str = "plant_ranking.csv";
/// Top-N ranking file name.
pub const TOP_FILE_NAME: &str = "plant_ranking_top.csv";
/// Bottom-N ranking file name.
pub const BOTTOM_FILE_NAME: &str = "plant_ranking_bottom.csv";
/// Monthly table file name.
pub const MONTHLY_FILE_NAME: &str = "monthly_capacity_factor.csv";
/// Annual table file name.
pub const ANNUAL_FILE_NAME: &str = "annual_capacity_factor.csv";

fn header_fields(header: &str) -> impl Iterator<Item = &str> {
    header.split(',').map(str::trim)
}

/// Writes a plant ranking as CSV to any writer.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_ranking_csv(ranking: &[PlantRanking], writer: impl Write) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header_fields(RANKING_HEADER))?;
    for r in ranking {
        wtr.write_record(&[r.plant.clone(), format!("{:.6}", r.capacity_factor)])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes monthly capacity factors as CSV to any writer.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_monthly_csv(rows: &[MonthlyCapacityFactor], writer: impl Write) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header_fields(MONTHLY_HEADER))?;
    for m in rows {
        wtr.write_record(&[
            m.plant.clone(),
            m.year.to_string(),
            m.month.name().to_string(),
            m.date.format("%Y-%m-%d").to_string(),
            format!("{:.3}", m.netgen_mwh),
            format!("{:.3}", m.capacity_mw),
            m.days_in_month.to_string(),
            format!("{:.0}", m.hours_in_month),
            format!("{:.3}", m.max_possible_mwh),
            format!("{:.6}", m.raw_capacity_factor),
            format!("{:.6}", m.capacity_factor),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes annual capacity factors as CSV to any writer.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_annual_csv(rows: &[AnnualCapacityFactor], writer: impl Write) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header_fields(ANNUAL_HEADER))?;
    for a in rows {
        wtr.write_record(&[
            a.plant.clone(),
            a.year.to_string(),
            format!("{:.3}", a.netgen_mwh),
            format!("{:.3}", a.max_possible_mwh),
            format!("{:.6}", a.capacity_factor),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_to(
    path: PathBuf,
    write: impl FnOnce(std::io::BufWriter<std::fs::File>) -> csv::Result<()>,
) -> Result<PathBuf> {
    let file = super::create_file(&path)?;
    write(file).map_err(|source| PipelineError::Csv {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Writes every output table into `dir` and returns the paths written.
///
/// Produces the full ranking, the top and bottom `ranking_size` plants, and
/// the monthly and annual capacity-factor tables. Output is deterministic for
/// identical inputs.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn export_all(output: &PipelineOutput, dir: &Path, ranking_size: usize) -> Result<Vec<PathBuf>> {
    let ranking = &output.ranking;
    let written = vec![
        export_to(dir.join(RANKING_FILE_NAME), |w| write_ranking_csv(ranking, w))?,
        export_to(dir.join(TOP_FILE_NAME), |w| {
            write_ranking_csv(top(ranking, ranking_size), w)
        })?,
        export_to(dir.join(BOTTOM_FILE_NAME), |w| {
            write_ranking_csv(bottom(ranking, ranking_size), w)
        })?,
        export_to(dir.join(MONTHLY_FILE_NAME), |w| {
            write_monthly_csv(&output.monthly, w)
        })?,
        export_to(dir.join(ANNUAL_FILE_NAME), |w| {
            write_annual_csv(&output.annual, w)
        })?,
    ];
    for path in &written {
        info!(path = %path.display(), "exported");
    }
    Ok(written)
}
