//! Capacity-factor derivation pipeline.
//!
//! Stages run in order: extract nuclear rows per year, consolidate, aggregate
//! to plant level, reshape to long form, join capacity and derive monthly
//! capacity factors, then aggregate to annual factors and rank plants.

pub mod aggregate;
/// Month lengths and names.
pub mod calendar;
pub mod capacity_factor;
pub mod ranking;
pub mod report;
/// Wide-to-long reshape of monthly generation.
pub mod reshape;

use tracing::info;

use crate::config::AnalysisConfig;
use crate::error::{PipelineError, Result};
use crate::ingest::{capacity, generation};

use aggregate::PLANT_LEVEL_FILE_NAME;
use capacity_factor::{FilterStats, MonthlyCapacityFactor};
use ranking::{AnnualCapacityFactor, PlantRanking};
use report::RankingReport;

/// Everything the pipeline derives from one set of extracts.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Monthly capacity factors ordered by plant, then date.
    pub monthly: Vec<MonthlyCapacityFactor>,
    /// Positive annual capacity factors ordered by plant, then year.
    pub annual: Vec<AnnualCapacityFactor>,
    /// Plants by average capacity factor, best first.
    pub ranking: Vec<PlantRanking>,
    /// Rows removed while deriving monthly factors.
    pub stats: FilterStats,
}

/// Runs the stages against a validated configuration.
pub struct Pipeline<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over `config`.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Runs every stage and returns the derived tables.
    ///
    /// Intermediate CSVs are written to the work directory when enabled.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed extracts, missing required columns,
    /// unwritable intermediates, or when no plant-month survives filtering
    /// or no plant has a positive annual capacity factor.
    pub fn run(&self) -> Result<PipelineOutput> {
        let cfg = self.config;

        let per_year = cfg
            .input
            .years
            .iter()
            .map(|&year| generation::extract_year(cfg, year))
            .collect::<Result<Vec<_>>>()?;
        let combined = generation::consolidate(cfg, &per_year)?;

        let combined_origin = generation::intermediate_path(cfg, generation::COMBINED_FILE_NAME);
        let level = aggregate::aggregate_plants(&combined, &combined_origin)?;
        info!(plant_years = level.rows.len(), "aggregated to plant level");
        if cfg.output.write_intermediates {
            level
                .to_table()
                .write_path(&generation::intermediate_path(cfg, PLANT_LEVEL_FILE_NAME))?;
        }

        let long = reshape::melt(&level);
        if cfg.output.write_intermediates {
            reshape::to_table(&long)
                .write_path(&generation::intermediate_path(cfg, reshape::LONG_FILE_NAME))?;
        }

        let capacity =
            capacity::load_capacity(&cfg.input.capacity_path(), cfg.input.capacity_skip_lines)?;
        let (monthly, stats) = capacity_factor::compute_monthly(
            &long,
            &capacity,
            cfg.quality.max_raw_capacity_factor,
        );
        info!("{stats}");
        if monthly.is_empty() {
            return Err(PipelineError::Empty);
        }

        let annual = ranking::annual_capacity_factors(&monthly);
        let ranking = ranking::rank_plants(&annual);
        if ranking.is_empty() {
            return Err(PipelineError::Empty);
        }
        info!(
            plants = ranking.len(),
            plant_years = annual.len(),
            "ranked plants by average capacity factor"
        );

        Ok(PipelineOutput {
            monthly,
            annual,
            ranking,
            stats,
        })
    }
}

impl PipelineOutput {
    /// Builds the console report using the configured sizes.
    pub fn report(&self, config: &AnalysisConfig) -> RankingReport {
        RankingReport::new(
            &self.ranking,
            &self.monthly,
            config.output.ranking_size,
            config.output.preview_rows,
            config.year_span(),
        )
    }
}
