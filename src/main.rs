//! nuclear-cf entry point: CLI wiring and config-driven pipeline runs.

use std::process;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;

use nuclear_cf::cli::{Cli, Command};
use nuclear_cf::config::AnalysisConfig;
use nuclear_cf::io::export::export_all;
use nuclear_cf::pipeline::{Pipeline, PipelineOutput};
use nuclear_cf::plot::{self, Selection};

/// Loads the configuration file (or defaults), applies CLI overrides, and
/// exits with status 1 on any load or validation error.
fn load_config(cli: &Cli) -> AnalysisConfig {
    let mut config = match &cli.config {
        Some(path) => match AnalysisConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => AnalysisConfig::default(),
    };
    cli.apply_overrides(&mut config);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

/// Resolves the plot selection, defaulting each missing bound to the
/// earliest or latest year with data.
fn plot_selection(
    output: &PipelineOutput,
    plant: &str,
    from: Option<i32>,
    to: Option<i32>,
) -> Result<Selection> {
    let full = plot::full_range(&output.monthly, plant)?;
    let selection = Selection::new(
        plant,
        from.unwrap_or(full.first_year),
        to.unwrap_or(full.last_year),
    )?;
    Ok(selection)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    nuclear_cf::logging::init_logging(cli.verbose);

    let config = load_config(&cli);
    info!(
        data_dir = %config.input.data_dir.display(),
        years = ?config.input.years,
        "starting capacity-factor pipeline"
    );

    let output = Pipeline::new(&config)
        .run()
        .context("capacity-factor pipeline failed")?;

    match cli.command() {
        Command::Run => {
            println!("{}", output.report(&config));
            let written = export_all(
                &output,
                &config.output.output_dir,
                config.output.ranking_size,
            )?;
            for path in &written {
                eprintln!("Wrote {}", path.display());
            }
        }
        Command::Plot { plant, from, to } => {
            let selection = plot_selection(&output, &plant, from, to)?;
            let points = plot::series(&output.monthly, &selection);
            if points.is_empty() {
                return Err(anyhow!(
                    "no monthly capacity factors for \"{}\" in {}-{}",
                    selection.plant,
                    selection.first_year,
                    selection.last_year
                ));
            }
            let path = plot::save_plot(&config.output.output_dir, &selection, &points)?;
            println!("Saved: {}", path.display());
        }
        #[cfg(feature = "tui")]
        Command::Explore => {
            let app = nuclear_cf::tui::App::new(output.monthly, config.output.output_dir.clone());
            nuclear_cf::tui::run(app).context("explorer failed")?;
        }
    }

    Ok(())
}
