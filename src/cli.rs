//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::AnalysisConfig;

/// Nuclear plant capacity-factor analysis over EIA generation and capacity
/// extracts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the generation and capacity extracts.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory receiving intermediate stage CSVs.
    #[arg(long, global = true)]
    pub work_dir: Option<PathBuf>,

    /// Directory receiving rankings, tables, and plots.
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Report years, comma separated (e.g. 2021,2022).
    #[arg(long, global = true, value_delimiter = ',')]
    pub years: Option<Vec<i32>>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do after the pipeline has run.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Derive capacity factors, print the ranking, and export CSVs.
    Run,
    /// Save the monthly capacity-factor plot of one plant.
    Plot {
        /// Plant name as it appears in the extracts.
        #[arg(long)]
        plant: String,
        /// First report year (defaults to the earliest available).
        #[arg(long)]
        from: Option<i32>,
        /// Last report year (defaults to the latest available).
        #[arg(long)]
        to: Option<i32>,
    },
    /// Browse plants and year windows interactively.
    #[cfg(feature = "tui")]
    Explore,
}

impl Cli {
    /// The requested command, `run` when none is given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(dir) = &self.data_dir {
            config.input.data_dir = dir.clone();
        }
        if let Some(dir) = &self.work_dir {
            config.output.work_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.output_dir = dir.clone();
        }
        if let Some(years) = &self.years {
            config.input.years = years.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_run() {
        let cli = Cli::try_parse_from(["nuclear-cf"]).expect("parse should succeed");
        assert_eq!(cli.command(), Command::Run);
        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn supports_plot_with_window() {
        let cli = Cli::try_parse_from([
            "nuclear-cf", "plot", "--plant", "Palo Verde", "--from", "2022", "--to", "2023",
        ])
        .expect("parse should succeed");
        assert_eq!(
            cli.command(),
            Command::Plot {
                plant: "Palo Verde".to_string(),
                from: Some(2022),
                to: Some(2023),
            }
        );
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "nuclear-cf",
            "--data-dir",
            "data",
            "--output-dir",
            "out",
            "--years",
            "2022,2023",
            "-vv",
        ])
        .expect("parse should succeed");
        let mut cfg = AnalysisConfig::default();
        cli.apply_overrides(&mut cfg);
        assert_eq!(cfg.input.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.output.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.input.years, vec![2022, 2023]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nuclear-cf", "run", "--config", "analysis.toml"])
            .expect("parse should succeed");
        assert_eq!(cli.config, Some(PathBuf::from("analysis.toml")));
    }

    #[test]
    fn plot_requires_plant() {
        assert!(Cli::try_parse_from(["nuclear-cf", "plot"]).is_err());
    }
}
