//! TOML-based analysis configuration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Placeholder substituted with the report year in generation file names.
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Top-level analysis configuration parsed from TOML.
///
/// All fields have defaults matching the EIA-923/EIA-860 layout used for the
/// 2021-2024 report years. Load from TOML with
/// [`AnalysisConfig::from_toml_file`] or use [`AnalysisConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Input extract locations and layout.
    #[serde(default)]
    pub input: InputConfig,
    /// Row filter applied to the generation extracts.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Data-quality thresholds.
    #[serde(default)]
    pub quality: QualityConfig,
    /// Output locations and report sizes.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input extract locations and layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Directory holding the generation and capacity extracts.
    pub data_dir: PathBuf,
    /// Generation file name pattern; `{year}` is replaced per report year.
    pub generation_file_pattern: String,
    /// Physical lines preceding the header in each generation extract.
    pub generation_skip_lines: usize,
    /// Capacity extract file name.
    pub capacity_file: String,
    /// Physical lines preceding the header in the capacity extract.
    pub capacity_skip_lines: usize,
    /// Report years to ingest.
    pub years: Vec<i32>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            generation_file_pattern: "923_{year}.csv".to_string(),
            generation_skip_lines: 5,
            capacity_file: "860_2024.csv".to_string(),
            capacity_skip_lines: 1,
            years: vec![2021, 2022, 2023, 2024],
        }
    }
}

impl InputConfig {
    /// Path of the generation extract for one report year.
    pub fn generation_path(&self, year: i32) -> PathBuf {
        self.data_dir.join(
            self.generation_file_pattern
                .replace(YEAR_PLACEHOLDER, &year.to_string()),
        )
    }

    /// Path of the capacity extract.
    pub fn capacity_path(&self) -> PathBuf {
        self.data_dir.join(&self.capacity_file)
    }
}

/// Row filter applied to the generation extracts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Value of the `Reported Fuel Type Code` column to keep.
    pub fuel_type_code: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fuel_type_code: "NUC".to_string(),
        }
    }
}

/// Data-quality thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityConfig {
    /// Raw capacity factors above this ceiling are rejected as bad data.
    pub max_raw_capacity_factor: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            max_raw_capacity_factor: 1.2,
        }
    }
}

/// Output locations and report sizes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving the intermediate stage CSVs.
    pub work_dir: PathBuf,
    /// Directory receiving rankings, capacity-factor tables, and plots.
    pub output_dir: PathBuf,
    /// Whether intermediate stage CSVs are persisted.
    pub write_intermediates: bool,
    /// Number of plants shown in the top and bottom rankings.
    pub ranking_size: usize,
    /// Number of monthly rows shown in the console preview.
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            output_dir: PathBuf::from("outputs"),
            write_intermediates: true,
            ranking_size: 10,
            preview_rows: 15,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"input.years"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl AnalysisConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// First and last configured report years, if any.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.input.years.iter().min()?;
        let last = self.input.years.iter().max()?;
        Some((*first, *last))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let input = &self.input;

        if input.years.is_empty() {
            errors.push(ConfigError {
                field: "input.years".into(),
                message: "must list at least one report year".into(),
            });
        }
        let mut seen = Vec::with_capacity(input.years.len());
        for &year in &input.years {
            if seen.contains(&year) {
                errors.push(ConfigError {
                    field: "input.years".into(),
                    message: format!("year {year} listed more than once"),
                });
            }
            seen.push(year);
        }
        if !input.generation_file_pattern.contains(YEAR_PLACEHOLDER) {
            errors.push(ConfigError {
                field: "input.generation_file_pattern".into(),
                message: format!("must contain \"{YEAR_PLACEHOLDER}\""),
            });
        }
        if input.capacity_file.trim().is_empty() {
            errors.push(ConfigError {
                field: "input.capacity_file".into(),
                message: "must not be empty".into(),
            });
        }

        if self.filter.fuel_type_code.trim().is_empty() {
            errors.push(ConfigError {
                field: "filter.fuel_type_code".into(),
                message: "must not be empty".into(),
            });
        }

        let ceiling = self.quality.max_raw_capacity_factor;
        if !ceiling.is_finite() || ceiling < 1.0 {
            errors.push(ConfigError {
                field: "quality.max_raw_capacity_factor".into(),
                message: "must be a finite value >= 1.0".into(),
            });
        }

        if self.output.ranking_size == 0 {
            errors.push(ConfigError {
                field: "output.ranking_size".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
