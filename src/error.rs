//! Error types for the capacity-factor pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading extracts, deriving capacity factors, or
/// writing outputs.
///
/// Malformed numeric cells are never errors: they coerce to missing values.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An input file could not be read.
    #[error("cannot read \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file or directory could not be written.
    #[error("cannot write \"{}\": {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer failed.
    #[error("CSV error in \"{}\": {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required header is absent after normalization.
    #[error("\"{}\" has no \"{column}\" column", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A figure could not be drawn or encoded.
    #[error("cannot render plot \"{}\": {message}", .path.display())]
    Plot { path: PathBuf, message: String },

    /// No header contains both "Summer" and "Capacity".
    #[error("\"{}\" has no summer capacity column", .path.display())]
    NoCapacityColumn { path: PathBuf },

    /// No plant-month or no positive annual factor survived filtering.
    #[error("nothing to rank after filtering")]
    Empty,

    /// The requested plant does not appear in the capacity-factor table.
    #[error("unknown plant \"{0}\"")]
    UnknownPlant(String),

    /// A year window whose first year comes after its last year.
    #[error("invalid year range {first}-{last}")]
    InvalidYearRange { first: i32, last: i32 },
}

/// Convenience alias for results carrying a [`PipelineError`].
pub type Result<T> = std::result::Result<T, PipelineError>;
