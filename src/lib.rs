//! Nuclear plant capacity-factor analysis over EIA-923 generation and
//! EIA-860 capacity extracts.

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
/// Output files: CSV exports.
pub mod io;
pub mod logging;
/// Extraction, aggregation, capacity factors, and ranking.
pub mod pipeline;
pub mod plot;
#[cfg(feature = "tui")]
pub mod tui;
