//! Readers for the generation and capacity extracts.

/// Plant-level summer capacity.
pub mod capacity;
/// Nuclear row extraction and multi-year consolidation.
pub mod generation;
pub mod number;
pub mod table;

pub use capacity::{CapacityTable, load_capacity};
pub use table::Table;
