//! Wide-to-long reshape of plant-level monthly generation.

use crate::ingest::capacity::PLANT_NAME_COLUMN;
use crate::ingest::table::Table;

use super::aggregate::{NETGEN_PREFIX, PlantLevel, YEAR_COLUMN};

/// File name of the long-form intermediate.
pub const LONG_FILE_NAME: &str = "nuclear_generation_update.csv";

/// One plant's net generation for one labeled month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyGeneration {
    /// Trimmed plant name.
    pub plant: String,
    /// Report year.
    pub year: i32,
    /// Month label with the netgen prefix removed (e.g. `"March"`).
    pub month: String,
    /// Net generation (MWh); may be negative.
    pub netgen_mwh: f64,
}

/// Strips the netgen prefix from a column name.
pub fn month_label(column: &str) -> String {
    column
        .strip_prefix(NETGEN_PREFIX)
        .unwrap_or(column)
        .trim()
        .to_string()
}

/// Melts plant-level totals into one row per (plant, year, month).
///
/// Rows are column-major: every plant-year for the first month, then every
/// plant-year for the next.
pub fn melt(level: &PlantLevel) -> Vec<MonthlyGeneration> {
    let mut out = Vec::with_capacity(level.columns.len() * level.rows.len());
    for (idx, column) in level.columns.iter().enumerate() {
        let month = month_label(column);
        for row in &level.rows {
            out.push(MonthlyGeneration {
                plant: row.plant.clone(),
                year: row.year,
                month: month.clone(),
                netgen_mwh: row.netgen_mwh[idx],
            });
        }
    }
    out
}

/// Converts long-form rows to a table for persistence.
pub fn to_table(rows: &[MonthlyGeneration]) -> Table {
    Table::new(
        vec![
            PLANT_NAME_COLUMN.to_string(),
            YEAR_COLUMN.to_string(),
            "Month".to_string(),
            "Netgen_MWh".to_string(),
        ],
        rows.iter()
            .map(|r| {
                vec![
                    r.plant.clone(),
                    r.year.to_string(),
                    r.month.clone(),
                    r.netgen_mwh.to_string(),
                ]
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::aggregate::PlantYear;

    fn level() -> PlantLevel {
        PlantLevel {
            columns: vec!["Netgen January".into(), "Netgen February".into()],
            rows: vec![
                PlantYear {
                    plant: "Alpha".into(),
                    year: 2021,
                    netgen_mwh: vec![1.0, 2.0],
                },
                PlantYear {
                    plant: "Beta".into(),
                    year: 2021,
                    netgen_mwh: vec![3.0, 4.0],
                },
            ],
        }
    }

    #[test]
    fn strips_prefix_from_labels() {
        assert_eq!(month_label("Netgen January"), "January");
        assert_eq!(month_label("Netgen\u{20}December"), "December");
        assert_eq!(month_label("Other"), "Other");
    }

    #[test]
    fn melt_is_column_major() {
        let rows = melt(&level());
        let flat: Vec<(&str, &str, f64)> = rows
            .iter()
            .map(|r| (r.plant.as_str(), r.month.as_str(), r.netgen_mwh))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("Alpha", "January", 1.0),
                ("Beta", "January", 3.0),
                ("Alpha", "February", 2.0),
                ("Beta", "February", 4.0),
            ]
        );
    }

    #[test]
    fn long_table_has_four_columns() {
        let table = to_table(&melt(&level()));
        assert_eq!(table.headers().len(), 4);
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows()[1], vec!["Beta", "2021", "January", "3"]);
    }
}
