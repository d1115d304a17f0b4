//! Shared test fixtures for integration tests.
//!
//! Writes small synthetic EIA-923 and EIA-860 extracts into a temporary
//! directory. Net generation is derived from a target capacity factor so
//! expected results are exact.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use nuclear_cf::config::AnalysisConfig;
use nuclear_cf::pipeline::calendar::Month;

/// Report years covered by the fixtures (2024 is a leap year).
pub const YEARS: [i32; 2] = [2023, 2024];

/// Capacity of the two-unit plant, split evenly across its units.
pub const ALPHA_MW: f64 = 1000.0;
pub const BETA_MW: f64 = 800.0;
pub const GAMMA_MW: f64 = 100.0;

/// Temporary data, work, and output directories.
pub struct Fixture {
    pub root: tempfile::TempDir,
}

impl Fixture {
    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("outputs")
    }

    /// Configuration pointing at the fixture directories.
    pub fn config(&self) -> AnalysisConfig {
        let mut cfg = AnalysisConfig::default();
        cfg.input.data_dir = self.data_dir();
        cfg.input.years = YEARS.to_vec();
        cfg.output.work_dir = self.work_dir();
        cfg.output.output_dir = self.output_dir();
        cfg
    }

    /// The same configuration as TOML, written next to the data.
    pub fn write_config_toml(&self) -> PathBuf {
        let path = self.root.path().join("analysis.toml");
        let toml = format!(
            "[input]\n\
             data_dir = {:?}\n\
             years = [2023, 2024]\n\
             \n\
             [output]\n\
             work_dir = {:?}\n\
             output_dir = {:?}\n\
             ranking_size = 2\n",
            self.data_dir().display().to_string(),
            self.work_dir().display().to_string(),
            self.output_dir().display().to_string(),
        );
        fs::write(&path, toml).expect("config should be written");
        path
    }
}

/// Hours in a month of a report year.
pub fn hours(year: i32, month: Month) -> f64 {
    month.hours_in(year).expect("valid month")
}

/// Formats a whole number with thousands separators, as the extracts do.
pub fn with_commas(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn csv_line(cells: &[String]) -> String {
    let quoted: Vec<String> = cells.iter().map(|c| quote(c)).collect();
    format!("{}\n", quoted.join(","))
}

/// Netgen cells for one generator row.
fn netgen_cells(mwh: impl Fn(Month) -> i64) -> Vec<String> {
    Month::ALL.iter().map(|&m| with_commas(mwh(m))).collect()
}

fn generation_row(
    plant_id: &str,
    plant: &str,
    fuel: &str,
    year: i32,
    netgen: Vec<String>,
) -> Vec<String> {
    let mut row = vec![
        plant_id.to_string(),
        plant.to_string(),
        "XX".to_string(),
        fuel.to_string(),
        "0".to_string(),
    ];
    row.extend(netgen);
    row.push(year.to_string());
    row
}

/// Writes `923_{year}.csv`.
///
/// Plants:
/// - Alpha: two NUC rows at 60% and 40% of a 0.9 capacity factor
/// - Beta: one NUC row at 0.5
/// - Gamma: one NUC row at 0.5, except a 1.5 outlier in January 2023 and a
///   negative December 2024
/// - Orphan: NUC, absent from the capacity extract
/// - Coal Plant: non-nuclear, filtered out
pub fn write_generation(dir: &Path, year: i32) {
    let h = |m: Month| hours(year, m);
    let rows = [
        generation_row(
            "1",
            "Alpha",
            "NUC",
            year,
            netgen_cells(|m| (h(m) * 540.0) as i64),
        ),
        generation_row(
            "1",
            "Alpha",
            "NUC",
            year,
            netgen_cells(|m| (h(m) * 360.0) as i64),
        ),
        generation_row(
            "2",
            "Beta",
            "NUC",
            year,
            netgen_cells(|m| (h(m) * 0.5 * BETA_MW) as i64),
        ),
        generation_row(
            "3",
            "Gamma",
            "NUC",
            year,
            netgen_cells(|m| match (year, m) {
                (2023, Month::January) => (h(m) * 1.5 * GAMMA_MW) as i64,
                (2024, Month::December) => -1200,
                _ => (h(m) * 0.5 * GAMMA_MW) as i64,
            }),
        ),
        generation_row(
            "4",
            "Orphan",
            "NUC",
            year,
            netgen_cells(|m| (h(m) * 100.0) as i64),
        ),
        generation_row(
            "5",
            "Coal Plant",
            "BIT",
            year,
            netgen_cells(|m| (h(m) * 500.0) as i64),
        ),
    ];
    write_extract(dir, year, &rows);
}

/// Writes `923_{year}.csv` where the only nuclear plant never generates:
/// every month is zero or negative.
pub fn write_outage_generation(dir: &Path, year: i32) {
    let rows = [generation_row(
        "1",
        "Alpha",
        "NUC",
        year,
        netgen_cells(|m| if m == Month::February { -100 } else { 0 }),
    )];
    write_extract(dir, year, &rows);
}

/// Writes a generation extract with the 923 preamble and header.
fn write_extract(dir: &Path, year: i32, rows: &[Vec<String>]) {
    let mut text = String::new();
    for i in 0..5 {
        text.push_str(&format!("EIA-923 Monthly Generation and Fuel Consumption,preamble {i}\n"));
    }

    let mut header: Vec<String> = vec![
        "Plant Id".to_string(),
        "Plant\nName".to_string(),
        "Plant\nState".to_string(),
        "Reported\nFuel Type Code".to_string(),
        "Net Generation\n(Megawatthours)".to_string(),
    ];
    header.extend(Month::ALL.iter().map(|m| format!("Netgen\n{}", m.name())));
    header.push("YEAR".to_string());
    text.push_str(&csv_line(&header));

    for row in rows {
        text.push_str(&csv_line(row));
    }

    fs::write(dir.join(format!("923_{year}.csv")), text).expect("generation extract written");
}

/// Writes `860_2024.csv` with one preamble line.
pub fn write_capacity(dir: &Path) {
    let mut text = String::from("Form EIA-860 Data - Schedule 3, Generator Data\n");
    text.push_str(&csv_line(&[
        "Utility ID".to_string(),
        "Plant Name".to_string(),
        "Generator ID".to_string(),
        "Nameplate Capacity (MW)".to_string(),
        "Summer Capacity (MW)".to_string(),
        "Winter Capacity (MW)".to_string(),
    ]));
    for (plant, unit, mw) in [
        ("Alpha", "1", "500"),
        ("Alpha", "2", "500.0"),
        ("Beta", "1", "800"),
        ("Gamma", "1", "100"),
        ("Coal Plant", "1", "1,200"),
    ] {
        text.push_str(&csv_line(&[
            "99".to_string(),
            plant.to_string(),
            unit.to_string(),
            mw.to_string(),
            mw.to_string(),
            mw.to_string(),
        ]));
    }
    fs::write(dir.join("860_2024.csv"), text).expect("capacity extract written");
}

/// Creates a fixture with every extract in place.
pub fn fixture() -> Fixture {
    let root = tempfile::tempdir().expect("tempdir");
    let fx = Fixture { root };
    fs::create_dir_all(fx.data_dir()).expect("data dir");
    for year in YEARS {
        write_generation(&fx.data_dir(), year);
    }
    write_capacity(&fx.data_dir());
    fx
}
