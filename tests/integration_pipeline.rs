mod common;

use nuclear_cf::error::PipelineError;
use nuclear_cf::ingest::generation::{COMBINED_FILE_NAME, filtered_file_name};
use nuclear_cf::io::export::{
    ANNUAL_FILE_NAME, BOTTOM_FILE_NAME, MONTHLY_FILE_NAME, RANKING_FILE_NAME, TOP_FILE_NAME,
    export_all,
};
use nuclear_cf::pipeline::Pipeline;
use nuclear_cf::pipeline::aggregate::PLANT_LEVEL_FILE_NAME;
use nuclear_cf::pipeline::calendar::Month;
use nuclear_cf::pipeline::reshape::LONG_FILE_NAME;

const EPS: f64 = 1e-9;

#[test]
fn ranks_plants_by_average_capacity_factor() {
    let fx = common::fixture();
    let output = Pipeline::new(&fx.config()).run().expect("pipeline should run");

    let names: Vec<&str> = output.ranking.iter().map(|r| r.plant.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

    assert!((output.ranking[0].capacity_factor - 0.9).abs() < EPS);
    assert!((output.ranking[1].capacity_factor - 0.5).abs() < EPS);
    assert_eq!(output.ranking[0].years, 2);

    // Gamma: 2023 loses its outlier month, 2024 has a zeroed December.
    let gamma_2024 = (8784.0 - 744.0) * 50.0 / (8784.0 * 100.0);
    let expected = (0.5 + gamma_2024) / 2.0;
    assert!(
        (output.ranking[2].capacity_factor - expected).abs() < EPS,
        "gamma={} expected={expected}",
        output.ranking[2].capacity_factor
    );
}

#[test]
fn multi_unit_plants_are_summed() {
    let fx = common::fixture();
    let output = Pipeline::new(&fx.config()).run().expect("pipeline should run");

    let alpha_jan = output
        .monthly
        .iter()
        .find(|m| m.plant == "Alpha" && m.year == 2023 && m.month == Month::January)
        .expect("alpha january 2023");
    assert!((alpha_jan.capacity_mw - common::ALPHA_MW).abs() < EPS);
    assert!((alpha_jan.netgen_mwh - 900.0 * 744.0).abs() < EPS);
}

#[test]
fn leap_february_uses_29_days() {
    let fx = common::fixture();
    let output = Pipeline::new(&fx.config()).run().expect("pipeline should run");

    let feb = |year: i32| {
        output
            .monthly
            .iter()
            .find(|m| m.plant == "Beta" && m.year == year && m.month == Month::February)
            .expect("beta february")
    };
    assert_eq!(feb(2023).days_in_month, 28);
    assert_eq!(feb(2023).hours_in_month, 672.0);
    assert_eq!(feb(2024).days_in_month, 29);
    assert_eq!(feb(2024).hours_in_month, 696.0);
    assert!((feb(2024).max_possible_mwh - common::BETA_MW * 696.0).abs() < EPS);
    assert!((feb(2024).capacity_factor - 0.5).abs() < EPS);
}

#[test]
fn outliers_and_unmatched_plants_are_dropped() {
    let fx = common::fixture();
    let output = Pipeline::new(&fx.config()).run().expect("pipeline should run");

    assert_eq!(output.stats.outliers, 1);
    assert_eq!(output.stats.unmatched, 24);
    assert!(output.monthly.iter().all(|m| m.plant != "Orphan"));
    assert!(output.monthly.iter().all(|m| m.plant != "Coal Plant"));
    assert!(
        !output
            .monthly
            .iter()
            .any(|m| m.plant == "Gamma" && m.year == 2023 && m.month == Month::January)
    );

    let gamma_dec = output
        .monthly
        .iter()
        .find(|m| m.plant == "Gamma" && m.year == 2024 && m.month == Month::December)
        .expect("negative generation is clipped, not dropped");
    assert_eq!(gamma_dec.netgen_mwh, 0.0);
    assert_eq!(gamma_dec.capacity_factor, 0.0);

    assert!(
        output
            .monthly
            .iter()
            .all(|m| (0.0..=1.0).contains(&m.capacity_factor)
                && m.raw_capacity_factor <= 1.2)
    );
}

#[test]
fn monthly_rows_are_ordered_by_plant_then_date() {
    let fx = common::fixture();
    let output = Pipeline::new(&fx.config()).run().expect("pipeline should run");

    assert_eq!(output.monthly.len(), 3 * 24 - 1);
    assert!(output.monthly.windows(2).all(|w| {
        (w[0].plant.as_str(), w[0].date) < (w[1].plant.as_str(), w[1].date)
    }));
}

#[test]
fn intermediate_files_are_written() {
    let fx = common::fixture();
    Pipeline::new(&fx.config()).run().expect("pipeline should run");

    let work = fx.work_dir();
    for year in common::YEARS {
        assert!(work.join(filtered_file_name(year)).exists());
    }
    for name in [COMBINED_FILE_NAME, PLANT_LEVEL_FILE_NAME, LONG_FILE_NAME] {
        assert!(work.join(name).exists(), "missing {name}");
    }

    let combined = std::fs::read_to_string(work.join(COMBINED_FILE_NAME)).unwrap();
    let header = combined.lines().next().unwrap();
    assert!(header.contains("Plant Name"));
    assert!(header.contains("Netgen January"));
    assert!(!combined.contains("Coal Plant"));
}

#[test]
fn intermediates_can_be_disabled() {
    let fx = common::fixture();
    let mut cfg = fx.config();
    cfg.output.write_intermediates = false;
    Pipeline::new(&cfg).run().expect("pipeline should run");
    assert!(!fx.work_dir().join(COMBINED_FILE_NAME).exists());
}

#[test]
fn exports_every_output_table() {
    let fx = common::fixture();
    let output = Pipeline::new(&fx.config()).run().expect("pipeline should run");
    let written = export_all(&output, &fx.output_dir(), 2).expect("export should succeed");
    assert_eq!(written.len(), 5);

    let read = |name: &str| std::fs::read_to_string(fx.output_dir().join(name)).unwrap();
    let top = read(TOP_FILE_NAME);
    assert_eq!(top.lines().count(), 3);
    assert!(top.lines().nth(1).unwrap().starts_with("Alpha,"));

    let bottom = read(BOTTOM_FILE_NAME);
    assert!(bottom.lines().nth(2).unwrap().starts_with("Gamma,"));

    assert_eq!(read(RANKING_FILE_NAME).lines().count(), 4);
    assert_eq!(read(MONTHLY_FILE_NAME).lines().count(), 1 + 3 * 24 - 1);
    assert_eq!(read(ANNUAL_FILE_NAME).lines().count(), 1 + 3 * 2);
}

#[test]
fn missing_year_extract_is_fatal() {
    let fx = common::fixture();
    let mut cfg = fx.config();
    cfg.input.years = vec![2023, 2025];
    let err = Pipeline::new(&cfg).run().unwrap_err();
    assert!(matches!(err, PipelineError::Read { .. }), "got {err:?}");
}

#[test]
fn missing_capacity_column_is_reported() {
    let fx = common::fixture();
    std::fs::write(
        fx.data_dir().join("860_2024.csv"),
        "preamble\nPlant Name,Nameplate Capacity (MW)\nAlpha,1000\n",
    )
    .unwrap();
    let err = Pipeline::new(&fx.config()).run().unwrap_err();
    assert!(matches!(err, PipelineError::NoCapacityColumn { .. }), "got {err:?}");
}

#[test]
fn nothing_to_rank_is_an_error() {
    let fx = common::fixture();
    let mut cfg = fx.config();
    cfg.filter.fuel_type_code = "WND".to_string();
    let err = Pipeline::new(&cfg).run().unwrap_err();
    assert!(matches!(err, PipelineError::Empty), "got {err:?}");
}

#[test]
fn fleet_in_outage_has_nothing_to_rank() {
    let fx = common::fixture();
    for year in common::YEARS {
        common::write_outage_generation(&fx.data_dir(), year);
    }
    let err = Pipeline::new(&fx.config()).run().unwrap_err();
    assert!(matches!(err, PipelineError::Empty), "got {err:?}");
}
