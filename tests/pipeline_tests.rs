//! End-to-end workflow tests.

mod common;

use common::ScratchDir;
use hetero_wls::config::AnalysisConfig;
use hetero_wls::data::read_sample_csv;
use hetero_wls::error::AnalysisError;
use hetero_wls::pipeline::run_analysis;
use hetero_wls::report::{ComparisonTable, TABLE_HEADER};
use hetero_wls::utils::{read_csv_with_bom, UTF8_BOM};
use std::fs;

const EXPECTED_LABELS: [&str; 10] = [
    "R² Ajustado",
    "Coef. Intercepto",
    "Std Err (Intercepto)",
    "Coef. X",
    "Std Err (X)",
    "---",
    "Teste Breusch-Pagan (p-valor)",
    "Teste de White (p-valor)",
    "Teste de Park (p-valor)",
    "Teste de Glejser (p-valor)",
];

#[test]
fn test_full_workflow_writes_all_artifacts() {
    let dir = ScratchDir::new("pipeline-full");
    let config = AnalysisConfig::builder()
        .output_root(dir.path())
        .build()
        .expect("config should be valid");

    let outcome = run_analysis(&config).expect("analysis should succeed");

    // Sample file
    let sample_bytes = fs::read(&config.sample_path).expect("sample file exists");
    assert!(sample_bytes.starts_with(UTF8_BOM.as_bytes()));
    let (header, rows) = read_csv_with_bom(&config.sample_path).expect("sample parses");
    assert_eq!(header, vec!["X", "y"]);
    assert_eq!(rows.len(), 100);
    assert_eq!(
        read_sample_csv(&config.sample_path).expect("sample revalidates"),
        outcome.sample
    );

    // Comparison table
    let table_bytes = fs::read(&config.table_path).expect("table file exists");
    assert!(table_bytes.starts_with(UTF8_BOM.as_bytes()));
    let table = ComparisonTable::read_csv(&config.table_path).expect("table parses");
    assert_eq!(table, outcome.table);
    let labels: Vec<&str> = table.rows().iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, EXPECTED_LABELS);

    let separator = &table.rows()[5];
    assert_eq!((separator.ols.as_str(), separator.wls.as_str()), ("---", "---"));

    for row in table.rows().iter().filter(|r| r.label != "---") {
        for cell in [&row.ols, &row.wls] {
            let value: f64 = cell.parse().expect("numeric cell");
            assert!(value.is_finite());
            assert_eq!(cell.split('.').nth(1).map(str::len), Some(4));
        }
    }

    let adj = table.row("R² Ajustado").expect("adjusted R² row");
    for cell in [&adj.ols, &adj.wls] {
        let value: f64 = cell.parse().expect("numeric cell");
        assert!((0.0..=1.0).contains(&value));
    }

    // Plot
    let png = fs::read(&config.plot_path).expect("plot file exists");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn test_workflow_is_reproducible() {
    let first = ScratchDir::new("pipeline-repro-a");
    let second = ScratchDir::new("pipeline-repro-b");

    let run = |root: &std::path::Path| {
        let config = AnalysisConfig::builder()
            .output_root(root)
            .build()
            .expect("config should be valid");
        run_analysis(&config).expect("analysis should succeed");
        (
            fs::read(&config.sample_path).expect("sample file exists"),
            fs::read(&config.table_path).expect("table file exists"),
        )
    };

    assert_eq!(run(first.path()), run(second.path()));
}

#[test]
fn test_rerun_overwrites_outputs() {
    let dir = ScratchDir::new("pipeline-rerun");
    let config = AnalysisConfig::builder()
        .output_root(dir.path())
        .build()
        .expect("config should be valid");

    run_analysis(&config).expect("first run should succeed");
    run_analysis(&config).expect("second run should succeed");

    let (_, rows) = read_csv_with_bom(&config.sample_path).expect("sample parses");
    assert_eq!(rows.len(), 100);
    let (header, rows) = read_csv_with_bom(&config.table_path).expect("table parses");
    assert_eq!(header, TABLE_HEADER);
    assert_eq!(rows.len(), 10);
}

#[test]
fn test_invalid_config_is_rejected_before_writing() {
    let dir = ScratchDir::new("pipeline-invalid");
    let mut config = AnalysisConfig::builder()
        .output_root(dir.path())
        .build()
        .expect("config should be valid");
    config.generator.n_samples = 1;

    let err = run_analysis(&config).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)));
    assert!(!config.sample_path.exists());
}

#[test]
fn test_unwritable_output_path_fails() {
    let dir = ScratchDir::new("pipeline-unwritable");
    // A regular file where the output directory should be
    let blocker = dir.path().join("results");
    fs::write(&blocker, b"not a directory").expect("blocker file written");

    let config = AnalysisConfig::builder()
        .output_root(dir.path())
        .build()
        .expect("config should be valid");

    let err = run_analysis(&config).unwrap_err();
    assert!(matches!(err, AnalysisError::Io(_)));
}
