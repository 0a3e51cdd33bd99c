//! End-to-end analysis: generate, estimate, diagnose, report.

use crate::config::AnalysisConfig;
use crate::core::Sample;
use crate::data::{generate_heteroscedastic_data, write_sample_csv};
use crate::diagnostics::{run_diagnostic_tests, DiagnosticResult};
use crate::error::AnalysisError;
use crate::estimation::{estimate_ols, estimate_wls, FittedModel};
use crate::report::{create_diagnostic_plots, format_and_save_results, ComparisonTable};
use std::fs;
use tracing::{debug, info, info_span};

/// Everything produced by one run, for programmatic inspection.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub sample: Sample,
    pub ols: FittedModel,
    pub wls: FittedModel,
    pub ols_tests: DiagnosticResult,
    pub wls_tests: DiagnosticResult,
    pub table: ComparisonTable,
}

/// Run the whole workflow described by `config`.
///
/// Steps run in order and the first failure aborts the run. Output files are
/// replaced, never appended to.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisOutcome, AnalysisError> {
    config.validate()?;
    let _span = info_span!(
        "analysis",
        seed = config.seed,
        n_samples = config.generator.n_samples
    )
    .entered();

    for dir in config.output_dirs() {
        fs::create_dir_all(dir)?;
    }

    let sample = generate_heteroscedastic_data(&config.generator, config.seed)?;
    write_sample_csv(&sample, &config.sample_path)?;
    println!("Dados gerados salvos em: {}", config.sample_path.display());
    info!(n = sample.len(), path = %config.sample_path.display(), "sample written");

    let ols = estimate_ols(&sample)?;
    let ols_tests = run_diagnostic_tests(&ols, &sample)?;
    log_tests(&ols, &ols_tests, config.significance_level);

    let wls = estimate_wls(&sample)?;
    let wls_tests = run_diagnostic_tests(&wls, &sample)?;
    log_tests(&wls, &wls_tests, config.significance_level);

    let table = format_and_save_results(&ols, &wls, &ols_tests, &wls_tests, &config.table_path)?;
    info!(path = %config.table_path.display(), "comparison table written");

    create_diagnostic_plots(&ols, &wls, &config.plot_path)?;
    info!(path = %config.plot_path.display(), "diagnostic plot written");

    Ok(AnalysisOutcome {
        sample,
        ols,
        wls,
        ols_tests,
        wls_tests,
        table,
    })
}

fn log_tests(model: &FittedModel, tests: &DiagnosticResult, alpha: f64) {
    let model_label = model.kind().label();
    info!(
        model = model_label,
        adj_r_squared = model.adj_r_squared(),
        "model diagnosed"
    );
    for (test, outcome) in tests.iter() {
        debug!(
            model = model_label,
            test = test.name(),
            statistic = outcome.statistic,
            p_value = outcome.p_value,
            heteroscedastic = outcome.rejects_homoscedasticity(alpha),
            "heteroscedasticity test"
        );
    }
}
