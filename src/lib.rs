//! Heteroscedasticity diagnosis and correction by feasible weighted least squares.
//!
//! The crate generates a sample whose error variance grows with the
//! regressor, fits it by OLS, tests the residuals with the Breusch–Pagan,
//! White, Park and Glejser tests, refits with feasible WLS and repeats the
//! tests on the weighted model. Results are written as a comparison table
//! and a residual plot.
//!
//! # Example
//!
//! ```rust,ignore
//! use hetero_wls::prelude::*;
//!
//! let sample = generate_heteroscedastic_data(&GeneratorConfig::default(), 42)?;
//!
//! let ols = estimate_ols(&sample)?;
//! let wls = estimate_wls(&sample)?;
//!
//! let before = run_diagnostic_tests(&ols, &sample)?;
//! let after = run_diagnostic_tests(&wls, &sample)?;
//! println!(
//!     "BP p-value: {:.4} -> {:.4}",
//!     before.p_value(HeteroscedasticityTest::BreuschPagan),
//!     after.p_value(HeteroscedasticityTest::BreuschPagan),
//! );
//! ```

pub mod config;
pub mod core;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod estimation;
pub mod inference;
pub mod pipeline;
pub mod report;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{AnalysisConfig, AnalysisConfigBuilder, ConfigError, GeneratorConfig};
    pub use crate::core::{
        RegressionOptions, RegressionOptionsBuilder, RegressionResult, Sample, SampleError,
    };
    pub use crate::data::{
        generate_heteroscedastic_data, read_sample_csv, write_sample_csv, GeneratorError,
        SampleGenerator,
    };
    pub use crate::diagnostics::{
        pearson_residuals, run_diagnostic_tests, standardized_residuals, transformed_ols_model,
        DiagnosticResult, HeteroscedasticityTest, TestOutcome,
    };
    pub use crate::error::AnalysisError;
    pub use crate::estimation::{
        estimate_ols, estimate_wls, feasible_weights, Estimate, FittedModel, ModelKind,
    };
    pub use crate::pipeline::{run_analysis, AnalysisOutcome};
    pub use crate::report::{create_diagnostic_plots, format_and_save_results, ComparisonTable};
    pub use crate::solvers::{
        FittedOls, FittedRegressor, FittedWls, OlsRegressor, RegressionError, Regressor,
        WlsRegressor,
    };
}

pub use crate::core::{RegressionOptions, RegressionOptionsBuilder, RegressionResult, Sample};
pub use crate::error::AnalysisError;
pub use crate::solvers::{FittedRegressor, RegressionError, Regressor};
