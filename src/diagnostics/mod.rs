//! Residual diagnostics for fitted models.
//!
//! - **Heteroscedasticity**: Breusch–Pagan, White, Park and Glejser tests
//! - **Transform**: OLS restatement of a WLS fit, used to test weighted models
//! - **Residuals**: standardized and Pearson residuals
//!
//! # Example
//!
//! ```rust,ignore
//! use hetero_wls::diagnostics::{run_diagnostic_tests, HeteroscedasticityTest};
//! use hetero_wls::estimation::estimate_wls;
//!
//! let model = estimate_wls(&sample)?;
//! let tests = run_diagnostic_tests(&model, &sample)?;
//! println!("BP p = {:.4}", tests.p_value(HeteroscedasticityTest::BreuschPagan));
//! ```

mod heteroscedasticity;
mod residuals;
mod transform;

pub use heteroscedasticity::{
    breusch_pagan, glejser, park, run_diagnostic_tests, white, DiagnosticResult,
    HeteroscedasticityTest, TestOutcome,
};
pub use residuals::{pearson_residuals, standardized_residuals};
pub use transform::transformed_ols_model;
