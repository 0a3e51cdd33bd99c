//! Core traits for regression estimators.

use crate::core::RegressionResult;
use faer::{Col, Mat};
use thiserror::Error;

/// Errors that can occur during regression fitting and residual-based testing.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("matrix is singular or nearly singular")]
    SingularMatrix,

    #[error("invalid weights: all weights must be non-negative and not all zero")]
    InvalidWeights,

    #[error("numerical domain error: {operation} undefined for value {value} at observation {index}")]
    NumericalDomain {
        operation: &'static str,
        index: usize,
        value: f64,
    },

    #[error("standard errors unavailable: {0}")]
    InferenceUnavailable(&'static str),

    #[error("numerical error: {0}")]
    NumericalError(String),
}

/// A regression estimator that can be fit to data.
pub trait Regressor {
    /// The type of the fitted model.
    type Fitted: FittedRegressor;

    /// Fit the model to the data.
    ///
    /// # Arguments
    /// * `x` - Design matrix of shape (n_samples, n_features)
    /// * `y` - Target vector of length n_samples
    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model.
pub trait FittedRegressor {
    /// Access the regression results (coefficients, statistics, etc.).
    fn result(&self) -> &RegressionResult;

    /// Get the coefficients (convenience method).
    fn coefficients(&self) -> &Col<f64> {
        &self.result().coefficients
    }

    /// Get the intercept (convenience method).
    fn intercept(&self) -> Option<f64> {
        self.result().intercept
    }

    /// Get R² (convenience method).
    fn r_squared(&self) -> f64 {
        self.result().r_squared
    }

    /// Get adjusted R² (convenience method).
    fn adj_r_squared(&self) -> f64 {
        self.result().adj_r_squared
    }
}

/// Linear predictor `intercept + X β`, skipping aliased coefficients.
pub(crate) fn linear_predictor(result: &RegressionResult, x: &Mat<f64>) -> Col<f64> {
    let intercept = result.intercept.unwrap_or(0.0);

    Col::from_fn(x.nrows(), |i| {
        let mut pred = intercept;
        for j in 0..x.ncols() {
            if !result.aliased[j] && !result.coefficients[j].is_nan() {
                pred += x[(i, j)] * result.coefficients[j];
            }
        }
        pred
    })
}
