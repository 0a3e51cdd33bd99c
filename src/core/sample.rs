//! The bivariate sample `(X, y)` the workflow operates on.

use crate::utils::add_constant;
use faer::{Col, Mat};
use thiserror::Error;

/// Minimum number of observations for a two-parameter fit with residual df.
const MIN_OBSERVATIONS: usize = 3;

/// Errors raised when a sample violates its invariants.
#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("length mismatch: X has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("insufficient observations: need at least {needed}, got {got}")]
    TooFewObservations { needed: usize, got: usize },

    #[error("non-finite value in column {column} at observation {index}")]
    NonFinite { column: &'static str, index: usize },

    #[error("regressor must be strictly positive, got X[{index}] = {value}")]
    NonPositiveRegressor { index: usize, value: f64 },
}

/// An ordered, immutable sequence of `(X, y)` observations.
///
/// Every `X` is strictly positive, which the log-based diagnostics rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Sample {
    /// Validate and wrap the two columns.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, SampleError> {
        if x.len() != y.len() {
            return Err(SampleError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < MIN_OBSERVATIONS {
            return Err(SampleError::TooFewObservations {
                needed: MIN_OBSERVATIONS,
                got: x.len(),
            });
        }
        for (index, (&xi, &yi)) in x.iter().zip(y.iter()).enumerate() {
            if !xi.is_finite() {
                return Err(SampleError::NonFinite { column: "X", index });
            }
            if !yi.is_finite() {
                return Err(SampleError::NonFinite { column: "y", index });
            }
            if xi <= 0.0 {
                return Err(SampleError::NonPositiveRegressor { index, value: xi });
            }
        }
        Ok(Self { x, y })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the sample has no observations.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Iterate over `(X, y)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Response vector `y`.
    pub fn response(&self) -> Col<f64> {
        Col::from_fn(self.len(), |i| self.y[i])
    }

    /// Regressor matrix without constant (n × 1).
    pub fn regressors(&self) -> Mat<f64> {
        Mat::from_fn(self.len(), 1, |i, _| self.x[i])
    }

    /// Exogenous design matrix `[1, X]` (n × 2).
    pub fn design_matrix(&self) -> Mat<f64> {
        add_constant(&self.regressors())
    }
}
