//! Weighted Least Squares solver.

use crate::core::{RegressionOptions, RegressionOptionsBuilder, RegressionResult};
use crate::inference::CoefficientInference;
use crate::solvers::ols::{apply_inference, fill_fit_statistics, solve_with_qr};
use crate::solvers::traits::{linear_predictor, FittedRegressor, RegressionError, Regressor};
use crate::utils::{detect_constant_columns, scale_rows};
use faer::{Col, Mat};

/// Weighted Least Squares regression estimator.
///
/// Minimizes: Σ w_i (y_i - x_i'β)²
///
/// This is equivalent to transforming the problem:
/// X → W^(1/2)X, y → W^(1/2)y, then applying OLS.
///
/// # Example
///
/// ```rust,ignore
/// use hetero_wls::solvers::{FittedRegressor, Regressor, WlsRegressor};
/// use faer::{Col, Mat};
///
/// let x = Mat::from_fn(100, 1, |i, _| (i + 1) as f64);
/// let y = Col::from_fn(100, |i| 1.0 + 2.0 * i as f64);
/// let weights = Col::from_fn(100, |i| 1.0 / ((i + 1) as f64).powi(2));
///
/// let fitted = WlsRegressor::builder()
///     .weights(weights)
///     .build()
///     .fit(&x, &y)?;
/// ```
#[derive(Debug, Clone)]
pub struct WlsRegressor {
    options: RegressionOptions,
    weights: Option<Col<f64>>,
}

impl WlsRegressor {
    /// Create a new WLS regressor with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self {
            options,
            weights: None,
        }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> WlsRegressorBuilder {
        WlsRegressorBuilder::default()
    }
}

impl Regressor for WlsRegressor {
    type Fitted = FittedWls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if x.nrows() != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.nrows(),
            });
        }

        if n_samples < 2 {
            return Err(RegressionError::InsufficientObservations {
                needed: 2,
                got: n_samples,
            });
        }

        let weights = match &self.weights {
            Some(w) => {
                if w.nrows() != n_samples {
                    return Err(RegressionError::DimensionMismatch {
                        x_rows: n_samples,
                        y_len: w.nrows(),
                    });
                }
                if w.iter().any(|&wi| wi < 0.0 || !wi.is_finite()) {
                    return Err(RegressionError::InvalidWeights);
                }
                w.clone()
            }
            None => Col::from_fn(n_samples, |_| 1.0),
        };

        let weight_sum: f64 = weights.iter().sum();
        if weight_sum < 1e-14 {
            return Err(RegressionError::InvalidWeights);
        }

        // Observations with zero weight do not count towards the fit
        let n_effective: usize = weights.iter().filter(|&&w| w > 1e-14).count();
        let n_params = if self.options.with_intercept {
            n_features + 1
        } else {
            n_features
        };

        if n_effective < n_params {
            return Err(RegressionError::InsufficientObservations {
                needed: n_params,
                got: n_effective,
            });
        }

        let (coefficients, intercept, aliased, rank) = if self.options.with_intercept {
            let (x_centered, y_centered, x_means, y_mean) = weighted_center(x, y, &weights);

            // Constant detection on the centred weighted data: x·sqrt(w) may be
            // constant (e.g. w = 1/x²) while the centred data still varies
            let constant_cols = detect_constant_columns(&x_centered, self.options.rank_tolerance);

            let (coefficients, aliased, rank) = solve_with_qr(
                &x_centered,
                &y_centered,
                &constant_cols,
                self.options.rank_tolerance,
            );

            let mut intercept = y_mean;
            for j in 0..n_features {
                if !aliased[j] && !coefficients[j].is_nan() {
                    intercept -= x_means[j] * coefficients[j];
                }
            }

            (coefficients, Some(intercept), aliased, rank)
        } else {
            let sqrt_weights = Col::from_fn(n_samples, |i| weights[i].sqrt());
            let x_weighted = scale_rows(x, &sqrt_weights);
            let y_weighted = Col::from_fn(n_samples, |i| y[i] * sqrt_weights[i]);

            let no_constant = vec![false; n_features];
            let (coefficients, aliased, rank) = solve_with_qr(
                &x_weighted,
                &y_weighted,
                &no_constant,
                self.options.rank_tolerance,
            );

            (coefficients, None, aliased, rank)
        };

        if rank == 0 {
            return Err(RegressionError::SingularMatrix);
        }

        let mut result = RegressionResult::empty(n_features, n_samples);
        result.coefficients = coefficients;
        result.intercept = intercept;
        result.aliased = aliased;
        result.rank = rank;
        result.n_parameters = rank + usize::from(intercept.is_some());
        result.fitted_values = linear_predictor(&result, x);
        result.residuals = Col::from_fn(n_samples, |i| y[i] - result.fitted_values[i]);

        // Weighted TSS around the weighted mean, weighted RSS
        let tss: f64 = if intercept.is_some() {
            let y_mean: f64 = y
                .iter()
                .zip(weights.iter())
                .map(|(&yi, &wi)| wi * yi)
                .sum::<f64>()
                / weight_sum;
            y.iter()
                .zip(weights.iter())
                .map(|(&yi, &wi)| wi * (yi - y_mean).powi(2))
                .sum()
        } else {
            y.iter()
                .zip(weights.iter())
                .map(|(&yi, &wi)| wi * yi * yi)
                .sum()
        };
        let rss: f64 = result
            .residuals
            .iter()
            .zip(weights.iter())
            .map(|(&ri, &wi)| wi * ri.powi(2))
            .sum();
        fill_fit_statistics(&mut result, tss, rss);

        if self.options.compute_inference {
            compute_inference(x, &weights, &mut result)?;
        }

        Ok(FittedWls { weights, result })
    }
}

/// Weighted centering of data.
///
/// Takes ORIGINAL (unweighted) x, y and the weights.
/// Returns centered-and-weighted data plus the weighted means.
fn weighted_center(
    x_orig: &Mat<f64>,
    y_orig: &Col<f64>,
    weights: &Col<f64>,
) -> (Mat<f64>, Col<f64>, Col<f64>, f64) {
    let n_samples = x_orig.nrows();
    let n_features = x_orig.ncols();

    let sum_w: f64 = weights.iter().sum();

    let x_means = Col::from_fn(n_features, |j| {
        (0..n_samples)
            .map(|i| weights[i] * x_orig[(i, j)])
            .sum::<f64>()
            / sum_w
    });

    let y_mean: f64 = (0..n_samples)
        .map(|i| weights[i] * y_orig[i])
        .sum::<f64>()
        / sum_w;

    // Center THEN weight in one step
    let x_centered_weighted = Mat::from_fn(n_samples, n_features, |i, j| {
        weights[i].sqrt() * (x_orig[(i, j)] - x_means[j])
    });
    let y_centered_weighted = Col::from_fn(n_samples, |i| weights[i].sqrt() * (y_orig[i] - y_mean));

    (x_centered_weighted, y_centered_weighted, x_means, y_mean)
}

/// Compute inference statistics for WLS from `MSE · (X'WX)⁻¹`.
fn compute_inference(
    x: &Mat<f64>,
    weights: &Col<f64>,
    result: &mut RegressionResult,
) -> Result<(), RegressionError> {
    if result.residual_df() == 0 || !result.mse.is_finite() {
        return Ok(());
    }

    if result.intercept.is_some() {
        let (se, se_int) = CoefficientInference::standard_errors_wls_with_intercept(
            x,
            weights,
            result.mse,
            &result.aliased,
        )
        .map_err(RegressionError::InferenceUnavailable)?;
        apply_inference(result, se, Some(se_int));
    } else {
        let sqrt_weights = Col::from_fn(x.nrows(), |i| weights[i].sqrt());
        let x_weighted = scale_rows(x, &sqrt_weights);
        let se = CoefficientInference::standard_errors(&x_weighted, result.mse, &result.aliased)
            .map_err(RegressionError::InferenceUnavailable)?;
        apply_inference(result, se, None);
    }
    Ok(())
}

/// A fitted WLS regression model.
#[derive(Debug, Clone)]
pub struct FittedWls {
    weights: Col<f64>,
    result: RegressionResult,
}

impl FittedWls {
    /// Get the weights used in fitting.
    pub fn weights(&self) -> &Col<f64> {
        &self.weights
    }

    /// Weighted residuals `sqrt(w_i) · e_i`.
    pub fn weighted_residuals(&self) -> Col<f64> {
        Col::from_fn(self.weights.nrows(), |i| {
            self.weights[i].sqrt() * self.result.residuals[i]
        })
    }
}

impl FittedRegressor for FittedWls {
    fn result(&self) -> &RegressionResult {
        &self.result
    }
}

/// Builder for `WlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct WlsRegressorBuilder {
    builder: RegressionOptionsBuilder,
    weights: Option<Col<f64>>,
}

impl WlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.builder = self.builder.with_intercept(include);
        self
    }

    /// Set the observation weights.
    pub fn weights(mut self, weights: Col<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Set whether to compute inference statistics.
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.builder = self.builder.compute_inference(compute);
        self
    }

    /// Build the WLS regressor.
    pub fn build(self) -> WlsRegressor {
        WlsRegressor {
            options: self.builder.build(),
            weights: self.weights,
        }
    }
}
