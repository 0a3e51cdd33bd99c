//! Ordinary Least Squares regression solver.

use crate::core::{RegressionOptions, RegressionOptionsBuilder, RegressionResult};
use crate::inference::CoefficientInference;
use crate::solvers::traits::{linear_predictor, FittedRegressor, RegressionError, Regressor};
use crate::utils::{center_columns, center_vector, detect_constant_columns};
use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Ordinary Least Squares regression estimator.
///
/// Uses QR decomposition with column pivoting to handle rank-deficient matrices.
/// Aliased (collinear) coefficients are set to NaN.
///
/// # Example
///
/// ```rust,ignore
/// use hetero_wls::solvers::{FittedRegressor, OlsRegressor, Regressor};
/// use faer::{Col, Mat};
///
/// let x = Mat::from_fn(100, 1, |i, _| i as f64);
/// let y = Col::from_fn(100, |i| 1.0 + 2.0 * i as f64);
///
/// let fitted = OlsRegressor::builder()
///     .with_intercept(true)
///     .build()
///     .fit(&x, &y)?;
///
/// println!("R² = {}", fitted.r_squared());
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    options: RegressionOptions,
}

impl OlsRegressor {
    /// Create a new OLS regressor with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }
}

impl Default for OlsRegressor {
    fn default() -> Self {
        Self::new(RegressionOptions::default())
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

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

        let n_params = if self.options.with_intercept {
            n_features + 1
        } else {
            n_features
        };

        if n_samples < n_params {
            return Err(RegressionError::InsufficientObservations {
                needed: n_params,
                got: n_samples,
            });
        }

        let constant_cols = detect_constant_columns(x, self.options.rank_tolerance);

        let (coefficients, intercept, aliased, rank) = if self.options.with_intercept {
            let (x_centered, x_means) = center_columns(x);
            let (y_centered, y_mean) = center_vector(y);

            let (coefficients, aliased, rank) = solve_with_qr(
                &x_centered,
                &y_centered,
                &constant_cols,
                self.options.rank_tolerance,
            );

            // intercept = y_mean - x_means' * coefficients
            let mut intercept = y_mean;
            for j in 0..n_features {
                if !aliased[j] && !coefficients[j].is_nan() {
                    intercept -= x_means[j] * coefficients[j];
                }
            }

            (coefficients, Some(intercept), aliased, rank)
        } else {
            // A constant column is a legitimate regressor without an intercept
            let no_constant = vec![false; n_features];
            let (coefficients, aliased, rank) =
                solve_with_qr(x, y, &no_constant, self.options.rank_tolerance);

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

        let rss = result.rss();
        let tss = if intercept.is_some() {
            let (y_centered, _) = center_vector(y);
            y_centered.iter().map(|&v| v * v).sum()
        } else {
            // Uncentered total sum of squares for regressions through the origin
            y.iter().map(|&v| v * v).sum()
        };
        fill_fit_statistics(&mut result, tss, rss);

        if self.options.compute_inference {
            self.compute_inference(x, &mut result)?;
        }

        Ok(FittedOls { result })
    }
}

impl OlsRegressor {
    /// Compute inference statistics (standard errors, t-stats, p-values).
    ///
    /// Without residual degrees of freedom the inference fields stay `None`;
    /// a covariance matrix that cannot be inverted is an error.
    fn compute_inference(
        &self,
        x: &Mat<f64>,
        result: &mut RegressionResult,
    ) -> Result<(), RegressionError> {
        if result.residual_df() == 0 || !result.mse.is_finite() {
            return Ok(());
        }

        if result.intercept.is_some() {
            let (se, se_int) =
                CoefficientInference::standard_errors_with_intercept(x, result.mse, &result.aliased)
                    .map_err(RegressionError::InferenceUnavailable)?;
            apply_inference(result, se, Some(se_int));
        } else {
            let se = CoefficientInference::standard_errors(x, result.mse, &result.aliased)
                .map_err(RegressionError::InferenceUnavailable)?;
            apply_inference(result, se, None);
        }
        Ok(())
    }
}

/// Solve the least squares problem using QR decomposition with column pivoting.
///
/// Returns the coefficients in original column order (NaN where aliased),
/// the aliased flags and the numerical rank.
pub(crate) fn solve_with_qr(
    x: &Mat<f64>,
    y: &Col<f64>,
    constant_cols: &[bool],
    rank_tolerance: f64,
) -> (Col<f64>, Vec<bool>, usize) {
    let n_features = x.ncols();
    let n_samples = x.nrows();

    let mut aliased = constant_cols.to_vec();

    let qr = x.col_piv_qr();
    let q = qr.compute_Q();
    let r = qr.R();
    let perm = qr.P();

    // perm_inv[j] = position of original column j in R
    let perm_arr = perm.arrays().0;
    let mut perm_inv: Vec<usize> = vec![0; n_features];
    perm_inv[..n_features].copy_from_slice(&perm_arr[..n_features]);

    let mut rank = 0;
    for i in 0..n_features.min(n_samples) {
        if r[(i, i)].abs() > rank_tolerance {
            rank += 1;
        } else {
            break;
        }
    }

    if rank == 0 {
        return (Col::from_fn(n_features, |_| f64::NAN), vec![true; n_features], 0);
    }

    for j in 0..n_features {
        if constant_cols[j] || perm_inv[j] >= rank {
            aliased[j] = true;
        }
    }

    // Solve R * beta_perm = Q' * y by back-substitution
    let qty = q.transpose() * y;

    let mut beta_reduced = Col::zeros(rank);
    for i in (0..rank).rev() {
        let mut sum = qty[i];
        for j in (i + 1)..rank {
            sum -= r[(i, j)] * beta_reduced[j];
        }
        beta_reduced[i] = sum / r[(i, i)];
    }

    let coefficients = Col::from_fn(n_features, |j| {
        if aliased[j] {
            f64::NAN
        } else {
            beta_reduced[perm_inv[j]]
        }
    });

    (coefficients, aliased, rank)
}

/// Fill R², adjusted R², MSE and the F-test from the sums of squares.
///
/// `tss` and `rss` are weighted for WLS fits.
pub(crate) fn fill_fit_statistics(result: &mut RegressionResult, tss: f64, rss: f64) {
    let n = result.n_observations;
    let n_params = result.n_parameters;

    let r_squared = if tss > 0.0 {
        (1.0 - rss / tss).clamp(0.0, 1.0)
    } else if rss < 1e-10 {
        1.0
    } else {
        0.0
    };

    let df_total = if result.intercept.is_some() {
        n.saturating_sub(1) as f64
    } else {
        n as f64
    };
    let df_resid = n.saturating_sub(n_params) as f64;
    let adj_r_squared = if df_resid > 0.0 && df_total > 0.0 {
        1.0 - (1.0 - r_squared) * df_total / df_resid
    } else {
        f64::NAN
    };

    let mse = if df_resid > 0.0 { rss / df_resid } else { f64::NAN };

    let ess = tss - rss;
    let df_model = result.model_df() as f64;
    let f_statistic = if df_model > 0.0 && df_resid > 0.0 && mse > 0.0 {
        (ess / df_model) / mse
    } else {
        f64::NAN
    };

    let f_pvalue = if f_statistic.is_finite() && df_model > 0.0 && df_resid > 0.0 {
        FisherSnedecor::new(df_model, df_resid)
            .ok()
            .map_or(f64::NAN, |d| (1.0 - d.cdf(f_statistic.max(0.0))).clamp(0.0, 1.0))
    } else {
        f64::NAN
    };

    result.r_squared = r_squared;
    result.adj_r_squared = adj_r_squared;
    result.mse = mse;
    result.rmse = mse.sqrt();
    result.f_statistic = f_statistic;
    result.f_pvalue = f_pvalue;
}

/// Store standard errors and derive t-statistics and p-values.
pub(crate) fn apply_inference(result: &mut RegressionResult, se: Col<f64>, se_int: Option<f64>) {
    let df = result.residual_df() as f64;

    let t_stats = CoefficientInference::t_statistics(&result.coefficients, &se);
    let p_vals = CoefficientInference::p_values(&t_stats, df);

    result.std_errors = Some(se);
    result.t_statistics = Some(t_stats);
    result.p_values = Some(p_vals);

    if let (Some(intercept), Some(se_int)) = (result.intercept, se_int) {
        let t_int = if se_int > 0.0 {
            intercept / se_int
        } else {
            f64::NAN
        };

        result.intercept_std_error = Some(se_int);
        result.intercept_t_statistic = Some(t_int);
        result.intercept_p_value = Some(CoefficientInference::p_value(t_int, df));
    }
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    result: RegressionResult,
}

impl FittedRegressor for FittedOls {
    fn result(&self) -> &RegressionResult {
        &self.result
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    builder: RegressionOptionsBuilder,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.builder = self.builder.with_intercept(include);
        self
    }

    /// Set whether to compute inference statistics.
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.builder = self.builder.compute_inference(compute);
        self
    }

    /// Set the rank tolerance for QR decomposition.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Build the OLS regressor.
    pub fn build(self) -> OlsRegressor {
        OlsRegressor::new(self.builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fit() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(5, |i| 2.0 + 3.0 * i as f64);

        let fitted = OlsRegressor::default().fit(&x, &y).expect("model should fit");

        assert!((fitted.coefficients()[0] - 3.0).abs() < 1e-10);
        assert!((fitted.intercept().expect("intercept exists") - 2.0).abs() < 1e-10);
        assert!((fitted.r_squared() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_fitted_values_follow_the_line() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(5, |i| 2.0 + 3.0 * i as f64);

        let fitted = OlsRegressor::default().fit(&x, &y).expect("model should fit");

        for i in 0..5 {
            assert!((fitted.result().fitted_values[i] - y[i]).abs() < 1e-10);
            assert!(fitted.result().residuals[i].abs() < 1e-10);
        }
    }

    #[test]
    fn test_through_origin_with_explicit_constant() {
        // Design [1, x] without an added intercept reproduces the intercept fit
        let x = Mat::from_fn(6, 1, |i, _| (i * i) as f64 * 0.5 + i as f64);
        let y = Col::from_fn(6, |i| 1.0 + 0.5 * x[(i, 0)] + if i % 2 == 0 { 0.1 } else { -0.1 });
        let design = crate::utils::add_constant(&x);

        let with_intercept = OlsRegressor::default().fit(&x, &y).unwrap();
        let through_origin = OlsRegressor::new(RegressionOptions::through_origin())
            .fit(&design, &y)
            .unwrap();

        assert!(through_origin.intercept().is_none());
        assert!(
            (through_origin.coefficients()[0] - with_intercept.intercept().unwrap()).abs() < 1e-9
        );
        assert!(
            (through_origin.coefficients()[1] - with_intercept.coefficients()[0]).abs() < 1e-9
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(4, |i| i as f64);

        let err = OlsRegressor::default().fit(&x, &y).unwrap_err();
        assert!(matches!(err, RegressionError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_constant_regressor_is_singular() {
        let x = Mat::from_fn(5, 1, |_, _| 3.0);
        let y = Col::from_fn(5, |i| i as f64);

        let err = OlsRegressor::default().fit(&x, &y).unwrap_err();
        assert!(matches!(err, RegressionError::SingularMatrix));
    }

    #[test]
    fn test_inference_populated() {
        let x = Mat::from_fn(20, 1, |i, _| i as f64);
        let y = Col::from_fn(20, |i| 1.0 + 0.5 * i as f64 + ((i * 7) % 5) as f64 * 0.2);

        let fitted = OlsRegressor::default().fit(&x, &y).unwrap();
        let result = fitted.result();

        assert!(result.std_errors.is_some());
        assert!(result.intercept_std_error.is_some());
        let p = result.get_p_value(0).unwrap();
        assert!((0.0..=1.0).contains(&p));
        assert!(p < 0.001);
    }
}
