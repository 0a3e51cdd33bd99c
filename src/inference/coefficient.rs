//! Coefficient inference calculations.

use faer::{Col, Mat};
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute standard errors for coefficients of a model without intercept.
    ///
    /// SE(β_j) = sqrt(σ² * (X'X)^(-1)_{jj})
    pub fn standard_errors(
        x: &Mat<f64>,
        mse: f64,
        aliased: &[bool],
    ) -> Result<Col<f64>, &'static str> {
        let n_features = x.ncols();
        let n_active = aliased.iter().filter(|&&a| !a).count();

        if n_active == 0 {
            return Err("All features are aliased");
        }

        // Extract non-aliased columns
        let active: Vec<usize> = (0..n_features).filter(|&j| !aliased[j]).collect();
        let x_active = Mat::from_fn(x.nrows(), n_active, |i, k| x[(i, active[k])]);

        let xtx = x_active.transpose() * &x_active;
        let xtx_inv = invert_via_qr(&xtx).ok_or("Matrix is singular")?;

        let mut se = Col::from_fn(n_features, |_| f64::NAN);
        for (k, &j) in active.iter().enumerate() {
            let var = mse * xtx_inv[(k, k)];
            se[j] = if var >= 0.0 { var.sqrt() } else { f64::NAN };
        }

        Ok(se)
    }

    /// Compute standard errors for both intercept and coefficients using the augmented design matrix.
    ///
    /// Uses the augmented design matrix [1 | X] to compute (X_aug'X_aug)^-1.
    ///
    /// Returns (coefficient_SE, intercept_SE).
    pub fn standard_errors_with_intercept(
        x: &Mat<f64>,
        mse: f64,
        aliased: &[bool],
    ) -> Result<(Col<f64>, f64), &'static str> {
        let unit_weights = Col::from_fn(x.nrows(), |_| 1.0);
        Self::standard_errors_wls_with_intercept(x, &unit_weights, mse, aliased)
    }

    /// Compute standard errors for WLS with intercept using the weighted augmented design matrix.
    ///
    /// Uses (X_aug'WX_aug)^-1 with X_aug = [1 | X], matching `lm()` with weights.
    ///
    /// Returns (coefficient_SE, intercept_SE).
    pub fn standard_errors_wls_with_intercept(
        x: &Mat<f64>,
        weights: &Col<f64>,
        mse: f64,
        aliased: &[bool],
    ) -> Result<(Col<f64>, f64), &'static str> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        // Build X'WX for augmented matrix [1 | X]
        let aug_size = n_features + 1;
        let mut xtwx_aug: Mat<f64> = Mat::zeros(aug_size, aug_size);

        for i in 0..n_samples {
            let w = weights[i];

            xtwx_aug[(0, 0)] += w;

            for j in 0..n_features {
                xtwx_aug[(0, j + 1)] += w * x[(i, j)];
                xtwx_aug[(j + 1, 0)] += w * x[(i, j)];
            }

            for j in 0..n_features {
                for k in 0..n_features {
                    xtwx_aug[(j + 1, k + 1)] += w * x[(i, j)] * x[(i, k)];
                }
            }
        }

        let xtwx_aug_inv =
            invert_via_qr(&xtwx_aug).ok_or("Weighted augmented matrix is singular")?;

        let se_intercept = (mse * xtwx_aug_inv[(0, 0)]).sqrt();

        let mut se_coef = Col::zeros(n_features);
        for j in 0..n_features {
            if aliased[j] {
                se_coef[j] = f64::NAN;
            } else {
                let var = mse * xtwx_aug_inv[(j + 1, j + 1)];
                se_coef[j] = if var >= 0.0 { var.sqrt() } else { f64::NAN };
            }
        }

        Ok((se_coef, se_intercept))
    }

    /// Compute t-statistics for coefficients.
    ///
    /// t_j = β_j / SE(β_j)
    pub fn t_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        Col::from_fn(coefficients.nrows(), |j| {
            if std_errors[j].is_nan() || std_errors[j] == 0.0 {
                f64::NAN
            } else {
                coefficients[j] / std_errors[j]
            }
        })
    }

    /// Two-sided p-value of a single t-statistic.
    ///
    /// p = 2 * P(|T| > |t|) where T ~ t(df)
    pub fn p_value(t_statistic: f64, df: f64) -> f64 {
        if df <= 0.0 || !t_statistic.is_finite() {
            return f64::NAN;
        }
        match StudentsT::new(0.0, 1.0, df) {
            Ok(t_dist) => (2.0 * (1.0 - t_dist.cdf(t_statistic.abs()))).clamp(0.0, 1.0),
            Err(_) => f64::NAN,
        }
    }

    /// Compute p-values from t-statistics.
    pub fn p_values(t_statistics: &Col<f64>, df: f64) -> Col<f64> {
        Col::from_fn(t_statistics.nrows(), |j| Self::p_value(t_statistics[j], df))
    }
}

/// Upper-tail probability of a chi-square statistic, `P(χ²_df > statistic)`.
pub fn chi_squared_p_value(statistic: f64, df: f64) -> f64 {
    if df <= 0.0 || !statistic.is_finite() {
        return f64::NAN;
    }
    ChiSquared::new(df).map_or(f64::NAN, |d| (1.0 - d.cdf(statistic.max(0.0))).clamp(0.0, 1.0))
}

/// Invert a small square matrix by solving R X = Q' column by column.
///
/// Returns `None` when a diagonal entry of R vanishes.
fn invert_via_qr(a: &Mat<f64>) -> Option<Mat<f64>> {
    let size = a.nrows();
    let qr = a.qr();
    let q = qr.compute_Q();
    let r = qr.R();

    for i in 0..size {
        if r[(i, i)].abs() < 1e-10 {
            return None;
        }
    }

    let mut inverse = Mat::zeros(size, size);
    let qt = q.transpose();

    for col in 0..size {
        for i in (0..size).rev() {
            let mut sum = qt[(i, col)];
            for j in (i + 1)..size {
                sum -= r[(i, j)] * inverse[(j, col)];
            }
            inverse[(i, col)] = sum / r[(i, i)];
        }
    }

    Some(inverse)
}
