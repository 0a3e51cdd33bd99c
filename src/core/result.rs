//! Regression result structures.

use faer::Col;

/// Complete result from a least squares fit.
///
/// Contains coefficients, fit statistics, and optionally inference statistics
/// (standard errors, t-statistics, p-values).
#[derive(Debug, Clone)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// Estimated coefficients (excluding intercept).
    /// Aliased (collinear) coefficients are set to NaN.
    pub coefficients: Col<f64>,

    /// Intercept term (if model was fit with intercept).
    pub intercept: Option<f64>,

    /// Residuals (y - fitted_values), on the original scale.
    pub residuals: Col<f64>,

    /// Fitted values (predictions on training data).
    pub fitted_values: Col<f64>,

    // ========== Rank Information ==========
    /// Numerical rank of the design matrix.
    pub rank: usize,

    /// Number of parameters (including intercept if present).
    pub n_parameters: usize,

    /// Number of observations.
    pub n_observations: usize,

    /// Indicates which coefficients are aliased (perfectly collinear).
    pub aliased: Vec<bool>,

    // ========== Fit Statistics ==========
    /// Coefficient of determination (R²). Weighted for WLS fits.
    pub r_squared: f64,

    /// Adjusted R².
    pub adj_r_squared: f64,

    /// Root mean squared error.
    pub rmse: f64,

    /// Mean squared error (residual variance estimate, weighted for WLS).
    pub mse: f64,

    /// F-statistic for overall model significance.
    pub f_statistic: f64,

    /// P-value for F-statistic.
    pub f_pvalue: f64,

    // ========== Inference Statistics (Optional) ==========
    /// Standard errors of coefficients.
    pub std_errors: Option<Col<f64>>,

    /// Standard error of intercept.
    pub intercept_std_error: Option<f64>,

    /// t-statistics for coefficients.
    pub t_statistics: Option<Col<f64>>,

    /// t-statistic for intercept.
    pub intercept_t_statistic: Option<f64>,

    /// P-values for coefficient significance tests.
    pub p_values: Option<Col<f64>>,

    /// P-value for intercept.
    pub intercept_p_value: Option<f64>,
}

impl RegressionResult {
    /// Create a new empty result (used internally by solvers).
    pub(crate) fn empty(n_features: usize, n_observations: usize) -> Self {
        Self {
            coefficients: Col::zeros(n_features),
            intercept: None,
            residuals: Col::zeros(n_observations),
            fitted_values: Col::zeros(n_observations),
            rank: 0,
            n_parameters: 0,
            n_observations,
            aliased: vec![false; n_features],
            r_squared: 0.0,
            adj_r_squared: 0.0,
            rmse: 0.0,
            mse: 0.0,
            f_statistic: 0.0,
            f_pvalue: 1.0,
            std_errors: None,
            intercept_std_error: None,
            t_statistics: None,
            intercept_t_statistic: None,
            p_values: None,
            intercept_p_value: None,
        }
    }

    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Model degrees of freedom (p - 1 if intercept, else p).
    pub fn model_df(&self) -> usize {
        if self.intercept.is_some() {
            self.n_parameters.saturating_sub(1)
        } else {
            self.n_parameters
        }
    }

    /// Get coefficient value, returning None for aliased coefficients.
    pub fn get_coefficient(&self, index: usize) -> Option<f64> {
        if index < self.coefficients.nrows() && !self.aliased[index] {
            Some(self.coefficients[index])
        } else {
            None
        }
    }

    /// Standard error of coefficient `index`, if inference was computed.
    pub fn get_std_error(&self, index: usize) -> Option<f64> {
        self.std_errors
            .as_ref()
            .filter(|se| index < se.nrows())
            .map(|se| se[index])
    }

    /// Two-sided p-value of coefficient `index`, if inference was computed.
    pub fn get_p_value(&self, index: usize) -> Option<f64> {
        self.p_values
            .as_ref()
            .filter(|p| index < p.nrows())
            .map(|p| p[index])
    }

    /// Residual sum of squares (RSS), unweighted.
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|&r| r.powi(2)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = RegressionResult::empty(2, 10);
        assert_eq!(result.coefficients.nrows(), 2);
        assert_eq!(result.n_observations, 10);
        assert_eq!(result.residual_df(), 10);
        assert!(result.std_errors.is_none());
    }

    #[test]
    fn test_degrees_of_freedom() {
        let mut result = RegressionResult::empty(1, 100);
        result.n_parameters = 2;
        result.intercept = Some(1.0);

        assert_eq!(result.residual_df(), 98);
        assert_eq!(result.model_df(), 1);

        result.intercept = None;
        assert_eq!(result.model_df(), 2);
    }

    #[test]
    fn test_get_coefficient_respects_aliasing() {
        let mut result = RegressionResult::empty(2, 10);
        result.coefficients[0] = 1.5;
        result.coefficients[1] = 2.5;

        assert_eq!(result.get_coefficient(0), Some(1.5));
        assert_eq!(result.get_coefficient(5), None);

        result.aliased[1] = true;
        assert_eq!(result.get_coefficient(1), None);
    }

    #[test]
    fn test_inference_accessors() {
        let mut result = RegressionResult::empty(1, 10);
        assert_eq!(result.get_std_error(0), None);
        assert_eq!(result.get_p_value(0), None);

        result.std_errors = Some(Col::from_fn(1, |_| 0.25));
        result.p_values = Some(Col::from_fn(1, |_| 0.01));
        assert_eq!(result.get_std_error(0), Some(0.25));
        assert_eq!(result.get_p_value(0), Some(0.01));
        assert_eq!(result.get_p_value(1), None);
    }

    #[test]
    fn test_rss() {
        let mut result = RegressionResult::empty(1, 4);
        result.residuals = Col::from_fn(4, |i| if i % 2 == 0 { 0.5 } else { -0.5 });
        assert!((result.rss() - 1.0).abs() < 1e-12);
    }
}
