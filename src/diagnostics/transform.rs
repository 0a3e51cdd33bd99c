//! OLS restatement of a weighted fit.
//!
//! WLS with weights `w` is OLS on `sqrt(w_i)·y_i` against `sqrt(w_i)·[1, X_i]`
//! without an added intercept. Residual-based tests on a WLS model use the
//! residuals of this restated problem.

use crate::core::{RegressionOptions, Sample};
use crate::solvers::{FittedOls, FittedWls, OlsRegressor, RegressionError, Regressor};
use crate::utils::scale_rows;
use faer::Col;

/// Refit `model` as OLS on `sqrt(weight)`-scaled data.
///
/// The coefficient vector of the returned model is `[β0, β1]` in the order of
/// the design `[1, X]`, and equals the WLS estimate up to rounding.
pub fn transformed_ols_model(
    model: &FittedWls,
    sample: &Sample,
) -> Result<FittedOls, RegressionError> {
    let weights = model.weights();
    if weights.nrows() != sample.len() {
        return Err(RegressionError::DimensionMismatch {
            x_rows: sample.len(),
            y_len: weights.nrows(),
        });
    }

    let sqrt_weights = Col::from_fn(weights.nrows(), |i| weights[i].sqrt());
    let y = sample.response();
    let y_transformed = Col::from_fn(y.nrows(), |i| y[i] * sqrt_weights[i]);
    let x_transformed = scale_rows(&sample.design_matrix(), &sqrt_weights);

    OlsRegressor::new(RegressionOptions::through_origin()).fit(&x_transformed, &y_transformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::{FittedRegressor, WlsRegressor};

    #[test]
    fn test_transformed_model_reproduces_wls() {
        let x: Vec<f64> = (1..=12).map(|i| i as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, &xi)| 1.0 + 0.8 * xi + if i % 2 == 0 { 0.05 * xi } else { -0.07 * xi })
            .collect();
        let sample = Sample::new(x, y).unwrap();
        let weights = Col::from_fn(12, |i| 1.0 / ((i + 1) as f64).powi(2));

        let wls = WlsRegressor::builder()
            .weights(weights)
            .build()
            .fit(&sample.regressors(), &sample.response())
            .unwrap();
        let transformed = transformed_ols_model(&wls, &sample).unwrap();

        assert!(transformed.intercept().is_none());
        assert!((transformed.coefficients()[0] - wls.intercept().unwrap()).abs() < 1e-8);
        assert!((transformed.coefficients()[1] - wls.coefficients()[0]).abs() < 1e-8);

        // Transformed residuals are the weighted WLS residuals
        let weighted = wls.weighted_residuals();
        for i in 0..12 {
            assert!((transformed.result().residuals[i] - weighted[i]).abs() < 1e-8);
        }
    }
}
