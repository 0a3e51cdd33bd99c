//! Standardized and Pearson residuals.

use faer::Col;

/// Compute standardized residuals: e_i / s
///
/// Where s is the residual standard error (sqrt of MSE).
pub fn standardized_residuals(residuals: &Col<f64>, mse: f64) -> Col<f64> {
    if mse <= 0.0 || !mse.is_finite() {
        return Col::from_fn(residuals.nrows(), |i| {
            if residuals[i].abs() < 1e-14 {
                0.0
            } else {
                f64::NAN
            }
        });
    }

    let s = mse.sqrt();
    Col::from_fn(residuals.nrows(), |i| residuals[i] / s)
}

/// Compute Pearson residuals: sqrt(w_i) · e_i / s
///
/// Without weights this is the standardized residual. For a weighted fit `mse`
/// must be the weighted residual variance `Σ w e² / (n - p)`.
pub fn pearson_residuals(residuals: &Col<f64>, weights: Option<&Col<f64>>, mse: f64) -> Col<f64> {
    match weights {
        None => standardized_residuals(residuals, mse),
        Some(w) => {
            let weighted = Col::from_fn(residuals.nrows(), |i| w[i].sqrt() * residuals[i]);
            standardized_residuals(&weighted, mse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardized_residuals() {
        let residuals = Col::from_fn(10, |i| i as f64 - 4.5);
        let mse = 10.0;

        let std_resid = standardized_residuals(&residuals, mse);

        let s = mse.sqrt();
        for i in 0..10 {
            assert!((std_resid[i] - residuals[i] / s).abs() < 1e-10);
        }
    }

    #[test]
    fn test_standardized_residuals_zero_mse() {
        let residuals = Col::from_fn(3, |i| if i == 0 { 0.0 } else { 1.0 });
        let std_resid = standardized_residuals(&residuals, 0.0);

        assert_eq!(std_resid[0], 0.0);
        assert!(std_resid[1].is_nan());
    }

    #[test]
    fn test_pearson_residuals_weighted() {
        let residuals = Col::from_fn(4, |i| (i + 1) as f64);
        let weights = Col::from_fn(4, |i| 1.0 / ((i + 1) * (i + 1)) as f64);

        let pearson = pearson_residuals(&residuals, Some(&weights), 4.0);

        // sqrt(w_i) · e_i = 1 for every observation
        for i in 0..4 {
            assert!((pearson[i] - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pearson_residuals_unweighted() {
        let residuals = Col::from_fn(4, |i| i as f64);
        let pearson = pearson_residuals(&residuals, None, 4.0);
        let standardized = standardized_residuals(&residuals, 4.0);

        for i in 0..4 {
            assert_eq!(pearson[i], standardized[i]);
        }
    }
}
