//! OLS solver and estimator tests.

mod common;

use approx::assert_relative_eq;
use faer::{Col, Mat};
use hetero_wls::core::RegressionOptions;
use hetero_wls::estimation::{estimate_ols, ModelKind};
use hetero_wls::solvers::{FittedRegressor, OlsRegressor, RegressionError, Regressor};
use hetero_wls::utils::add_constant;

// ============================================================================
// Basic Regression Tests
// ============================================================================

#[test]
fn test_simple_linear_regression_with_intercept() {
    let x = Mat::from_fn(10, 1, |i, _| i as f64);
    let y = Col::from_fn(10, |i| 2.5 + 1.8 * i as f64);

    let fitted = OlsRegressor::default().fit(&x, &y).expect("fit should succeed");

    assert_relative_eq!(fitted.coefficients()[0], 1.8, epsilon = 1e-10);
    assert_relative_eq!(fitted.intercept().unwrap(), 2.5, epsilon = 1e-10);
    assert_relative_eq!(fitted.r_squared(), 1.0, epsilon = 1e-10);
}

#[test]
fn test_recovers_true_line_under_noise() {
    let (x, y) = common::generate_linear_data(200, 2.5, 1.8, 0.5, 7);

    let fitted = OlsRegressor::default().fit(&x, &y).expect("fit should succeed");

    assert!(common::approx_eq(fitted.coefficients()[0], 1.8, 0.01));
    assert!(common::approx_eq(fitted.intercept().unwrap(), 2.5, 0.2));
}

#[test]
fn test_linear_data_noise_is_centred() {
    let n = 2000;
    let (x, y) = common::generate_linear_data(n, 2.5, 1.8, 0.5, 7);

    let noise: Vec<f64> = (0..n).map(|i| y[i] - 2.5 - 1.8 * x[(i, 0)]).collect();
    let mean = noise.iter().sum::<f64>() / n as f64;

    assert!(mean.abs() < 0.03, "noise mean {mean}");
    assert!(noise.iter().all(|e| e.abs() <= 0.5 + 1e-12));
    assert!(noise.iter().any(|&e| e > 0.25));
    assert!(noise.iter().any(|&e| e < -0.25));
}

#[test]
fn test_explicit_constant_through_origin_matches_intercept_fit() {
    let (x, y) = common::generate_linear_data(40, 1.0, -0.5, 0.3, 11);

    let with_intercept = OlsRegressor::default().fit(&x, &y).expect("fit should succeed");
    let through_origin = OlsRegressor::new(RegressionOptions::through_origin())
        .fit(&add_constant(&x), &y)
        .expect("fit should succeed");

    assert!(through_origin.intercept().is_none());
    assert_relative_eq!(
        through_origin.coefficients()[0],
        with_intercept.intercept().unwrap(),
        epsilon = 1e-9
    );
    assert_relative_eq!(
        through_origin.coefficients()[1],
        with_intercept.coefficients()[0],
        epsilon = 1e-9
    );
    for i in 0..40 {
        assert_relative_eq!(
            through_origin.result().residuals[i],
            with_intercept.result().residuals[i],
            epsilon = 1e-9
        );
    }
}

// ============================================================================
// Statistics Tests
// ============================================================================

#[test]
fn test_residual_sum_with_intercept() {
    let (x, y) = common::generate_linear_data(30, 1.0, 2.0, 1.0, 3);
    let fitted = OlsRegressor::default().fit(&x, &y).expect("fit should succeed");

    let sum: f64 = fitted.result().residuals.iter().sum();
    assert!(sum.abs() < 1e-9);
}

#[test]
fn test_inference_statistics() {
    let (x, y) = common::generate_linear_data(50, 1.0, 2.0, 1.0, 5);
    let fitted = OlsRegressor::default().fit(&x, &y).expect("fit should succeed");
    let result = fitted.result();

    let se = result.get_std_error(0).expect("standard error computed");
    let se_int = result.intercept_std_error.expect("intercept SE computed");
    assert!(se > 0.0 && se_int > 0.0);

    let p = result.get_p_value(0).expect("p-value computed");
    assert!((0.0..=1.0).contains(&p));
    assert!(p < 1e-10);

    let t_int = result.intercept_t_statistic.expect("intercept t computed");
    assert_relative_eq!(t_int, result.intercept.unwrap() / se_int, epsilon = 1e-12);
    let p_int = result.intercept_p_value.expect("intercept p-value computed");
    assert!((0.0..=1.0).contains(&p_int));

    assert_eq!(result.residual_df(), 48);
    assert!(result.adj_r_squared <= result.r_squared);
    assert!(result.f_pvalue < 1e-10);
}

#[test]
fn test_mse_uses_residual_degrees_of_freedom() {
    let (x, y) = common::generate_linear_data(20, 0.0, 1.0, 2.0, 9);
    let fitted = OlsRegressor::default().fit(&x, &y).expect("fit should succeed");
    let result = fitted.result();

    let rss: f64 = result.residuals.iter().map(|e| e * e).sum();
    assert_relative_eq!(result.mse, rss / 18.0, epsilon = 1e-10);
    assert_relative_eq!(result.rmse, result.mse.sqrt(), epsilon = 1e-12);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_dimension_mismatch() {
    let x = Mat::from_fn(10, 1, |i, _| i as f64);
    let y = Col::from_fn(8, |i| i as f64);

    let err = OlsRegressor::default().fit(&x, &y).unwrap_err();
    assert!(matches!(
        err,
        RegressionError::DimensionMismatch { x_rows: 10, y_len: 8 }
    ));
}

#[test]
fn test_insufficient_observations() {
    let x = Mat::from_fn(1, 1, |_, _| 1.0);
    let y = Col::from_fn(1, |_| 1.0);

    let err = OlsRegressor::default().fit(&x, &y).unwrap_err();
    assert!(matches!(err, RegressionError::InsufficientObservations { .. }));
}

#[test]
fn test_constant_regressor_is_singular() {
    let x = Mat::from_fn(10, 1, |_, _| 4.0);
    let y = Col::from_fn(10, |i| i as f64);

    let err = OlsRegressor::default().fit(&x, &y).unwrap_err();
    assert!(matches!(err, RegressionError::SingularMatrix));
}

// ============================================================================
// Estimator Tests
// ============================================================================

#[test]
fn test_estimate_ols_on_generated_sample() {
    let sample = common::default_sample();
    let model = estimate_ols(&sample).expect("OLS should fit");

    assert_eq!(model.kind(), ModelKind::Ols);
    assert_eq!(model.residuals().nrows(), 100);
    assert!((0.0..=1.0).contains(&model.adj_r_squared()));

    // True slope 1.8 is within a few standard errors
    let slope = model.slope();
    assert!((slope.value - 1.8).abs() < 4.0 * slope.std_error);

    let [b0, b1] = model.params();
    assert_eq!(b0, model.intercept().value);
    assert_eq!(b1, slope.value);
}
