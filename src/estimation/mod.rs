//! OLS and feasible WLS estimation of `y = β0 + β1·X + ε`.
//!
//! The feasible weights come from an auxiliary regression of the log squared
//! OLS residuals on the design: `w_i = 1 / exp(ĥ_i)`, where `ĥ` is the fitted
//! log-variance.

use crate::core::{RegressionResult, Sample};
use crate::diagnostics::pearson_residuals;
use crate::solvers::{
    FittedOls, FittedRegressor, FittedWls, OlsRegressor, RegressionError, Regressor, WlsRegressor,
};
use faer::Col;
use tracing::debug;

/// Which estimator produced a [`FittedModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Ols,
    Wls,
}

impl ModelKind {
    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Ols => "OLS",
            ModelKind::Wls => "WLS",
        }
    }
}

/// A fitted bivariate model, tagged by estimator.
///
/// The weighted arm carries its weight vector, which residual diagnostics need
/// to rebuild the equivalent transformed OLS problem.
#[derive(Debug, Clone)]
pub enum FittedModel {
    Ols(FittedOls),
    Wls(FittedWls),
}

/// Point estimate with its standard error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub std_error: f64,
}

impl FittedModel {
    pub fn kind(&self) -> ModelKind {
        match self {
            FittedModel::Ols(_) => ModelKind::Ols,
            FittedModel::Wls(_) => ModelKind::Wls,
        }
    }

    pub fn result(&self) -> &RegressionResult {
        match self {
            FittedModel::Ols(m) => m.result(),
            FittedModel::Wls(m) => m.result(),
        }
    }

    /// Weights of a WLS fit; `None` for OLS.
    pub fn weights(&self) -> Option<&Col<f64>> {
        match self {
            FittedModel::Ols(_) => None,
            FittedModel::Wls(m) => Some(m.weights()),
        }
    }

    /// Coefficient vector `[β0, β1]`.
    pub fn params(&self) -> [f64; 2] {
        let result = self.result();
        [
            result.intercept.unwrap_or(f64::NAN),
            result.get_coefficient(0).unwrap_or(f64::NAN),
        ]
    }

    pub fn intercept(&self) -> Estimate {
        let result = self.result();
        Estimate {
            value: result.intercept.unwrap_or(f64::NAN),
            std_error: result.intercept_std_error.unwrap_or(f64::NAN),
        }
    }

    pub fn slope(&self) -> Estimate {
        let result = self.result();
        Estimate {
            value: result.get_coefficient(0).unwrap_or(f64::NAN),
            std_error: result.get_std_error(0).unwrap_or(f64::NAN),
        }
    }

    pub fn adj_r_squared(&self) -> f64 {
        self.result().adj_r_squared
    }

    pub fn fitted_values(&self) -> &Col<f64> {
        &self.result().fitted_values
    }

    /// Raw residuals `y - ŷ` on the original scale.
    pub fn residuals(&self) -> &Col<f64> {
        &self.result().residuals
    }

    /// Residuals standardized by their estimated standard deviation.
    ///
    /// For WLS fits the residuals are weighted by `sqrt(w_i)` first.
    pub fn pearson_residuals(&self) -> Col<f64> {
        let result = self.result();
        pearson_residuals(&result.residuals, self.weights(), result.mse)
    }
}

/// Fit `y` on `[1, X]` by ordinary least squares.
pub fn estimate_ols(sample: &Sample) -> Result<FittedModel, RegressionError> {
    let fitted = OlsRegressor::default().fit(&sample.regressors(), &sample.response())?;
    require_standard_errors(fitted.result())?;
    debug!(
        intercept = fitted.intercept(),
        slope = fitted.coefficients()[0],
        adj_r_squared = fitted.adj_r_squared(),
        "fitted OLS model"
    );
    Ok(FittedModel::Ols(fitted))
}

/// Feasible inverse-variance weights from the auxiliary log-variance regression.
///
/// Fails with [`RegressionError::NumericalDomain`] when an OLS residual is
/// exactly zero, since `log(0)` is undefined.
pub fn feasible_weights(sample: &Sample) -> Result<Col<f64>, RegressionError> {
    let x = sample.regressors();
    let ols = OlsRegressor::default().fit(&x, &sample.response())?;

    let log_resid_sq = log_squared(&ols.result().residuals)?;
    let aux = OlsRegressor::builder()
        .compute_inference(false)
        .build()
        .fit(&x, &log_resid_sq)?;

    let fitted_log_variance = &aux.result().fitted_values;
    let weights = Col::from_fn(fitted_log_variance.nrows(), |i| {
        1.0 / fitted_log_variance[i].exp()
    });

    if let Some(index) = weights.iter().position(|w| !w.is_finite() || *w <= 0.0) {
        return Err(RegressionError::NumericalDomain {
            operation: "inverse of exp(fitted log-variance)",
            index,
            value: fitted_log_variance[index],
        });
    }

    Ok(weights)
}

/// Two-stage feasible WLS: estimate the weights, then fit WLS on `[1, X]`.
pub fn estimate_wls(sample: &Sample) -> Result<FittedModel, RegressionError> {
    let weights = feasible_weights(sample)?;
    let fitted = WlsRegressor::builder()
        .weights(weights)
        .build()
        .fit(&sample.regressors(), &sample.response())?;
    require_standard_errors(fitted.result())?;
    debug!(
        intercept = fitted.intercept(),
        slope = fitted.coefficients()[0],
        adj_r_squared = fitted.adj_r_squared(),
        "fitted WLS model"
    );
    Ok(FittedModel::Wls(fitted))
}

/// Both reported standard errors must exist and be finite.
fn require_standard_errors(result: &RegressionResult) -> Result<(), RegressionError> {
    let intercept_se = result.intercept_std_error;
    let slope_se = result.get_std_error(0);

    match (intercept_se, slope_se) {
        (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Ok(()),
        (None, _) | (_, None) => Err(RegressionError::InferenceUnavailable(
            "fit produced no standard errors",
        )),
        _ => Err(RegressionError::InferenceUnavailable(
            "fit produced non-finite standard errors",
        )),
    }
}

/// `log(e_i²)` for every residual; a zero residual is a domain error.
pub(crate) fn log_squared(residuals: &Col<f64>) -> Result<Col<f64>, RegressionError> {
    if let Some(index) = residuals.iter().position(|&e| e == 0.0 || !e.is_finite()) {
        return Err(RegressionError::NumericalDomain {
            operation: "log of squared residual",
            index,
            value: residuals[index],
        });
    }
    Ok(Col::from_fn(residuals.nrows(), |i| {
        (residuals[i] * residuals[i]).ln()
    }))
}
