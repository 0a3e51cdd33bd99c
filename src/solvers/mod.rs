//! Least squares solvers.

mod ols;
mod traits;
mod wls;

pub use ols::{FittedOls, OlsRegressor, OlsRegressorBuilder};
pub use traits::{FittedRegressor, RegressionError, Regressor};
pub use wls::{FittedWls, WlsRegressor, WlsRegressorBuilder};
