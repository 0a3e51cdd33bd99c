//! Statistical inference (standard errors, t-statistics, p-values).

mod coefficient;

pub use coefficient::{chi_squared_p_value, CoefficientInference};
