//! Core types for regression analysis.

mod options;
mod result;
mod sample;

pub use options::{RegressionOptions, RegressionOptionsBuilder};
pub use result::RegressionResult;
pub use sample::{Sample, SampleError};
