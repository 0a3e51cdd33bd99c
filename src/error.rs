//! Top-level error type of the analysis pipeline.

use crate::config::ConfigError;
use crate::data::{DataIoError, GeneratorError};
use crate::report::ReportError;
use crate::solvers::RegressionError;
use thiserror::Error;

/// Any failure that aborts [`run_analysis`](crate::pipeline::run_analysis).
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("sample generation failed: {0}")]
    Generation(#[from] GeneratorError),

    #[error("sample file: {0}")]
    DataIo(#[from] DataIoError),

    #[error("estimation failed: {0}")]
    Estimation(#[from] RegressionError),

    #[error("report failed: {0}")]
    Report(#[from] ReportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
