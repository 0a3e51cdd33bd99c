//! Comparison table and residual plots for the OLS and WLS fits.

mod plot;
mod table;

use thiserror::Error;

pub use plot::{create_diagnostic_plots, PLOT_SIZE};
pub use table::{format_and_save_results, ComparisonTable, TableRow, TABLE_HEADER};

/// Errors raised while producing report artifacts.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("plot error: {0}")]
    Plot(String),

    #[error("malformed table: {0}")]
    Malformed(String),
}
