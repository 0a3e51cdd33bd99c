//! Persistence of the generated sample as a two-column CSV.

use crate::core::{Sample, SampleError};
use crate::utils::{read_csv_with_bom, write_csv_with_bom};
use std::path::Path;
use thiserror::Error;

/// Column names of the sample file, in order.
pub const SAMPLE_HEADER: [&str; 2] = ["X", "y"];

/// Errors raised while reading or writing a sample file.
#[derive(Debug, Error)]
pub enum DataIoError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unexpected header {found:?}, expected [\"X\", \"y\"]")]
    Header { found: Vec<String> },

    #[error("row {row}: expected 2 fields, got {fields}")]
    RowWidth { row: usize, fields: usize },

    #[error("row {row}: cannot parse {value:?} as a number")]
    Parse { row: usize, value: String },

    #[error("invalid sample: {0}")]
    Sample(#[from] SampleError),
}

/// Write `sample` to `path` with header `X,y`, replacing any existing file.
pub fn write_sample_csv<P: AsRef<Path>>(sample: &Sample, path: P) -> Result<(), DataIoError> {
    let rows = sample.iter().map(|(x, y)| [x.to_string(), y.to_string()]);
    write_csv_with_bom(path, &SAMPLE_HEADER, rows)?;
    Ok(())
}

/// Read a sample file back and revalidate it.
pub fn read_sample_csv<P: AsRef<Path>>(path: P) -> Result<Sample, DataIoError> {
    let (header, rows) = read_csv_with_bom(path)?;
    if header != SAMPLE_HEADER {
        return Err(DataIoError::Header { found: header });
    }

    let mut x = Vec::with_capacity(rows.len());
    let mut y = Vec::with_capacity(rows.len());
    for (row, fields) in rows.iter().enumerate() {
        if fields.len() != 2 {
            return Err(DataIoError::RowWidth {
                row,
                fields: fields.len(),
            });
        }
        x.push(parse_field(row, &fields[0])?);
        y.push(parse_field(row, &fields[1])?);
    }

    Ok(Sample::new(x, y)?)
}

fn parse_field(row: usize, value: &str) -> Result<f64, DataIoError> {
    value.trim().parse().map_err(|_| DataIoError::Parse {
        row,
        value: value.to_string(),
    })
}
