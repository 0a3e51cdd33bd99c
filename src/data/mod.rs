//! Sample generation and persistence.

mod generator;
mod io;

pub use generator::{generate_heteroscedastic_data, GeneratorError, SampleGenerator};
pub use io::{read_sample_csv, write_sample_csv, DataIoError, SAMPLE_HEADER};
