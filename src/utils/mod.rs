//! Shared numerical and file helpers.

mod csv_io;
mod matrix;

pub use csv_io::{read_csv_with_bom, write_csv_with_bom, UTF8_BOM};
pub use matrix::{
    add_constant, center_columns, center_vector, detect_constant_columns, scale_rows,
    with_squares_and_cross_products,
};
