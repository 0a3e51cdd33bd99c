//! Matrix utility functions.

use faer::{Col, Mat};

/// Detect columns that are constant (zero variance).
pub fn detect_constant_columns(x: &Mat<f64>, tolerance: f64) -> Vec<bool> {
    let n_cols = x.ncols();
    let n_rows = x.nrows();

    if n_rows == 0 {
        return vec![true; n_cols];
    }

    (0..n_cols)
        .map(|j| {
            let first = x[(0, j)];
            (1..n_rows).all(|i| (x[(i, j)] - first).abs() < tolerance)
        })
        .collect()
}

/// Center a matrix by subtracting column means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let means = Col::from_fn(n_cols, |j| {
        (0..n_rows).map(|i| x[(i, j)]).sum::<f64>() / n_rows as f64
    });
    let centered = Mat::from_fn(n_rows, n_cols, |i, j| x[(i, j)] - means[j]);

    (centered, means)
}

/// Center a vector by subtracting the mean.
pub fn center_vector(y: &Col<f64>) -> (Col<f64>, f64) {
    let n = y.nrows();
    let mean: f64 = y.iter().sum::<f64>() / n as f64;

    let centered = Col::from_fn(n, |i| y[i] - mean);

    (centered, mean)
}

/// Prepend a column of ones: `[1 | X]`.
pub fn add_constant(x: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(x.nrows(), x.ncols() + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            x[(i, j - 1)]
        }
    })
}

/// Multiply row `i` of `x` by `factors[i]`.
pub fn scale_rows(x: &Mat<f64>, factors: &Col<f64>) -> Mat<f64> {
    Mat::from_fn(x.nrows(), x.ncols(), |i, j| x[(i, j)] * factors[i])
}

/// Regressors followed by every square and pairwise product `x_j * x_k`, `j <= k`.
///
/// This is the auxiliary regressor set of White's test; the constant is left
/// to the regression's intercept.
pub fn with_squares_and_cross_products(x: &Mat<f64>) -> Mat<f64> {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let mut pairs = Vec::with_capacity(n_cols * (n_cols + 1) / 2);
    for j in 0..n_cols {
        for k in j..n_cols {
            pairs.push((j, k));
        }
    }

    Mat::from_fn(n_rows, n_cols + pairs.len(), |i, c| {
        if c < n_cols {
            x[(i, c)]
        } else {
            let (j, k) = pairs[c - n_cols];
            x[(i, j)] * x[(i, k)]
        }
    })
}
