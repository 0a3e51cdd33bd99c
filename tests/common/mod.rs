//! Common test utilities and data generators.
#![allow(dead_code)]

use faer::{Col, Mat};
use hetero_wls::config::GeneratorConfig;
use hetero_wls::core::Sample;
use hetero_wls::data::generate_heteroscedastic_data;
use std::fs;
use std::path::{Path, PathBuf};

/// The sample of the default workflow (100 observations, seed 42).
pub fn default_sample() -> Sample {
    generate_heteroscedastic_data(&GeneratorConfig::default(), 42)
        .expect("default sample should generate")
}

/// A heteroscedastic sample of `n` observations.
pub fn heteroscedastic_sample(n: usize, seed: u64) -> Sample {
    let config = GeneratorConfig {
        n_samples: n,
        ..GeneratorConfig::default()
    };
    generate_heteroscedastic_data(&config, seed).expect("sample should generate")
}

/// Linear data with uniform pseudo-noise: y = intercept + slope * x + noise.
///
/// The noise is uniform on `[-noise_std, noise_std]`.
///
/// `x` runs over `1..=n`, so it is strictly positive.
pub fn generate_linear_data(
    n_samples: usize,
    intercept: f64,
    slope: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>) {
    let mut rng_state = seed;
    let next_rand = |state: &mut u64| -> f64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((*state >> 32) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    };

    let x = Mat::from_fn(n_samples, 1, |i, _| (i + 1) as f64);
    let mut y = Col::zeros(n_samples);
    for i in 0..n_samples {
        y[i] = intercept + slope * x[(i, 0)] + noise_std * next_rand(&mut rng_state);
    }

    (x, y)
}

/// A unique scratch directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "hetero-wls-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("scratch dir should be creatable");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Approximate equality check for floating point values.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
