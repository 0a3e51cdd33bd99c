//! Analysis configuration.
//!
//! Defaults reproduce the reference workflow: 100 observations with
//! `X ~ U[0, 20)`, `Var(ε|X) = 0.1·X²`, `y = 2.5 + 1.8·X + ε`, seed 42, and
//! outputs under `data/` and `results/`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the generated sample.
pub const DEFAULT_SAMPLE_PATH: &str = "data/dados_gerados.csv";
/// Default location of the OLS/WLS comparison table.
pub const DEFAULT_TABLE_PATH: &str = "results/tabela_comparativa_wls_completa.csv";
/// Default location of the residual plot.
pub const DEFAULT_PLOT_PATH: &str = "results/analise_grafica_residuos_wls.png";

/// Errors that can occur when validating the configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("n_samples must be at least 3, got {0}")]
    InvalidSampleCount(usize),
    #[error("x_upper must be positive and finite, got {0}")]
    InvalidUpperBound(f64),
    #[error("variance_scale must be positive and finite, got {0}")]
    InvalidVarianceScale(f64),
    #[error("true coefficients must be finite, got intercept {intercept} and slope {slope}")]
    InvalidCoefficients { intercept: f64, slope: f64 },
    #[error("significance_level must be in (0, 1), got {0}")]
    InvalidSignificanceLevel(f64),
}

/// Parameters of the synthetic heteroscedastic sample.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of observations (default: 100).
    pub n_samples: usize,
    /// Exclusive upper bound of the uniform regressor (default: 20.0).
    pub x_upper: f64,
    /// Error variance per unit of `X²` (default: 0.1).
    pub variance_scale: f64,
    /// True intercept (default: 2.5).
    pub intercept: f64,
    /// True slope (default: 1.8).
    pub slope: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_samples: 100,
            x_upper: 20.0,
            variance_scale: 0.1,
            intercept: 2.5,
            slope: 1.8,
        }
    }
}

impl GeneratorConfig {
    /// Validate the configuration and return an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_samples < 3 {
            return Err(ConfigError::InvalidSampleCount(self.n_samples));
        }
        if !(self.x_upper > 0.0 && self.x_upper.is_finite()) {
            return Err(ConfigError::InvalidUpperBound(self.x_upper));
        }
        if !(self.variance_scale > 0.0 && self.variance_scale.is_finite()) {
            return Err(ConfigError::InvalidVarianceScale(self.variance_scale));
        }
        if !self.intercept.is_finite() || !self.slope.is_finite() {
            return Err(ConfigError::InvalidCoefficients {
                intercept: self.intercept,
                slope: self.slope,
            });
        }
        Ok(())
    }
}

/// Everything the pipeline needs: data parameters, seed and output paths.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub generator: GeneratorConfig,
    /// Seed of the sample generator's RNG (default: 42).
    pub seed: u64,
    /// Level used to classify test outcomes in log output (default: 0.05).
    pub significance_level: f64,
    pub sample_path: PathBuf,
    pub table_path: PathBuf,
    pub plot_path: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            seed: 42,
            significance_level: 0.05,
            sample_path: PathBuf::from(DEFAULT_SAMPLE_PATH),
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            plot_path: PathBuf::from(DEFAULT_PLOT_PATH),
        }
    }
}

impl AnalysisConfig {
    /// Create a new builder starting from the defaults.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        if self.significance_level <= 0.0 || self.significance_level >= 1.0 {
            return Err(ConfigError::InvalidSignificanceLevel(
                self.significance_level,
            ));
        }
        Ok(())
    }

    /// Directories that must exist before any output is written.
    pub fn output_dirs(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for path in [&self.sample_path, &self.table_path, &self.plot_path] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !dirs.contains(&parent) {
                    dirs.push(parent);
                }
            }
        }
        dirs
    }
}

/// Builder for `AnalysisConfig`.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of observations.
    pub fn n_samples(mut self, n: usize) -> Self {
        self.config.generator.n_samples = n;
        self
    }

    /// Set the exclusive upper bound of `X`.
    pub fn x_upper(mut self, upper: f64) -> Self {
        self.config.generator.x_upper = upper;
        self
    }

    /// Set the error variance per unit of `X²`.
    pub fn variance_scale(mut self, scale: f64) -> Self {
        self.config.generator.variance_scale = scale;
        self
    }

    /// Set the true intercept and slope.
    pub fn coefficients(mut self, intercept: f64, slope: f64) -> Self {
        self.config.generator.intercept = intercept;
        self.config.generator.slope = slope;
        self
    }

    /// Set the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the significance level used to label test outcomes.
    pub fn significance_level(mut self, alpha: f64) -> Self {
        self.config.significance_level = alpha;
        self
    }

    pub fn sample_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.sample_path = path.into();
        self
    }

    pub fn table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.table_path = path.into();
        self
    }

    pub fn plot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.plot_path = path.into();
        self
    }

    /// Place the default relative output paths under `root`.
    pub fn output_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.config.sample_path = root.join(DEFAULT_SAMPLE_PATH);
        self.config.table_path = root.join(DEFAULT_TABLE_PATH);
        self.config.plot_path = root.join(DEFAULT_PLOT_PATH);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
