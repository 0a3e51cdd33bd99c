//! Regression-based tests for heteroscedasticity.
//!
//! Every test regresses a transform of the residuals on the regressors (the
//! auxiliary regression always carries an intercept) and reports a p-value
//! under the null hypothesis of homoscedastic errors.
//!
//! | Test          | Dependent variable | Regressors            | Statistic        |
//! |---------------|--------------------|-----------------------|------------------|
//! | Breusch–Pagan | `e²`               | `X`                   | `n·R² ~ χ²(k)`   |
//! | White         | `e²`               | `X`, squares, products| `n·R² ~ χ²(df)`  |
//! | Park          | `log(e²)`          | `log(X)`              | slope t-test     |
//! | Glejser       | `abs(e)`           | `X`                   | slope t-test     |

use crate::core::{RegressionResult, Sample};
use crate::diagnostics::transformed_ols_model;
use crate::estimation::{log_squared, FittedModel};
use crate::inference::chi_squared_p_value;
use crate::solvers::{FittedRegressor, OlsRegressor, RegressionError, Regressor};
use crate::utils::with_squares_and_cross_products;
use faer::{Col, Mat};
use std::fmt;

/// The four heteroscedasticity tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeteroscedasticityTest {
    BreuschPagan,
    White,
    Park,
    Glejser,
}

impl HeteroscedasticityTest {
    /// All tests in reporting order.
    pub const ALL: [HeteroscedasticityTest; 4] = [
        HeteroscedasticityTest::BreuschPagan,
        HeteroscedasticityTest::White,
        HeteroscedasticityTest::Park,
        HeteroscedasticityTest::Glejser,
    ];

    /// Stable snake_case identifier.
    pub fn name(self) -> &'static str {
        match self {
            HeteroscedasticityTest::BreuschPagan => "breusch_pagan",
            HeteroscedasticityTest::White => "white",
            HeteroscedasticityTest::Park => "park",
            HeteroscedasticityTest::Glejser => "glejser",
        }
    }

    /// Look a test up by its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for HeteroscedasticityTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Statistic and p-value of one test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    /// LM statistic (Breusch–Pagan, White) or t/F statistic (Park, Glejser).
    pub statistic: f64,
    /// Degrees of freedom of the reference distribution's numerator.
    pub df: f64,
    /// P-value in `[0, 1]`.
    pub p_value: f64,
}

impl TestOutcome {
    /// Whether homoscedasticity is rejected at level `alpha`.
    pub fn rejects_homoscedasticity(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Outcomes of all four tests for one fitted model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosticResult {
    pub breusch_pagan: TestOutcome,
    pub white: TestOutcome,
    pub park: TestOutcome,
    pub glejser: TestOutcome,
}

impl DiagnosticResult {
    pub fn get(&self, test: HeteroscedasticityTest) -> &TestOutcome {
        match test {
            HeteroscedasticityTest::BreuschPagan => &self.breusch_pagan,
            HeteroscedasticityTest::White => &self.white,
            HeteroscedasticityTest::Park => &self.park,
            HeteroscedasticityTest::Glejser => &self.glejser,
        }
    }

    pub fn p_value(&self, test: HeteroscedasticityTest) -> f64 {
        self.get(test).p_value
    }

    /// P-value by identifier (`breusch_pagan`, `white`, `park`, `glejser`).
    pub fn p_value_by_name(&self, name: &str) -> Option<f64> {
        HeteroscedasticityTest::from_name(name).map(|t| self.p_value(t))
    }

    /// `(test, outcome)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (HeteroscedasticityTest, &TestOutcome)> + '_ {
        HeteroscedasticityTest::ALL
            .into_iter()
            .map(move |t| (t, self.get(t)))
    }
}

/// Run the four tests against `model`'s residuals.
///
/// OLS models are tested on their raw residuals. WLS models are first
/// restated as OLS on `sqrt(weight)`-scaled data and the residuals of that
/// restated model are tested. The regressors are always the sample's
/// untransformed `X`.
pub fn run_diagnostic_tests(
    model: &FittedModel,
    sample: &Sample,
) -> Result<DiagnosticResult, RegressionError> {
    let residuals = match model {
        FittedModel::Ols(ols) => ols.result().residuals.clone(),
        FittedModel::Wls(wls) => transformed_ols_model(wls, sample)?.result().residuals.clone(),
    };
    let regressors = sample.regressors();

    Ok(DiagnosticResult {
        breusch_pagan: breusch_pagan(&residuals, &regressors)?,
        white: white(&residuals, &regressors)?,
        park: park(&residuals, &regressors)?,
        glejser: glejser(&residuals, &regressors)?,
    })
}

/// Breusch–Pagan test in its studentized (Koenker) form.
///
/// `regressors` excludes the constant.
pub fn breusch_pagan(
    residuals: &Col<f64>,
    regressors: &Mat<f64>,
) -> Result<TestOutcome, RegressionError> {
    let squared = Col::from_fn(residuals.nrows(), |i| residuals[i] * residuals[i]);
    lagrange_multiplier(&squared, regressors)
}

/// White's test: Breusch–Pagan on the regressors, their squares and cross products.
pub fn white(residuals: &Col<f64>, regressors: &Mat<f64>) -> Result<TestOutcome, RegressionError> {
    let squared = Col::from_fn(residuals.nrows(), |i| residuals[i] * residuals[i]);
    lagrange_multiplier(&squared, &with_squares_and_cross_products(regressors))
}

/// Park's test: `log(e²)` on `log(X)`.
///
/// Needs every regressor value and every residual to be non-zero (regressors
/// strictly positive).
pub fn park(residuals: &Col<f64>, regressors: &Mat<f64>) -> Result<TestOutcome, RegressionError> {
    let log_resid_sq = log_squared(residuals)?;

    let mut log_x = Mat::zeros(regressors.nrows(), regressors.ncols());
    for j in 0..regressors.ncols() {
        for i in 0..regressors.nrows() {
            let value = regressors[(i, j)];
            if value <= 0.0 || !value.is_finite() {
                return Err(RegressionError::NumericalDomain {
                    operation: "log of regressor",
                    index: i,
                    value,
                });
            }
            log_x[(i, j)] = value.ln();
        }
    }

    slope_significance(&log_resid_sq, &log_x)
}

/// Glejser's test: `abs(e)` on `X`.
pub fn glejser(residuals: &Col<f64>, regressors: &Mat<f64>) -> Result<TestOutcome, RegressionError> {
    let abs_resid = Col::from_fn(residuals.nrows(), |i| residuals[i].abs());
    slope_significance(&abs_resid, regressors)
}

/// `n·R²` of the auxiliary regression against χ² with the model's degrees of freedom.
fn lagrange_multiplier(
    dependent: &Col<f64>,
    regressors: &Mat<f64>,
) -> Result<TestOutcome, RegressionError> {
    let aux = auxiliary_fit(dependent, regressors, false)?;
    let df = aux.model_df() as f64;

    // A constant dependent variable has nothing left to explain
    let is_constant = dependent.iter().all(|&v| v == dependent[0]);
    let statistic = if is_constant {
        0.0
    } else {
        aux.n_observations as f64 * aux.r_squared
    };

    checked_outcome(statistic, df, chi_squared_p_value(statistic, df))
}

/// Significance of the auxiliary regressors.
///
/// With a single regressor this is the two-sided t-test of its slope; with
/// several it is the joint F-test.
fn slope_significance(
    dependent: &Col<f64>,
    regressors: &Mat<f64>,
) -> Result<TestOutcome, RegressionError> {
    let aux = auxiliary_fit(dependent, regressors, true)?;

    if regressors.ncols() == 1 {
        let statistic = aux
            .t_statistics
            .as_ref()
            .map_or(f64::NAN, |t| t[0]);
        let p_value = aux.get_p_value(0).unwrap_or(f64::NAN);
        checked_outcome(statistic, 1.0, p_value)
    } else {
        checked_outcome(aux.f_statistic, aux.model_df() as f64, aux.f_pvalue)
    }
}

fn auxiliary_fit(
    dependent: &Col<f64>,
    regressors: &Mat<f64>,
    compute_inference: bool,
) -> Result<RegressionResult, RegressionError> {
    let fitted = OlsRegressor::builder()
        .with_intercept(true)
        .compute_inference(compute_inference)
        .build()
        .fit(regressors, dependent)?;
    Ok(fitted.result().clone())
}

fn checked_outcome(statistic: f64, df: f64, p_value: f64) -> Result<TestOutcome, RegressionError> {
    if !p_value.is_finite() {
        return Err(RegressionError::NumericalError(format!(
            "auxiliary regression produced no p-value (statistic = {statistic})"
        )));
    }
    Ok(TestOutcome {
        statistic,
        df,
        p_value: p_value.clamp(0.0, 1.0),
    })
}
