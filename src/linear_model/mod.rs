//! Linear models for hedonic regression.
//!
//! Two layers. [`LinearRegression`] is a plain least-squares estimator on
//! matrices. [`HedonicModel`] sits on top of it at the table level: it
//! declares a response and named features, applies log transforms, builds
//! the explicit design matrix and returns a [`HedonicFit`] with residuals
//! and a full coefficient inference table.

mod design;
mod hedonic;
mod inference;

pub use design::{Design, DesignBuilder};
pub use hedonic::{HedonicFit, HedonicModel};
pub use inference::{CoefficientRow, CoefficientTable};

use crate::error::{Result, TasarError};
use crate::metrics::r_squared;
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use serde::{Deserialize, Serialize};

/// Least-squares regression on an explicit feature matrix.
///
/// Minimizes the residual sum of squares for `y = Xβ + ε` by solving the
/// normal equations `(XᵀX)β = Xᵀy` through a Cholesky factorization of
/// `XᵀX`. With the intercept enabled (the default) a ones column is
/// prepended internally, so `x` carries features only.
///
/// # Examples
///
/// ```
/// use tasar::prelude::*;
///
/// // Monthly rent against floor area for four listings.
/// let sqft = Matrix::from_vec(4, 1, vec![480.0, 640.0, 760.0, 910.0]).unwrap();
/// let rent = Vector::from_slice(&[1030.0, 1190.0, 1310.0, 1460.0]);
///
/// let mut model = LinearRegression::new();
/// model.fit(&sqft, &rent).unwrap();
///
/// // Rents were generated as 550 + 1.0 per square foot.
/// assert!((model.coefficients()[0] - 1.0).abs() < 1e-7);
/// assert!((model.intercept() - 550.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Fitted slope per feature column; `None` until [`Estimator::fit`] runs.
    coefficients: Option<Vector<f64>>,
    /// Fitted intercept, 0.0 when the intercept is disabled.
    intercept: f64,
    /// Whether a ones column is prepended to the design.
    use_intercept: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// An unfitted model with the intercept enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: 0.0,
            use_intercept: true,
        }
    }

    /// Enables or disables the intercept term.
    #[must_use]
    pub fn with_intercept(mut self, use_intercept: bool) -> Self {
        self.use_intercept = use_intercept;
        self
    }

    /// The fitted slopes, one per feature column.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted.
    #[must_use]
    pub fn coefficients(&self) -> &Vector<f64> {
        self.coefficients
            .as_ref()
            .expect("model is not fitted, call fit() first")
    }

    /// The fitted intercept, 0.0 when disabled.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Whether [`Estimator::fit`] has completed on this model.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}

/// Returns a copy of `x` with a leading column of ones.
fn with_ones_column(x: &Matrix<f64>) -> Matrix<f64> {
    let (n, k) = x.shape();
    let data: Vec<f64> = (0..n)
        .flat_map(|i| std::iter::once(1.0).chain((0..k).map(move |j| x.get(i, j))))
        .collect();
    Matrix::from_vec(n, k + 1, data).expect("ones column widens the matrix by exactly one")
}

/// Solves (XᵀX)β = Xᵀy for an explicit design matrix.
///
/// Shared by [`LinearRegression`] and the hedonic layer. A Cholesky
/// failure means XᵀX is not positive definite, which for a design matrix
/// means collinear or constant columns.
pub(crate) fn solve_normal_equations(x: &Matrix<f64>, y: &Vector<f64>) -> Result<Vector<f64>> {
    let xt = x.transpose();
    let xtx = xt.matmul(x)?;
    let xty = xt.matvec(y)?;

    xtx.cholesky_solve(&xty).map_err(|_| TasarError::DegenerateDesign {
        reason: "X'X is not positive definite (collinear or constant columns)".to_string(),
    })
}

impl Estimator for LinearRegression {
    /// Fits the model by solving the normal equations.
    ///
    /// # Errors
    ///
    /// Returns an error when `y` and `x` disagree on the number of rows,
    /// when there are zero rows, when the row count leaves no residual
    /// degrees of freedom, or when the design is rank deficient.
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        let (n_obs, n_feats) = x.shape();

        if y.len() != n_obs {
            return Err(TasarError::dimension_mismatch(
                "target length",
                n_obs,
                y.len(),
            ));
        }
        if n_obs == 0 {
            return Err(TasarError::empty_input("fit with zero samples"));
        }

        // Residual degrees of freedom require strictly more observations
        // than parameters.
        let n_params = n_feats + usize::from(self.use_intercept);
        if n_obs <= n_params {
            return Err(TasarError::Underdetermined {
                n_samples: n_obs,
                n_params,
            });
        }

        let beta = if self.use_intercept {
            solve_normal_equations(&with_ones_column(x), y)?
        } else {
            solve_normal_equations(x, y)?
        };

        if self.use_intercept {
            self.intercept = beta[0];
            self.coefficients = Some(beta.slice(1, beta.len()));
        } else {
            self.intercept = 0.0;
            self.coefficients = Some(beta);
        }

        Ok(())
    }

    /// Predicts one response per row of `x`.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted or the feature count
    /// differs from the fit.
    fn predict(&self, x: &Matrix<f64>) -> Vector<f64> {
        let coef = self
            .coefficients
            .as_ref()
            .expect("model is not fitted, call fit() first");

        x.matvec(coef)
            .expect("feature count differs from the fitted coefficients")
            .add_scalar(self.intercept)
    }

    /// R² of the model's predictions on `x` against `y`.
    fn score(&self, x: &Matrix<f64>, y: &Vector<f64>) -> f64 {
        r_squared(&self.predict(x), y)
    }
}
