//! Core traits for model estimators.

use crate::error::Result;
use crate::primitives::{Matrix, Vector};

/// Supervised estimator over a feature matrix and a target vector.
///
/// The fit/predict/score shape follows sklearn: `fit` validates its
/// inputs and reports failures, while `predict` and `score` assume a
/// fitted model and panic otherwise, as [`LinearRegression`] documents.
///
/// [`LinearRegression`]: crate::linear_model::LinearRegression
///
/// # Examples
///
/// ```
/// use tasar::prelude::*;
///
/// // Rents rise by $1 per square foot over a $550 base.
/// let sqft = Matrix::from_vec(4, 1, vec![480.0, 640.0, 760.0, 910.0]).unwrap();
/// let rent = Vector::from_slice(&[1030.0, 1190.0, 1310.0, 1460.0]);
///
/// let mut model = LinearRegression::new();
/// model.fit(&sqft, &rent).unwrap();
///
/// let unseen = Matrix::from_vec(2, 1, vec![550.0, 700.0]).unwrap();
/// let predicted = model.predict(&unseen);
/// assert_eq!(predicted.len(), 2);
/// assert!(model.score(&sqft, &rent) > 0.99);
/// ```
pub trait Estimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, degenerate
    /// design, too few observations, etc.).
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()>;

    /// One predicted target per row of `x`.
    fn predict(&self, x: &Matrix<f64>) -> Vector<f64>;

    /// R² of the predictions on `x` against `y`.
    fn score(&self, x: &Matrix<f64>, y: &Vector<f64>) -> f64;
}
