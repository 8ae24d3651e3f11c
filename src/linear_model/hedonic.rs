//! Table-level hedonic regression.
//!
//! A hedonic model prices a good by its attributes: rent regressed on
//! area, bedrooms and so on, usually in logs so coefficients read as
//! elasticities. [`HedonicModel`] declares the specification against
//! column names, [`HedonicFit`] carries everything the fit produced.
//!
//! # Example
//!
//! ```
//! use tasar::data::PropertyTable;
//! use tasar::linear_model::HedonicModel;
//! use tasar::primitives::Vector;
//!
//! let table = PropertyTable::new(vec![
//!     ("rent".to_string(), Vector::from_vec(vec![980.0, 1310.0, 1660.0, 2010.0, 1140.0])),
//!     ("sqft".to_string(), Vector::from_vec(vec![450.0, 620.0, 790.0, 960.0, 530.0])),
//! ])
//! .unwrap();
//!
//! let fit = HedonicModel::new("rent").feature("sqft").fit(&table).unwrap();
//! assert!(fit.r_squared() > 0.99);
//! println!("{fit}");
//! ```

use crate::data::PropertyTable;
use crate::error::{Result, TasarError};
use crate::linear_model::design::DesignBuilder;
use crate::linear_model::inference::CoefficientTable;
use crate::linear_model::solve_normal_equations;
use crate::metrics::r_squared;
use crate::primitives::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declarative regression specification on a [`PropertyTable`].
///
/// Features enter the design matrix in declaration order, after the
/// implicit intercept. `fit` borrows the model, so one specification can
/// be fitted against many tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedonicModel {
    builder: DesignBuilder,
}

impl HedonicModel {
    /// Starts a specification with `response` as the dependent variable.
    #[must_use]
    pub fn new(response: &str) -> Self {
        Self {
            builder: DesignBuilder::new(response),
        }
    }

    /// Adds a feature column as-is.
    #[must_use]
    pub fn feature(mut self, name: &str) -> Self {
        self.builder = self.builder.feature(name);
        self
    }

    /// Adds a feature column under a natural-log transform.
    #[must_use]
    pub fn log_feature(mut self, name: &str) -> Self {
        self.builder = self.builder.log_feature(name);
        self
    }

    /// Applies a natural-log transform to the response.
    #[must_use]
    pub fn log_response(mut self) -> Self {
        self.builder = self.builder.log_response();
        self
    }

    /// Fits the specification against `table` by least squares.
    ///
    /// # Errors
    ///
    /// Returns an error if the design cannot be built (missing or
    /// duplicate columns, non-finite cells, logs of non-positive values),
    /// if the table has no rows, if there are not strictly more rows than
    /// parameters, or if the design matrix is rank deficient.
    pub fn fit(&self, table: &PropertyTable) -> Result<HedonicFit> {
        if table.n_rows() == 0 {
            return Err(TasarError::empty_input("fit on a table with no rows"));
        }

        let design = self.builder.build(table)?;
        let (n, k) = design.shape();
        if n <= k {
            return Err(TasarError::Underdetermined {
                n_samples: n,
                n_params: k,
            });
        }

        let beta = solve_normal_equations(design.matrix(), design.response())?;
        let fitted = design
            .matrix()
            .matvec(&beta)
            .map_err(TasarError::from)?;
        let residuals = design.response() - &fitted;

        let r2 = r_squared(&fitted, design.response());
        let adj_r2 = 1.0 - (1.0 - r2) * (n as f64 - 1.0) / (n - k) as f64;
        let residual_std_error = (residuals.norm_squared() / (n - k) as f64).sqrt();

        let inference =
            CoefficientTable::compute(design.matrix(), design.names(), &beta, &residuals)?;

        Ok(HedonicFit {
            builder: self.builder.clone(),
            parameter_names: design.names().to_vec(),
            coefficients: beta,
            fitted,
            residuals,
            r_squared: r2,
            adj_r_squared: adj_r2,
            residual_std_error,
            n_observations: n,
            inference,
        })
    }
}

/// A fitted hedonic regression.
///
/// Everything is computed at fit time; accessors are plain reads.
/// Fitted values, residuals and predictions are on the model's response
/// scale, so with `log_response` they are log-values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedonicFit {
    builder: DesignBuilder,
    parameter_names: Vec<String>,
    coefficients: Vector<f64>,
    fitted: Vector<f64>,
    residuals: Vector<f64>,
    r_squared: f64,
    adj_r_squared: f64,
    residual_std_error: f64,
    n_observations: usize,
    inference: CoefficientTable,
}

impl HedonicFit {
    /// Coefficient estimates in design order, intercept first.
    #[must_use]
    pub fn coefficients(&self) -> &Vector<f64> {
        &self.coefficients
    }

    /// Parameter names aligned with [`HedonicFit::coefficients`].
    #[must_use]
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// Looks up a coefficient estimate by parameter name.
    #[must_use]
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.parameter_names
            .iter()
            .position(|n| n == name)
            .map(|j| self.coefficients[j])
    }

    /// Fitted values ŷ on the training table.
    #[must_use]
    pub fn fitted(&self) -> &Vector<f64> {
        &self.fitted
    }

    /// Residuals y − ŷ on the training table.
    #[must_use]
    pub fn residuals(&self) -> &Vector<f64> {
        &self.residuals
    }

    /// Coefficient of determination R².
    #[must_use]
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// R² adjusted for the number of parameters.
    #[must_use]
    pub fn adj_r_squared(&self) -> f64 {
        self.adj_r_squared
    }

    /// Residual standard error, √(RSS / (n − k)).
    #[must_use]
    pub fn residual_std_error(&self) -> f64 {
        self.residual_std_error
    }

    /// Number of rows the fit used.
    #[must_use]
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// Number of estimated parameters, intercept included.
    #[must_use]
    pub fn n_parameters(&self) -> usize {
        self.coefficients.len()
    }

    /// Residual degrees of freedom, n − k.
    #[must_use]
    pub fn residual_df(&self) -> usize {
        self.n_observations - self.n_parameters()
    }

    /// Per-coefficient standard errors, t statistics, p-values and
    /// confidence intervals.
    #[must_use]
    pub fn inference(&self) -> &CoefficientTable {
        &self.inference
    }

    /// Predicts the response for new rows, applying the same transforms.
    ///
    /// The prediction table must carry every feature column; the response
    /// column is not required.
    ///
    /// # Errors
    ///
    /// Returns an error if a feature column is missing, non-finite, or
    /// violates a log transform.
    pub fn predict(&self, table: &PropertyTable) -> Result<Vector<f64>> {
        let x = self.builder.feature_matrix(table)?;
        x.matvec(&self.coefficients).map_err(TasarError::from)
    }
}

impl fmt::Display for HedonicFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Hedonic Regression ===")?;
        writeln!(
            f,
            "Model: {} ~ {}",
            self.builder.response_label(),
            self.parameter_names.join(" + ")
        )?;
        writeln!(
            f,
            "Observations: {}  Parameters: {}  Residual df: {}",
            self.n_observations,
            self.n_parameters(),
            self.residual_df()
        )?;
        writeln!(
            f,
            "R²: {:.4}  Adjusted R²: {:.4}  Residual std error: {:.4}",
            self.r_squared, self.adj_r_squared, self.residual_std_error
        )?;
        writeln!(f)?;
        write!(f, "{}", self.inference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact_table() -> PropertyTable {
        // rent = 500 + 2*sqft + 300*bedrooms, exactly.
        let sqft = vec![450.0, 620.0, 790.0, 960.0, 530.0, 880.0];
        let bedrooms = vec![1.0, 1.0, 2.0, 3.0, 1.0, 2.0];
        let rent: Vec<f64> = sqft
            .iter()
            .zip(&bedrooms)
            .map(|(s, b)| 500.0 + 2.0 * s + 300.0 * b)
            .collect();
        PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("sqft".to_string(), Vector::from_vec(sqft)),
            ("bedrooms".to_string(), Vector::from_vec(bedrooms)),
        ])
        .unwrap()
    }

    #[test]
    fn test_recovers_exact_coefficients() {
        let fit = HedonicModel::new("rent")
            .feature("sqft")
            .feature("bedrooms")
            .fit(&exact_table())
            .unwrap();

        assert_eq!(
            fit.parameter_names(),
            &["intercept", "sqft", "bedrooms"]
        );
        assert!((fit.coefficient("intercept").unwrap() - 500.0).abs() < 1e-4);
        assert!((fit.coefficient("sqft").unwrap() - 2.0).abs() < 1e-7);
        assert!((fit.coefficient("bedrooms").unwrap() - 300.0).abs() < 1e-4);
        assert!((fit.r_squared() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_log_log_elasticity_recovery() {
        // rent = exp(1 + 0.8 * ln(sqft)): log-log fit recovers (1, 0.8).
        let sqft: Vec<f64> = vec![400.0, 640.0, 810.0, 1000.0, 1210.0, 450.0];
        let rent: Vec<f64> = sqft.iter().map(|s| (1.0 + 0.8 * s.ln()).exp()).collect();
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("sqft".to_string(), Vector::from_vec(sqft)),
        ])
        .unwrap();

        let fit = HedonicModel::new("rent")
            .log_response()
            .log_feature("sqft")
            .fit(&table)
            .unwrap();

        assert!((fit.coefficient("intercept").unwrap() - 1.0).abs() < 1e-8);
        assert!((fit.coefficient("log(sqft)").unwrap() - 0.8).abs() < 1e-8);
    }

    #[test]
    fn test_residuals_satisfy_normal_equations() {
        // Noisy data: X'e must still vanish at the least-squares solution.
        let sqft = vec![450.0, 620.0, 790.0, 960.0, 530.0, 880.0, 700.0];
        let rent = vec![1480.0, 1730.0, 2250.0, 2890.0, 1610.0, 2520.0, 2010.0];
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("sqft".to_string(), Vector::from_vec(sqft)),
        ])
        .unwrap();

        let fit = HedonicModel::new("rent").feature("sqft").fit(&table).unwrap();

        // Intercept column: residuals sum to zero.
        let residual_sum: f64 = fit.residuals().iter().sum();
        assert!(residual_sum.abs() < 1e-8);

        // Feature column: x'e = 0.
        let sqft_dot: f64 = table
            .column("sqft")
            .unwrap()
            .iter()
            .zip(fit.residuals().iter())
            .map(|(x, e)| x * e)
            .sum();
        assert!(sqft_dot.abs() < 1e-5);
    }

    #[test]
    fn test_r_squared_bounds_and_adjustment() {
        let sqft = vec![450.0, 620.0, 790.0, 960.0, 530.0, 880.0, 700.0];
        let rent = vec![1480.0, 1730.0, 2250.0, 2890.0, 1610.0, 2520.0, 2010.0];
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("sqft".to_string(), Vector::from_vec(sqft)),
        ])
        .unwrap();

        let fit = HedonicModel::new("rent").feature("sqft").fit(&table).unwrap();

        assert!(fit.r_squared() >= 0.0 && fit.r_squared() <= 1.0);
        assert!(fit.adj_r_squared() <= fit.r_squared());
        assert_eq!(fit.n_observations(), 7);
        assert_eq!(fit.n_parameters(), 2);
        assert_eq!(fit.residual_df(), 5);
    }

    #[test]
    fn test_predict_applies_transforms() {
        let sqft: Vec<f64> = vec![400.0, 640.0, 810.0, 1000.0, 1210.0, 450.0];
        let rent: Vec<f64> = sqft.iter().map(|s| (1.0 + 0.8 * s.ln()).exp()).collect();
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("sqft".to_string(), Vector::from_vec(sqft)),
        ])
        .unwrap();

        let fit = HedonicModel::new("rent")
            .log_response()
            .log_feature("sqft")
            .fit(&table)
            .unwrap();

        // Prediction table without the response column.
        let new = PropertyTable::new(vec![(
            "sqft".to_string(),
            Vector::from_vec(vec![500.0, 900.0]),
        )])
        .unwrap();
        let predicted = fit.predict(&new).unwrap();

        // Model is exact, so predictions land on the true log-rent.
        assert!((predicted[0] - (1.0 + 0.8 * 500.0_f64.ln())).abs() < 1e-8);
        assert!((predicted[1] - (1.0 + 0.8 * 900.0_f64.ln())).abs() < 1e-8);
    }

    #[test]
    fn test_fitted_plus_residuals_reconstruct_response() {
        let table = exact_table();
        let fit = HedonicModel::new("rent")
            .feature("sqft")
            .feature("bedrooms")
            .fit(&table)
            .unwrap();

        let rent = table.column("rent").unwrap();
        for i in 0..rent.len() {
            assert!((fit.fitted()[i] + fit.residuals()[i] - rent[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_table_errors() {
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(vec![])),
            ("sqft".to_string(), Vector::from_vec(vec![])),
        ])
        .unwrap();
        let err = HedonicModel::new("rent")
            .feature("sqft")
            .fit(&table)
            .unwrap_err();
        assert!(matches!(err, TasarError::EmptyInput { .. }));
    }

    #[test]
    fn test_too_few_rows_errors() {
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(vec![1000.0, 1200.0])),
            ("sqft".to_string(), Vector::from_vec(vec![500.0, 600.0])),
        ])
        .unwrap();
        let err = HedonicModel::new("rent")
            .feature("sqft")
            .fit(&table)
            .unwrap_err();
        assert!(matches!(err, TasarError::Underdetermined { .. }));
    }

    #[test]
    fn test_constant_feature_is_degenerate() {
        // A constant column duplicates the intercept.
        let table = PropertyTable::new(vec![
            (
                "rent".to_string(),
                Vector::from_vec(vec![1000.0, 1200.0, 1400.0, 1600.0]),
            ),
            (
                "floors".to_string(),
                Vector::from_vec(vec![2.0, 2.0, 2.0, 2.0]),
            ),
        ])
        .unwrap();
        let err = HedonicModel::new("rent")
            .feature("floors")
            .fit(&table)
            .unwrap_err();
        assert!(matches!(err, TasarError::DegenerateDesign { .. }));
    }

    #[test]
    fn test_unknown_feature_errors() {
        let err = HedonicModel::new("rent")
            .feature("bathrooms")
            .fit(&exact_table())
            .unwrap_err();
        assert!(matches!(err, TasarError::UnknownColumn { .. }));
    }

    #[test]
    fn test_inference_table_aligns_with_coefficients() {
        let fit = HedonicModel::new("rent")
            .feature("sqft")
            .feature("bedrooms")
            .fit(&exact_table())
            .unwrap();

        let rows = fit.inference().rows();
        assert_eq!(rows.len(), 3);
        for (j, row) in rows.iter().enumerate() {
            assert_eq!(row.name, fit.parameter_names()[j]);
            assert!((row.estimate - fit.coefficients()[j]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_refit_is_deterministic() {
        let model = HedonicModel::new("rent").feature("sqft").feature("bedrooms");
        let first = model.fit(&exact_table()).unwrap();
        let second = model.fit(&exact_table()).unwrap();
        assert_eq!(
            first.coefficients().as_slice(),
            second.coefficients().as_slice()
        );
    }

    #[test]
    fn test_display_summary() {
        let fit = HedonicModel::new("rent")
            .feature("sqft")
            .feature("bedrooms")
            .fit(&exact_table())
            .unwrap();

        let rendered = fit.to_string();
        assert!(rendered.contains("=== Hedonic Regression ==="));
        assert!(rendered.contains("rent ~ intercept + sqft + bedrooms"));
        assert!(rendered.contains("Observations: 6"));
        assert!(rendered.contains("bedrooms"));
    }

    #[test]
    fn test_serde_round_trip() {
        let fit = HedonicModel::new("rent")
            .feature("sqft")
            .feature("bedrooms")
            .fit(&exact_table())
            .unwrap();

        let json = serde_json::to_string(&fit).unwrap();
        let back: HedonicFit = serde_json::from_str(&json).unwrap();
        assert_eq!(back.coefficients().as_slice(), fit.coefficients().as_slice());
        assert_eq!(back.parameter_names(), fit.parameter_names());

        // The restored fit still predicts.
        let new = PropertyTable::new(vec![
            ("sqft".to_string(), Vector::from_vec(vec![700.0])),
            ("bedrooms".to_string(), Vector::from_vec(vec![2.0])),
        ])
        .unwrap();
        let p = back.predict(&new).unwrap();
        assert!((p[0] - (500.0 + 2.0 * 700.0 + 300.0 * 2.0)).abs() < 1e-4);
    }
}
