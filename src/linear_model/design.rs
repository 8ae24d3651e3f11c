//! Explicit design matrices built from listing tables.
//!
//! [`DesignBuilder`] records a response column, named feature columns and
//! their transforms, and materializes the n × k design matrix with the
//! intercept ones column first. Hedonic specifications are usually stated
//! in logs (log-rent on log-area), so natural-log transforms are first
//! class here, validated cell by cell.

use crate::data::PropertyTable;
use crate::error::{Result, TasarError};
use crate::primitives::{Matrix, Vector};
use serde::{Deserialize, Serialize};

/// Column transform applied while building the design matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Transform {
    Identity,
    Log,
}

impl Transform {
    fn label(self, column: &str) -> String {
        match self {
            Transform::Identity => column.to_string(),
            Transform::Log => format!("log({column})"),
        }
    }
}

/// A materialized design: matrix with intercept column, response vector,
/// and one name per matrix column.
#[derive(Debug, Clone)]
pub struct Design {
    matrix: Matrix<f64>,
    response: Vector<f64>,
    names: Vec<String>,
}

impl Design {
    /// The n × k design matrix, first column all ones.
    #[must_use]
    pub fn matrix(&self) -> &Matrix<f64> {
        &self.matrix
    }

    /// The response vector, transform already applied.
    #[must_use]
    pub fn response(&self) -> &Vector<f64> {
        &self.response
    }

    /// Parameter names, `intercept` first.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// (rows, parameters) of the design matrix.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }
}

/// Declares a regression specification against a [`PropertyTable`].
///
/// Feature order is declaration order; the intercept column is implicit
/// and always first. Validation happens when the design is built, so the
/// builder chain itself never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignBuilder {
    response: String,
    log_response: bool,
    features: Vec<(String, Transform)>,
}

impl DesignBuilder {
    /// Starts a specification with `response` as the left-hand side.
    #[must_use]
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            log_response: false,
            features: Vec::new(),
        }
    }

    /// Adds a feature column as-is.
    #[must_use]
    pub fn feature(mut self, name: &str) -> Self {
        self.features.push((name.to_string(), Transform::Identity));
        self
    }

    /// Adds a feature column under a natural-log transform.
    #[must_use]
    pub fn log_feature(mut self, name: &str) -> Self {
        self.features.push((name.to_string(), Transform::Log));
        self
    }

    /// Applies a natural-log transform to the response.
    #[must_use]
    pub fn log_response(mut self) -> Self {
        self.log_response = true;
        self
    }

    /// The response label, e.g. `log(rent)`.
    #[must_use]
    pub fn response_label(&self) -> String {
        if self.log_response {
            Transform::Log.label(&self.response)
        } else {
            self.response.clone()
        }
    }

    /// Parameter names in design-matrix column order, `intercept` first.
    #[must_use]
    pub fn parameter_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.features.len() + 1);
        names.push("intercept".to_string());
        for (column, transform) in &self.features {
            names.push(transform.label(column));
        }
        names
    }

    /// Number of design-matrix columns, intercept included.
    #[must_use]
    pub fn n_parameters(&self) -> usize {
        self.features.len() + 1
    }

    fn validate(&self) -> Result<()> {
        if self.features.is_empty() {
            return Err(TasarError::empty_input("design with no features"));
        }
        let labels = self.parameter_names();
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(format!("Duplicate feature '{label}' in design").into());
            }
        }
        Ok(())
    }

    fn transformed_column(
        table: &PropertyTable,
        column: &str,
        transform: Transform,
    ) -> Result<Vec<f64>> {
        let values = table.column(column)?;
        let mut out = Vec::with_capacity(values.len());
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(format!(
                    "Non-finite value {v} in column '{column}' at row {i}"
                )
                .into());
            }
            let v = match transform {
                Transform::Identity => v,
                Transform::Log => {
                    if v <= 0.0 {
                        return Err(format!(
                            "Cannot take log of column '{column}': value {v} at row {i} is not positive"
                        )
                        .into());
                    }
                    v.ln()
                }
            };
            out.push(v);
        }
        Ok(out)
    }

    /// Builds the design matrix together with the transformed response.
    ///
    /// # Errors
    ///
    /// Returns an error if the specification has no features or a
    /// duplicate, a named column is missing from the table, a cell is
    /// non-finite, or a log transform meets a non-positive value.
    pub fn build(&self, table: &PropertyTable) -> Result<Design> {
        let matrix = self.feature_matrix(table)?;

        let response_transform = if self.log_response {
            Transform::Log
        } else {
            Transform::Identity
        };
        let response = Self::transformed_column(table, &self.response, response_transform)?;

        Ok(Design {
            matrix,
            response: Vector::from_vec(response),
            names: self.parameter_names(),
        })
    }

    /// Builds just the feature side of the design matrix.
    ///
    /// Prediction tables need the feature columns but not the response,
    /// so this skips the response lookup entirely.
    ///
    /// # Errors
    ///
    /// Same conditions as [`DesignBuilder::build`], minus the response.
    pub fn feature_matrix(&self, table: &PropertyTable) -> Result<Matrix<f64>> {
        self.validate()?;

        let n_rows = table.n_rows();
        let n_cols = self.n_parameters();

        let mut columns = Vec::with_capacity(self.features.len());
        for (column, transform) in &self.features {
            columns.push(Self::transformed_column(table, column, *transform)?);
        }

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for i in 0..n_rows {
            data.push(1.0); // Intercept column
            for column in &columns {
                data.push(column[i]);
            }
        }

        Matrix::from_vec(n_rows, n_cols, data)
            .map_err(|_| "Internal error: design matrix size mismatch".into())
    }
}
