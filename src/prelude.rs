//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use tasar::prelude::*;
//! ```

pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::Estimator;
pub use crate::data::PropertyTable;
pub use crate::preprocessing::QuantileTrimmer;
pub use crate::linear_model::{HedonicFit, HedonicModel, LinearRegression};
pub use crate::diagnostics::ResidualDiagnostics;
pub use crate::bayesian::BayesianLinearRegression;
pub use crate::synthetic::ListingGenerator;
pub use crate::metrics::{r_squared, mse, mae, rmse};
