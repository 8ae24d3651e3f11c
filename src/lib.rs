//! Tasar: hedonic rent regression in pure Rust.
//!
//! Tasar estimates what each attribute of a rental listing contributes to
//! its rent: regress rent on square footage, bedrooms and bathrooms, and
//! read the premium for an extra room straight off the coefficient table.
//! The crate carries the whole workflow from raw listing table to
//! diagnosed fit: CSV ingestion, quantile-band outlier trimming, OLS with
//! a full inference table, residual diagnostics, and a Gibbs-sampled
//! Bayesian variant when credible intervals are wanted instead of
//! confidence intervals.
//!
//! # Quick Start
//!
//! ```
//! use tasar::prelude::*;
//!
//! // Simulate listings from a known model.
//! let listings = ListingGenerator::new(200)
//!     .with_seed(42)
//!     .generate()
//!     .unwrap();
//!
//! // Trim the rent tails before fitting.
//! let trimmed = QuantileTrimmer::new()
//!     .band("rent", 0.01, 0.99)
//!     .apply(&listings)
//!     .unwrap();
//!
//! // Fit rent on the physical attributes.
//! let fit = HedonicModel::new("rent")
//!     .feature("sqft")
//!     .feature("bedrooms")
//!     .feature("bathrooms")
//!     .fit(&trimmed.table)
//!     .unwrap();
//! assert!(fit.r_squared() > 0.9);
//!
//! // Residuals of a healthy OLS fit center on zero.
//! let diag = ResidualDiagnostics::from_residuals(fit.residuals()).unwrap();
//! assert!(diag.summary().mean.abs() < 1e-6);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: PropertyTable for named listing columns, with CSV ingestion
//! - [`stats`]: Descriptive statistics (quantiles, histograms, normal curves)
//! - [`preprocessing`]: Quantile-band outlier trimming
//! - [`linear_model`]: OLS and table-level hedonic regression with inference
//! - [`diagnostics`]: Residual diagnostics (moments, Q-Q points, Jarque-Bera)
//! - [`bayesian`]: Gibbs-sampled Bayesian linear regression
//! - [`synthetic`]: Seeded listing generation from a known model
//! - [`metrics`]: Regression metrics (R², MSE, RMSE, MAE)

pub mod bayesian;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod stats;
pub mod synthetic;
pub mod traits;

pub use error::{Result, TasarError};
pub use primitives::{Matrix, Vector};
pub use traits::Estimator;
