//! Bayesian estimation for rent models.
//!
//! This module implements Bayesian linear regression with a conjugate
//! Normal-InverseGamma prior, estimated by Gibbs sampling, together
//! with the chain diagnostics needed to judge how much the draws are
//! worth:
//! - [`BayesianLinearRegression`] alternates the two conditional draws
//!   and keeps the post-burn-in chain.
//! - [`convergence`] provides effective sample size, autocorrelation,
//!   and Monte Carlo standard error.
//!
//! All credible intervals are equal-tailed and read directly off the
//! draw quantiles.
//!
//! # Example
//!
//! ```
//! use tasar::bayesian::BayesianLinearRegression;
//! use tasar::primitives::{Matrix, Vector};
//!
//! let x = Matrix::from_vec(5, 2, vec![
//!     1.0, 1.0,
//!     1.0, 2.0,
//!     1.0, 3.0,
//!     1.0, 4.0,
//!     1.0, 5.0,
//! ]).expect("valid matrix dimensions");
//! let y = Vector::from_vec(vec![3.1, 4.9, 7.1, 8.9, 11.0]);
//!
//! let mut model = BayesianLinearRegression::new(2).with_seed(42);
//! model.fit(&x, &y).expect("fit should succeed");
//!
//! let summary = model.posterior_summary().expect("fitted");
//! let slope = &summary.coefficients[1];
//! assert!(slope.ci_lower < 2.0 && 2.0 < slope.ci_upper);
//! ```

pub mod convergence;
mod regression;
pub(crate) mod sampler;

pub use regression::{BayesianLinearRegression, CoefficientPosterior, PosteriorSummary};
