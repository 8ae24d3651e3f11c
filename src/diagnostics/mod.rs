//! Residual diagnostics for fitted regressions.
//!
//! OLS assumes roughly normal, centered residuals; this module packages
//! the standard checks on one residual vector. The histogram and the
//! normal overlay share a density scale so they plot on the same axes,
//! the Q-Q points compare sample quantiles against the standard normal,
//! and Jarque-Bera condenses the same comparison into a single statistic.
//!
//! # Example
//!
//! ```
//! use tasar::diagnostics::ResidualDiagnostics;
//! use tasar::primitives::Vector;
//!
//! let residuals = Vector::from_vec(vec![-0.4, 0.1, -0.2, 0.3, 0.0, 0.2]);
//! let diag = ResidualDiagnostics::from_residuals(&residuals).unwrap();
//!
//! assert_eq!(diag.summary().n, 6);
//! println!("{diag}");
//! ```

use crate::error::{Result, TasarError};
use crate::primitives::Vector;
use crate::stats::{normal_curve, normal_quantile, Histogram, Summary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive and graphical diagnostics over a residual vector.
///
/// The summary is computed once at construction; histogram, overlay and
/// Q-Q views are derived on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidualDiagnostics {
    residuals: Vec<f64>,
    summary: Summary,
}

impl ResidualDiagnostics {
    /// Builds diagnostics from a residual vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is empty.
    pub fn from_residuals(residuals: &Vector<f64>) -> Result<Self> {
        if residuals.is_empty() {
            return Err(TasarError::empty_input("diagnostics of no residuals"));
        }
        let residuals = residuals.as_slice().to_vec();
        let summary = Summary::from_values(&residuals);
        Ok(Self { residuals, summary })
    }

    /// Moment summary: mean, variance, std dev, min, max, skewness,
    /// excess kurtosis.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Number of residuals.
    #[must_use]
    pub fn n(&self) -> usize {
        self.residuals.len()
    }

    /// Equal-width density histogram of the residuals.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_bins` is zero.
    pub fn histogram(&self, n_bins: usize) -> Result<Histogram> {
        Histogram::from_values(&self.residuals, n_bins)
    }

    /// Points of the N(mean, std²) density over the residual range.
    ///
    /// The curve uses the residuals' own mean and standard deviation, so
    /// it is the normal the histogram would follow if the residuals were
    /// Gaussian. Zero-variance residuals have no density curve; the
    /// result is empty.
    ///
    /// # Panics
    ///
    /// Panics if `n_points < 2`.
    #[must_use]
    pub fn normal_overlay(&self, n_points: usize) -> Vec<(f64, f64)> {
        if self.summary.std_dev == 0.0 {
            return Vec::new();
        }
        normal_curve(
            self.summary.mean,
            self.summary.std_dev,
            self.summary.min,
            self.summary.max,
            n_points,
        )
    }

    /// Q-Q points against the standard normal.
    ///
    /// Returns (theoretical quantile, standardized sample quantile) pairs
    /// at plotting positions (i + 0.5) / n. On normal residuals the points
    /// hug the identity line.
    #[must_use]
    pub fn qq_points(&self) -> Vec<(f64, f64)> {
        let n = self.residuals.len();
        let mut sorted = self.residuals.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let (mean, std_dev) = (self.summary.mean, self.summary.std_dev);
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let p = (i as f64 + 0.5) / n as f64;
                let standardized = if std_dev > 0.0 { (r - mean) / std_dev } else { 0.0 };
                (normal_quantile(p), standardized)
            })
            .collect()
    }

    /// Jarque-Bera normality test: (statistic, p-value).
    ///
    /// JB = n/6 (S² + K²/4) with S the skewness and K the excess
    /// kurtosis; under normality JB is asymptotically χ²(2), whose
    /// survival function has the closed form exp(-JB/2).
    #[must_use]
    pub fn jarque_bera(&self) -> (f64, f64) {
        let n = self.residuals.len() as f64;
        let s = self.summary.skewness;
        let k = self.summary.kurtosis;
        let jb = n / 6.0 * (s * s + k * k / 4.0);
        (jb, (-jb / 2.0).exp())
    }
}

impl fmt::Display for ResidualDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        let (jb, p) = self.jarque_bera();
        writeln!(f, "=== Residual Diagnostics ===")?;
        writeln!(f, "Observations: {}", s.n)?;
        writeln!(f, "Mean: {:.4}  Std dev: {:.4}", s.mean, s.std_dev)?;
        writeln!(f, "Min: {:.4}  Max: {:.4}", s.min, s.max)?;
        writeln!(
            f,
            "Skewness: {:.4}  Excess kurtosis: {:.4}",
            s.skewness, s.kurtosis
        )?;
        write!(f, "Jarque-Bera: {jb:.3} (p = {p:.3})")
    }
}
