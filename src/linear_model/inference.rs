//! Coefficient inference for least-squares fits.
//!
//! Classical OLS sampling theory: with σ̂² = RSS / (n − k), the covariance
//! of β̂ is σ̂² (XᵀX)⁻¹, each t statistic is β̂ / SE against a Student t
//! with n − k degrees of freedom, and the 95% interval is β̂ ± t₀.₉₇₅ SE.

use crate::error::{Result, TasarError};
use crate::primitives::{Matrix, Vector};
use crate::stats::{student_t_pvalue, student_t_quantile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inference results for a single coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRow {
    /// Parameter name (`intercept`, `log(sqft)`, ...).
    pub name: String,
    /// Point estimate β̂.
    pub estimate: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// t statistic, estimate / std_error.
    pub t_value: f64,
    /// Two-sided p-value against t(n − k).
    pub p_value: f64,
    /// Lower bound of the 95% confidence interval.
    pub ci_lower: f64,
    /// Upper bound of the 95% confidence interval.
    pub ci_upper: f64,
}

/// Per-coefficient inference for a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    rows: Vec<CoefficientRow>,
    residual_df: usize,
}

impl CoefficientTable {
    /// Computes the table from the design matrix, estimates and residuals.
    pub(crate) fn compute(
        x: &Matrix<f64>,
        names: &[String],
        beta: &Vector<f64>,
        residuals: &Vector<f64>,
    ) -> Result<Self> {
        let (n, k) = x.shape();
        debug_assert_eq!(names.len(), k);
        debug_assert_eq!(beta.len(), k);
        debug_assert_eq!(residuals.len(), n);

        if n <= k {
            return Err(TasarError::Underdetermined {
                n_samples: n,
                n_params: k,
            });
        }
        let residual_df = n - k;

        let sigma2 = residuals.norm_squared() / residual_df as f64;

        let xtx = x.transpose().matmul(x)?;
        let xtx_inv = xtx.cholesky_inverse().map_err(|_| TasarError::DegenerateDesign {
            reason: "X'X is not invertible (collinear or constant columns)".to_string(),
        })?;

        let t_crit = student_t_quantile(0.975, residual_df as f64);

        let mut rows = Vec::with_capacity(k);
        for j in 0..k {
            let estimate = beta[j];
            let std_error = (sigma2 * xtx_inv.get(j, j)).sqrt();
            // On an exact fit sigma2 is 0 and the t statistic degenerates
            // to ±inf, which the p-value maps to 0.
            let t_value = estimate / std_error;
            let p_value = student_t_pvalue(t_value, residual_df as f64);
            rows.push(CoefficientRow {
                name: names[j].clone(),
                estimate,
                std_error,
                t_value,
                p_value,
                ci_lower: estimate - t_crit * std_error,
                ci_upper: estimate + t_crit * std_error,
            });
        }

        Ok(Self { rows, residual_df })
    }

    /// All rows in design-matrix column order.
    #[must_use]
    pub fn rows(&self) -> &[CoefficientRow] {
        &self.rows
    }

    /// Looks up a row by parameter name.
    #[must_use]
    pub fn row(&self, name: &str) -> Option<&CoefficientRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Residual degrees of freedom, n − k.
    #[must_use]
    pub fn residual_df(&self) -> usize {
        self.residual_df
    }
}

fn format_p_value(p: f64) -> String {
    if p.is_nan() {
        "NaN".to_string()
    } else if p < 0.001 {
        format!("{p:.1e}")
    } else {
        format!("{p:.3}")
    }
}

impl fmt::Display for CoefficientTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(4)
            .max(4);

        writeln!(
            f,
            "{:<width$}  {:>12} {:>12} {:>9} {:>9}  {:>12} {:>12}",
            "term", "estimate", "std error", "t value", "p value", "ci 2.5%", "ci 97.5%"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<width$}  {:>12.4} {:>12.4} {:>9.3} {:>9}  {:>12.4} {:>12.4}",
                row.name,
                row.estimate,
                row.std_error,
                row.t_value,
                format_p_value(row.p_value),
                row.ci_lower,
                row.ci_upper
            )?;
        }
        Ok(())
    }
}
