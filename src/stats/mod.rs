//! Descriptive statistics for numeric data.
//!
//! Quantiles use the R-7 definition (linear interpolation between order
//! statistics), the default in R, NumPy, and Pandas, so cut points computed
//! here line up with the usual dataframe tooling.
//!
//! # Examples
//!
//! ```
//! use tasar::stats::quantile;
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(quantile(&data, 0.5).unwrap(), 3.0);
//! assert_eq!(quantile(&data, 0.0).unwrap(), 1.0);
//! ```
//!
//! # References
//!
//! - Hyndman & Fan (1996). "Sample Quantiles in Statistical Packages."
//!   The American Statistician, 50(4).

mod distributions;

pub use distributions::{
    normal_cdf, normal_pdf, normal_quantile, student_t_pvalue, student_t_quantile,
};

use crate::error::{Result, TasarError};
use serde::{Deserialize, Serialize};

/// Computes a single quantile using linear interpolation (R-7 method).
///
/// # Errors
///
/// Returns an error if the slice is empty or `q` is outside [0, 1].
pub fn quantile(values: &[f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(TasarError::empty_input("quantile of no values"));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(TasarError::InvalidQuantile { value: q });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(quantile_sorted(&sorted, q))
}

/// Computes several quantiles with a single sort.
///
/// Results come back in the same order as the probabilities.
///
/// # Errors
///
/// Returns an error if the slice is empty or any probability is outside
/// [0, 1].
pub fn quantiles(values: &[f64], qs: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(TasarError::empty_input("quantiles of no values"));
    }
    for &q in qs {
        if !(0.0..=1.0).contains(&q) {
            return Err(TasarError::InvalidQuantile { value: q });
        }
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(qs.iter().map(|&q| quantile_sorted(&sorted, q)).collect())
}

/// R-7 lookup into already-sorted data: h = (n - 1) * q, interpolate
/// between the straddling order statistics.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * q;
    let h_floor = h.floor() as usize;
    let h_ceil = h.ceil() as usize;

    if h_floor == h_ceil {
        return sorted[h_floor];
    }

    let fraction = h - h_floor as f64;
    sorted[h_floor] + fraction * (sorted[h_ceil] - sorted[h_floor])
}

/// Moment-based summary of a sample.
///
/// Variance uses the n-1 denominator. Skewness and kurtosis are the
/// standardized third and fourth moments; kurtosis is excess (normal = 0).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sample mean
    pub mean: f64,
    /// Sample variance (n-1 denominator)
    pub variance: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Skewness
    pub skewness: f64,
    /// Excess kurtosis
    pub kurtosis: f64,
    /// Number of samples
    pub n: usize,
}

impl Summary {
    /// Calculates the summary from values. An empty slice yields the
    /// all-zero summary.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len();
        let n_f = n as f64;

        let mean = values.iter().sum::<f64>() / n_f;

        let variance =
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n_f - 1.0).max(1.0);
        let std_dev = variance.sqrt();

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let skewness = if std_dev > 0.0 {
            let m3 = values
                .iter()
                .map(|x| ((x - mean) / std_dev).powi(3))
                .sum::<f64>();
            m3 / n_f
        } else {
            0.0
        };

        let kurtosis = if std_dev > 0.0 {
            let m4 = values
                .iter()
                .map(|x| ((x - mean) / std_dev).powi(4))
                .sum::<f64>();
            m4 / n_f - 3.0
        } else {
            0.0
        };

        Self {
            mean,
            variance,
            std_dev,
            min,
            max,
            skewness,
            kurtosis,
            n,
        }
    }
}

/// Histogram with density normalized to unit area, so a probability
/// density curve overlays it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges (length = `n_bins` + 1)
    pub edges: Vec<f64>,
    /// Bin counts (length = `n_bins`)
    pub counts: Vec<usize>,
    /// Count / (n * bin width) per bin (length = `n_bins`)
    pub density: Vec<f64>,
}

impl Histogram {
    /// Builds an equal-width histogram over [min, max].
    ///
    /// When every value is identical the histogram degenerates to one
    /// unit-width bin centered on the value, keeping the density area at 1.
    ///
    /// # Errors
    ///
    /// Returns an error if values is empty or `n_bins` is zero.
    pub fn from_values(values: &[f64], n_bins: usize) -> Result<Self> {
        if values.is_empty() {
            return Err(TasarError::empty_input("histogram of no values"));
        }
        if n_bins == 0 {
            return Err(TasarError::invalid_hyperparameter("n_bins", n_bins, ">=1"));
        }

        let n = values.len();
        let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if data_min == data_max {
            return Ok(Self {
                edges: vec![data_min - 0.5, data_min + 0.5],
                counts: vec![n],
                density: vec![1.0],
            });
        }

        let range = data_max - data_min;
        let bin_width = range / n_bins as f64;
        let mut edges = Vec::with_capacity(n_bins + 1);
        for i in 0..=n_bins {
            edges.push(data_min + i as f64 * bin_width);
        }

        let mut counts = vec![0usize; n_bins];
        for &value in values {
            let mut bin_idx = ((value - data_min) / bin_width) as usize;
            // The maximum lands exactly on the last edge; fold it into the
            // final bin.
            if bin_idx >= n_bins {
                bin_idx = n_bins - 1;
            }
            counts[bin_idx] += 1;
        }

        let density = counts
            .iter()
            .map(|&c| c as f64 / (n as f64 * bin_width))
            .collect();

        Ok(Self {
            edges,
            counts,
            density,
        })
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }
}

/// Samples the N(mean, std_dev^2) density at evenly spaced points over
/// [lo, hi], inclusive on both ends.
///
/// Returns (x, pdf(x)) pairs, ready to draw over a density histogram.
///
/// # Panics
///
/// Panics if `n_points < 2` or `std_dev <= 0`.
#[must_use]
pub fn normal_curve(mean: f64, std_dev: f64, lo: f64, hi: f64, n_points: usize) -> Vec<(f64, f64)> {
    assert!(n_points >= 2, "normal_curve needs at least 2 points");
    assert!(std_dev > 0.0, "normal_curve needs a positive std_dev");

    let step = (hi - lo) / (n_points - 1) as f64;
    (0..n_points)
        .map(|i| {
            let x = lo + i as f64 * step;
            (x, normal_pdf(x, mean, std_dev))
        })
        .collect()
}
