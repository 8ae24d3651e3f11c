//! Preprocessing steps applied to listing tables before model fitting.
//!
//! The central tool here is [`QuantileTrimmer`], which drops rows whose
//! values fall outside per-column quantile bands. Luxury penthouses and
//! data-entry typos both live in the far tails, and a pair of 1%/99% cuts
//! removes them without hand-picked thresholds.
//!
//! # Example
//!
//! ```
//! use tasar::data::PropertyTable;
//! use tasar::preprocessing::QuantileTrimmer;
//! use tasar::primitives::Vector;
//!
//! let rent: Vec<f64> = (1..=100).map(f64::from).collect();
//! let table = PropertyTable::new(vec![("rent".to_string(), Vector::from_vec(rent))]).unwrap();
//!
//! let trimmed = QuantileTrimmer::new()
//!     .band("rent", 0.01, 0.99)
//!     .apply(&table)
//!     .unwrap();
//!
//! // Only the two extreme rows fall outside the 1%..99% band.
//! assert_eq!(trimmed.n_dropped, 2);
//! assert_eq!(trimmed.table.n_rows(), 98);
//! ```

use crate::data::PropertyTable;
use crate::error::{Result, TasarError};
use crate::stats;
use serde::{Deserialize, Serialize};

/// A per-column quantile band registered on a [`QuantileTrimmer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Band {
    column: String,
    lower_q: f64,
    upper_q: f64,
}

/// Resolved cut points for one band, reported alongside the filtered table.
///
/// `lower_cut` and `upper_cut` are the data values the quantile
/// probabilities resolved to on the input table. When a boundary
/// probability disables a comparison (see [`QuantileTrimmer::band`]) the
/// corresponding cut still records the column extreme for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandCuts {
    /// Column the band applies to.
    pub column: String,
    /// Lower quantile probability.
    pub lower_q: f64,
    /// Upper quantile probability.
    pub upper_q: f64,
    /// Value at the lower quantile.
    pub lower_cut: f64,
    /// Value at the upper quantile.
    pub upper_cut: f64,
}

/// Result of applying a [`QuantileTrimmer`] to a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trimmed {
    /// The filtered table, retained rows only.
    pub table: PropertyTable,
    /// Per-row retention mask over the input table.
    pub mask: Vec<bool>,
    /// Resolved cut points, one entry per registered band.
    pub cuts: Vec<BandCuts>,
    /// Number of rows removed.
    pub n_dropped: usize,
}

/// Drops rows outside per-column quantile bands.
///
/// Cut points are computed from the input table once, then every row is
/// tested against all bands in a single pass. A row survives only if it
/// lies strictly inside every band, so trimming on several columns is the
/// intersection of the per-column filters.
///
/// Comparisons are strict, with one exception at the boundaries: a lower
/// probability of exactly 0.0 disables the lower test and an upper
/// probability of exactly 1.0 disables the upper one. Without this, the
/// row holding the column minimum would fail `value > min`, and a
/// `(0.0, 1.0)` band would discard the extremes instead of keeping
/// everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantileTrimmer {
    bands: Vec<Band>,
}

impl QuantileTrimmer {
    /// Creates a trimmer with no bands. Applying it is a no-op.
    #[must_use]
    pub fn new() -> Self {
        Self { bands: Vec::new() }
    }

    /// Registers a quantile band on `column`.
    ///
    /// `lower_q` and `upper_q` are probabilities in `[0, 1]`. Rows with a
    /// value at or below the lower cut, or at or above the upper cut, are
    /// dropped. `lower_q == 0.0` keeps the column minimum; `upper_q == 1.0`
    /// keeps the maximum.
    ///
    /// Validation happens in [`QuantileTrimmer::apply`], so bands can be
    /// chained freely while building.
    #[must_use]
    pub fn band(mut self, column: &str, lower_q: f64, upper_q: f64) -> Self {
        self.bands.push(Band {
            column: column.to_string(),
            lower_q,
            upper_q,
        });
        self
    }

    /// Returns the registered bands as `(column, lower_q, upper_q)` tuples.
    #[must_use]
    pub fn bands(&self) -> Vec<(&str, f64, f64)> {
        self.bands
            .iter()
            .map(|b| (b.column.as_str(), b.lower_q, b.upper_q))
            .collect()
    }

    /// Filters `table` by every registered band.
    ///
    /// # Errors
    ///
    /// Returns an error if a probability lies outside `[0, 1]`, a band has
    /// `lower_q >= upper_q`, a band names a column the table does not have,
    /// or a cut must be computed on a column with no finite values.
    pub fn apply(&self, table: &PropertyTable) -> Result<Trimmed> {
        for band in &self.bands {
            if !(0.0..=1.0).contains(&band.lower_q) {
                return Err(TasarError::InvalidQuantile {
                    value: band.lower_q,
                });
            }
            if !(0.0..=1.0).contains(&band.upper_q) {
                return Err(TasarError::InvalidQuantile {
                    value: band.upper_q,
                });
            }
            if band.lower_q >= band.upper_q {
                return Err(TasarError::invalid_hyperparameter(
                    "band",
                    format!("({}, {})", band.lower_q, band.upper_q),
                    "lower_q < upper_q",
                ));
            }
        }

        let mut cuts = Vec::with_capacity(self.bands.len());
        let mut mask = vec![true; table.n_rows()];

        for band in &self.bands {
            let column = table.column(&band.column)?;
            let finite: Vec<f64> = column.iter().copied().filter(|v| v.is_finite()).collect();
            // With no finite values there is nothing to anchor a cut on.
            // NaN cuts fail every active comparison, and an empty table has
            // no rows to fail, so both cases fall through without error.
            let (lower_cut, upper_cut) = if finite.is_empty() {
                (f64::NAN, f64::NAN)
            } else {
                let probes = stats::quantiles(&finite, &[band.lower_q, band.upper_q])?;
                (probes[0], probes[1])
            };

            let test_lower = band.lower_q > 0.0;
            let test_upper = band.upper_q < 1.0;
            for (keep, &value) in mask.iter_mut().zip(column.iter()) {
                // NaN fails both strict comparisons, so NaN rows drop
                // whenever either test is active.
                let above_lower = value > lower_cut;
                let below_upper = value < upper_cut;
                if test_lower && !above_lower {
                    *keep = false;
                }
                if test_upper && !below_upper {
                    *keep = false;
                }
            }

            cuts.push(BandCuts {
                column: band.column.clone(),
                lower_q: band.lower_q,
                upper_q: band.upper_q,
                lower_cut,
                upper_cut,
            });
        }

        let filtered = table.retain_rows(&mask)?;
        let n_dropped = table.n_rows() - filtered.n_rows();

        Ok(Trimmed {
            table: filtered,
            mask,
            cuts,
            n_dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Vector;

    fn table_1_to_100() -> PropertyTable {
        let rent: Vec<f64> = (1..=100).map(f64::from).collect();
        PropertyTable::new(vec![("rent".to_string(), Vector::from_vec(rent))]).unwrap()
    }

    #[test]
    fn test_one_percent_band_drops_both_extremes() {
        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.01, 0.99)
            .apply(&table_1_to_100())
            .unwrap();

        assert_eq!(trimmed.n_dropped, 2);
        assert_eq!(trimmed.table.n_rows(), 98);
        let rent = trimmed.table.column("rent").unwrap();
        assert_eq!(rent[0], 2.0);
        assert_eq!(rent[97], 99.0);
    }

    #[test]
    fn test_cut_points_are_reported() {
        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.01, 0.99)
            .apply(&table_1_to_100())
            .unwrap();

        assert_eq!(trimmed.cuts.len(), 1);
        let cuts = &trimmed.cuts[0];
        assert_eq!(cuts.column, "rent");
        assert!((cuts.lower_cut - 1.99).abs() < 1e-10);
        assert!((cuts.upper_cut - 99.01).abs() < 1e-10);
    }

    #[test]
    fn test_full_band_is_noop() {
        let table = table_1_to_100();
        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.0, 1.0)
            .apply(&table)
            .unwrap();

        assert_eq!(trimmed.n_dropped, 0);
        assert_eq!(trimmed.table.n_rows(), 100);
        assert!(trimmed.mask.iter().all(|&k| k));
    }

    #[test]
    fn test_no_bands_is_noop() {
        let table = table_1_to_100();
        let trimmed = QuantileTrimmer::new().apply(&table).unwrap();
        assert_eq!(trimmed.n_dropped, 0);
        assert_eq!(trimmed.table.n_rows(), 100);
        assert!(trimmed.cuts.is_empty());
    }

    #[test]
    fn test_half_open_band_keeps_minimum() {
        // Lower probability 0.0 disables the lower test, so the minimum
        // survives even though value > min is false for it.
        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.0, 0.99)
            .apply(&table_1_to_100())
            .unwrap();

        assert_eq!(trimmed.n_dropped, 1);
        assert_eq!(trimmed.table.column("rent").unwrap()[0], 1.0);
    }

    #[test]
    fn test_multiple_bands_intersect() {
        let rent: Vec<f64> = (1..=100).map(f64::from).collect();
        // sqft runs the opposite direction, so each band drops a different
        // pair of rows.
        let sqft: Vec<f64> = (1..=100).rev().map(f64::from).collect();
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("sqft".to_string(), Vector::from_vec(sqft)),
        ])
        .unwrap();

        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.01, 0.99)
            .band("sqft", 0.01, 0.99)
            .apply(&table)
            .unwrap();

        // rent drops rows 1 and 100; sqft drops the same two rows seen from
        // the other end, which are again rows 1 and 100.
        assert_eq!(trimmed.n_dropped, 2);
        assert_eq!(trimmed.cuts.len(), 2);
    }

    #[test]
    fn test_cuts_come_from_input_not_progressive() {
        let rent: Vec<f64> = (1..=100).map(f64::from).collect();
        let sqft: Vec<f64> = (1..=100).map(f64::from).collect();
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("sqft".to_string(), Vector::from_vec(sqft)),
        ])
        .unwrap();

        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.01, 0.99)
            .band("sqft", 0.01, 0.99)
            .apply(&table)
            .unwrap();

        // Both bands see the original 100 rows, so the second band's cuts
        // match the first's rather than tightening on the already-filtered
        // 98 rows.
        assert_eq!(trimmed.cuts[0].lower_cut, trimmed.cuts[1].lower_cut);
        assert_eq!(trimmed.cuts[0].upper_cut, trimmed.cuts[1].upper_cut);
        assert_eq!(trimmed.n_dropped, 2);
    }

    #[test]
    fn test_mask_aligns_with_input_rows() {
        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.01, 0.99)
            .apply(&table_1_to_100())
            .unwrap();

        assert_eq!(trimmed.mask.len(), 100);
        assert!(!trimmed.mask[0]);
        assert!(!trimmed.mask[99]);
        assert!(trimmed.mask[1..99].iter().all(|&k| k));
    }

    #[test]
    fn test_nan_rows_dropped_by_active_band() {
        let table = PropertyTable::new(vec![(
            "rent".to_string(),
            Vector::from_vec(vec![1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0, 8.0]),
        )])
        .unwrap();

        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.1, 0.9)
            .apply(&table)
            .unwrap();

        assert!(!trimmed.mask[2]);
        assert!(trimmed
            .table
            .column("rent")
            .unwrap()
            .iter()
            .all(|v| v.is_finite()));
    }

    #[test]
    fn test_invalid_probability_errors() {
        let err = QuantileTrimmer::new()
            .band("rent", -0.1, 0.9)
            .apply(&table_1_to_100())
            .unwrap_err();
        assert!(matches!(err, TasarError::InvalidQuantile { .. }));

        let err = QuantileTrimmer::new()
            .band("rent", 0.1, 1.5)
            .apply(&table_1_to_100())
            .unwrap_err();
        assert!(matches!(err, TasarError::InvalidQuantile { .. }));
    }

    #[test]
    fn test_inverted_band_errors() {
        let err = QuantileTrimmer::new()
            .band("rent", 0.9, 0.1)
            .apply(&table_1_to_100())
            .unwrap_err();
        assert!(matches!(err, TasarError::InvalidHyperparameter { .. }));

        let err = QuantileTrimmer::new()
            .band("rent", 0.5, 0.5)
            .apply(&table_1_to_100())
            .unwrap_err();
        assert!(matches!(err, TasarError::InvalidHyperparameter { .. }));
    }

    #[test]
    fn test_unknown_column_errors() {
        let err = QuantileTrimmer::new()
            .band("price", 0.01, 0.99)
            .apply(&table_1_to_100())
            .unwrap_err();
        assert!(matches!(err, TasarError::UnknownColumn { .. }));
    }

    #[test]
    fn test_empty_table_yields_empty_output() {
        let table =
            PropertyTable::new(vec![("rent".to_string(), Vector::from_vec(vec![]))]).unwrap();
        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.01, 0.99)
            .apply(&table)
            .unwrap();
        assert_eq!(trimmed.table.n_rows(), 0);
        assert_eq!(trimmed.n_dropped, 0);
        // No finite values to anchor the cuts on.
        assert!(trimmed.cuts[0].lower_cut.is_nan());
        assert!(trimmed.cuts[0].upper_cut.is_nan());
    }

    #[test]
    fn test_all_nan_column_drops_every_row() {
        let table = PropertyTable::new(vec![(
            "rent".to_string(),
            Vector::from_vec(vec![f64::NAN, f64::NAN, f64::NAN]),
        )])
        .unwrap();
        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.01, 0.99)
            .apply(&table)
            .unwrap();
        assert_eq!(trimmed.table.n_rows(), 0);
        assert_eq!(trimmed.n_dropped, 3);
    }

    #[test]
    fn test_untouched_columns_stay_aligned() {
        let rent: Vec<f64> = (1..=10).map(f64::from).collect();
        let id: Vec<f64> = (100..110).map(f64::from).collect();
        let table = PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("id".to_string(), Vector::from_vec(id)),
        ])
        .unwrap();

        let trimmed = QuantileTrimmer::new()
            .band("rent", 0.15, 0.85)
            .apply(&table)
            .unwrap();

        // Rows drop together: the id column keeps only the ids whose rent
        // survived.
        let rent = trimmed.table.column("rent").unwrap();
        let id = trimmed.table.column("id").unwrap();
        assert_eq!(rent.len(), id.len());
        for i in 0..rent.len() {
            assert_eq!(id[i] - 100.0, rent[i] - 1.0);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let trimmer = QuantileTrimmer::new().band("rent", 0.01, 0.99);
        let json = serde_json::to_string(&trimmer).unwrap();
        let back: QuantileTrimmer = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bands(), vec![("rent", 0.01, 0.99)]);
    }
}
