//! Listing tables: named column containers for property data.
//!
//! A [`PropertyTable`] is a thin wrapper around `Vec<(String, Vector<f64>)>`
//! holding one row per listing. Heavy data wrangling belongs upstream; this
//! covers what the trimming and fitting pipeline needs.

mod csv;

use crate::error::{Result, TasarError};
use crate::primitives::{Matrix, Vector};
use crate::stats::{quantile, Summary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A table of property listings with named numeric columns.
///
/// # Examples
///
/// ```
/// use tasar::data::PropertyTable;
/// use tasar::primitives::Vector;
///
/// let columns = vec![
///     ("rent".to_string(), Vector::from_slice(&[1200.0, 1850.0, 990.0])),
///     ("sqft".to_string(), Vector::from_slice(&[640.0, 910.0, 480.0])),
/// ];
/// let table = PropertyTable::new(columns).unwrap();
/// assert_eq!(table.shape(), (3, 2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTable {
    columns: Vec<(String, Vector<f64>)>,
    n_rows: usize,
}

impl PropertyTable {
    /// Creates a new table from named columns.
    ///
    /// A table with zero rows is valid as long as it has at least one
    /// column; filters may legitimately empty a table.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no columns, columns have different
    /// lengths, a name is empty, or names repeat.
    pub fn new(columns: Vec<(String, Vector<f64>)>) -> Result<Self> {
        let Some((_, first)) = columns.first() else {
            return Err("PropertyTable must have at least one column".into());
        };
        let n_rows = first.len();

        {
            let mut seen = BTreeSet::new();
            for (name, col) in &columns {
                if name.is_empty() {
                    return Err("Column names cannot be empty".into());
                }
                if col.len() != n_rows {
                    return Err("All columns must have the same length".into());
                }
                if !seen.insert(name.as_str()) {
                    return Err("Duplicate column names not allowed".into());
                }
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Table shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Number of listings.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// All column names, in table order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Looks up a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`TasarError::UnknownColumn`] if the name is absent.
    pub fn column(&self, name: &str) -> Result<&Vector<f64>> {
        self.columns
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
            .ok_or_else(|| TasarError::unknown_column(name))
    }

    /// A new table holding only the named columns, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if any column doesn't exist or no names are given.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        if names.is_empty() {
            return Err("Must select at least one column".into());
        }

        let selected = names
            .iter()
            .map(|&name| Ok((name.to_string(), self.column(name)?.clone())))
            .collect::<Result<Vec<_>>>()?;

        Self::new(selected)
    }

    /// One listing as a Vector, values in column order.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of bounds.
    pub fn row(&self, idx: usize) -> Result<Vector<f64>> {
        if idx >= self.n_rows {
            return Err("Row index out of bounds".into());
        }

        let values = self.columns.iter().map(|(_, col)| col[idx]).collect();
        Ok(Vector::from_vec(values))
    }

    /// The table as an `n_rows` × `n_cols` matrix, columns in table order.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix<f64> {
        let (n_rows, n_cols) = self.shape();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for i in 0..n_rows {
            data.extend(self.columns.iter().map(|(_, col)| col[i]));
        }

        Matrix::from_vec(n_rows, n_cols, data).expect("Internal error: data size mismatch")
    }

    /// Iterates over columns as (name, vector) pairs.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &Vector<f64>)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the length doesn't match the existing rows, the
    /// name is empty, or the name is already taken.
    pub fn add_column(&mut self, name: String, data: Vector<f64>) -> Result<()> {
        if name.is_empty() {
            return Err("Column name cannot be empty".into());
        }
        if self.columns.iter().any(|(n, _)| n == &name) {
            return Err("Column name already exists".into());
        }
        if data.len() != self.n_rows {
            return Err("Column length must match existing rows".into());
        }

        self.columns.push((name, data));
        Ok(())
    }

    /// Removes a column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist or is the last one.
    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        if self.columns.len() == 1 {
            return Err("Cannot drop the last column".into());
        }

        match self.columns.iter().position(|(n, _)| n == name) {
            Some(idx) => {
                self.columns.remove(idx);
                Ok(())
            }
            None => Err(TasarError::unknown_column(name)),
        }
    }

    /// Renames a column in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the old name doesn't exist, the new name is
    /// empty, or the new name collides with another column.
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<()> {
        if new.is_empty() {
            return Err("Column name cannot be empty".into());
        }
        if old != new && self.columns.iter().any(|(n, _)| n == new) {
            return Err("Column name already exists".into());
        }

        let idx = self
            .columns
            .iter()
            .position(|(n, _)| n == old)
            .ok_or_else(|| TasarError::unknown_column(old))?;

        self.columns[idx].0 = new.to_string();
        Ok(())
    }

    /// Keeps only the rows where the mask is true.
    ///
    /// Retaining zero rows yields a valid empty table with the same
    /// columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask length doesn't match the row count.
    pub fn retain_rows(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.n_rows {
            return Err(TasarError::dimension_mismatch(
                "mask length",
                self.n_rows,
                mask.len(),
            ));
        }

        let columns = self
            .columns
            .iter()
            .map(|(name, col)| {
                let kept: Vec<f64> = col
                    .iter()
                    .zip(mask.iter())
                    .filter(|(_, &keep)| keep)
                    .map(|(&v, _)| v)
                    .collect();
                (name.clone(), Vector::from_vec(kept))
            })
            .collect();

        Self::new(columns)
    }

    /// Returns descriptive statistics for all columns.
    #[must_use]
    pub fn describe(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .map(|(name, col)| {
                let stats = Summary::from_values(col.as_slice());
                let median = quantile(col.as_slice(), 0.5).unwrap_or(0.0);
                ColumnSummary {
                    name: name.clone(),
                    stats,
                    median,
                }
            })
            .collect()
    }
}

/// Descriptive statistics for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Moment summary (mean, variance, min, max, ...).
    pub stats: Summary,
    /// Median value (0.0 for an empty column).
    pub median: f64,
}
