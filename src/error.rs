//! Error types for Tasar operations.
//!
//! One enum covers the whole pipeline, from table construction through
//! trimming, fitting and sampling.

use std::fmt;

/// Error type shared across Tasar.
///
/// Variants carry enough context to tell a caller what to change: which
/// column was missing, which hyperparameter was out of range, how many
/// observations a fit would have needed.
///
/// # Examples
///
/// ```
/// use tasar::error::TasarError;
///
/// let err = TasarError::DimensionMismatch {
///     expected: "rows=100".to_string(),
///     actual: "50".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum TasarError {
    /// Matrix/vector/table dimensions don't match for the operation.
    DimensionMismatch {
        /// What the operation needed, e.g. `rows=100`
        expected: String,
        /// What it was given
        actual: String,
    },

    /// Design matrix is rank deficient or otherwise not solvable.
    DegenerateDesign {
        /// What made the normal equations unsolvable
        reason: String,
    },

    /// Fewer observations than parameters to estimate.
    Underdetermined {
        /// Number of observations available
        n_samples: usize,
        /// Number of parameters to estimate
        n_params: usize,
    },

    /// Quantile probability outside the closed unit interval.
    InvalidQuantile {
        /// Provided probability
        value: f64,
    },

    /// A builder setting is outside its valid range.
    InvalidHyperparameter {
        /// Setting name, e.g. `outlier_rate`
        param: String,
        /// The rejected value, already formatted
        value: String,
        /// The range the setting must lie in
        constraint: String,
    },

    /// Column name not present in the table.
    UnknownColumn {
        /// Requested column name
        name: String,
    },

    /// Operation requires non-empty input.
    EmptyInput {
        /// What was empty
        context: String,
    },

    /// Model must be fitted before this operation.
    NotFitted {
        /// What was not fitted
        what: String,
    },

    /// Underlying I/O failure while reading listing data.
    Io(std::io::Error),

    /// CSV record could not be parsed into a numeric table.
    CsvParse {
        /// 1-based record line (0 when unknown)
        line: usize,
        /// Column involved
        column: String,
        /// Parser detail
        message: String,
    },

    /// Anything without a more precise variant.
    Other(String),
}

impl fmt::Display for TasarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TasarError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            TasarError::DegenerateDesign { reason } => {
                write!(f, "Degenerate design matrix: {reason}")
            }
            TasarError::Underdetermined { n_samples, n_params } => {
                write!(
                    f,
                    "Underdetermined system: {n_samples} observations for {n_params} parameters, \
                     need at least {} observations",
                    n_params + 1
                )
            }
            TasarError::InvalidQuantile { value } => {
                write!(
                    f,
                    "Invalid quantile probability: {value}, expected a value in [0, 1]"
                )
            }
            TasarError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            TasarError::UnknownColumn { name } => {
                write!(f, "Unknown column: '{name}'")
            }
            TasarError::EmptyInput { context } => {
                write!(f, "empty input: {context}")
            }
            TasarError::NotFitted { what } => {
                write!(f, "{what} has not been fitted yet, call fit() first")
            }
            TasarError::Io(e) => write!(f, "I/O error: {e}"),
            TasarError::CsvParse {
                line,
                column,
                message,
            } => {
                write!(
                    f,
                    "CSV parse error at line {line}, column '{column}': {message}"
                )
            }
            TasarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TasarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TasarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TasarError {
    fn from(err: std::io::Error) -> Self {
        TasarError::Io(err)
    }
}

impl From<&str> for TasarError {
    fn from(msg: &str) -> Self {
        TasarError::Other(msg.to_string())
    }
}

impl From<String> for TasarError {
    fn from(msg: String) -> Self {
        TasarError::Other(msg)
    }
}

impl TasarError {
    /// Dimension mismatch with a labelled expectation, e.g. `rows=100`.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: actual.to_string(),
        }
    }

    /// Empty input error naming what was empty.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput {
            context: context.to_string(),
        }
    }

    /// Unknown column error for a table lookup.
    #[must_use]
    pub fn unknown_column(name: &str) -> Self {
        Self::UnknownColumn {
            name: name.to_string(),
        }
    }

    /// Invalid hyperparameter error, formatting the value on the way in.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for TasarError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<TasarError> for &str {
    fn eq(&self, other: &TasarError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, TasarError>;
