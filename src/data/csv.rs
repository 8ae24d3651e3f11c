//! CSV ingestion for listing tables.
//!
//! Loads an explicit set of header columns and parses every cell as f64.
//! Non-numeric metadata columns stay out of the table unless requested, so
//! a stray city name in a requested column is a loud error with the line
//! number, not a silently dropped row.

use super::PropertyTable;
use crate::error::{Result, TasarError};
use crate::primitives::Vector;
use std::io::Read;
use std::path::Path;

impl PropertyTable {
    /// Loads the named columns from a headered CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, a requested column
    /// is missing from the header, or any cell fails to parse as a number.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tasar::data::PropertyTable;
    ///
    /// let table = PropertyTable::from_csv_path("listings.csv", &["rent", "sqft"]).unwrap();
    /// assert_eq!(table.n_cols(), 2);
    /// ```
    pub fn from_csv_path<P: AsRef<Path>>(path: P, columns: &[&str]) -> Result<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|e| TasarError::CsvParse {
            line: 0,
            column: String::new(),
            message: format!("Failed to open '{}': {e}", path.display()),
        })?;
        Self::from_csv(reader, columns)
    }

    /// Loads the named columns from any headered CSV source.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PropertyTable::from_csv_path`].
    pub fn from_csv_reader<R: Read>(reader: R, columns: &[&str]) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader), columns)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, columns: &[&str]) -> Result<Self> {
        if columns.is_empty() {
            return Err("Must request at least one column".into());
        }

        let headers = reader
            .headers()
            .map_err(|e| TasarError::CsvParse {
                line: 1,
                column: "headers".to_string(),
                message: format!("Failed to read headers: {e}"),
            })?
            .clone();

        let mut indices = Vec::with_capacity(columns.len());
        for &name in columns {
            let idx = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TasarError::unknown_column(name))?;
            indices.push(idx);
        }

        let mut data: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
        let mut line = 1;

        for record in reader.records() {
            line += 1;
            let record = record.map_err(|e| TasarError::CsvParse {
                line,
                column: String::new(),
                message: format!("Failed to read record: {e}"),
            })?;

            for (slot, (&name, &idx)) in
                data.iter_mut().zip(columns.iter().zip(indices.iter()))
            {
                let raw = record.get(idx).ok_or_else(|| TasarError::CsvParse {
                    line,
                    column: name.to_string(),
                    message: "record is shorter than the header".to_string(),
                })?;
                let value: f64 = raw.trim().parse().map_err(|_| TasarError::CsvParse {
                    line,
                    column: name.to_string(),
                    message: format!("cannot parse '{}' as a number", raw.trim()),
                })?;
                slot.push(value);
            }
        }

        let cols = columns
            .iter()
            .zip(data)
            .map(|(&name, values)| (name.to_string(), Vector::from_vec(values)))
            .collect();

        Self::new(cols)
    }
}
