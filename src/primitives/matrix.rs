//! Dense row-major matrix.

use super::Vector;
use serde::{Deserialize, Serialize};

/// A dense matrix stored row-major in one contiguous vector.
///
/// Design matrices and posterior draws both live in this type. The f64
/// impl block adds the linear algebra the solvers need, with Cholesky
/// factorization as the workhorse.
///
/// # Examples
///
/// ```
/// use tasar::primitives::Matrix;
///
/// let x = Matrix::from_vec(3, 2, vec![1.0, 480.0, 1.0, 640.0, 1.0, 910.0])
///     .expect("data length matches rows * cols");
/// assert_eq!(x.shape(), (3, 2));
/// assert_eq!(x.column(1).as_slice(), &[480.0, 640.0, 910.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Wraps row-major data as a `rows` × `cols` matrix.
    ///
    /// # Errors
    ///
    /// Returns an error unless `data.len() == rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, &'static str> {
        if data.len() != rows * cols {
            return Err("Data length must equal rows * cols");
        }
        Ok(Self { data, rows, cols })
    }

    /// (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics when the index is outside the matrix.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Overwrites the element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics when the index is outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Copies row `row_idx` out as a [`Vector`].
    #[must_use]
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        let start = row_idx * self.cols;
        Vector::from_slice(&self.data[start..start + self.cols])
    }

    /// Copies column `col_idx` out as a [`Vector`].
    ///
    /// # Panics
    ///
    /// Panics when the column index is outside the matrix.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vector<T> {
        assert!(col_idx < self.cols, "column index out of bounds");
        let data: Vec<T> = self
            .data
            .chunks_exact(self.cols)
            .map(|row| row[col_idx])
            .collect();
        Vector::from_vec(data)
    }

    /// The row-major backing slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Matrix<f64> {
    /// A `rows` × `cols` matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// A `rows` × `cols` matrix of ones.
    #[must_use]
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![1.0; rows * cols],
            rows,
            cols,
        }
    }

    /// The n × n identity.
    #[must_use]
    pub fn eye(n: usize) -> Self {
        let mut identity = Self::zeros(n, n);
        for i in 0..n {
            identity.set(i, i, 1.0);
        }
        identity
    }

    /// The transpose, as a new matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inner dimensions disagree.
    pub fn matmul(&self, other: &Self) -> Result<Self, &'static str> {
        if self.cols != other.rows {
            return Err("Matrix dimensions don't match for multiplication");
        }

        let mut data = Vec::with_capacity(self.rows * other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let dot: f64 = (0..self.cols)
                    .map(|k| self.get(i, k) * other.get(k, j))
                    .sum();
                data.push(dot);
            }
        }

        Ok(Self {
            data,
            rows: self.rows,
            cols: other.cols,
        })
    }

    /// Matrix-vector product `self * vec`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector length differs from the column count.
    pub fn matvec(&self, vec: &Vector<f64>) -> Result<Vector<f64>, &'static str> {
        if self.cols != vec.len() {
            return Err("Matrix columns must match vector length");
        }

        if self.cols == 0 {
            return Ok(Vector::zeros(self.rows));
        }

        let v = vec.as_slice();
        let result: Vec<f64> = self
            .data
            .chunks_exact(self.cols)
            .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
            .collect();

        Ok(Vector::from_vec(result))
    }

    /// Element-wise sum `self + other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ.
    pub fn add(&self, other: &Self) -> Result<Self, &'static str> {
        if self.shape() != other.shape() {
            return Err("Matrix dimensions must match for addition");
        }

        let data: Vec<f64> = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();

        Ok(Self {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Every element scaled by `scalar`.
    #[must_use]
    pub fn mul_scalar(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|x| x * scalar).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// The lower-triangular Cholesky factor L with `self = L Lᵀ`.
    ///
    /// Only the lower triangle of `self` is read, so a symmetric matrix
    /// stored fully or lower-only both work.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or not positive definite.
    pub fn cholesky_factor(&self) -> Result<Self, &'static str> {
        if self.rows != self.cols {
            return Err("Matrix must be square for Cholesky decomposition");
        }

        let n = self.rows;
        let mut l = Self::zeros(n, n);

        for i in 0..n {
            for j in 0..=i {
                let dot: f64 = (0..j).map(|k| l.get(i, k) * l.get(j, k)).sum();
                if i == j {
                    let diag = self.get(i, i) - dot;
                    if diag <= 0.0 {
                        return Err("Matrix is not positive definite");
                    }
                    l.set(i, i, diag.sqrt());
                } else {
                    l.set(i, j, (self.get(i, j) - dot) / l.get(j, j));
                }
            }
        }

        Ok(l)
    }

    /// Solves L * y = b by forward substitution, treating self as lower
    /// triangular (entries above the diagonal are ignored).
    ///
    /// # Errors
    ///
    /// Returns an error on shape mismatch or a zero diagonal entry.
    pub fn solve_lower_triangular(&self, b: &Vector<f64>) -> Result<Vector<f64>, &'static str> {
        if self.rows != self.cols {
            return Err("Matrix must be square for triangular solve");
        }
        if self.rows != b.len() {
            return Err("Matrix rows must match vector length");
        }

        let n = self.rows;
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += self.get(i, j) * y[j];
            }
            let diag = self.get(i, i);
            if diag == 0.0 {
                return Err("Triangular matrix has a zero diagonal entry");
            }
            y[i] = (b[i] - sum) / diag;
        }

        Ok(Vector::from_vec(y))
    }

    /// Solves U * x = b by backward substitution, treating self as upper
    /// triangular (entries below the diagonal are ignored).
    ///
    /// # Errors
    ///
    /// Returns an error on shape mismatch or a zero diagonal entry.
    pub fn solve_upper_triangular(&self, b: &Vector<f64>) -> Result<Vector<f64>, &'static str> {
        if self.rows != self.cols {
            return Err("Matrix must be square for triangular solve");
        }
        if self.rows != b.len() {
            return Err("Matrix rows must match vector length");
        }

        let n = self.rows;
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += self.get(i, j) * x[j];
            }
            let diag = self.get(i, i);
            if diag == 0.0 {
                return Err("Triangular matrix has a zero diagonal entry");
            }
            x[i] = (b[i] - sum) / diag;
        }

        Ok(Vector::from_vec(x))
    }

    /// Solves the linear system Ax = b using Cholesky decomposition.
    ///
    /// The matrix must be symmetric positive definite.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square, not positive definite,
    /// or the vector length doesn't match.
    pub fn cholesky_solve(&self, b: &Vector<f64>) -> Result<Vector<f64>, &'static str> {
        if self.rows != b.len() {
            return Err("Matrix rows must match vector length");
        }

        let l = self.cholesky_factor()?;
        let y = l.solve_lower_triangular(b)?;
        l.transpose().solve_upper_triangular(&y)
    }

    /// Computes the inverse of a symmetric positive definite matrix by
    /// solving against the identity columns through the Cholesky factor.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or not positive definite.
    pub fn cholesky_inverse(&self) -> Result<Self, &'static str> {
        let l = self.cholesky_factor()?;
        let lt = l.transpose();
        let n = self.rows;

        let mut inv = vec![0.0; n * n];
        for j in 0..n {
            let mut unit = vec![0.0; n];
            unit[j] = 1.0;
            let y = l.solve_lower_triangular(&Vector::from_vec(unit))?;
            let x = lt.solve_upper_triangular(&y)?;
            for i in 0..n {
                inv[i * n + j] = x[i];
            }
        }

        Self::from_vec(n, n, inv)
    }
}
