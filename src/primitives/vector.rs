//! Vector type for 1D numeric data.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// A 1D vector of floating-point values.
///
/// # Examples
///
/// ```
/// use tasar::primitives::Vector;
///
/// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// assert_eq!(v.len(), 3);
/// assert!((v.mean() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Copy> Vector<T> {
    /// Creates a vector from owned data.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Creates a vector by copying a slice.
    #[must_use]
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns a copy of the elements in [start, end).
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len`.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self::from_slice(&self.data[start..end])
    }
}

impl Vector<f64> {
    /// Creates a vector of zeros.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self { data: vec![0.0; n] }
    }

    /// Creates a vector of ones.
    #[must_use]
    pub fn ones(n: usize) -> Self {
        Self { data: vec![1.0; n] }
    }

    /// Returns the sum of all elements (0.0 for an empty vector).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Returns the arithmetic mean (0.0 for an empty vector).
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.sum() / self.data.len() as f64
    }

    /// Returns the sample variance with n-1 denominator (0.0 when n < 2).
    #[must_use]
    pub fn variance(&self) -> f64 {
        let n = self.data.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let ss: f64 = self.data.iter().map(|x| (x - mean) * (x - mean)).sum();
        ss / (n - 1) as f64
    }

    /// Returns the sample standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Returns the smallest element, or None for an empty vector.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().fold(f64::INFINITY, |acc, &x| acc.min(x)))
    }

    /// Returns the largest element, or None for an empty vector.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(
            self.data
                .iter()
                .fold(f64::NEG_INFINITY, |acc, &x| acc.max(x)),
        )
    }

    /// Computes the dot product with another vector.
    ///
    /// # Panics
    ///
    /// Panics if lengths don't match.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        assert_eq!(
            self.len(),
            other.len(),
            "Vector lengths must match for dot product"
        );
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Returns the squared Euclidean norm.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum()
    }

    /// Returns the Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Adds a scalar to each element.
    #[must_use]
    pub fn add_scalar(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|x| x + scalar).collect(),
        }
    }

    /// Multiplies each element by a scalar.
    #[must_use]
    pub fn mul_scalar(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|x| x * scalar).collect(),
        }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

macro_rules! elementwise_op {
    ($trait:ident, $method:ident, $op:tt, $what:literal) => {
        impl $trait for &Vector<f64> {
            type Output = Vector<f64>;

            fn $method(self, rhs: &Vector<f64>) -> Vector<f64> {
                assert_eq!(
                    self.len(),
                    rhs.len(),
                    concat!("Vector lengths must match for ", $what)
                );
                Vector {
                    data: self
                        .data
                        .iter()
                        .zip(rhs.data.iter())
                        .map(|(a, b)| a $op b)
                        .collect(),
                }
            }
        }
    };
}

elementwise_op!(Add, add, +, "addition");
elementwise_op!(Sub, sub, -, "subtraction");
elementwise_op!(Mul, mul, *, "multiplication");
elementwise_op!(Div, div, /, "division");
