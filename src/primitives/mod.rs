//! Dense compute primitives.
//!
//! [`Vector`] and [`Matrix`] back every fit in the crate: tables export
//! into them, the solvers factor them, the sampler draws into them.
//! All numeric work is f64.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
