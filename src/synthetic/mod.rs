//! Synthetic listing generation.
//!
//! Simulates rental listings from a known hedonic model so recovery can
//! be checked against ground truth: rent is a linear function of square
//! footage, bedrooms, and bathrooms plus Gaussian noise, with an optional
//! fraction of corrupted rows for exercising the outlier trimmer.
//!
//! # Quick Start
//!
//! ```
//! use tasar::synthetic::ListingGenerator;
//!
//! let table = ListingGenerator::new(200)
//!     .with_seed(42)
//!     .with_noise_std(80.0)
//!     .generate()
//!     .expect("valid generator settings");
//!
//! assert_eq!(table.shape(), (200, 4));
//! assert_eq!(table.column_names(), vec!["rent", "sqft", "bedrooms", "bathrooms"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::bayesian::sampler::SeededRng;
use crate::data::PropertyTable;
use crate::error::{Result, TasarError};
use crate::primitives::Vector;

/// Builder-style generator for synthetic rental listings.
///
/// The true model is
///
/// ```text
/// rent = intercept + per_sqft·sqft + per_bedroom·bedrooms
///      + per_bathroom·bathrooms + N(0, noise_std²)
/// ```
///
/// and a fraction `outlier_rate` of rows gets its rent corrupted by a
/// factor of ten in either direction, mimicking a decimal-point entry
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingGenerator {
    n_listings: usize,
    seed: u64,
    intercept: f64,
    per_sqft: f64,
    per_bedroom: f64,
    per_bathroom: f64,
    noise_std: f64,
    sqft_range: (f64, f64),
    bedroom_range: (u32, u32),
    bathroom_range: (u32, u32),
    outlier_rate: f64,
}

impl ListingGenerator {
    /// Creates a generator for `n_listings` rows with default settings.
    ///
    /// Defaults: rent = 500 + 1.8·sqft + 150·bedrooms + 120·bathrooms,
    /// noise std 120, sqft in [350, 2200), 0-4 bedrooms, 1-3 bathrooms,
    /// no outliers, seed 42.
    #[must_use]
    pub fn new(n_listings: usize) -> Self {
        Self {
            n_listings,
            seed: 42,
            intercept: 500.0,
            per_sqft: 1.8,
            per_bedroom: 150.0,
            per_bathroom: 120.0,
            noise_std: 120.0,
            sqft_range: (350.0, 2200.0),
            bedroom_range: (0, 4),
            bathroom_range: (1, 3),
            outlier_rate: 0.0,
        }
    }

    /// Sets the seed for the draw stream.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the true model coefficients.
    #[must_use]
    pub fn with_true_model(
        mut self,
        intercept: f64,
        per_sqft: f64,
        per_bedroom: f64,
        per_bathroom: f64,
    ) -> Self {
        self.intercept = intercept;
        self.per_sqft = per_sqft;
        self.per_bedroom = per_bedroom;
        self.per_bathroom = per_bathroom;
        self
    }

    /// Sets the standard deviation of the rent noise.
    #[must_use]
    pub fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Sets the half-open square footage range [low, high).
    #[must_use]
    pub fn with_sqft_range(mut self, low: f64, high: f64) -> Self {
        self.sqft_range = (low, high);
        self
    }

    /// Sets the inclusive bedroom count range.
    #[must_use]
    pub fn with_bedroom_range(mut self, low: u32, high: u32) -> Self {
        self.bedroom_range = (low, high);
        self
    }

    /// Sets the inclusive bathroom count range.
    #[must_use]
    pub fn with_bathroom_range(mut self, low: u32, high: u32) -> Self {
        self.bathroom_range = (low, high);
        self
    }

    /// Sets the fraction of rows that get a corrupted rent.
    #[must_use]
    pub fn with_outlier_rate(mut self, outlier_rate: f64) -> Self {
        self.outlier_rate = outlier_rate;
        self
    }

    /// True model coefficients in design order, for recovery tests.
    #[must_use]
    pub fn true_coefficients(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("intercept", self.intercept),
            ("sqft", self.per_sqft),
            ("bedrooms", self.per_bedroom),
            ("bathrooms", self.per_bathroom),
        ]
    }

    fn validate(&self) -> Result<()> {
        if self.n_listings == 0 {
            return Err(TasarError::invalid_hyperparameter("n_listings", 0, "> 0"));
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(TasarError::invalid_hyperparameter(
                "noise_std",
                self.noise_std,
                "a finite value >= 0",
            ));
        }
        if !self.outlier_rate.is_finite() || !(0.0..1.0).contains(&self.outlier_rate) {
            return Err(TasarError::invalid_hyperparameter(
                "outlier_rate",
                self.outlier_rate,
                "a value in [0, 1)",
            ));
        }
        let (lo, hi) = self.sqft_range;
        if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo >= hi {
            return Err(TasarError::invalid_hyperparameter(
                "sqft_range",
                format!("({lo}, {hi})"),
                "0 < low < high",
            ));
        }
        if self.bedroom_range.0 > self.bedroom_range.1 {
            return Err(TasarError::invalid_hyperparameter(
                "bedroom_range",
                format!("({}, {})", self.bedroom_range.0, self.bedroom_range.1),
                "low <= high",
            ));
        }
        if self.bathroom_range.0 > self.bathroom_range.1 {
            return Err(TasarError::invalid_hyperparameter(
                "bathroom_range",
                format!("({}, {})", self.bathroom_range.0, self.bathroom_range.1),
                "low <= high",
            ));
        }
        Ok(())
    }

    /// Generates the listing table with columns rent, sqft, bedrooms,
    /// and bathrooms.
    ///
    /// The same configuration always produces the same table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` for zero listings, negative or
    /// non-finite noise, an outlier rate outside [0, 1), or an empty
    /// feature range.
    pub fn generate(&self) -> Result<PropertyTable> {
        self.validate()?;

        let mut rng = SeededRng::new(self.seed);
        let n = self.n_listings;

        let mut rent = Vec::with_capacity(n);
        let mut sqft = Vec::with_capacity(n);
        let mut bedrooms = Vec::with_capacity(n);
        let mut bathrooms = Vec::with_capacity(n);

        let (sqft_lo, sqft_hi) = self.sqft_range;
        let bedroom_span = f64::from(self.bedroom_range.1 - self.bedroom_range.0 + 1);
        let bathroom_span = f64::from(self.bathroom_range.1 - self.bathroom_range.0 + 1);

        for _ in 0..n {
            let area = sqft_lo + rng.uniform() * (sqft_hi - sqft_lo);
            // uniform() < 1 keeps the floored draw inside the span.
            let beds = f64::from(self.bedroom_range.0) + (rng.uniform() * bedroom_span).floor();
            let baths = f64::from(self.bathroom_range.0) + (rng.uniform() * bathroom_span).floor();

            let mut price = self.intercept
                + self.per_sqft * area
                + self.per_bedroom * beds
                + self.per_bathroom * baths
                + rng.normal(0.0, self.noise_std);

            if rng.uniform() < self.outlier_rate {
                // A corrupted row mimics a decimal-point entry error.
                price = if rng.uniform() < 0.5 {
                    price * 10.0
                } else {
                    price / 10.0
                };
            }

            rent.push(price);
            sqft.push(area);
            bedrooms.push(beds);
            bathrooms.push(baths);
        }

        PropertyTable::new(vec![
            ("rent".to_string(), Vector::from_vec(rent)),
            ("sqft".to_string(), Vector::from_vec(sqft)),
            ("bedrooms".to_string(), Vector::from_vec(bedrooms)),
            ("bathrooms".to_string(), Vector::from_vec(bathrooms)),
        ])
    }
}
