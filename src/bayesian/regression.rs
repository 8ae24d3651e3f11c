//! Bayesian linear regression estimated by Gibbs sampling.
//!
//! The model is the conjugate Normal-InverseGamma regression, but the
//! posterior is explored by simulation rather than the closed form, so
//! every reported quantity comes with draws behind it.
//!
//! Reference: Gelman et al. (2013), "Bayesian Data Analysis", Ch. 14

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bayesian::convergence::effective_sample_size;
use crate::bayesian::sampler::SeededRng;
use crate::error::{Result, TasarError};
use crate::primitives::{Matrix, Vector};
use crate::stats;

/// Bayesian linear regression fitted by Gibbs sampling.
///
/// # Model
///
/// ```text
/// y = Xβ + ε,  ε ~ N(0, σ²I)
/// β ~ N(β₀, (1/λ)·I)       # prior precision λ on coefficients
/// σ² ~ InvGamma(α₀, β₀)    # prior on noise variance
/// ```
///
/// # Sampler
///
/// `fit` alternates the two conditional draws
///
/// ```text
/// β | σ², y ~ N(mₙ, Aₙ⁻¹)   where Aₙ = λI + XᵀX/σ²,  Aₙmₙ = λβ₀ + Xᵀy/σ²
/// σ² | β, y ~ InvGamma(α₀ + n/2, β₀ + RSS(β)/2)
/// ```
///
/// discarding `burn_in` warmup iterations and keeping `n_draws` draws.
/// The chain is seeded, so the same configuration always produces the
/// same draws.
///
/// # Example
///
/// ```
/// use tasar::bayesian::BayesianLinearRegression;
/// use tasar::primitives::{Matrix, Vector};
///
/// let x = Matrix::from_vec(4, 2, vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0])
///     .expect("valid matrix dimensions");
/// let y = Vector::from_vec(vec![3.1, 4.9, 7.2, 8.8]);
///
/// let mut model = BayesianLinearRegression::new(2).with_seed(42);
/// model.fit(&x, &y).expect("fit should succeed with valid data");
/// assert!(model.posterior_mean().is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BayesianLinearRegression {
    /// Number of design columns, intercept included when the caller adds one.
    n_features: usize,

    /// Prior mean β₀ for the coefficients.
    beta_prior_mean: Vector<f64>,

    /// Prior precision λ; the prior covariance is (1/λ)·I.
    beta_prior_precision: f64,

    /// `InverseGamma` shape for the noise variance prior.
    noise_alpha: f64,

    /// `InverseGamma` scale for the noise variance prior.
    noise_beta: f64,

    /// Number of draws kept after burn-in.
    n_draws: usize,

    /// Warmup iterations discarded before keeping draws.
    burn_in: usize,

    /// Seed for the draw stream.
    seed: u64,

    /// Coefficient draws, one row per kept iteration (after fitting).
    coefficient_draws: Option<Matrix<f64>>,

    /// Noise variance draws aligned with the coefficient rows.
    sigma2_draws: Option<Vector<f64>>,

    /// Column means of the kept coefficient draws.
    posterior_mean: Option<Vector<f64>>,
}

impl BayesianLinearRegression {
    /// Creates a model with weakly informative priors.
    ///
    /// Priors default to β ~ N(0, 10000·I) and σ² ~ InvGamma(0.001, 0.001),
    /// with 1000 kept draws after 200 burn-in iterations.
    #[must_use]
    pub fn new(n_features: usize) -> Self {
        Self {
            n_features,
            beta_prior_mean: Vector::zeros(n_features),
            beta_prior_precision: 0.0001, // prior variance 10,000 per coefficient
            noise_alpha: 0.001,
            noise_beta: 0.001,
            n_draws: 1000,
            burn_in: 200,
            seed: 42,
            coefficient_draws: None,
            sigma2_draws: None,
            posterior_mean: None,
        }
    }

    /// Replaces the weak defaults with explicit prior parameters.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when the prior mean length disagrees
    /// with the feature count, and `InvalidHyperparameter` for a
    /// non-positive precision or non-positive `InverseGamma` shape/scale.
    ///
    /// # Example
    ///
    /// ```
    /// use tasar::bayesian::BayesianLinearRegression;
    ///
    /// // Ridge-like prior with unit precision on every coefficient.
    /// let model = BayesianLinearRegression::new(3)
    ///     .with_prior(vec![0.0, 0.0, 0.0], 1.0, 3.0, 2.0)
    ///     .expect("valid prior parameters");
    /// ```
    pub fn with_prior(
        self,
        beta_prior_mean: Vec<f64>,
        beta_prior_precision: f64,
        noise_alpha: f64,
        noise_beta: f64,
    ) -> Result<Self> {
        if beta_prior_mean.len() != self.n_features {
            return Err(TasarError::DimensionMismatch {
                expected: format!("{} prior means", self.n_features),
                actual: format!("{} elements in beta_prior_mean", beta_prior_mean.len()),
            });
        }

        if !beta_prior_precision.is_finite() || beta_prior_precision <= 0.0 {
            return Err(TasarError::invalid_hyperparameter(
                "beta_prior_precision",
                beta_prior_precision,
                "a finite precision > 0",
            ));
        }

        if !noise_alpha.is_finite()
            || !noise_beta.is_finite()
            || noise_alpha <= 0.0
            || noise_beta <= 0.0
        {
            return Err(TasarError::invalid_hyperparameter(
                "noise_alpha or noise_beta",
                format!("alpha={noise_alpha}, beta={noise_beta}"),
                "both finite and > 0",
            ));
        }

        Ok(Self {
            beta_prior_mean: Vector::from_vec(beta_prior_mean),
            beta_prior_precision,
            noise_alpha,
            noise_beta,
            ..self
        })
    }

    /// Sets the number of draws kept after burn-in.
    #[must_use]
    pub fn with_draws(mut self, n_draws: usize) -> Self {
        self.n_draws = n_draws;
        self
    }

    /// Sets the number of warmup iterations discarded before keeping draws.
    #[must_use]
    pub fn with_burn_in(mut self, burn_in: usize) -> Self {
        self.burn_in = burn_in;
        self
    }

    /// Sets the seed for the draw stream.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of design columns the model expects.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Returns true when the sampler has run.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.posterior_mean.is_some()
    }

    /// Posterior mean coefficients (available after fitting).
    #[must_use]
    pub fn posterior_mean(&self) -> Option<&Vector<f64>> {
        self.posterior_mean.as_ref()
    }

    /// Kept coefficient draws, one row per iteration (available after fitting).
    #[must_use]
    pub fn draws(&self) -> Option<&Matrix<f64>> {
        self.coefficient_draws.as_ref()
    }

    /// Kept noise variance draws (available after fitting).
    #[must_use]
    pub fn sigma2_draws(&self) -> Option<&Vector<f64>> {
        self.sigma2_draws.as_ref()
    }

    /// Runs the Gibbs sampler on the design matrix `x` and response `y`.
    ///
    /// σ² starts at the OLS estimate and the chain alternates the two
    /// conjugate conditionals, discarding `burn_in` iterations before
    /// keeping `n_draws` draws.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for shape disagreements, `EmptyInput`
    /// for zero rows, `Underdetermined` when observations do not exceed
    /// parameters, `InvalidHyperparameter` for zero draws, and
    /// `DegenerateDesign` when X'X has no Cholesky factor.
    pub fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        let n = x.n_rows();
        let p = x.n_cols();

        if p != self.n_features {
            return Err(TasarError::DimensionMismatch {
                expected: format!("{} features in X", self.n_features),
                actual: format!("{p} columns in X"),
            });
        }
        if n != y.len() {
            return Err(TasarError::DimensionMismatch {
                expected: format!("{n} samples in X"),
                actual: format!("{} samples in y", y.len()),
            });
        }
        if n == 0 {
            return Err(TasarError::empty_input("fit with zero samples"));
        }
        if n <= p {
            return Err(TasarError::Underdetermined {
                n_samples: n,
                n_params: p,
            });
        }
        if self.n_draws == 0 {
            return Err(TasarError::invalid_hyperparameter("n_draws", 0, "> 0"));
        }

        // Both conditionals reuse XᵀX and Xᵀy, so compute them once.
        let xt = x.transpose();
        let xtx = xt.matmul(x).map_err(TasarError::from)?;
        let xty = xt.matvec(y).map_err(TasarError::from)?;

        // Start σ² at the OLS estimate; burn-in forgets the starting point.
        let beta_ols = xtx
            .cholesky_solve(&xty)
            .map_err(|_| TasarError::DegenerateDesign {
                reason: "X'X is not positive definite (collinear or constant columns)".to_string(),
            })?;
        let fitted_ols = x.matvec(&beta_ols).map_err(TasarError::from)?;
        let rss_ols = (y - &fitted_ols).norm_squared();
        // The floor keeps an exact interpolation from zeroing the data precision.
        let mut sigma2 = (rss_ols / (n - p) as f64).max(1e-12);

        let prior_precision = Matrix::eye(p).mul_scalar(self.beta_prior_precision);
        let prior_rhs = self.beta_prior_mean.mul_scalar(self.beta_prior_precision);

        let mut rng = SeededRng::new(self.seed);
        let mut kept = Matrix::zeros(self.n_draws, p);
        let mut kept_sigma2 = Vector::zeros(self.n_draws);

        let total = self.burn_in + self.n_draws;
        for iter in 0..total {
            // β | σ², y: posterior precision Aₙ = λI + XᵀX/σ², with the
            // mean solving Aₙmₙ = λβ₀ + Xᵀy/σ².
            let data_precision = xtx.mul_scalar(1.0 / sigma2);
            let posterior_precision = prior_precision
                .add(&data_precision)
                .map_err(TasarError::from)?;
            let rhs = &prior_rhs + &xty.mul_scalar(1.0 / sigma2);

            let chol = posterior_precision.cholesky_factor().map_err(|_| {
                TasarError::DegenerateDesign {
                    reason: "posterior precision is not positive definite".to_string(),
                }
            })?;
            let mean = chol
                .transpose()
                .solve_upper_triangular(&chol.solve_lower_triangular(&rhs)?)
                .map_err(TasarError::from)?;

            // Draw β = mₙ + L⁻ᵀz with z standard normal; L⁻ᵀz has
            // covariance (LLᵀ)⁻¹ = Aₙ⁻¹.
            let z = Vector::from_vec((0..p).map(|_| rng.standard_normal()).collect());
            let noise = chol
                .transpose()
                .solve_upper_triangular(&z)
                .map_err(TasarError::from)?;
            let beta = &mean + &noise;

            // σ² | β, y: conjugate InverseGamma update with the current RSS.
            let fitted = x.matvec(&beta).map_err(TasarError::from)?;
            let rss = (y - &fitted).norm_squared();
            sigma2 = rng.inverse_gamma(
                self.noise_alpha + n as f64 / 2.0,
                self.noise_beta + rss / 2.0,
            );

            if iter >= self.burn_in {
                let k = iter - self.burn_in;
                for j in 0..p {
                    kept.set(k, j, beta[j]);
                }
                kept_sigma2[k] = sigma2;
            }
        }

        let mut post_mean = Vector::zeros(p);
        for j in 0..p {
            post_mean[j] = kept.column(j).mean();
        }

        self.coefficient_draws = Some(kept);
        self.sigma2_draws = Some(kept_sigma2);
        self.posterior_mean = Some(post_mean);
        Ok(())
    }

    /// Summarizes the kept draws coefficient by coefficient.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` when the sampler has not run.
    pub fn posterior_summary(&self) -> Result<PosteriorSummary> {
        let draws = self.coefficient_draws.as_ref().ok_or_else(not_fitted)?;
        let sigma2 = self.sigma2_draws.as_ref().ok_or_else(not_fitted)?;

        let mut coefficients = Vec::with_capacity(draws.n_cols());
        for j in 0..draws.n_cols() {
            let column = draws.column(j);
            coefficients.push(CoefficientPosterior::from_draws(column.as_slice())?);
        }
        let noise_variance = CoefficientPosterior::from_draws(sigma2.as_slice())?;

        Ok(PosteriorSummary {
            coefficients,
            noise_variance,
            n_draws: draws.n_rows(),
        })
    }

    /// Predicts responses for new rows using the posterior mean.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit` and `DimensionMismatch` when the
    /// column count disagrees with the training design.
    pub fn predict(&self, x_test: &Matrix<f64>) -> Result<Vector<f64>> {
        let posterior_mean = self.posterior_mean.as_ref().ok_or_else(not_fitted)?;

        if x_test.n_cols() != self.n_features {
            return Err(TasarError::DimensionMismatch {
                expected: format!("{} features", self.n_features),
                actual: format!("{} columns in x_test", x_test.n_cols()),
            });
        }

        x_test.matvec(posterior_mean).map_err(TasarError::from)
    }
}

fn not_fitted() -> TasarError {
    TasarError::NotFitted {
        what: "BayesianLinearRegression".to_string(),
    }
}

/// Posterior location, spread, and credible interval for one quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientPosterior {
    /// Mean of the kept draws.
    pub mean: f64,
    /// Sample standard deviation of the kept draws.
    pub std_dev: f64,
    /// 2.5% draw quantile.
    pub ci_lower: f64,
    /// 97.5% draw quantile.
    pub ci_upper: f64,
    /// Effective sample size of the chain.
    pub ess: f64,
}

impl CoefficientPosterior {
    fn from_draws(draws: &[f64]) -> Result<Self> {
        let v = Vector::from_slice(draws);
        let qs = stats::quantiles(draws, &[0.025, 0.975])?;
        Ok(Self {
            mean: v.mean(),
            std_dev: v.std_dev(),
            ci_lower: qs[0],
            ci_upper: qs[1],
            ess: effective_sample_size(draws),
        })
    }
}

/// Per-coefficient posterior summaries plus the noise variance chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSummary {
    /// One summary per design column, in column order.
    pub coefficients: Vec<CoefficientPosterior>,
    /// Summary of the σ² chain.
    pub noise_variance: CoefficientPosterior,
    /// Number of kept draws behind every summary.
    pub n_draws: usize,
}

impl fmt::Display for PosteriorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Posterior Summary ===")?;
        writeln!(f, "Draws: {}", self.n_draws)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<10}  {:>12} {:>12}  {:>12} {:>12} {:>8}",
            "term", "mean", "std", "ci 2.5%", "ci 97.5%", "ess"
        )?;
        for (j, c) in self.coefficients.iter().enumerate() {
            writeln!(
                f,
                "{:<10}  {:>12.6} {:>12.6}  {:>12.6} {:>12.6} {:>8.1}",
                format!("beta[{j}]"),
                c.mean,
                c.std_dev,
                c.ci_lower,
                c.ci_upper,
                c.ess
            )?;
        }
        let s = &self.noise_variance;
        writeln!(
            f,
            "{:<10}  {:>12.6} {:>12.6}  {:>12.6} {:>12.6} {:>8.1}",
            "sigma^2", s.mean, s.std_dev, s.ci_lower, s.ci_upper, s.ess
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "regression_tests.rs"]
mod tests;
