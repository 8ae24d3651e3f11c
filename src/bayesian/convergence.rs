//! Convergence diagnostics for posterior draws.
//!
//! Implements effective sample size (batch means), autocorrelation, and
//! Monte Carlo standard error for judging chain quality.
//!
//! Reference: Gelman et al. (2013), "Bayesian Data Analysis", Ch. 11

/// Effective sample size of a chain, estimated by batch means.
///
/// Correlated draws carry less information than independent ones; ESS is
/// the equivalent number of independent draws. The estimate is capped at
/// the chain length, and chains shorter than 10 draws are returned as-is.
#[must_use]
pub fn effective_sample_size(draws: &[f64]) -> f64 {
    let n = draws.len();
    if n < 10 {
        return n as f64;
    }

    let batch_size = (n as f64).sqrt().ceil() as usize;
    let n_batches = n / batch_size;
    if n_batches < 2 {
        return n as f64;
    }

    let batch_means: Vec<f64> = (0..n_batches)
        .map(|i| {
            let start = i * batch_size;
            let end = ((i + 1) * batch_size).min(n);
            draws[start..end].iter().sum::<f64>() / (end - start) as f64
        })
        .collect();

    let grand_mean = draws.iter().sum::<f64>() / n as f64;

    let var_batch = batch_means
        .iter()
        .map(|m| (m - grand_mean).powi(2))
        .sum::<f64>()
        / (n_batches - 1) as f64;

    let var_sample = draws.iter().map(|x| (x - grand_mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    // ESS = n * var_sample / (batch_size * var_batch), capped at n.
    if var_batch > 0.0 {
        (n as f64 * var_sample / (batch_size as f64 * var_batch)).min(n as f64)
    } else {
        n as f64
    }
}

/// Autocorrelation of a chain at the given lag.
///
/// Returns 0 for lags at or beyond the chain length and for
/// near-constant chains.
#[must_use]
pub fn autocorrelation(draws: &[f64], lag: usize) -> f64 {
    let n = draws.len();
    if lag >= n {
        return 0.0;
    }

    let mean = draws.iter().sum::<f64>() / n as f64;
    let variance: f64 = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

    if variance < 1e-15 {
        return 0.0;
    }

    let covariance: f64 = draws[..n - lag]
        .iter()
        .zip(draws[lag..].iter())
        .map(|(x, y)| (x - mean) * (y - mean))
        .sum::<f64>()
        / n as f64;

    covariance / variance
}

/// Monte Carlo standard error of the chain mean.
///
/// Sample standard deviation divided by the square root of the effective
/// sample size. Infinite for chains shorter than two draws.
#[must_use]
pub fn mcse(draws: &[f64]) -> f64 {
    let n = draws.len();
    if n < 2 {
        return f64::INFINITY;
    }

    let mean = draws.iter().sum::<f64>() / n as f64;
    let variance = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    let ess = effective_sample_size(draws);
    if ess > 0.0 {
        variance.sqrt() / ess.sqrt()
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_chain_returns_length() {
        let draws = vec![1.0, 2.0, 3.0];
        assert_eq!(effective_sample_size(&draws), 3.0);
    }

    #[test]
    fn test_iid_chain_keeps_most_draws() {
        use crate::bayesian::sampler::SeededRng;
        let mut rng = SeededRng::new(42);
        let draws: Vec<f64> = (0..2000).map(|_| rng.uniform()).collect();
        let ess = effective_sample_size(&draws);
        assert!(ess > 500.0, "independent draws should keep a high ESS: {ess}");
        assert!(ess <= 2000.0);
    }

    #[test]
    fn test_run_structured_chain_loses_draws() {
        // Values held constant in runs of 25 are heavily autocorrelated.
        let draws: Vec<f64> = (0..1000)
            .map(|i| if (i / 25) % 2 == 0 { 0.0 } else { 1.0 })
            .collect();
        let ess = effective_sample_size(&draws);
        assert!(ess < 500.0, "correlated chain kept too many draws: {ess}");
        assert!(ess > 0.0);
    }

    #[test]
    fn test_constant_chain_ess_is_length() {
        let draws = vec![4.2; 100];
        assert_eq!(effective_sample_size(&draws), 100.0);
    }

    #[test]
    fn test_autocorrelation_lag_zero_is_one() {
        let draws = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((autocorrelation(&draws, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_autocorrelation_of_alternating_chain() {
        let draws: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let rho = autocorrelation(&draws, 1);
        assert!(rho < -0.9, "alternating chain should anticorrelate: {rho}");
    }

    #[test]
    fn test_autocorrelation_of_uniform_draws_is_low() {
        use crate::bayesian::sampler::SeededRng;
        let mut rng = SeededRng::new(42);
        let draws: Vec<f64> = (0..500).map(|_| rng.uniform()).collect();
        let rho = autocorrelation(&draws, 1);
        assert!(rho.abs() < 0.2, "lag-1 autocorrelation should be low: {rho}");
    }

    #[test]
    fn test_autocorrelation_constant_chain_is_zero() {
        let draws = vec![7.0; 50];
        assert_eq!(autocorrelation(&draws, 1), 0.0);
    }

    #[test]
    fn test_autocorrelation_beyond_length_is_zero() {
        let draws = vec![1.0, 2.0];
        assert_eq!(autocorrelation(&draws, 2), 0.0);
        assert_eq!(autocorrelation(&draws, 10), 0.0);
    }

    #[test]
    fn test_mcse_short_chain_is_infinite() {
        assert!(mcse(&[1.0]).is_infinite());
        assert!(mcse(&[]).is_infinite());
    }

    #[test]
    fn test_mcse_at_least_std_over_sqrt_n() {
        use crate::bayesian::sampler::SeededRng;
        let mut rng = SeededRng::new(8);
        let draws: Vec<f64> = (0..1000).map(|_| rng.standard_normal()).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let std = (draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 999.0).sqrt();
        let se = mcse(&draws);
        // ESS never exceeds n, so the MCSE never undercuts std / sqrt(n).
        assert!(se >= std / (draws.len() as f64).sqrt() - 1e-12);
        assert!(se.is_finite());
    }

    #[test]
    fn test_mcse_constant_chain_is_zero() {
        let draws = vec![3.0; 100];
        assert_eq!(mcse(&draws), 0.0);
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_ess_bounded(draws in prop::collection::vec(0.0..100.0f64, 10..500)) {
                let ess = effective_sample_size(&draws);
                prop_assert!(ess >= 0.0);
                prop_assert!(ess <= draws.len() as f64);
            }

            #[test]
            fn prop_autocorrelation_bounded(draws in prop::collection::vec(-10.0..10.0f64, 20..200)) {
                for lag in 1..5 {
                    let rho = autocorrelation(&draws, lag);
                    prop_assert!((-1.0..=1.0).contains(&rho), "autocorrelation out of bounds: {rho}");
                }
            }

            #[test]
            fn prop_mcse_nonnegative(draws in prop::collection::vec(0.0..100.0f64, 2..300)) {
                prop_assert!(mcse(&draws) >= 0.0);
            }
        }
    }
}
