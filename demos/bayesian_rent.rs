//! Bayesian Rent Regression with Gibbs Sampling
//!
//! Fits the rent model by Gibbs sampling under a conjugate
//! Normal-InverseGamma prior, showing posterior summaries against the
//! simulated truth, the pull of a strong prior, and chain diagnostics.
//!
//! # Run
//!
//! ```bash
//! cargo run --example bayesian_rent
//! ```

use tasar::bayesian::convergence::{autocorrelation, effective_sample_size, mcse};
use tasar::prelude::*;

fn main() {
    println!("Bayesian Rent Regression with Gibbs Sampling");
    println!("============================================\n");

    example_1_posterior_vs_truth();
    println!("\n{}", "═".repeat(64));
    example_2_prior_shrinkage();
    println!("\n{}", "═".repeat(64));
    example_3_chain_diagnostics();
}

/// Builds the explicit design matrix with a leading intercept column.
fn design_with_intercept(table: &PropertyTable) -> (Matrix<f64>, Vector<f64>) {
    let features = table
        .select(&["sqft", "bedrooms", "bathrooms"])
        .expect("Feature columns present");
    let x_raw = features.to_matrix();
    let (n, k) = x_raw.shape();
    let mut data = Vec::with_capacity(n * (k + 1));
    for i in 0..n {
        data.push(1.0);
        for j in 0..k {
            data.push(x_raw.get(i, j));
        }
    }
    (
        Matrix::from_vec(n, k + 1, data).expect("Design dimensions are valid"),
        table.column("rent").expect("Rent column present").clone(),
    )
}

/// Example 1: weak prior, posterior centered on the simulated truth
fn example_1_posterior_vs_truth() {
    println!("EXAMPLE 1: Posterior vs Simulated Truth");
    println!("{}", "─".repeat(64));

    let generator = ListingGenerator::new(150).with_seed(42).with_noise_std(100.0);
    let listings = generator.generate().expect("Generator settings are valid");
    let (x, y) = design_with_intercept(&listings);

    let mut model = BayesianLinearRegression::new(4).with_seed(42);
    model.fit(&x, &y).expect("Sampler runs");

    let summary = model.posterior_summary().expect("Model is fitted");
    println!("\n{summary}\n");

    println!("  Posterior means against the generator:");
    println!("  {:>10} {:>12} {:>12}", "term", "posterior", "true");
    for (j, (name, truth)) in generator.true_coefficients().iter().enumerate() {
        println!(
            "  {:>10} {:>12.3} {:>12.1}",
            name, summary.coefficients[j].mean, truth
        );
    }
    println!("\n  With 150 listings and a weak prior, the draws center on the");
    println!("  coefficients the listings were simulated from.");
}

/// Example 2: a strong zero-centered prior pulls weakly identified terms
fn example_2_prior_shrinkage() {
    println!("EXAMPLE 2: Prior Shrinkage");
    println!("{}", "─".repeat(64));

    let listings = ListingGenerator::new(150)
        .with_seed(42)
        .with_noise_std(100.0)
        .generate()
        .expect("Generator settings are valid");
    let (x, y) = design_with_intercept(&listings);

    let mut weak = BayesianLinearRegression::new(4).with_seed(42);
    weak.fit(&x, &y).expect("Sampler runs");

    let mut strong = BayesianLinearRegression::new(4)
        .with_prior(vec![0.0; 4], 1.0, 0.001, 0.001)
        .expect("Prior settings are valid")
        .with_seed(42);
    strong.fit(&x, &y).expect("Sampler runs");

    let weak_mean = weak.posterior_mean().expect("Fitted");
    let strong_mean = strong.posterior_mean().expect("Fitted");

    println!("\n  Posterior means under N(0, 10000I) vs N(0, I) priors:");
    println!("  {:>10} {:>12} {:>12}", "term", "weak", "strong");
    for (j, name) in ["intercept", "sqft", "bedrooms", "bathrooms"].iter().enumerate() {
        println!("  {:>10} {:>12.3} {:>12.3}", name, weak_mean[j], strong_mean[j]);
    }

    println!("\n  The sqft slope barely moves: thousands of square-feet values");
    println!("  identify it far more precisely than the prior can fight.");
    println!("  The intercept is weakly identified at this sample size, so the");
    println!("  unit-variance prior drags it toward zero.");
}

/// Example 3: effective sample size and autocorrelation of the chains
fn example_3_chain_diagnostics() {
    println!("EXAMPLE 3: Chain Diagnostics");
    println!("{}", "─".repeat(64));

    let listings = ListingGenerator::new(150)
        .with_seed(42)
        .with_noise_std(100.0)
        .generate()
        .expect("Generator settings are valid");
    let (x, y) = design_with_intercept(&listings);

    let mut model = BayesianLinearRegression::new(4).with_seed(42);
    model.fit(&x, &y).expect("Sampler runs");

    let draws = model.draws().expect("Fitted");
    let names = ["intercept", "sqft", "bedrooms", "bathrooms"];

    println!("\n  {:>10} {:>8} {:>8} {:>10}", "chain", "ess", "rho(1)", "mcse");
    for (j, name) in names.iter().enumerate() {
        let chain = draws.column(j);
        println!(
            "  {:>10} {:>8.0} {:>8.3} {:>10.4}",
            name,
            effective_sample_size(chain.as_slice()),
            autocorrelation(chain.as_slice(), 1),
            mcse(chain.as_slice())
        );
    }
    let sigma2 = model.sigma2_draws().expect("Fitted");
    println!(
        "  {:>10} {:>8.0} {:>8.3} {:>10.4}",
        "sigma^2",
        effective_sample_size(sigma2.as_slice()),
        autocorrelation(sigma2.as_slice(), 1),
        mcse(sigma2.as_slice())
    );

    println!("\n  Conjugate Gibbs redraws the whole coefficient block each");
    println!("  sweep, so the chains mix almost like independent samples.");
}
