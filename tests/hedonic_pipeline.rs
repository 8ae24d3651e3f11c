//! End-to-end tests for the rent regression workflow.
//!
//! These tests drive full pipelines: simulate listings, trim the tails,
//! fit the hedonic model, and inspect residuals and posterior draws.

use std::io::Write;

use tasar::prelude::*;

fn rent_model() -> HedonicModel {
    HedonicModel::new("rent")
        .feature("sqft")
        .feature("bedrooms")
        .feature("bathrooms")
}

#[test]
fn test_clean_pipeline_recovers_true_model() {
    let generator = ListingGenerator::new(400).with_seed(42).with_noise_std(100.0);
    let listings = generator.generate().expect("generator settings are valid");

    let fit = rent_model().fit(&listings).expect("clean simulated data fits");

    // 400 listings with noise std 100 pin every coefficient down tightly.
    for (name, truth) in generator.true_coefficients() {
        let estimate = fit.coefficient(name).expect("parameter present");
        let tolerance = match name {
            "intercept" => 100.0,
            "sqft" => 0.1,
            _ => 30.0,
        };
        assert!(
            (estimate - truth).abs() < tolerance,
            "{name}: estimated {estimate}, true {truth}"
        );
    }
    assert!(fit.r_squared() > 0.95, "R² too low: {}", fit.r_squared());

    // Residuals of the OLS fit center on zero and look Gaussian.
    let diag = ResidualDiagnostics::from_residuals(fit.residuals()).expect("non-empty residuals");
    assert_eq!(diag.n(), fit.n_observations());
    assert!(diag.summary().mean.abs() < 1e-6);
    let (_, p) = diag.jarque_bera();
    assert!(p > 1e-4, "Gaussian residuals rejected: p = {p}");
}

#[test]
fn test_trimming_removes_corrupted_listings() {
    let generator = ListingGenerator::new(400)
        .with_seed(7)
        .with_noise_std(100.0)
        .with_outlier_rate(0.05);
    let listings = generator.generate().expect("generator settings are valid");

    // Rents corrupted by a factor of ten wreck the raw fit.
    let raw_fit = rent_model().fit(&listings).expect("raw data still fits");

    let trimmed = QuantileTrimmer::new()
        .band("rent", 0.10, 0.90)
        .apply(&listings)
        .expect("valid band");
    assert!(
        (40..=120).contains(&trimmed.n_dropped),
        "unexpected drop count: {}",
        trimmed.n_dropped
    );

    // Every corrupted row sits far outside the band, so none survive.
    let rent = trimmed.table.column("rent").expect("column");
    let sqft = trimmed.table.column("sqft").expect("column");
    let beds = trimmed.table.column("bedrooms").expect("column");
    let baths = trimmed.table.column("bathrooms").expect("column");
    for i in 0..trimmed.table.n_rows() {
        let model = 500.0 + 1.8 * sqft[i] + 150.0 * beds[i] + 120.0 * baths[i];
        let ratio = rent[i] / model;
        assert!(
            ratio > 0.5 && ratio < 2.0,
            "corrupted row survived trimming: rent {} vs model {model}",
            rent[i]
        );
    }

    let fit = rent_model().fit(&trimmed.table).expect("trimmed data fits");
    assert!(fit.r_squared() > 0.9, "R² too low: {}", fit.r_squared());
    assert!(
        fit.r_squared() > raw_fit.r_squared(),
        "trimming did not improve the fit: {} vs {}",
        fit.r_squared(),
        raw_fit.r_squared()
    );
}

#[test]
fn test_csv_round_trip_preserves_fit() {
    let listings = ListingGenerator::new(60)
        .with_seed(11)
        .generate()
        .expect("generator settings are valid");

    // Display formatting of f64 round-trips exactly through parse.
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "rent,sqft,bedrooms,bathrooms").expect("write header");
    let rent = listings.column("rent").expect("column");
    let sqft = listings.column("sqft").expect("column");
    let beds = listings.column("bedrooms").expect("column");
    let baths = listings.column("bathrooms").expect("column");
    for i in 0..listings.n_rows() {
        writeln!(file, "{},{},{},{}", rent[i], sqft[i], beds[i], baths[i]).expect("write row");
    }
    file.flush().expect("flush");

    let loaded =
        PropertyTable::from_csv_path(file.path(), &["rent", "sqft", "bedrooms", "bathrooms"])
            .expect("CSV loads");
    assert_eq!(loaded.shape(), listings.shape());

    let direct = rent_model().fit(&listings).expect("in-memory fit");
    let via_csv = rent_model().fit(&loaded).expect("CSV fit");
    assert_eq!(
        direct.coefficients().as_slice(),
        via_csv.coefficients().as_slice(),
        "fits diverged across the CSV round trip"
    );
}

#[test]
fn test_bayesian_agrees_with_ols() {
    let listings = ListingGenerator::new(200)
        .with_seed(42)
        .with_noise_std(100.0)
        .generate()
        .expect("generator settings are valid");

    // Explicit design with an intercept column for the Gibbs sampler.
    let features = listings
        .select(&["sqft", "bedrooms", "bathrooms"])
        .expect("feature columns present");
    let x_raw = features.to_matrix();
    let (n, k) = x_raw.shape();
    let mut data = Vec::with_capacity(n * (k + 1));
    for i in 0..n {
        data.push(1.0);
        for j in 0..k {
            data.push(x_raw.get(i, j));
        }
    }
    let x = Matrix::from_vec(n, k + 1, data).expect("design dimensions");
    let y = listings.column("rent").expect("column").clone();

    let mut bayes = BayesianLinearRegression::new(4).with_seed(42);
    bayes.fit(&x, &y).expect("sampler runs");

    let ols = rent_model().fit(&listings).expect("OLS fit");
    let posterior = bayes.posterior_mean().expect("fitted");

    // Under the weak default prior the posterior mean sits on the OLS
    // solution for the well-identified slopes.
    let sqft_ols = ols.coefficient("sqft").expect("parameter present");
    assert!(
        (posterior[1] - sqft_ols).abs() < 0.1,
        "sqft: posterior {} vs OLS {sqft_ols}",
        posterior[1]
    );

    let fitted = bayes.predict(&x).expect("posterior predictions");
    let r2 = r_squared(&fitted, &y);
    assert!(r2 > 0.95, "posterior predictions track the data: {r2}");

    let summary = bayes.posterior_summary().expect("fitted");
    let sqft_posterior = &summary.coefficients[1];
    assert!(sqft_posterior.ci_lower < sqft_posterior.ci_upper);
    assert!(sqft_posterior.ess > 10.0);
}

#[test]
fn test_fit_survives_serde() {
    let listings = ListingGenerator::new(50)
        .with_seed(3)
        .generate()
        .expect("generator settings are valid");
    let fit = rent_model().fit(&listings).expect("fit");

    let json = serde_json::to_string(&fit).expect("serialize");
    let restored: HedonicFit = serde_json::from_str(&json).expect("deserialize");

    let fresh = ListingGenerator::new(20)
        .with_seed(4)
        .generate()
        .expect("generator settings are valid");
    let before = fit.predict(&fresh).expect("predict");
    let after = restored.predict(&fresh).expect("predict");
    assert_eq!(before.as_slice(), after.as_slice());
}
