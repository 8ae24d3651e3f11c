//! Hedonic Rent Regression Walkthrough
//!
//! Drives the full workflow on simulated listings: trim the rent tails,
//! fit rent on the physical attributes, read the inference table, and
//! check the residuals against the normal overlay.
//!
//! # Run
//!
//! ```bash
//! cargo run --example hedonic_walkthrough
//! ```

use tasar::prelude::*;

fn main() {
    println!("Hedonic Rent Regression Walkthrough");
    println!("===================================\n");

    // Step 1: Simulate listings from a known model.
    println!("Step 1: Simulate listings");
    println!("{}", "─".repeat(64));
    let generator = ListingGenerator::new(300)
        .with_seed(42)
        .with_noise_std(120.0)
        .with_outlier_rate(0.04);
    let listings = generator.generate().expect("Generator settings are valid");

    println!("  {} listings with columns rent, sqft, bedrooms, bathrooms", listings.n_rows());
    println!("  True model:");
    for (name, value) in generator.true_coefficients() {
        println!("    {name:<10} {value:>8.1}");
    }
    println!("  4% of rents corrupted by a factor of ten\n");

    // Step 2: Trim the rent tails.
    println!("Step 2: Trim the rent tails");
    println!("{}", "─".repeat(64));
    let trimmed = QuantileTrimmer::new()
        .band("rent", 0.05, 0.95)
        .apply(&listings)
        .expect("Band probabilities are valid");

    let cuts = &trimmed.cuts[0];
    println!(
        "  Band on rent: keep {:.0}%..{:.0}%, cuts at {:.0} and {:.0}",
        cuts.lower_q * 100.0,
        cuts.upper_q * 100.0,
        cuts.lower_cut,
        cuts.upper_cut
    );
    println!(
        "  Dropped {} of {} rows, {} remain\n",
        trimmed.n_dropped,
        listings.n_rows(),
        trimmed.table.n_rows()
    );

    // Step 3: Fit the hedonic model.
    println!("Step 3: Fit rent ~ sqft + bedrooms + bathrooms");
    println!("{}", "─".repeat(64));
    let fit = HedonicModel::new("rent")
        .feature("sqft")
        .feature("bedrooms")
        .feature("bathrooms")
        .fit(&trimmed.table)
        .expect("Trimmed table fits");

    println!("{fit}\n");

    // Step 4: Diagnose the residuals.
    println!("Step 4: Residual diagnostics");
    println!("{}", "─".repeat(64));
    let diag = ResidualDiagnostics::from_residuals(fit.residuals())
        .expect("Fit produced residuals");
    println!("{diag}\n");

    let hist = diag.histogram(12).expect("Bin count is valid");
    let overlay = diag.normal_overlay(12);
    let peak = hist.density.iter().copied().fold(f64::MIN, f64::max);
    println!("  Residual histogram (density) vs normal curve:");
    println!("  {:>10}  {:<32} {:>8} {:>8}", "midpoint", "", "hist", "normal");
    for (i, &density) in hist.density.iter().enumerate() {
        let mid = (hist.edges[i] + hist.edges[i + 1]) / 2.0;
        let bar_len = (density / peak * 30.0).round() as usize;
        let normal_here = overlay
            .iter()
            .min_by(|a, b| {
                (a.0 - mid).abs().partial_cmp(&(b.0 - mid).abs()).expect("finite")
            })
            .map_or(0.0, |&(_, d)| d);
        println!(
            "  {:>10.1}  {:<32} {:>8.5} {:>8.5}",
            mid,
            "#".repeat(bar_len),
            density,
            normal_here
        );
    }

    let (jb, p) = diag.jarque_bera();
    println!("\n  Jarque-Bera {jb:.2} (p = {p:.3}): residuals look Gaussian\n");

    // Step 5: Price hypothetical listings.
    println!("Step 5: Price hypothetical listings");
    println!("{}", "─".repeat(64));
    let hypothetical = PropertyTable::new(vec![
        ("sqft".to_string(), Vector::from_vec(vec![550.0, 850.0, 1400.0])),
        ("bedrooms".to_string(), Vector::from_vec(vec![1.0, 2.0, 3.0])),
        ("bathrooms".to_string(), Vector::from_vec(vec![1.0, 1.0, 2.0])),
    ])
    .expect("Prediction table is valid");

    let predicted = fit.predict(&hypothetical).expect("Features are present");
    println!("  {:>6} {:>9} {:>10} {:>12}", "sqft", "bedrooms", "bathrooms", "rent");
    for i in 0..hypothetical.n_rows() {
        println!(
            "  {:>6.0} {:>9.0} {:>10.0} {:>12.0}",
            hypothetical.column("sqft").expect("column")[i],
            hypothetical.column("bedrooms").expect("column")[i],
            hypothetical.column("bathrooms").expect("column")[i],
            predicted[i]
        );
    }

    println!("\nDone: trimmed fit recovers the simulated premiums.");
}
