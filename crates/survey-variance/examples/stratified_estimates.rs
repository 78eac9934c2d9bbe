//! Jackknife and bootstrap estimates for a small stratified cluster sample
//!
//! Run with `RUST_LOG=debug` to see the design and estimation events.

use nalgebra::DMatrix;
use survey_design::{CovMethod, SurveyDesign};
use survey_variance::{survey_mean, survey_median, survey_total, EstimationOptions};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let strata = ["east", "east", "east", "east", "west", "west", "west", "west", "west", "west"];
    let psu = [1, 1, 2, 2, 1, 1, 2, 2, 3, 3];
    let weights = vec![12.0, 12.0, 10.0, 10.0, 8.0, 8.0, 9.0, 9.0, 11.0, 11.0];
    let income = DMatrix::from_column_slice(
        10,
        1,
        &[31.0, 28.5, 40.2, 36.0, 22.4, 25.1, 29.9, 27.3, 35.6, 33.0],
    );

    println!("=== Delete-one jackknife ===");
    let design = SurveyDesign::builder()
        .strata(&strata)
        .cluster(&psu)
        .weights(weights.clone())
        .fpc(vec![0.05; 10])
        .build()?;
    let mean = survey_mean(&design, &income, EstimationOptions::default())?;
    let total = survey_total(&design, &income, EstimationOptions::default())?;
    println!("  mean  = {:.3} (se {:.3})", mean.estimate[0], mean.standard_error[0]);
    println!("  total = {:.1} (se {:.1})", total.estimate[0], total.standard_error[0]);

    println!("\n=== Stratified cluster bootstrap ===");
    let design = SurveyDesign::builder()
        .strata(&strata)
        .cluster(&psu)
        .weights(weights)
        .cov_method(CovMethod::Bootstrap)
        .seed(2024)
        .build()?;
    let options = EstimationOptions::default().with_replicates(500);
    let mean = survey_mean(&design, &income, options)?;
    let median = survey_median(&design, &income, options)?;
    println!("  mean   = {:.3} (se {:.3})", mean.estimate[0], mean.standard_error[0]);
    println!(
        "  median = {:.3} (se {:.3})",
        median[0].estimate,
        median[0].variance.sqrt()
    );

    Ok(())
}
