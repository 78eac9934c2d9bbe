//! End-to-end variance estimation scenarios

use approx::assert_relative_eq;
use nalgebra::DMatrix;
use survey_core::{Error, Statistic};
use survey_design::{CovMethod, SurveyDesign};
use survey_variance::{
    survey_mean, survey_median, survey_quantile, survey_total, EstimationOptions,
    VarianceEstimator, WeightedMean, WeightedQuantile,
};

fn column(values: &[f64]) -> DMatrix<f64> {
    DMatrix::from_column_slice(values.len(), 1, values)
}

/// Single stratum, three clusters of two observations
fn three_cluster_design(method: CovMethod, seed: u64) -> SurveyDesign {
    SurveyDesign::builder()
        .cluster(&[0, 0, 1, 1, 2, 2])
        .weights(vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0])
        .cov_method(method)
        .seed(seed)
        .build()
        .unwrap()
}

#[test]
fn stratified_jackknife_mean_and_total() {
    let design = SurveyDesign::builder()
        .strata(&[0, 0, 1, 1])
        .cluster(&[0, 1, 2, 3])
        .weights(vec![1.0, 1.0, 1.0, 1.0])
        .cov_method_name("jack")
        .build()
        .unwrap();
    let data = column(&[10.0, 20.0, 30.0, 40.0]);

    let mean = survey_mean(&design, &data, EstimationOptions::default()).unwrap();
    assert_relative_eq!(mean.estimate[0], 25.0);
    assert_relative_eq!(mean.covariance[(0, 0)], 12.5, epsilon = 1e-10);

    let total = survey_total(&design, &data, EstimationOptions::default()).unwrap();
    assert_relative_eq!(total.estimate[0], 100.0);
    assert_relative_eq!(total.standard_error[0], 200f64.sqrt(), epsilon = 1e-10);
}

#[test]
fn unbalanced_jackknife_stratum_and_mse_centering() {
    let design = SurveyDesign::builder()
        .strata(&[0, 0, 0, 1, 1])
        .cluster(&[0, 1, 2, 3, 4])
        .weights(vec![1.0, 2.0, 1.5, 1.0, 3.0])
        .fpc(vec![0.1, 0.1, 0.1, 0.3, 0.3])
        .build()
        .unwrap();
    let data = column(&[1.0, 4.0, 2.0, 8.0, 5.0]);

    let centered = survey_mean(&design, &data, EstimationOptions::default()).unwrap();
    let mse = survey_mean(&design, &data, EstimationOptions::default().with_mse(true)).unwrap();

    assert_relative_eq!(centered.estimate[0], 4.117647058823529, epsilon = 1e-12);
    assert_relative_eq!(centered.covariance[(0, 0)], 0.13349034438570045, epsilon = 1e-12);
    assert_relative_eq!(mse.covariance[(0, 0)], 0.13484224991625504, epsilon = 1e-12);
    assert!((centered.covariance[(0, 0)] - 0.1349358472830516).abs() > 1e-4);
}

#[test]
fn bootstrap_covariance_is_nonnegative_and_matches_stderr() {
    let design = three_cluster_design(CovMethod::Bootstrap, 42);
    let data = DMatrix::from_row_slice(
        6,
        2,
        &[1.0, 5.0, 3.0, 2.0, 4.0, 8.0, 2.0, 1.0, 7.0, 3.0, 5.0, 6.0],
    );
    let options = EstimationOptions::default().with_replicates(50);

    for result in [
        survey_mean(&design, &data, options).unwrap(),
        survey_total(&design, &data, options).unwrap(),
    ] {
        assert_eq!(result.replicates, 50);
        for j in 0..2 {
            let var = result.covariance[(j, j)];
            assert!(var >= 0.0);
            assert_relative_eq!(var.sqrt(), result.standard_error[j], epsilon = 1e-12);
        }
        assert_relative_eq!(result.covariance[(0, 1)], result.covariance[(1, 0)], epsilon = 1e-9);
        assert!(result.pseudo_values.is_none());
    }
}

#[test]
fn bootstrap_is_reproducible_with_seed() {
    let data = column(&[1.0, 4.0, 2.0, 8.0, 5.0, 7.0]);
    let options = EstimationOptions::default().with_replicates(30);

    let a = survey_mean(&three_cluster_design(CovMethod::Bootstrap, 9), &data, options).unwrap();
    let b = survey_mean(&three_cluster_design(CovMethod::Bootstrap, 9), &data, options).unwrap();
    assert_eq!(a.covariance, b.covariance);
}

#[test]
fn mse_centering_never_shrinks_bootstrap_variance() {
    let design = three_cluster_design(CovMethod::Bootstrap, 5);
    let data = column(&[1.0, 4.0, 2.0, 8.0, 5.0, 7.0]);
    let options = EstimationOptions::default().with_replicates(40);

    let centered = survey_mean(&design, &data, options).unwrap();
    let mse = survey_mean(&design, &data, options.with_mse(true)).unwrap();
    assert!(mse.covariance[(0, 0)] + 1e-12 >= centered.covariance[(0, 0)]);
    assert_eq!(centered.estimate, mse.estimate);
}

#[test]
fn mean_bootstrap_runs_with_bsn() {
    let design = SurveyDesign::builder()
        .cluster(&[0, 1, 2, 3, 4, 5])
        .cov_method(CovMethod::MeanBootstrap)
        .seed(21)
        .build()
        .unwrap();
    let data = column(&[2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
    let options = EstimationOptions::default().with_replicates(25).with_bsn(4);

    let result = survey_mean(&design, &data, options).unwrap();
    assert_eq!(result.method, CovMethod::MeanBootstrap);
    assert_relative_eq!(result.estimate[0], 7.0);
    assert!(result.covariance[(0, 0)] >= 0.0);
}

#[test]
fn supplied_replicates_use_global_centering() {
    // The four delete-one jackknife columns of the stratified design above
    let reps = DMatrix::from_column_slice(
        4,
        4,
        &[
            0.0, 2.0, 1.0, 1.0, //
            2.0, 0.0, 1.0, 1.0, //
            1.0, 1.0, 0.0, 2.0, //
            1.0, 1.0, 2.0, 0.0,
        ],
    );
    let design = SurveyDesign::builder().replicate_weights(reps).build().unwrap();
    let data = column(&[10.0, 20.0, 30.0, 40.0]);

    let result = survey_mean(&design, &data, EstimationOptions::default()).unwrap();
    assert_relative_eq!(result.estimate[0], 25.0);
    // Deviations of ±2.5 scaled by (R - 1) / R = 3/4
    assert_relative_eq!(result.covariance[(0, 0)], 4.0 * 6.25 * 0.75, epsilon = 1e-10);
    assert!(result.pseudo_values.is_none());
}

#[test]
fn supplied_replicates_with_bootstrap_method() {
    let reps = DMatrix::from_column_slice(3, 2, &[2.0, 0.0, 1.0, 0.0, 2.0, 1.0]);
    let design = SurveyDesign::builder()
        .replicate_weights(reps)
        .cov_method(CovMethod::Bootstrap)
        .build()
        .unwrap();
    let data = column(&[1.0, 3.0, 5.0]);

    let result = survey_total(&design, &data, EstimationOptions::default()).unwrap();
    assert_eq!(result.replicates, 2);
    // Replicate totals 7 and 11 around their mean 9
    assert_relative_eq!(result.covariance[(0, 0)], 4.0, epsilon = 1e-12);

    let err = survey_total(&design, &data, EstimationOptions::default().with_replicates(3))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[test]
fn quantile_tie_and_extremes() {
    let design = SurveyDesign::builder()
        .strata(&[0, 0, 1, 1])
        .cluster(&[0, 1, 2, 3])
        .weights(vec![1.0; 4])
        .build()
        .unwrap();
    let data = column(&[3.0, 1.0, 4.0, 2.0]);

    let q = WeightedQuantile::new(&[0.5]).unwrap();
    assert_relative_eq!(q.evaluate(design.weights(), &data).unwrap()[0], 2.5);

    let result =
        survey_quantile(&design, &data, &[0.0, 0.5, 1.0], EstimationOptions::default()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].estimate.as_slice(), &[1.0, 2.5, 4.0]);
    assert_eq!(result[0].covariance.shape(), (3, 3));
}

#[test]
fn median_exposes_estimate_and_variance() {
    let design = three_cluster_design(CovMethod::Bootstrap, 3);
    let data = DMatrix::from_row_slice(
        6,
        2,
        &[1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0, 5.0, 50.0, 6.0, 60.0],
    );
    let medians = survey_median(&design, &data, EstimationOptions::default().with_replicates(20))
        .unwrap();
    assert_eq!(medians.len(), 2);
    for m in &medians {
        assert!(m.estimate.is_finite());
        assert!(m.variance >= 0.0);
    }
}

#[test]
fn estimator_accepts_statistic_by_reference() {
    let design = three_cluster_design(CovMethod::Jackknife, 0);
    let data = column(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let stat = WeightedMean;
    let by_ref = VarianceEstimator::new(&design).estimate(&&stat, &data).unwrap();
    let by_val = VarianceEstimator::new(&design).estimate(&stat, &data).unwrap();
    assert_eq!(by_ref, by_val);
}

#[test]
fn options_from_json() {
    let options: EstimationOptions =
        serde_json::from_str(r#"{"mse": true, "replicates": 12}"#).unwrap();
    let design = three_cluster_design(CovMethod::Bootstrap, 1);
    let data = column(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let result = survey_mean(&design, &data, options).unwrap();
    assert_eq!(result.replicates, 12);
}
