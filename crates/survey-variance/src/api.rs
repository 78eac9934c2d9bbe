//! High-level API for survey means, totals and quantiles
//!
//! Each function validates its inputs, then runs the variance engine matching
//! the design's covariance method and returns immutable result records.

use crate::estimator::VarianceEstimator;
use crate::statistics::{WeightedMean, WeightedQuantile, WeightedTotal};
use crate::types::{EstimationOptions, MedianEstimate, SurveyEstimate};
use nalgebra::DMatrix;
use survey_core::matrix::{check_data, column_matrix};
use survey_core::Result;
use survey_design::SurveyDesign;

/// Weighted mean of every column of `data`
///
/// # Example
/// ```rust
/// use nalgebra::DMatrix;
/// use survey_design::SurveyDesign;
/// use survey_variance::{survey_mean, EstimationOptions};
///
/// let design = SurveyDesign::builder()
///     .strata(&[0, 0, 1, 1])
///     .cluster(&[0, 1, 2, 3])
///     .weights(vec![1.0; 4])
///     .build()
///     .unwrap();
/// let data = DMatrix::from_column_slice(4, 1, &[10.0, 20.0, 30.0, 40.0]);
///
/// let mean = survey_mean(&design, &data, EstimationOptions::default()).unwrap();
/// assert!((mean.estimate[0] - 25.0).abs() < 1e-12);
/// ```
pub fn survey_mean(
    design: &SurveyDesign,
    data: &DMatrix<f64>,
    options: EstimationOptions,
) -> Result<SurveyEstimate> {
    VarianceEstimator::new(design)
        .with_options(options)
        .estimate(&WeightedMean, data)
}

/// Weighted total of every column of `data`
pub fn survey_total(
    design: &SurveyDesign,
    data: &DMatrix<f64>,
    options: EstimationOptions,
) -> Result<SurveyEstimate> {
    VarianceEstimator::new(design)
        .with_options(options)
        .estimate(&WeightedTotal, data)
}

/// Weighted quantiles of each column at `levels`
///
/// Columns are estimated independently: entry `j` of the result holds one
/// estimate per level for column `j`, with the covariance across levels.
pub fn survey_quantile(
    design: &SurveyDesign,
    data: &DMatrix<f64>,
    levels: &[f64],
    options: EstimationOptions,
) -> Result<Vec<SurveyEstimate>> {
    let statistic = WeightedQuantile::new(levels)?;
    check_data(data, design.n_obs())?;
    let estimator = VarianceEstimator::new(design).with_options(options);

    (0..data.ncols())
        .map(|j| {
            let column = column_matrix(data, j)?;
            estimator.estimate(&statistic, &column)
        })
        .collect()
}

/// Weighted median of each column with its variance
pub fn survey_median(
    design: &SurveyDesign,
    data: &DMatrix<f64>,
    options: EstimationOptions,
) -> Result<Vec<MedianEstimate>> {
    let per_column = survey_quantile(design, data, &[0.5], options)?;
    Ok(per_column
        .into_iter()
        .map(|est| MedianEstimate {
            estimate: est.estimate[0],
            variance: est.covariance[(0, 0)],
        })
        .collect())
}
