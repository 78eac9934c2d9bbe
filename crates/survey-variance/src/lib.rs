//! Replicate-weight variance estimation for survey statistics
//!
//! This crate computes point estimates and covariance matrices for weighted
//! means, totals and quantiles under a stratified cluster [`SurveyDesign`]:
//!
//! - **Jackknife**: delete-one-cluster replicates, centered within stratum,
//!   with finite population correction
//! - **Bootstrap**: stratified cluster resampling, centered on the replicate
//!   mean (or the point estimate in mse mode)
//! - **Mean bootstrap**: bootstrap with resample counts averaged over `bsn` draws
//!
//! # Example
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use survey_design::{CovMethod, SurveyDesign};
//! use survey_variance::{survey_total, EstimationOptions};
//!
//! let design = SurveyDesign::builder()
//!     .cluster(&[0, 0, 1, 1, 2, 2])
//!     .cov_method(CovMethod::Bootstrap)
//!     .seed(11)
//!     .build()
//!     .unwrap();
//! let data = DMatrix::from_column_slice(6, 1, &[3.0, 4.0, 5.0, 1.0, 2.0, 6.0]);
//!
//! let total = survey_total(&design, &data, EstimationOptions::default().with_replicates(50)).unwrap();
//! assert_eq!(total.estimate[0], 21.0);
//! assert!(total.covariance[(0, 0)] >= 0.0);
//! ```
//!
//! [`SurveyDesign`]: survey_design::SurveyDesign

pub mod api;
mod estimator;
pub mod statistics;
mod types;

pub use api::{survey_mean, survey_median, survey_quantile, survey_total};
pub use estimator::VarianceEstimator;
pub use statistics::{WeightedMean, WeightedQuantile, WeightedTotal};
pub use types::{EstimationOptions, MedianEstimate, SurveyEstimate};
