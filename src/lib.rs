//! Survey statistics with replicate-weight variance estimation
//!
//! Umbrella crate over the workspace:
//!
//! - [`survey_core`]: error type, the [`Statistic`] trait, matrix helpers
//! - [`survey_design`]: stratified cluster designs and replicate weights
//! - [`survey_variance`]: means, totals and quantiles with their covariance
//!
//! # Example
//!
//! ```rust
//! use survey_stats::prelude::*;
//!
//! let design = SurveyDesign::builder()
//!     .strata(&[0, 0, 1, 1])
//!     .cluster(&[0, 1, 2, 3])
//!     .build()
//!     .unwrap();
//! let data = DMatrix::from_column_slice(4, 1, &[10.0, 20.0, 30.0, 40.0]);
//!
//! let mean = survey_mean(&design, &data, EstimationOptions::default()).unwrap();
//! assert!((mean.covariance[(0, 0)] - 12.5).abs() < 1e-10);
//! ```

pub use survey_core;
pub use survey_design;
pub use survey_variance;

pub use survey_core::{Error, Result, Statistic};
pub use survey_design::{CovMethod, DesignConfig, SurveyDesign, SurveyDesignBuilder};
pub use survey_variance::{
    survey_mean, survey_median, survey_quantile, survey_total, EstimationOptions,
    MedianEstimate, SurveyEstimate, VarianceEstimator,
};

pub mod prelude {
    pub use nalgebra::{DMatrix, DVector};
    pub use survey_core::{Error, Result, Statistic};
    pub use survey_design::{CovMethod, DesignConfig, SurveyDesign};
    pub use survey_variance::{
        survey_mean, survey_median, survey_quantile, survey_total, EstimationOptions,
        MedianEstimate, SurveyEstimate, VarianceEstimator, WeightedMean, WeightedQuantile,
        WeightedTotal,
    };
}
