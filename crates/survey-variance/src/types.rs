//! Result records and estimation options

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use survey_design::CovMethod;

/// Point estimate with its replicate-based covariance
///
/// `covariance` is m×m for m estimated values (1×1 for a single value) and
/// `standard_error` holds the square root of its diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyEstimate {
    /// Statistic evaluated with the design weights
    pub estimate: DVector<f64>,
    /// Variance-covariance matrix of the estimates
    pub covariance: DMatrix<f64>,
    /// Standard error of each estimate
    pub standard_error: DVector<f64>,
    /// Jackknife pseudo-values, one row per cluster
    ///
    /// Only present for the jackknife on a clustered design.
    pub pseudo_values: Option<DMatrix<f64>>,
    /// Number of replicates the covariance was built from
    pub replicates: usize,
    /// Replicate scheme that produced the covariance
    pub method: CovMethod,
}

impl SurveyEstimate {
    /// Number of estimated values
    pub fn len(&self) -> usize {
        self.estimate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimate.is_empty()
    }

    /// Variances (covariance diagonal)
    pub fn variance(&self) -> DVector<f64> {
        self.covariance.diagonal()
    }
}

/// Median of one data column with its variance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedianEstimate {
    pub estimate: f64,
    pub variance: f64,
}

/// Knobs of the variance engine
///
/// ```rust
/// use survey_variance::EstimationOptions;
///
/// let options = EstimationOptions::default().with_replicates(200).with_mse(true);
/// assert_eq!(options.replicates, Some(200));
/// assert!(options.mse);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationOptions {
    /// Center replicate values on the point estimate instead of their mean
    pub mse: bool,
    /// Number of bootstrap replicates
    pub replicates: Option<usize>,
    /// Draws averaged per mean-bootstrap replicate
    pub bsn: Option<usize>,
}

impl EstimationOptions {
    pub fn with_mse(mut self, mse: bool) -> Self {
        self.mse = mse;
        self
    }

    pub fn with_replicates(mut self, replicates: usize) -> Self {
        self.replicates = Some(replicates);
        self
    }

    pub fn with_bsn(mut self, bsn: usize) -> Self {
        self.bsn = Some(bsn);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_json() {
        let options: EstimationOptions =
            serde_json::from_str(r#"{"replicates": 100, "bsn": 5}"#).unwrap();
        assert!(!options.mse);
        assert_eq!(options.replicates, Some(100));
        assert_eq!(options.bsn, Some(5));
    }

    #[test]
    fn test_variance_is_diagonal() {
        let est = SurveyEstimate {
            estimate: DVector::from_vec(vec![1.0, 2.0]),
            covariance: DMatrix::from_row_slice(2, 2, &[4.0, 0.5, 0.5, 9.0]),
            standard_error: DVector::from_vec(vec![2.0, 3.0]),
            pseudo_values: None,
            replicates: 10,
            method: CovMethod::Bootstrap,
        };
        assert_eq!(est.len(), 2);
        assert_eq!(est.variance(), DVector::from_vec(vec![4.0, 9.0]));
    }
}
