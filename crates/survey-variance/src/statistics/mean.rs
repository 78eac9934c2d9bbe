//! Weighted column mean

use super::weighted_column_sums;
use nalgebra::DMatrix;
use survey_core::{Result, Statistic};

/// Weighted mean of each column: `(w · x) / Σw`
///
/// A zero weight sum yields NaN rather than an error, so a replicate that
/// removes every observation shows up in the covariance instead of aborting.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMean;

impl Statistic for WeightedMean {
    fn name(&self) -> &'static str {
        "mean"
    }

    fn output_len(&self, columns: usize) -> usize {
        columns
    }

    fn evaluate(&self, weights: &[f64], data: &DMatrix<f64>) -> Result<Vec<f64>> {
        let totals = weighted_column_sums(weights, data)?;
        let sum: f64 = weights.iter().sum();
        Ok(totals.iter().map(|t| t / sum).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_weights_give_arithmetic_mean() {
        let data = DMatrix::from_row_slice(4, 2, &[10.0, 1.0, 20.0, 2.0, 30.0, 3.0, 40.0, 4.0]);
        let mean = WeightedMean.evaluate(&[1.0; 4], &data).unwrap();
        assert_relative_eq!(mean[0], 25.0);
        assert_relative_eq!(mean[1], 2.5);
    }

    #[test]
    fn test_weighted_mean() {
        let data = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 6.0]);
        let mean = WeightedMean.evaluate(&[3.0, 0.0, 1.0], &data).unwrap();
        assert_relative_eq!(mean[0], 9.0 / 4.0);
    }

    #[test]
    fn test_weight_length_checked() {
        let data = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        assert!(WeightedMean.evaluate(&[1.0, 1.0], &data).is_err());
    }
}
