//! Weighted column total

use super::weighted_column_sums;
use nalgebra::DMatrix;
use survey_core::{Result, Statistic};

/// Weighted sum of each column: `w · x`
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedTotal;

impl Statistic for WeightedTotal {
    fn name(&self) -> &'static str {
        "total"
    }

    fn output_len(&self, columns: usize) -> usize {
        columns
    }

    fn evaluate(&self, weights: &[f64], data: &DMatrix<f64>) -> Result<Vec<f64>> {
        Ok(weighted_column_sums(weights, data)?.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_weights_give_sum() {
        let data = DMatrix::from_row_slice(3, 2, &[1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
        let total = WeightedTotal.evaluate(&[1.0; 3], &data).unwrap();
        assert_relative_eq!(total[0], 6.0);
        assert_relative_eq!(total[1], -6.0);
    }

    #[test]
    fn test_weighted_total() {
        let data = DMatrix::from_column_slice(2, 1, &[5.0, 7.0]);
        let total = WeightedTotal.evaluate(&[2.0, 0.5], &data).unwrap();
        assert_relative_eq!(total[0], 13.5);
    }
}
