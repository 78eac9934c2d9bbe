//! Weighted quantiles by cumulative weight search

use nalgebra::DMatrix;
use survey_core::utils::sort_weighted;
use survey_core::{Error, Result, Statistic};

/// Weighted quantiles of each column at fixed levels
///
/// For level `q` the column is sorted (weights follow their values), the
/// cumulative weights `cw` are formed and the first position with
/// `cw >= q * cw[last]` is located by binary search:
///
/// - at the last position (or past it) the column maximum is returned
/// - an exact hit on the target averages that value with the next one
/// - otherwise the value at that position is returned
///
/// Output is column-major: all levels of column 0, then column 1, and so on.
///
/// ```rust
/// use nalgebra::DMatrix;
/// use survey_core::Statistic;
/// use survey_variance::WeightedQuantile;
///
/// let data = DMatrix::from_column_slice(4, 1, &[4.0, 1.0, 3.0, 2.0]);
/// let median = WeightedQuantile::median();
/// assert_eq!(median.evaluate(&[1.0; 4], &data).unwrap(), vec![2.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedQuantile {
    levels: Vec<f64>,
}

impl WeightedQuantile {
    /// Create quantiles at `levels`, each in [0, 1]
    pub fn new(levels: &[f64]) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one quantile level is required".to_string(),
            ));
        }
        if let Some(&bad) = levels.iter().find(|q| !(0.0..=1.0).contains(*q)) {
            return Err(Error::invalid_quantile(bad));
        }
        Ok(Self {
            levels: levels.to_vec(),
        })
    }

    /// Single level at 0.5
    pub fn median() -> Self {
        Self { levels: vec![0.5] }
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    fn column_quantiles(&self, column: &[f64], weights: &[f64], out: &mut Vec<f64>) {
        let (sorted, sorted_weights) = sort_weighted(column, weights);
        let n = sorted.len();
        let cw: Vec<f64> = sorted_weights
            .iter()
            .scan(0.0, |acc, w| {
                *acc += w;
                Some(*acc)
            })
            .collect();
        let total = cw[n - 1];

        for &q in &self.levels {
            let target = q * total;
            let pos = cw.partition_point(|&c| c < target);
            let value = if pos + 1 >= n {
                sorted[n - 1]
            } else if cw[pos] == target {
                (sorted[pos] + sorted[pos + 1]) / 2.0
            } else {
                sorted[pos]
            };
            out.push(value);
        }
    }
}

impl Statistic for WeightedQuantile {
    fn name(&self) -> &'static str {
        "quantile"
    }

    fn output_len(&self, columns: usize) -> usize {
        columns * self.levels.len()
    }

    fn evaluate(&self, weights: &[f64], data: &DMatrix<f64>) -> Result<Vec<f64>> {
        if data.nrows() == 0 {
            return Err(Error::empty_input());
        }
        if weights.len() != data.nrows() {
            return Err(Error::size_mismatch(data.nrows(), weights.len(), "weights"));
        }
        let mut out = Vec::with_capacity(self.output_len(data.ncols()));
        for column in data.column_iter() {
            let values: Vec<f64> = column.iter().copied().collect();
            self.column_quantiles(&values, weights, &mut out);
        }
        Ok(out)
    }
}
