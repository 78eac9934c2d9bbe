//! Weighted statistics evaluated by the variance engine

mod mean;
mod quantile;
mod total;

pub use mean::WeightedMean;
pub use quantile::WeightedQuantile;
pub use total::WeightedTotal;

use nalgebra::{DMatrix, DVector};
use survey_core::{Error, Result};

/// `weights · data`, one weighted sum per column
pub(crate) fn weighted_column_sums(weights: &[f64], data: &DMatrix<f64>) -> Result<DVector<f64>> {
    if weights.len() != data.nrows() {
        return Err(Error::size_mismatch(data.nrows(), weights.len(), "weights"));
    }
    let w = DVector::from_column_slice(weights);
    Ok(data.tr_mul(&w))
}
