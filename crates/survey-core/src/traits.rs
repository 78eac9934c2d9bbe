//! Core traits for weighted survey statistics
//!
//! The variance engine only needs one capability from a statistic: evaluate
//! it on a data matrix under an arbitrary weight vector. Design weights give
//! the point estimate, replicate weights give the replicate values.

use crate::Result;
use nalgebra::DMatrix;

/// A weighted statistic evaluated column-wise on an n×p data matrix
pub trait Statistic {
    /// Short name used in log events
    fn name(&self) -> &'static str;

    /// Number of values produced for a data matrix with `columns` columns
    fn output_len(&self, columns: usize) -> usize;

    /// Evaluate the statistic under `weights`
    ///
    /// `weights` has one entry per row of `data`. The returned vector has
    /// `output_len(data.ncols())` entries.
    fn evaluate(&self, weights: &[f64], data: &DMatrix<f64>) -> Result<Vec<f64>>;
}

impl<S: Statistic + ?Sized> Statistic for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn output_len(&self, columns: usize) -> usize {
        (**self).output_len(columns)
    }

    fn evaluate(&self, weights: &[f64], data: &DMatrix<f64>) -> Result<Vec<f64>> {
        (**self).evaluate(weights, data)
    }
}
