//! Dense matrix helpers shared by the design and variance crates

use crate::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Gram matrix `Xᵀ X` of a replicate matrix (rows = replicates)
pub fn gram(centered: &DMatrix<f64>) -> DMatrix<f64> {
    centered.tr_mul(centered)
}

/// Standard errors as the square root of the covariance diagonal
pub fn standard_errors(covariance: &DMatrix<f64>) -> DVector<f64> {
    covariance.diagonal().map(f64::sqrt)
}

/// Copy one column of `data` into its own n×1 matrix
pub fn column_matrix(data: &DMatrix<f64>, column: usize) -> Result<DMatrix<f64>> {
    if column >= data.ncols() {
        return Err(Error::out_of_range(column, data.ncols(), "Column"));
    }
    Ok(data.columns(column, 1).into_owned())
}

/// Check that a data matrix lines up with `n` design observations
pub fn check_data(data: &DMatrix<f64>, n: usize) -> Result<()> {
    if data.nrows() != n {
        return Err(Error::size_mismatch(n, data.nrows(), "data rows"));
    }
    if data.ncols() == 0 {
        return Err(Error::InvalidInput("data must have at least one column".to_string()));
    }
    Ok(())
}

/// Column means of a matrix restricted to the given rows
pub fn row_subset_mean(matrix: &DMatrix<f64>, rows: &[usize]) -> DVector<f64> {
    let mut acc = DVector::zeros(matrix.ncols());
    if rows.is_empty() {
        return acc;
    }
    for &r in rows {
        acc += matrix.row(r).transpose();
    }
    acc / rows.len() as f64
}
