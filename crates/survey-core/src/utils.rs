//! Utility functions for working with labels and weighted slices

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Order two floats with NaN placed after every non-NaN value
fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Sort values together with their weights, ascending by value
///
/// NaN values are placed at the end. The sort is stable so tied values keep
/// their original relative order.
///
/// # Examples
///
/// ```rust
/// use survey_core::utils::sort_weighted;
///
/// let (values, weights) = sort_weighted(&[3.0, 1.0, 2.0], &[0.3, 0.1, 0.2]);
/// assert_eq!(values, vec![1.0, 2.0, 3.0]);
/// assert_eq!(weights, vec![0.1, 0.2, 0.3]);
/// ```
pub fn sort_weighted(values: &[f64], weights: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut pairs: Vec<(f64, f64)> = values.iter().copied().zip(weights.iter().copied()).collect();
    pairs.sort_by(|a, b| nan_last(a.0, b.0));
    pairs.into_iter().unzip()
}

/// Relabel arbitrary labels as dense indices `0..k`
///
/// Indices follow the sorted order of the unique labels, so only the grouping
/// of the input survives, not its values or first-occurrence order. Returns
/// the per-element index and the number of distinct labels.
///
/// # Examples
///
/// ```rust
/// use survey_core::utils::dense_labels;
///
/// let (codes, k) = dense_labels(&["b", "a", "b", "c"]);
/// assert_eq!(codes, vec![1, 0, 1, 2]);
/// assert_eq!(k, 3);
/// ```
pub fn dense_labels<T: Ord + Clone>(labels: &[T]) -> (Vec<usize>, usize) {
    let mut index: BTreeMap<T, usize> = labels.iter().cloned().map(|l| (l, 0)).collect();
    for (code, slot) in index.values_mut().enumerate() {
        *slot = code;
    }
    let codes = labels.iter().map(|l| index[l]).collect();
    (codes, index.len())
}
