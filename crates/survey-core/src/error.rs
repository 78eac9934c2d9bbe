//! Error types for survey variance estimation
//!
//! Provides a unified error type for all survey-stats crates.

use thiserror::Error;

/// Core error type for survey estimation
#[derive(Error, Debug)]
pub enum Error {
    /// Covariance method name not recognized
    #[error("Method {0} not supported")]
    UnsupportedMethod(String),

    /// Replicate weights combined with strata or cluster labels
    #[error("Conflicting design: {0}")]
    ConflictingDesign(String),

    /// None of strata, cluster or weights were supplied
    #[error("At least one of strata, cluster, rep_weights, and weights must be supplied")]
    MissingDesign,

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for a quantile level outside [0, 1]
    pub fn invalid_quantile(q: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {q} must be in [0, 1]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for an index past the end of a collection
    pub fn out_of_range(index: usize, len: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "{context} index {index} out of range for {len} entries"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error is raised while validating configuration or inputs,
    /// before any estimation work starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMethod(_)
                | Self::ConflictingDesign(_)
                | Self::MissingDesign
                | Self::InvalidParameter(_)
                | Self::InvalidInput(_)
        )
    }
}
