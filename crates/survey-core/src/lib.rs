//! Core traits and types for survey variance estimation
//!
//! This crate holds the pieces shared by the design and variance crates:
//!
//! - [`Error`] and [`Result`]: the unified error type
//! - [`Statistic`]: the strategy trait the variance engine evaluates
//! - [`matrix`]: Gram matrices, standard errors and data alignment checks
//! - [`utils`]: dense relabeling and weighted sorting
//!
//! # Example
//!
//! ```rust
//! use survey_core::utils::dense_labels;
//!
//! let (strata, nstrat) = dense_labels(&[7, 7, 3, 3]);
//! assert_eq!(strata, vec![1, 1, 0, 0]);
//! assert_eq!(nstrat, 2);
//! ```

pub mod error;
pub mod matrix;
pub mod traits;
pub mod utils;

pub use error::{Error, Result};
pub use traits::Statistic;
