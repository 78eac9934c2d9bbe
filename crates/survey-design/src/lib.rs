//! Stratified cluster survey designs
//!
//! This crate turns raw strata, cluster and weight arrays into a validated,
//! densely indexed [`SurveyDesign`] and generates replicate weights from it:
//!
//! - **Jackknife**: delete one cluster, reweight its stratum-mates
//! - **Bootstrap**: resample `nh - 1` clusters with replacement per stratum
//! - **Mean bootstrap**: average the resample counts over `bsn` draws
//! - **Supplied**: return precomputed replicate weight columns verbatim
//!
//! # Example
//!
//! ```rust
//! use survey_design::{CovMethod, SurveyDesign};
//!
//! let design = SurveyDesign::builder()
//!     .strata(&["north", "north", "south", "south", "south"])
//!     .cluster(&[1, 2, 1, 2, 3])
//!     .weights(vec![1.5, 1.5, 2.0, 2.0, 2.0])
//!     .cov_method(CovMethod::Bootstrap)
//!     .seed(2024)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(design.nstrat(), Some(2));
//! assert_eq!(design.clust_per_strat(), Some(&[2, 3][..]));
//!
//! let replicate = design.replicate_weights(0, None).unwrap();
//! assert_eq!(replicate.len(), 5);
//! ```

mod builder;
mod config;
mod design;
mod method;
mod replicate;

pub use builder::SurveyDesignBuilder;
pub use config::DesignConfig;
pub use design::{Cluster, ClusterLayout, SurveyDesign};
pub use method::CovMethod;
