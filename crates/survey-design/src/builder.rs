//! Builder that validates raw inputs and constructs a [`SurveyDesign`]

use crate::design::{ClusterLayout, Layout};
use crate::{CovMethod, DesignConfig, SurveyDesign};
use nalgebra::DMatrix;
use rand::{thread_rng, Rng};
use survey_core::utils::dense_labels;
use survey_core::{Error, Result};
use tracing::{debug, warn};

/// Consuming builder for [`SurveyDesign`]
///
/// Strata and cluster labels can be any ordered type; they are relabeled to
/// dense indices as soon as they are supplied. All validation happens in
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct SurveyDesignBuilder {
    strata: Option<(Vec<usize>, usize)>,
    cluster: Option<(Vec<usize>, usize)>,
    weights: Option<Vec<f64>>,
    fpc: Option<Vec<f64>>,
    rep_weights: Option<DMatrix<f64>>,
    method_name: Option<String>,
    config: DesignConfig,
}

impl SurveyDesignBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stratum label of every observation
    pub fn strata<T: Ord + Clone>(mut self, labels: &[T]) -> Self {
        self.strata = Some(dense_labels(labels));
        self
    }

    /// Cluster (PSU) label of every observation
    pub fn cluster<T: Ord + Clone>(mut self, labels: &[T]) -> Self {
        self.cluster = Some(dense_labels(labels));
        self
    }

    /// Design weight of every observation
    pub fn weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Finite population correction of every observation, in [0, 1)
    pub fn fpc(mut self, fpc: Vec<f64>) -> Self {
        self.fpc = Some(fpc);
        self
    }

    /// Precomputed n×R replicate weights; excludes strata and cluster
    pub fn replicate_weights(mut self, rep_weights: DMatrix<f64>) -> Self {
        self.rep_weights = Some(rep_weights);
        self
    }

    pub fn cov_method(mut self, method: CovMethod) -> Self {
        self.config.cov_method = method;
        self.method_name = None;
        self
    }

    /// Covariance method by name (`"jack"`, `"boot"`, `"mean_boot"`)
    ///
    /// The name is parsed in [`build`](Self::build), where an unknown name
    /// becomes [`Error::UnsupportedMethod`].
    pub fn cov_method_name(mut self, name: impl Into<String>) -> Self {
        self.method_name = Some(name.into());
        self
    }

    pub fn nest(mut self, nest: bool) -> Self {
        self.config.nest = nest;
        self
    }

    /// Base seed for bootstrap draws
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Replace method, nesting and seed in one go
    pub fn config(mut self, config: DesignConfig) -> Self {
        self.config = config;
        self.method_name = None;
        self
    }

    /// Validate the inputs and index the design
    pub fn build(self) -> Result<SurveyDesign> {
        let Self {
            strata,
            cluster,
            weights,
            fpc,
            rep_weights,
            method_name,
            mut config,
        } = self;

        if let Some(name) = method_name {
            config.cov_method = name.parse()?;
        }
        let seed = config.seed.unwrap_or_else(|| thread_rng().gen());

        if let Some(rep_weights) = rep_weights {
            if strata.is_some() || cluster.is_some() {
                return Err(Error::ConflictingDesign(
                    "if providing rep_weights, do not provide cluster or strata".to_string(),
                ));
            }
            if rep_weights.ncols() == 0 {
                return Err(Error::InvalidInput(
                    "rep_weights must have at least one replicate column".to_string(),
                ));
            }
            if fpc.is_some() {
                warn!("fpc is ignored when replicate weights are supplied");
            }
            let n = rep_weights.nrows();
            let weights = match weights {
                Some(w) => {
                    if w.len() != n {
                        return Err(Error::size_mismatch(n, w.len(), "weights"));
                    }
                    w
                }
                None => vec![1.0; n],
            };
            check_weights(&weights)?;
            debug!(
                n,
                replicates = rep_weights.ncols(),
                method = %config.cov_method,
                "Built survey design from supplied replicate weights"
            );
            return Ok(SurveyDesign {
                weights,
                cov_method: config.cov_method,
                seed,
                layout: Layout::Replicated(rep_weights),
            });
        }

        let lengths: Vec<usize> = [
            strata.as_ref().map(|s| s.0.len()),
            cluster.as_ref().map(|c| c.0.len()),
            weights.as_ref().map(Vec::len),
        ]
        .into_iter()
        .flatten()
        .collect();
        let n = match lengths.first() {
            Some(&n) => n,
            None => return Err(Error::MissingDesign),
        };
        if let Some(&bad) = lengths.iter().find(|&&len| len != n) {
            return Err(Error::size_mismatch(n, bad, "strata, cluster, and weights"));
        }
        if n == 0 {
            return Err(Error::empty_input());
        }

        let (strat, nstrat) = strata.unwrap_or_else(|| (vec![0; n], 1));
        let (clust, nclust_raw) = cluster.unwrap_or_else(|| (vec![0; n], 1));
        let weights = weights.unwrap_or_else(|| vec![1.0; n]);
        check_weights(&weights)?;
        let fpc = match fpc {
            Some(f) => {
                if f.len() != n {
                    return Err(Error::size_mismatch(n, f.len(), "fpc"));
                }
                if let Some(bad) = f.iter().find(|v| !(0.0..1.0).contains(*v)) {
                    return Err(Error::InvalidParameter(format!(
                        "fpc {bad} must be in [0, 1)"
                    )));
                }
                f
            }
            None => vec![0.0; n],
        };

        let layout = ClusterLayout::new(strat, nstrat, clust, nclust_raw, &fpc, config.nest);
        warn_degenerate_strata(&layout, config.cov_method);
        debug!(
            n,
            nstrat = layout.nstrat(),
            nclust = layout.nclust(),
            nest = config.nest,
            method = %config.cov_method,
            "Built clustered survey design"
        );

        Ok(SurveyDesign {
            weights,
            cov_method: config.cov_method,
            seed,
            layout: Layout::Clustered(layout),
        })
    }
}

fn check_weights(weights: &[f64]) -> Result<()> {
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::InvalidParameter(format!(
            "weight {bad} must be finite and non-negative"
        )));
    }
    Ok(())
}

fn warn_degenerate_strata(layout: &ClusterLayout, method: CovMethod) {
    for (s, &nh) in layout.clust_per_strat().iter().enumerate() {
        match nh {
            0 => warn!(
                stratum = s,
                "Stratum owns no cluster; a cluster id spans strata without nesting"
            ),
            1 => warn!(
                stratum = s,
                %method,
                "Stratum has a single cluster; its variance contribution is undefined"
            ),
            _ => {}
        }
    }
}
