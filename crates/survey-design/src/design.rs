//! Survey design: normalized strata, clusters and weights
//!
//! A design is either *clustered*, built from strata and cluster labels and
//! indexed into a [`ClusterLayout`], or *replicated*, wrapping a matrix of
//! externally supplied replicate weights. Both are immutable once built.

use crate::{CovMethod, SurveyDesignBuilder};
use nalgebra::DMatrix;
use survey_core::utils::dense_labels;

/// One primary sampling unit in the cluster arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    /// Stratum that owns this cluster
    pub stratum: usize,
    /// Finite population correction, taken from the cluster's first observation
    pub fpc: f64,
}

/// Stratum and cluster bookkeeping derived from raw labels
///
/// Clusters live in an arena indexed by their dense id; each stratum keeps
/// the ids of the clusters it owns. The per-stratum id lists partition
/// `0..nclust`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterLayout {
    strat: Vec<usize>,
    sclust: Vec<usize>,
    nstrat: usize,
    clusters: Vec<Cluster>,
    clust_per_strat: Vec<usize>,
    stratum_clusters: Vec<Vec<usize>>,
}

impl ClusterLayout {
    /// Index dense strata and cluster codes
    ///
    /// With `nest`, cluster codes are combined with stratum codes before
    /// relabeling so equal cluster ids in different strata stay distinct.
    pub(crate) fn new(
        strat: Vec<usize>,
        nstrat: usize,
        clust: Vec<usize>,
        nclust_raw: usize,
        fpc: &[f64],
        nest: bool,
    ) -> Self {
        let (sclust, nclust) = if nest {
            let combined: Vec<usize> = clust
                .iter()
                .zip(&strat)
                .map(|(&c, &s)| c + nclust_raw * s)
                .collect();
            dense_labels(&combined)
        } else {
            (clust, nclust_raw)
        };

        let mut first = vec![usize::MAX; nclust];
        for (i, &c) in sclust.iter().enumerate() {
            if first[c] == usize::MAX {
                first[c] = i;
            }
        }

        let clusters: Vec<Cluster> = first
            .iter()
            .map(|&i| Cluster {
                stratum: strat[i],
                fpc: fpc[i],
            })
            .collect();

        let mut clust_per_strat = vec![0; nstrat];
        let mut stratum_clusters = vec![Vec::new(); nstrat];
        for (id, cluster) in clusters.iter().enumerate() {
            clust_per_strat[cluster.stratum] += 1;
            stratum_clusters[cluster.stratum].push(id);
        }

        Self {
            strat,
            sclust,
            nstrat,
            clusters,
            clust_per_strat,
            stratum_clusters,
        }
    }

    /// Dense stratum index of every observation
    pub fn strata(&self) -> &[usize] {
        &self.strat
    }

    /// Dense cluster index of every observation
    pub fn clusters(&self) -> &[usize] {
        &self.sclust
    }

    /// Number of distinct strata
    pub fn nstrat(&self) -> usize {
        self.nstrat
    }

    /// Number of distinct clusters over all strata
    pub fn nclust(&self) -> usize {
        self.clusters.len()
    }

    /// Number of clusters owned by each stratum
    pub fn clust_per_strat(&self) -> &[usize] {
        &self.clust_per_strat
    }

    /// Cluster record for a dense cluster id
    pub fn cluster(&self, id: usize) -> Option<&Cluster> {
        self.clusters.get(id)
    }

    /// Owning stratum of every cluster
    pub fn strat_for_clust(&self) -> Vec<usize> {
        self.clusters.iter().map(|c| c.stratum).collect()
    }

    /// Finite population correction of every cluster
    pub fn cluster_fpc(&self) -> Vec<f64> {
        self.clusters.iter().map(|c| c.fpc).collect()
    }

    /// Cluster ids owned by stratum `s`
    pub fn stratum_clusters(&self, s: usize) -> &[usize] {
        self.stratum_clusters.get(s).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of clusters in the stratum owning cluster `id`
    pub fn stratum_size_of(&self, id: usize) -> usize {
        self.clust_per_strat[self.clusters[id].stratum]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Layout {
    Clustered(ClusterLayout),
    Replicated(DMatrix<f64>),
}

/// A validated survey design
///
/// Built with [`SurveyDesign::builder`]. Exactly one of the strata/cluster
/// path and the supplied replicate-weight path is active.
///
/// ```rust
/// use survey_design::{CovMethod, SurveyDesign};
///
/// let design = SurveyDesign::builder()
///     .strata(&[0, 0, 1, 1])
///     .cluster(&[0, 1, 2, 3])
///     .weights(vec![1.0; 4])
///     .cov_method(CovMethod::Jackknife)
///     .build()
///     .unwrap();
///
/// assert_eq!(design.nclust(), Some(4));
/// assert_eq!(design.replicate_weights(0, None).unwrap(), vec![0.0, 2.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDesign {
    pub(crate) weights: Vec<f64>,
    pub(crate) cov_method: CovMethod,
    pub(crate) seed: u64,
    pub(crate) layout: Layout,
}

impl SurveyDesign {
    /// Start building a design
    pub fn builder() -> SurveyDesignBuilder {
        SurveyDesignBuilder::new()
    }

    /// Number of observations
    pub fn n_obs(&self) -> usize {
        self.weights.len()
    }

    /// Design weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn cov_method(&self) -> CovMethod {
        self.cov_method
    }

    /// Base seed of the bootstrap draws
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stratum/cluster bookkeeping, absent for replicated designs
    pub fn cluster_layout(&self) -> Option<&ClusterLayout> {
        match &self.layout {
            Layout::Clustered(layout) => Some(layout),
            Layout::Replicated(_) => None,
        }
    }

    /// Externally supplied n×R replicate weights
    pub fn supplied_replicates(&self) -> Option<&DMatrix<f64>> {
        match &self.layout {
            Layout::Replicated(matrix) => Some(matrix),
            Layout::Clustered(_) => None,
        }
    }

    pub fn is_replicated(&self) -> bool {
        matches!(self.layout, Layout::Replicated(_))
    }

    pub fn nstrat(&self) -> Option<usize> {
        self.cluster_layout().map(ClusterLayout::nstrat)
    }

    pub fn nclust(&self) -> Option<usize> {
        self.cluster_layout().map(ClusterLayout::nclust)
    }

    pub fn clust_per_strat(&self) -> Option<&[usize]> {
        self.cluster_layout().map(ClusterLayout::clust_per_strat)
    }

    /// Number of delete-one replicates: clusters, or supplied columns
    pub fn replicate_count(&self) -> usize {
        match &self.layout {
            Layout::Clustered(layout) => layout.nclust(),
            Layout::Replicated(matrix) => matrix.ncols(),
        }
    }
}
