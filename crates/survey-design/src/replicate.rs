//! Replicate weight generators
//!
//! Every generator returns a full-length weight vector for one resampling
//! draw. Randomized generators take an explicit RNG; [`SurveyDesign::replicate_weights`]
//! seeds one per replicate from the design's base seed, so a replicate is a
//! pure function of the design and its index.

use crate::design::{ClusterLayout, Layout};
use crate::{CovMethod, SurveyDesign};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use survey_core::{Error, Result};
use tracing::trace;

impl SurveyDesign {
    /// Replicate weights for replicate number `replicate`
    ///
    /// Supplied replicate weights return column `replicate`. Otherwise the
    /// generator matching the covariance method runs: the jackknife deletes
    /// cluster `replicate`, the bootstraps draw with an RNG seeded from
    /// the design seed and `replicate`. `bsn` is required by the mean bootstrap only.
    pub fn replicate_weights(&self, replicate: usize, bsn: Option<usize>) -> Result<Vec<f64>> {
        let layout = match &self.layout {
            Layout::Replicated(matrix) => {
                if replicate >= matrix.ncols() {
                    return Err(Error::out_of_range(replicate, matrix.ncols(), "Replicate"));
                }
                return Ok(matrix.column(replicate).iter().copied().collect());
            }
            Layout::Clustered(layout) => layout,
        };

        match self.cov_method {
            CovMethod::Jackknife => self.jackknife_weights(replicate),
            CovMethod::Bootstrap => {
                let mut rng = self.replicate_rng(replicate);
                Ok(bootstrap_draw(layout, &self.weights, &mut rng))
            }
            CovMethod::MeanBootstrap => {
                let bsn = check_bsn(bsn)?;
                let mut rng = self.replicate_rng(replicate);
                Ok(mean_bootstrap_draw(layout, &self.weights, bsn, &mut rng))
            }
        }
    }

    /// RNG for one replicate, keyed by the design seed and the replicate index
    ///
    /// Both values occupy separate halves of the generator key, so designs
    /// with neighbouring seeds do not share replicate streams.
    pub fn replicate_rng(&self, replicate: usize) -> StdRng {
        let mut key = <StdRng as SeedableRng>::Seed::default();
        key[..8].copy_from_slice(&self.seed.to_le_bytes());
        key[8..16].copy_from_slice(&(replicate as u64).to_le_bytes());
        StdRng::from_seed(key)
    }

    /// Delete-one jackknife weights leaving out cluster `c`
    ///
    /// Weights in `c`'s stratum are scaled by `nh / (nh - 1)` and weights in
    /// `c` itself are zeroed. A single-cluster stratum divides by zero; its
    /// only cluster is zeroed afterwards, so the result stays finite.
    pub fn jackknife_weights(&self, c: usize) -> Result<Vec<f64>> {
        let layout = self.require_layout()?;
        let cluster = layout
            .cluster(c)
            .ok_or_else(|| Error::out_of_range(c, layout.nclust(), "Cluster"))?;
        let s = cluster.stratum;
        let nh = layout.clust_per_strat()[s] as f64;
        let factor = nh / (nh - 1.0);

        let mut w = self.weights.clone();
        for ((wi, &si), &ci) in w.iter_mut().zip(layout.strata()).zip(layout.clusters()) {
            if ci == c {
                *wi = 0.0;
            } else if si == s {
                *wi *= factor;
            }
        }
        Ok(w)
    }

    /// One stratified cluster bootstrap draw
    pub fn bootstrap_weights<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f64>> {
        let layout = self.require_layout()?;
        Ok(bootstrap_draw(layout, &self.weights, rng))
    }

    /// Mean bootstrap weights averaging cluster counts over `bsn` draws
    pub fn mean_bootstrap_weights<R: Rng + ?Sized>(&self, bsn: usize, rng: &mut R) -> Result<Vec<f64>> {
        let layout = self.require_layout()?;
        let bsn = check_bsn(Some(bsn))?;
        Ok(mean_bootstrap_draw(layout, &self.weights, bsn, rng))
    }

    fn require_layout(&self) -> Result<&ClusterLayout> {
        self.cluster_layout().ok_or_else(|| {
            Error::InvalidInput(
                "design uses supplied replicate weights and has no cluster layout".to_string(),
            )
        })
    }
}

fn check_bsn(bsn: Option<usize>) -> Result<usize> {
    match bsn {
        Some(b) if b > 0 => Ok(b),
        Some(_) => Err(Error::InvalidParameter("bsn must be positive".to_string())),
        None => Err(Error::InvalidParameter(
            "bsn is required for the mean bootstrap".to_string(),
        )),
    }
}

/// Draw `nh - 1` clusters with replacement from stratum `s`, adding to `counts`
fn resample_stratum<R: Rng + ?Sized>(
    layout: &ClusterLayout,
    s: usize,
    counts: &mut [f64],
    rng: &mut R,
) {
    let members = layout.stratum_clusters(s);
    for _ in 1..members.len() {
        let pick = members[rng.gen_range(0..members.len())];
        counts[pick] += 1.0;
    }
}

fn scale_stratum(w: &mut [f64], strata: &[usize], s: usize, factor: f64) {
    for (wi, &si) in w.iter_mut().zip(strata) {
        if si == s {
            *wi *= factor;
        }
    }
}

fn apply_counts(w: &mut [f64], clusters: &[usize], counts: &[f64]) {
    for (wi, &c) in w.iter_mut().zip(clusters) {
        *wi *= counts[c];
    }
}

fn bootstrap_draw<R: Rng + ?Sized>(layout: &ClusterLayout, weights: &[f64], rng: &mut R) -> Vec<f64> {
    let mut w = weights.to_vec();
    let mut counts = vec![0.0; layout.nclust()];

    for (s, &nh) in layout.clust_per_strat().iter().enumerate() {
        if nh == 0 {
            continue;
        }
        let nh_f = nh as f64;
        scale_stratum(&mut w, layout.strata(), s, (nh_f - 1.0) / nh_f);
        // A lone cluster keeps a zero count, matching its zero scale factor
        if nh == 1 {
            continue;
        }
        resample_stratum(layout, s, &mut counts, rng);
    }

    trace!(?counts, "Bootstrap cluster counts");
    apply_counts(&mut w, layout.clusters(), &counts);
    w
}

fn mean_bootstrap_draw<R: Rng + ?Sized>(
    layout: &ClusterLayout,
    weights: &[f64],
    bsn: usize,
    rng: &mut R,
) -> Vec<f64> {
    let mut w = weights.to_vec();
    let mut counts = vec![0.0; layout.nclust()];
    let root = 1.0 / bsn as f64;

    for _ in 0..bsn {
        for (s, &nh) in layout.clust_per_strat().iter().enumerate() {
            if nh == 0 {
                continue;
            }
            let nh_f = nh as f64;
            scale_stratum(&mut w, layout.strata(), s, ((nh_f - 1.0) / nh_f).powf(root));
            if nh <= 2 {
                continue;
            }
            resample_stratum(layout, s, &mut counts, rng);
        }
    }

    for count in counts.iter_mut() {
        *count /= bsn as f64;
    }
    trace!(?counts, bsn, "Mean bootstrap cluster counts");
    apply_counts(&mut w, layout.clusters(), &counts);
    w
}
