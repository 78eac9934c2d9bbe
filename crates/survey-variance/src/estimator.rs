//! Replicate-based variance engine
//!
//! The engine evaluates a [`Statistic`] once with the design weights and once
//! per replicate weight vector, centers the replicate values and folds them
//! into a covariance matrix.
//!
//! - **Jackknife**: one replicate per cluster (or supplied column), centered
//!   within stratum and scaled by `sqrt(1 - fpc) * sqrt((nh - 1) / nh)`
//! - **Bootstrap / mean bootstrap**: `replicates` draws, centered on their
//!   mean and averaged

use crate::types::{EstimationOptions, SurveyEstimate};
use nalgebra::{DMatrix, DVector};
use survey_core::matrix::{check_data, gram, row_subset_mean, standard_errors};
use survey_core::{Error, Result, Statistic};
use survey_design::{CovMethod, SurveyDesign};
use tracing::{debug, instrument, trace};

/// Variance estimator bound to one survey design
#[derive(Debug, Clone, Copy)]
pub struct VarianceEstimator<'a> {
    design: &'a SurveyDesign,
    options: EstimationOptions,
}

impl<'a> VarianceEstimator<'a> {
    pub fn new(design: &'a SurveyDesign) -> Self {
        Self {
            design,
            options: EstimationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EstimationOptions) -> Self {
        self.options = options;
        self
    }

    /// Center on the point estimate instead of the replicate mean
    pub fn with_mse(mut self, mse: bool) -> Self {
        self.options.mse = mse;
        self
    }

    /// Number of bootstrap replicates
    pub fn with_replicates(mut self, replicates: usize) -> Self {
        self.options.replicates = Some(replicates);
        self
    }

    /// Draws averaged per mean-bootstrap replicate
    pub fn with_bsn(mut self, bsn: usize) -> Self {
        self.options.bsn = Some(bsn);
        self
    }

    pub fn design(&self) -> &SurveyDesign {
        self.design
    }

    pub fn options(&self) -> &EstimationOptions {
        &self.options
    }

    /// Estimate `statistic` on `data` with its replicate covariance
    ///
    /// `data` is n×p and aligned row-for-row with the design. All options
    /// are validated before the first evaluation.
    #[instrument(
        skip(self, statistic, data),
        fields(
            statistic = statistic.name(),
            n = data.nrows(),
            p = data.ncols(),
            method = %self.design.cov_method()
        )
    )]
    pub fn estimate<S: Statistic>(&self, statistic: &S, data: &DMatrix<f64>) -> Result<SurveyEstimate> {
        check_data(data, self.design.n_obs())?;

        let result = match self.design.cov_method() {
            CovMethod::Jackknife => self.jackknife(statistic, data),
            method => {
                let replicates = self.bootstrap_replicates()?;
                if method == CovMethod::MeanBootstrap && !self.design.is_replicated() {
                    match self.options.bsn {
                        Some(b) if b > 0 => {}
                        _ => {
                            return Err(Error::InvalidParameter(
                                "bsn must be a positive count for the mean bootstrap".to_string(),
                            ))
                        }
                    }
                }
                self.bootstrap(statistic, data, replicates)
            }
        }?;

        debug!(
            replicates = result.replicates,
            values = result.len(),
            "Variance estimation finished"
        );
        Ok(result)
    }

    fn bootstrap_replicates(&self) -> Result<usize> {
        let supplied = self.design.supplied_replicates().map(|m| m.ncols());
        let replicates = match (self.options.replicates, supplied) {
            (Some(r), Some(available)) if r > available => {
                return Err(Error::InvalidParameter(format!(
                    "requested {r} replicates but only {available} replicate weight columns were supplied"
                )))
            }
            (Some(r), _) => r,
            (None, Some(available)) => available,
            (None, None) => {
                return Err(Error::InvalidParameter(
                    "replicates is required for bootstrap variance".to_string(),
                ))
            }
        };
        if replicates == 0 {
            return Err(Error::InvalidParameter(
                "replicates must be positive".to_string(),
            ));
        }
        Ok(replicates)
    }

    fn point_estimate<S: Statistic>(&self, statistic: &S, data: &DMatrix<f64>) -> Result<DVector<f64>> {
        let est = statistic.evaluate(self.design.weights(), data)?;
        if est.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("point estimate"));
        }
        Ok(DVector::from_vec(est))
    }

    /// Evaluate the statistic under `count` replicate weight vectors
    ///
    /// Row `r` of the result holds the statistic under replicate `r`.
    fn replicate_matrix<S: Statistic>(
        &self,
        statistic: &S,
        data: &DMatrix<f64>,
        count: usize,
        width: usize,
    ) -> Result<DMatrix<f64>> {
        let mut values = DMatrix::zeros(count, width);
        for r in 0..count {
            let w = self.design.replicate_weights(r, self.options.bsn)?;
            let stat = statistic.evaluate(&w, data)?;
            if stat.len() != width {
                return Err(Error::size_mismatch(width, stat.len(), "replicate statistic"));
            }
            trace!(replicate = r, ?stat, "Replicate evaluated");
            for (j, v) in stat.into_iter().enumerate() {
                values[(r, j)] = v;
            }
        }
        Ok(values)
    }

    fn jackknife<S: Statistic>(&self, statistic: &S, data: &DMatrix<f64>) -> Result<SurveyEstimate> {
        let est = self.point_estimate(statistic, data)?;
        let width = est.len();
        let k = self.design.replicate_count();
        let raw = self.replicate_matrix(statistic, data, k, width)?;
        let mut centered = raw.clone();
        let layout = self.design.cluster_layout();

        if self.options.mse {
            debug!("mse specified, centering on the point estimate");
            subtract_row(&mut centered, 0..k, &est);
        } else if let Some(layout) = layout {
            for s in 0..layout.nstrat() {
                let rows = layout.stratum_clusters(s);
                let stratum_mean = row_subset_mean(&raw, rows);
                subtract_row(&mut centered, rows.iter().copied(), &stratum_mean);
            }
        } else {
            let all: Vec<usize> = (0..k).collect();
            let mean = row_subset_mean(&raw, &all);
            subtract_row(&mut centered, 0..k, &mean);
        }

        let pseudo_values = match layout {
            Some(layout) => {
                let pseudo = DMatrix::from_fn(k, width, |c, j| {
                    let nh = layout.stratum_size_of(c) as f64;
                    raw[(c, j)] + nh * (est[j] - raw[(c, j)])
                });
                for c in 0..k {
                    let nh = layout.stratum_size_of(c) as f64;
                    let fpc = layout.cluster(c).map_or(0.0, |cl| cl.fpc);
                    let scale = (1.0 - fpc).sqrt() * ((nh - 1.0) / nh).sqrt();
                    for j in 0..width {
                        centered[(c, j)] *= scale;
                    }
                }
                Some(pseudo)
            }
            None => {
                let r = k as f64;
                centered *= ((r - 1.0) / r).sqrt();
                None
            }
        };

        let covariance = gram(&centered);
        let standard_error = standard_errors(&covariance);
        Ok(SurveyEstimate {
            estimate: est,
            covariance,
            standard_error,
            pseudo_values,
            replicates: k,
            method: CovMethod::Jackknife,
        })
    }

    fn bootstrap<S: Statistic>(
        &self,
        statistic: &S,
        data: &DMatrix<f64>,
        replicates: usize,
    ) -> Result<SurveyEstimate> {
        let est = self.point_estimate(statistic, data)?;
        let width = est.len();
        debug!(replicates, bsn = ?self.options.bsn, "Running bootstrap replicates");
        let mut centered = self.replicate_matrix(statistic, data, replicates, width)?;

        if self.options.mse {
            debug!("mse specified, centering on the point estimate");
            subtract_row(&mut centered, 0..replicates, &est);
        } else {
            let all: Vec<usize> = (0..replicates).collect();
            let mean = row_subset_mean(&centered, &all);
            subtract_row(&mut centered, 0..replicates, &mean);
        }

        let covariance = gram(&centered) / replicates as f64;
        let standard_error = standard_errors(&covariance);
        Ok(SurveyEstimate {
            estimate: est,
            covariance,
            standard_error,
            pseudo_values: None,
            replicates,
            method: self.design.cov_method(),
        })
    }
}

fn subtract_row(matrix: &mut DMatrix<f64>, rows: impl IntoIterator<Item = usize>, center: &DVector<f64>) {
    for r in rows {
        for (j, c) in center.iter().enumerate() {
            matrix[(r, j)] -= c;
        }
    }
}
