//! Serializable design configuration

use crate::CovMethod;
use serde::{Deserialize, Serialize};

/// Options that shape how a design is indexed and resampled
///
/// ```rust
/// use survey_design::{CovMethod, DesignConfig};
///
/// let config = DesignConfig::default().with_cov_method(CovMethod::Bootstrap).with_seed(7);
/// assert!(config.nest);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Replicate-weight scheme
    pub cov_method: CovMethod,
    /// Treat equal cluster ids in different strata as distinct clusters
    pub nest: bool,
    /// Base seed for bootstrap draws; drawn from entropy when unset
    pub seed: Option<u64>,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            cov_method: CovMethod::Jackknife,
            nest: true,
            seed: None,
        }
    }
}

impl DesignConfig {
    pub fn with_cov_method(mut self, cov_method: CovMethod) -> Self {
        self.cov_method = cov_method;
        self
    }

    pub fn with_nest(mut self, nest: bool) -> Self {
        self.nest = nest;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: DesignConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DesignConfig::default());
        assert_eq!(config.cov_method, CovMethod::Jackknife);
        assert!(config.nest);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_json() {
        let config: DesignConfig =
            serde_json::from_str(r#"{"cov_method": "boot", "seed": 11}"#).unwrap();
        assert_eq!(config.cov_method, CovMethod::Bootstrap);
        assert_eq!(config.seed, Some(11));
        assert!(config.nest);
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(serde_json::from_str::<DesignConfig>(r#"{"cov_method": "sdr"}"#).is_err());
    }
}
