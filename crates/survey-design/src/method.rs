//! Covariance methods supported by a survey design

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use survey_core::Error;

/// Resampling scheme used to build replicate weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CovMethod {
    /// Delete-one-cluster jackknife
    #[default]
    #[serde(rename = "jack", alias = "jackknife")]
    Jackknife,
    /// Stratified cluster bootstrap, one draw per replicate
    #[serde(rename = "boot", alias = "bootstrap")]
    Bootstrap,
    /// Bootstrap with resample counts averaged over `bsn` draws
    #[serde(rename = "mean_boot", alias = "mean-bootstrap")]
    MeanBootstrap,
}

impl CovMethod {
    /// Canonical short name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jackknife => "jack",
            Self::Bootstrap => "boot",
            Self::MeanBootstrap => "mean_boot",
        }
    }
}

impl FromStr for CovMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jack" | "jackknife" => Ok(Self::Jackknife),
            "boot" | "bootstrap" => Ok(Self::Bootstrap),
            "mean_boot" | "mean-bootstrap" => Ok(Self::MeanBootstrap),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for CovMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("jack".parse::<CovMethod>().unwrap(), CovMethod::Jackknife);
        assert_eq!("bootstrap".parse::<CovMethod>().unwrap(), CovMethod::Bootstrap);
        assert_eq!("mean_boot".parse::<CovMethod>().unwrap(), CovMethod::MeanBootstrap);
        assert_eq!("mean-bootstrap".parse::<CovMethod>().unwrap(), CovMethod::MeanBootstrap);
    }

    #[test]
    fn test_unsupported_method() {
        let err = "brr".parse::<CovMethod>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedMethod(ref m) if m == "brr"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for method in [CovMethod::Jackknife, CovMethod::Bootstrap, CovMethod::MeanBootstrap] {
            assert_eq!(method.to_string().parse::<CovMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_serde_names() {
        let m: CovMethod = serde_json::from_str("\"mean_boot\"").unwrap();
        assert_eq!(m, CovMethod::MeanBootstrap);
        assert_eq!(serde_json::to_string(&CovMethod::Jackknife).unwrap(), "\"jack\"");
        assert!(serde_json::from_str::<CovMethod>("\"brr\"").is_err());
    }
}
