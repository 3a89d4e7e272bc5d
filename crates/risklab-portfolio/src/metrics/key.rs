//! Metric keys.

use crate::RiskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one risk metric.
///
/// The display form is the wire key used in summaries and exports:
/// `Volatility`, `VaR_95`, `CVaR_99`, `Sharpe`. Ordering follows the
/// variant order, so summaries list volatility first and Sharpe last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MetricKey {
    /// Portfolio volatility.
    Volatility,
    /// Historical Value-at-Risk at a whole-percent confidence level.
    VaR(u32),
    /// Conditional VaR (expected shortfall) at a whole-percent level.
    CVaR(u32),
    /// Sharpe ratio.
    Sharpe,
}

impl MetricKey {
    /// VaR key for a confidence in (0, 1), truncated to whole percent.
    #[must_use]
    pub fn var(confidence: f64) -> Self {
        Self::VaR(level(confidence))
    }

    /// CVaR key for a confidence in (0, 1), truncated to whole percent.
    #[must_use]
    pub fn cvar(confidence: f64) -> Self {
        Self::CVaR(level(confidence))
    }

    /// Returns true for metrics displayed as percentages.
    #[must_use]
    pub fn is_percentage(&self) -> bool {
        !matches!(self, Self::Sharpe)
    }
}

// Nudged so that e.g. 0.57 maps to 57 despite 0.57 * 100 < 57.
fn level(confidence: f64) -> u32 {
    (confidence * 100.0 + 1e-9).floor() as u32
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Volatility => f.write_str("Volatility"),
            Self::VaR(level) => write!(f, "VaR_{level}"),
            Self::CVaR(level) => write!(f, "CVaR_{level}"),
            Self::Sharpe => f.write_str("Sharpe"),
        }
    }
}

impl FromStr for MetricKey {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || RiskError::UnknownMetric { key: s.to_string() };
        let parse_level = |level: &str| level.parse::<u32>().map_err(|_| unknown());

        match s.trim() {
            "Volatility" => Ok(Self::Volatility),
            "Sharpe" => Ok(Self::Sharpe),
            other => {
                if let Some(level) = other.strip_prefix("CVaR_") {
                    parse_level(level).map(Self::CVaR)
                } else if let Some(level) = other.strip_prefix("VaR_") {
                    parse_level(level).map(Self::VaR)
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

impl From<MetricKey> for String {
    fn from(key: MetricKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MetricKey {
    type Error = RiskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(MetricKey::Volatility.to_string(), "Volatility");
        assert_eq!(MetricKey::var(0.95).to_string(), "VaR_95");
        assert_eq!(MetricKey::cvar(0.99).to_string(), "CVaR_99");
        assert_eq!(MetricKey::var(0.975).to_string(), "VaR_97");
        assert_eq!(MetricKey::var(0.57), MetricKey::VaR(57));
    }

    #[test]
    fn test_parse() {
        assert_eq!("VaR_95".parse::<MetricKey>().unwrap(), MetricKey::VaR(95));
        assert_eq!("CVaR_99".parse::<MetricKey>().unwrap(), MetricKey::CVaR(99));
        assert_eq!(" Sharpe ".parse::<MetricKey>().unwrap(), MetricKey::Sharpe);
        assert_eq!(
            "VaR_x".parse::<MetricKey>().unwrap_err(),
            RiskError::UnknownMetric { key: "VaR_x".into() }
        );
        assert!("Beta".parse::<MetricKey>().is_err());
    }

    #[test]
    fn test_ordering() {
        let mut keys = vec![
            MetricKey::Sharpe,
            MetricKey::CVaR(95),
            MetricKey::VaR(99),
            MetricKey::Volatility,
            MetricKey::VaR(95),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                MetricKey::Volatility,
                MetricKey::VaR(95),
                MetricKey::VaR(99),
                MetricKey::CVaR(95),
                MetricKey::Sharpe,
            ]
        );
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&MetricKey::CVaR(95)).unwrap();
        assert_eq!(json, "\"CVaR_95\"");
        let back: MetricKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MetricKey::CVaR(95));
    }
}
