//! Configuration for risk analytics computation.

use serde::{Deserialize, Serialize};

/// How shock keys that match neither a ticker nor an asset class are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShockPolicy {
    /// Unresolved keys are skipped. Scenario definitions may name holdings
    /// or asset classes the current portfolio does not carry.
    #[default]
    Lenient,

    /// Unresolved keys fail the scenario with `UnresolvedShockKey`.
    Strict,
}

impl ShockPolicy {
    /// Returns true for [`ShockPolicy::Strict`].
    #[must_use]
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Configuration for risk analytics computation.
///
/// Controls confidence levels, annualization, formatting, scenario handling
/// and parallelism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Confidence level for VaR and CVaR, in (0, 1).
    pub confidence: f64,

    /// Annual risk-free rate used by the Sharpe ratio.
    pub risk_free_rate: f64,

    /// Trading periods per year used to de-annualize the risk-free rate.
    pub trading_days: u32,

    /// Decimal places in formatted percentage values.
    pub percent_decimals: u32,

    /// Handling of unresolved shock keys.
    pub shock_policy: ShockPolicy,

    /// Metric used as impact by the risk matrix (e.g. `VaR_95`).
    pub impact_metric: String,

    /// Likelihood assumed for tickers without an explicit value.
    pub default_likelihood: f64,

    /// Liquidity score assumed for tickers without an explicit value.
    pub default_liquidity: f64,

    /// Enable parallel scenario evaluation (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum scenario count to trigger parallel evaluation.
    pub parallel_threshold: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            risk_free_rate: 0.0,
            trading_days: 252,
            percent_decimals: 2,
            shock_policy: ShockPolicy::Lenient,
            impact_metric: "VaR_95".to_string(),
            default_likelihood: 0.1,
            default_liquidity: 0.5,
            parallel: true,
            parallel_threshold: 8,
        }
    }
}

impl RiskConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always evaluates scenarios sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the VaR / CVaR confidence level.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets the annual risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the formatted percentage precision.
    #[must_use]
    pub fn with_percent_decimals(mut self, decimals: u32) -> Self {
        self.percent_decimals = decimals;
        self
    }

    /// Sets the shock policy.
    #[must_use]
    pub fn with_shock_policy(mut self, policy: ShockPolicy) -> Self {
        self.shock_policy = policy;
        self
    }

    /// Sets the impact metric key for the risk matrix.
    #[must_use]
    pub fn with_impact_metric(mut self, key: impl Into<String>) -> Self {
        self.impact_metric = key.into();
        self
    }

    /// Sets whether to use parallel evaluation.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel evaluation.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Per-period risk-free rate (`risk_free_rate / trading_days`).
    #[must_use]
    pub fn periodic_risk_free_rate(&self) -> f64 {
        periodic_rate(self.risk_free_rate, self.trading_days)
    }

    /// Returns true if parallel evaluation should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

/// De-annualizes a rate over `periods` periods per year.
pub(crate) fn periodic_rate(annual: f64, periods: u32) -> f64 {
    annual / f64::from(periods.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = RiskConfig::default();
        assert!((config.confidence - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.trading_days, 252);
        assert_eq!(config.percent_decimals, 2);
        assert_eq!(config.shock_policy, ShockPolicy::Lenient);
        assert_eq!(config.impact_metric, "VaR_95");
        assert!((config.default_likelihood - 0.1).abs() < f64::EPSILON);
        assert!((config.default_liquidity - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RiskConfig::new()
            .with_confidence(0.99)
            .with_risk_free_rate(0.0252)
            .with_shock_policy(ShockPolicy::Strict)
            .with_impact_metric("CVaR_99")
            .with_threshold(2);

        assert!((config.confidence - 0.99).abs() < f64::EPSILON);
        assert!((config.periodic_risk_free_rate() - 0.0001).abs() < 1e-15);
        assert!(config.shock_policy.is_strict());
        assert_eq!(config.impact_metric, "CVaR_99");
        assert_eq!(config.parallel_threshold, 2);
    }

    #[test]
    fn test_should_parallelize() {
        let config = RiskConfig::new().with_threshold(4);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(3));
            assert!(config.should_parallelize(4));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(3));
            assert!(!config.should_parallelize(4));
        }

        assert!(!RiskConfig::sequential().should_parallelize(1000));
    }

    #[test]
    fn test_serde_partial() {
        let json = r#"{ "confidence": 0.99, "shock_policy": "strict" }"#;
        let parsed: RiskConfig = serde_json::from_str(json).unwrap();

        assert!((parsed.confidence - 0.99).abs() < f64::EPSILON);
        assert_eq!(parsed.shock_policy, ShockPolicy::Strict);
        assert_eq!(parsed.trading_days, 252);
    }
}
