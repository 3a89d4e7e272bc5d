//! Risk metrics engine.

use super::{MetricKey, MetricValue, RiskMetricsResult};
use crate::portfolio::Portfolio;
use crate::returns::ReturnsHistory;
use crate::table::{Cell, SummaryTable};
use crate::types::RiskConfig;
use crate::{RiskError, RiskResult};
use nalgebra::{DMatrix, DVector};
use risklab_math::statistics::{covariance_matrix, mean, percentile, quadratic_form, sample_std};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Computes risk metrics for a portfolio over a returns history.
///
/// The portfolio's ticker columns are selected from the history once at
/// construction, together with the weighted return series
/// `r_t = Σ_i w_i · r_{t,i}`. Every `compute_*` call derives its metric
/// afresh from those and records it in the engine's result, replacing any
/// earlier value under the same key.
///
/// # Example
///
/// ```
/// use risklab_portfolio::prelude::*;
///
/// let portfolio = Portfolio::builder()
///     .holding("AAPL", 0.6)
///     .holding("TLT", 0.4)
///     .build()
///     .unwrap();
/// let returns = ReturnsHistory::from_rows(
///     vec!["AAPL".into(), "TLT".into()],
///     &[vec![0.01, 0.002], vec![-0.02, 0.004], vec![0.015, -0.001]],
/// )
/// .unwrap();
///
/// let mut metrics = RiskMetrics::new(&portfolio, &returns).unwrap();
/// let vol = metrics.compute_volatility().unwrap();
/// assert!(vol > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RiskMetrics<'a> {
    portfolio: &'a Portfolio,
    config: RiskConfig,
    observations: DMatrix<f64>,
    weighted: Vec<f64>,
    result: RiskMetricsResult,
    failures: Vec<(MetricKey, RiskError)>,
}

impl<'a> RiskMetrics<'a> {
    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `MissingReturns` if a portfolio ticker has no returns column.
    pub fn new(portfolio: &'a Portfolio, returns: &ReturnsHistory) -> RiskResult<Self> {
        Self::with_config(portfolio, returns, RiskConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `MissingReturns` if a portfolio ticker has no returns column.
    pub fn with_config(
        portfolio: &'a Portfolio,
        returns: &ReturnsHistory,
        config: RiskConfig,
    ) -> RiskResult<Self> {
        let observations = returns.select(portfolio.tickers())?;
        let weights = DVector::from_column_slice(portfolio.weights());
        let weighted = (&observations * weights).iter().copied().collect();

        Ok(Self {
            portfolio,
            config,
            observations,
            weighted,
            result: RiskMetricsResult::new(),
            failures: Vec::new(),
        })
    }

    /// The portfolio being measured.
    #[must_use]
    pub fn portfolio(&self) -> &'a Portfolio {
        self.portfolio
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Number of return periods.
    #[must_use]
    pub fn n_periods(&self) -> usize {
        self.weighted.len()
    }

    /// The weighted portfolio return series, oldest first.
    #[must_use]
    pub fn weighted_returns(&self) -> &[f64] {
        &self.weighted
    }

    /// Portfolio volatility `√(wᵀ Σ w)` with the sample covariance matrix.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than two periods.
    pub fn compute_volatility(&mut self) -> RiskResult<f64> {
        let cov = covariance_matrix(&self.observations)?;
        let variance = quadratic_form(self.portfolio.weights(), &cov)?;
        // Round-off can push a zero variance slightly negative.
        let vol = variance.max(0.0).sqrt();

        debug!(volatility = vol, periods = self.n_periods(), "computed volatility");
        self.store(MetricKey::Volatility, vol);
        Ok(vol)
    }

    /// Historical VaR: the negated `(1 − confidence)` percentile of the
    /// weighted series.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `confidence` is outside (0, 1). A single
    /// period is enough: the percentile of one observation is that
    /// observation.
    pub fn compute_var(&mut self, confidence: f64) -> RiskResult<f64> {
        let var = -self.tail_threshold(confidence)?;
        let key = MetricKey::var(confidence);

        debug!(%key, var, "computed value-at-risk");
        self.store(key, var);
        Ok(var)
    }

    /// Conditional VaR: the negated mean of weighted returns at or below the
    /// VaR threshold.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `confidence` is outside (0, 1). Like VaR it
    /// is defined from a single period.
    pub fn compute_cvar(&mut self, confidence: f64) -> RiskResult<f64> {
        let threshold = self.tail_threshold(confidence)?;
        let tail: Vec<f64> = self
            .weighted
            .iter()
            .copied()
            .filter(|r| *r <= threshold)
            .collect();
        let cvar = -mean(&tail)?;
        let key = MetricKey::cvar(confidence);

        debug!(%key, cvar, tail = tail.len(), "computed conditional value-at-risk");
        self.store(key, cvar);
        Ok(cvar)
    }

    /// Sharpe ratio of the weighted series over the per-period risk-free
    /// rate (`annual_rate / trading_days`), using the sample standard
    /// deviation.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than two periods and
    /// `DegenerateStatistic` when the excess returns have zero or
    /// non-finite dispersion. Nothing is stored on error.
    pub fn compute_sharpe(&mut self, annual_rate: f64) -> RiskResult<f64> {
        let rf = crate::types::periodic_rate(annual_rate, self.config.trading_days);
        let excess: Vec<f64> = self.weighted.iter().map(|r| r - rf).collect();

        let std = sample_std(&excess)?;
        if !std.is_finite() || std == 0.0 {
            return Err(RiskError::degenerate(
                MetricKey::Sharpe.to_string(),
                format!("excess returns have standard deviation {std}"),
            ));
        }
        let sharpe = mean(&excess)? / std;

        debug!(sharpe, rf, "computed sharpe ratio");
        self.store(MetricKey::Sharpe, sharpe);
        Ok(sharpe)
    }

    /// Computes volatility, VaR, CVaR and Sharpe with the configured
    /// confidence and risk-free rate.
    ///
    /// Each metric is attempted independently. Those that succeed are
    /// stored; those that fail are logged and kept in
    /// [`RiskMetrics::failures`] until the next call. A one-period history
    /// thus still yields VaR and CVaR.
    pub fn compute_all(&mut self) -> &RiskMetricsResult {
        let confidence = self.config.confidence;
        let risk_free = self.config.risk_free_rate;

        let attempts = [
            (MetricKey::Volatility, self.compute_volatility()),
            (MetricKey::var(confidence), self.compute_var(confidence)),
            (MetricKey::cvar(confidence), self.compute_cvar(confidence)),
            (MetricKey::Sharpe, self.compute_sharpe(risk_free)),
        ];

        self.failures.clear();
        for (key, attempt) in attempts {
            if let Err(err) = attempt {
                warn!(%key, error = %err, "metric not computed");
                self.failures.push((key, err));
            }
        }
        &self.result
    }

    /// Metrics that failed during the last [`RiskMetrics::compute_all`],
    /// with the reason.
    #[must_use]
    pub fn failures(&self) -> &[(MetricKey, RiskError)] {
        &self.failures
    }

    /// All metrics computed so far.
    #[must_use]
    pub fn result(&self) -> &RiskMetricsResult {
        &self.result
    }

    /// Consumes the engine, returning its metrics.
    #[must_use]
    pub fn into_result(self) -> RiskMetricsResult {
        self.result
    }

    /// Numeric value of a computed metric.
    #[must_use]
    pub fn metric(&self, key: MetricKey) -> Option<f64> {
        self.result.value(key)
    }

    /// Metric map: display forms when `formatted`, raw numbers otherwise.
    #[must_use]
    pub fn summary(&self, formatted: bool) -> BTreeMap<MetricKey, Cell> {
        self.result.summary(formatted)
    }

    /// One-row metrics table.
    #[must_use]
    pub fn summary_table(&self, formatted: bool) -> SummaryTable {
        self.result.to_table(formatted)
    }

    /// Sample standard deviation of each holding's returns, in portfolio
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than two periods.
    pub fn asset_volatilities(&self) -> RiskResult<Vec<(String, f64)>> {
        self.portfolio
            .tickers()
            .iter()
            .enumerate()
            .map(|(j, ticker)| {
                let column: Vec<f64> = self.observations.column(j).iter().copied().collect();
                Ok((ticker.clone(), sample_std(&column)?))
            })
            .collect()
    }

    fn tail_threshold(&self, confidence: f64) -> RiskResult<f64> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(RiskError::invalid_input(format!(
                "confidence {confidence} outside (0, 1)"
            )));
        }
        Ok(percentile(&self.weighted, (1.0 - confidence) * 100.0)?)
    }

    fn store(&mut self, key: MetricKey, value: f64) {
        let entry = MetricValue::new(key, value, self.config.percent_decimals);
        self.result.insert(key, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn portfolio() -> Portfolio {
        Portfolio::builder()
            .holding("A", 0.5)
            .holding("B", 0.5)
            .build()
            .unwrap()
    }

    fn returns() -> ReturnsHistory {
        ReturnsHistory::from_rows(
            vec!["A".into(), "B".into()],
            &[
                vec![0.01, 0.03],
                vec![-0.02, 0.00],
                vec![0.03, -0.01],
                vec![-0.01, -0.03],
                vec![0.02, 0.02],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_weighted_series() {
        let portfolio = portfolio();
        let metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();
        let expected = [0.02, -0.01, 0.01, -0.02, 0.02];

        for (got, want) in metrics.weighted_returns().iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_volatility_matches_series_std() {
        let portfolio = portfolio();
        let mut metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();
        let vol = metrics.compute_volatility().unwrap();

        // wᵀΣw equals the sample variance of the weighted series
        let direct = sample_std(metrics.weighted_returns()).unwrap();
        assert_relative_eq!(vol, direct, epsilon = 1e-12);
        assert_eq!(metrics.metric(MetricKey::Volatility), Some(vol));
    }

    #[test]
    fn test_var_and_cvar() {
        let portfolio = portfolio();
        let mut metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();

        // sorted: -0.02, -0.01, 0.01, 0.02, 0.02; h = 4 * 0.05 = 0.2
        let var = metrics.compute_var(0.95).unwrap();
        assert_relative_eq!(var, 0.018, epsilon = 1e-12);

        // only -0.02 is at or below -0.018
        let cvar = metrics.compute_cvar(0.95).unwrap();
        assert_relative_eq!(cvar, 0.02, epsilon = 1e-12);
        assert!(cvar >= var);

        assert!(metrics.metric(MetricKey::VaR(95)).is_some());
        assert!(metrics.metric(MetricKey::CVaR(95)).is_some());
    }

    #[test]
    fn test_confidence_validated() {
        let portfolio = portfolio();
        let mut metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();

        assert!(matches!(
            metrics.compute_var(1.0),
            Err(RiskError::InvalidInput { .. })
        ));
        assert!(metrics.compute_cvar(0.0).is_err());
        assert!(metrics.result().is_empty());
    }

    #[test]
    fn test_sharpe() {
        let portfolio = portfolio();
        let mut metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();

        let sharpe = metrics.compute_sharpe(0.0).unwrap();
        let series = metrics.weighted_returns();
        let expected = mean(series).unwrap() / sample_std(series).unwrap();
        assert_relative_eq!(sharpe, expected, epsilon = 1e-12);

        // idempotent
        assert_eq!(metrics.compute_sharpe(0.0).unwrap(), sharpe);
    }

    #[test]
    fn test_sharpe_risk_free_shift() {
        let portfolio = portfolio();
        let mut metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();

        let base = metrics.compute_sharpe(0.0).unwrap();
        let with_rf = metrics.compute_sharpe(0.252).unwrap();
        let std = sample_std(metrics.weighted_returns()).unwrap();
        assert_relative_eq!(base - with_rf, 0.001 / std, epsilon = 1e-12);
    }

    #[test]
    fn test_sharpe_degenerate() {
        let portfolio = portfolio();
        let flat = ReturnsHistory::from_rows(
            vec!["A".into(), "B".into()],
            &[vec![0.01, 0.01], vec![0.01, 0.01], vec![0.01, 0.01]],
        )
        .unwrap();
        let mut metrics = RiskMetrics::new(&portfolio, &flat).unwrap();

        let err = metrics.compute_sharpe(0.0).unwrap_err();
        assert!(matches!(err, RiskError::DegenerateStatistic { .. }));
        assert!(metrics.metric(MetricKey::Sharpe).is_none());
    }

    #[test]
    fn test_insufficient_data() {
        let portfolio = portfolio();
        let one_row =
            ReturnsHistory::from_rows(vec!["A".into(), "B".into()], &[vec![0.01, 0.02]]).unwrap();
        let mut metrics = RiskMetrics::new(&portfolio, &one_row).unwrap();

        assert_eq!(
            metrics.compute_volatility().unwrap_err(),
            RiskError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
        assert!(metrics.compute_sharpe(0.0).is_err());
        // VaR of a single observation is still defined
        assert_relative_eq!(metrics.compute_var(0.95).unwrap(), -0.015, epsilon = 1e-15);
    }

    #[test]
    fn test_missing_ticker() {
        let portfolio = Portfolio::builder().holding("ZZZ", 1.0).build().unwrap();
        let err = RiskMetrics::new(&portfolio, &returns()).unwrap_err();
        assert_eq!(err, RiskError::missing_returns("ZZZ"));
    }

    #[test]
    fn test_compute_all_and_summary() {
        let portfolio = portfolio();
        let mut metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();
        metrics.compute_all();
        assert!(metrics.failures().is_empty());

        let keys: Vec<String> = metrics.result().keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["Volatility", "VaR_95", "CVaR_95", "Sharpe"]);

        let formatted = metrics.summary(true);
        assert_eq!(formatted[&MetricKey::VaR(95)], Cell::Text("1.80%".into()));
        let raw = metrics.summary(false);
        assert_eq!(raw[&MetricKey::VaR(95)].as_f64(), metrics.metric(MetricKey::VaR(95)));
    }

    #[test]
    fn test_compute_all_keeps_metrics_that_succeed() {
        let portfolio = portfolio();
        let one_row =
            ReturnsHistory::from_rows(vec!["A".into(), "B".into()], &[vec![0.01, 0.02]]).unwrap();
        let mut metrics = RiskMetrics::new(&portfolio, &one_row).unwrap();

        let keys: Vec<MetricKey> = metrics.compute_all().keys().collect();
        assert_eq!(keys, vec![MetricKey::VaR(95), MetricKey::CVaR(95)]);
        assert_relative_eq!(metrics.metric(MetricKey::CVaR(95)).unwrap(), -0.015, epsilon = 1e-15);

        let failed: Vec<MetricKey> = metrics.failures().iter().map(|(k, _)| *k).collect();
        assert_eq!(failed, vec![MetricKey::Volatility, MetricKey::Sharpe]);
        assert!(matches!(
            metrics.failures()[0].1,
            RiskError::InsufficientData { required: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_compute_all_clears_failures() {
        let portfolio = portfolio();
        let mut metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();

        metrics.compute_all();
        metrics.compute_all();
        assert!(metrics.failures().is_empty());
        assert_eq!(metrics.result().len(), 4);
    }

    #[test]
    fn test_asset_volatilities() {
        let portfolio = portfolio();
        let metrics = RiskMetrics::new(&portfolio, &returns()).unwrap();
        let vols = metrics.asset_volatilities().unwrap();

        assert_eq!(vols[0].0, "A");
        assert_relative_eq!(
            vols[0].1,
            sample_std(&[0.01, -0.02, 0.03, -0.01, 0.02]).unwrap(),
            epsilon = 1e-15
        );
    }
}
