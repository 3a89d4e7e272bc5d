//! Stress test engine.

use crate::metrics::{MetricKey, RiskMetrics, RiskMetricsResult};
use crate::parallel::maybe_parallel_map;
use crate::portfolio::Portfolio;
use crate::returns::ReturnsHistory;
use crate::scenario::{resolve_shocks, Scenario, ScenarioResults, ShockSet};
use crate::table::{Cell, SummaryTable};
use crate::types::RiskConfig;
use crate::RiskResult;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Re-derives risk metrics under shocked returns.
///
/// Each scenario scales the targeted return columns of a private copy of
/// the history by `1 + shock` and runs a fresh [`RiskMetrics`] over it. The
/// borrowed history is never modified.
#[derive(Debug, Clone)]
pub struct StressTest<'a> {
    portfolio: &'a Portfolio,
    returns: &'a ReturnsHistory,
    config: RiskConfig,
    results: ScenarioResults<RiskMetricsResult>,
}

impl<'a> StressTest<'a> {
    /// Creates a stress test with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `MissingReturns` if a portfolio ticker has no returns column.
    pub fn new(portfolio: &'a Portfolio, returns: &'a ReturnsHistory) -> RiskResult<Self> {
        Self::with_config(portfolio, returns, RiskConfig::default())
    }

    /// Creates a stress test with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `MissingReturns` if a portfolio ticker has no returns column.
    pub fn with_config(
        portfolio: &'a Portfolio,
        returns: &'a ReturnsHistory,
        config: RiskConfig,
    ) -> RiskResult<Self> {
        returns.select(portfolio.tickers())?;
        Ok(Self {
            portfolio,
            returns,
            config,
            results: ScenarioResults::new(),
        })
    }

    /// Computes the metrics for a scenario without storing them.
    ///
    /// A metric that cannot be derived from the shocked returns, such as
    /// Sharpe after a full wipeout, is left out of the result and logged.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedShockKey` in strict mode.
    pub fn evaluate(&self, name: &str, shocks: &ShockSet) -> RiskResult<RiskMetricsResult> {
        let resolved = resolve_shocks(
            name,
            shocks,
            self.portfolio,
            |key| self.returns.column_index(key).is_some(),
            self.config.shock_policy,
        )?;

        let mut shocked = self.returns.clone();
        for shock in &resolved {
            for ticker in &shock.tickers {
                shocked.scale_column(ticker, shock.factor())?;
            }
        }

        let mut metrics = RiskMetrics::with_config(self.portfolio, &shocked, self.config.clone())?;
        metrics.compute_all();
        for (key, err) in metrics.failures() {
            warn!(scenario = name, %key, error = %err, "scenario metric left blank");
        }
        Ok(metrics.into_result())
    }

    /// Applies a scenario and stores its metrics under `name`, replacing any
    /// earlier result with that name.
    ///
    /// # Errors
    ///
    /// See [`StressTest::evaluate`]. Stored results are unchanged on error.
    pub fn apply_scenario(&mut self, name: &str, shocks: &ShockSet) -> RiskResult<RiskMetricsResult> {
        let result = self.evaluate(name, shocks)?;
        self.store(name, result.clone());
        Ok(result)
    }

    /// Applies a batch of scenarios.
    ///
    /// Scenarios are evaluated independently (in parallel when configured)
    /// and stored in batch order. If any scenario fails, the first error is
    /// returned and nothing from the batch is stored.
    ///
    /// # Errors
    ///
    /// See [`StressTest::evaluate`].
    pub fn apply_scenarios(&mut self, scenarios: &[Scenario]) -> RiskResult<()> {
        let evaluated = maybe_parallel_map(scenarios, &self.config, |s| {
            self.evaluate(&s.name, &s.shocks)
        })
        .into_iter()
        .collect::<RiskResult<Vec<_>>>()?;

        for (scenario, result) in scenarios.iter().zip(evaluated) {
            self.store(&scenario.name, result);
        }
        Ok(())
    }

    /// Metrics stored for a scenario.
    #[must_use]
    pub fn result(&self, name: &str) -> Option<&RiskMetricsResult> {
        self.results.get(name)
    }

    /// All stored results.
    #[must_use]
    pub fn results(&self) -> &ScenarioResults<RiskMetricsResult> {
        &self.results
    }

    /// Stored scenario names, in first-applied order.
    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.results.names()
    }

    /// Number of stored scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no scenario has been applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Scenario with the largest value of `key`.
    #[must_use]
    pub fn worst_case(&self, key: MetricKey) -> Option<(&str, f64)> {
        self.results
            .iter()
            .filter_map(|(name, r)| r.value(key).map(|v| (name, v)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Scenarios as rows, metrics as columns.
    ///
    /// Columns are the union of metric keys over all scenarios; a metric a
    /// scenario lacks is left blank.
    #[must_use]
    pub fn summary(&self, formatted: bool) -> SummaryTable {
        let keys: BTreeSet<MetricKey> = self.results.iter().flat_map(|(_, r)| r.keys()).collect();
        let columns = keys.iter().map(ToString::to_string).collect();
        let mut table = SummaryTable::new("StressTest", "Scenario", columns);

        for (name, result) in self.results.iter() {
            let summary = result.summary(formatted);
            let cells = keys
                .iter()
                .map(|k| summary.get(k).cloned().unwrap_or(Cell::Blank))
                .collect();
            table.push_row(name, cells);
        }
        table
    }

    fn store(&mut self, name: &str, result: RiskMetricsResult) {
        let replaced = self.results.insert(name, result).is_some();
        info!(scenario = name, replaced, "stored stress scenario");
    }
}
