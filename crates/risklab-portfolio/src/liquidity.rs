//! Liquidity scoring and liquidity shock scenarios.
//!
//! Each holding carries a liquidity score in `[0, 1]` (0 = illiquid,
//! 1 = highly liquid). Portfolio liquidity is the weight-averaged score.

use crate::portfolio::Portfolio;
use crate::scenario::{resolve_shocks, ScenarioResults, ShockSet};
use crate::table::{Cell, SummaryTable};
use crate::types::RiskConfig;
use crate::{RiskError, RiskResult};
use risklab_math::statistics::round_to;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Column header of the liquidity summary.
pub const LIQUIDITY_COLUMN: &str = "Portfolio Liquidity";

/// Liquidity scores for a portfolio and the results of liquidity shocks.
#[derive(Debug, Clone)]
pub struct Liquidity<'a> {
    portfolio: &'a Portfolio,
    config: RiskConfig,
    /// One score per holding, in portfolio order.
    scores: Vec<f64>,
    results: ScenarioResults<f64>,
}

impl<'a> Liquidity<'a> {
    /// Creates an engine with every score at the default (0.5).
    #[must_use]
    pub fn new(portfolio: &'a Portfolio) -> Self {
        Self::with_config(portfolio, RiskConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    #[must_use]
    pub fn with_config(portfolio: &'a Portfolio, config: RiskConfig) -> Self {
        let default = clamp_unit(config.default_liquidity);
        Self {
            portfolio,
            scores: vec![default; portfolio.len()],
            config,
            results: ScenarioResults::new(),
        }
    }

    /// Builder form of [`Liquidity::set_liquidity_scores`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a NaN score.
    pub fn with_scores(mut self, scores: &BTreeMap<String, f64>) -> RiskResult<Self> {
        self.set_liquidity_scores(scores)?;
        Ok(self)
    }

    /// Merges explicit scores, clamped to `[0, 1]`.
    ///
    /// Tickers the portfolio does not hold are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a NaN score; no score is changed then.
    pub fn set_liquidity_scores(&mut self, scores: &BTreeMap<String, f64>) -> RiskResult<()> {
        if let Some((ticker, _)) = scores.iter().find(|(_, v)| v.is_nan()) {
            return Err(RiskError::invalid_input(format!(
                "liquidity score for '{ticker}' is NaN"
            )));
        }

        for (ticker, score) in scores {
            match self.portfolio.position(ticker) {
                Some(i) => self.scores[i] = clamp_unit(*score),
                None => debug!(ticker = %ticker, "ignoring liquidity score for unknown ticker"),
            }
        }
        Ok(())
    }

    /// Score of one holding.
    #[must_use]
    pub fn score(&self, ticker: &str) -> Option<f64> {
        self.portfolio.position(ticker).map(|i| self.scores[i])
    }

    /// All scores, in portfolio order.
    #[must_use]
    pub fn scores(&self) -> Vec<(&str, f64)> {
        self.portfolio
            .tickers()
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
            .collect()
    }

    /// Weighted average score, rounded to 4 decimals.
    #[must_use]
    pub fn portfolio_liquidity(&self) -> f64 {
        self.weighted(&self.scores)
    }

    /// Applies a liquidity shock and stores the resulting portfolio
    /// liquidity under `name`.
    ///
    /// Targeted scores are multiplied by `1 + shock` and clamped to
    /// `[0, 1]` after each shock. The engine's own scores are not changed.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedShockKey` in strict mode. Stored results are
    /// unchanged on error.
    pub fn apply_scenario(&mut self, name: &str, shocks: &ShockSet) -> RiskResult<f64> {
        let resolved = resolve_shocks(
            name,
            shocks,
            self.portfolio,
            |key| self.portfolio.position(key).is_some(),
            self.config.shock_policy,
        )?;

        let mut shocked = self.scores.clone();
        for shock in &resolved {
            for ticker in &shock.tickers {
                if let Some(i) = self.portfolio.position(ticker) {
                    shocked[i] = clamp_unit(shocked[i] * shock.factor());
                }
            }
        }

        let liquidity = self.weighted(&shocked);
        let replaced = self.results.insert(name, liquidity).is_some();
        info!(scenario = name, liquidity, replaced, "stored liquidity scenario");
        Ok(liquidity)
    }

    /// Liquidity stored for a scenario.
    #[must_use]
    pub fn result(&self, name: &str) -> Option<f64> {
        self.results.get(name).copied()
    }

    /// All stored results.
    #[must_use]
    pub fn results(&self) -> &ScenarioResults<f64> {
        &self.results
    }

    /// Scenario name to portfolio liquidity, one row per stored scenario.
    #[must_use]
    pub fn summary(&self) -> SummaryTable {
        let mut table = SummaryTable::new("Liquidity", "Scenario", vec![LIQUIDITY_COLUMN.to_string()]);
        for (name, liquidity) in self.results.iter() {
            table.push_row(name, vec![Cell::Number(*liquidity)]);
        }
        table
    }

    fn weighted(&self, scores: &[f64]) -> f64 {
        let total: f64 = self
            .portfolio
            .weights()
            .iter()
            .zip(scores)
            .map(|(w, s)| w * s)
            .sum();
        round_to(total, 4)
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
