//! Likelihood x impact risk matrix.
//!
//! Cell `(i, j)` scores the pair of holdings `i` and `j` as
//! `round(((l_i + l_j) / 2) * impact, 6)`, where `l` are per-holding
//! likelihoods and `impact` is one portfolio risk metric (VaR by default).

use crate::metrics::{parse_percent, MetricKey, RiskMetricsResult};
use crate::portfolio::Portfolio;
use crate::table::{Cell, SummaryTable};
use crate::types::RiskConfig;
use crate::{RiskError, RiskResult};
use risklab_math::statistics::round_to;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Extracts the impact value for `key` from a metric summary.
///
/// Numeric cells are used as is; text cells go through [`parse_percent`].
/// A key absent from the summary yields an impact of 0.
///
/// # Errors
///
/// Returns `InvalidInput` if a text cell does not parse.
pub fn extract_impact(summary: &BTreeMap<MetricKey, Cell>, key: MetricKey) -> RiskResult<f64> {
    match summary.get(&key) {
        Some(Cell::Number(value)) => Ok(*value),
        Some(Cell::Text(text)) => parse_percent(text),
        Some(Cell::Blank) | None => {
            warn!(%key, "impact metric not in summary, using 0");
            Ok(0.0)
        }
    }
}

/// Builds risk matrices for a portfolio.
#[derive(Debug, Clone)]
pub struct RiskMatrixBuilder<'a> {
    portfolio: &'a Portfolio,
    impact_metric: String,
    likelihoods: Vec<f64>,
}

impl<'a> RiskMatrixBuilder<'a> {
    /// Creates a builder with default likelihoods (0.1) and `VaR_95` impact.
    #[must_use]
    pub fn new(portfolio: &'a Portfolio) -> Self {
        Self::with_config(portfolio, &RiskConfig::default())
    }

    /// Creates a builder from a configuration's default likelihood and
    /// impact metric.
    #[must_use]
    pub fn with_config(portfolio: &'a Portfolio, config: &RiskConfig) -> Self {
        Self {
            portfolio,
            impact_metric: config.impact_metric.clone(),
            likelihoods: vec![config.default_likelihood.clamp(0.0, 1.0); portfolio.len()],
        }
    }

    /// Sets the impact metric key (e.g. `CVaR_95`).
    #[must_use]
    pub fn impact_metric(mut self, key: impl Into<String>) -> Self {
        self.impact_metric = key.into();
        self
    }

    /// Merges explicit likelihoods, clamped to `[0, 1]`.
    ///
    /// Tickers the portfolio does not hold are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a NaN likelihood.
    pub fn likelihoods(mut self, likelihoods: &BTreeMap<String, f64>) -> RiskResult<Self> {
        if let Some((ticker, _)) = likelihoods.iter().find(|(_, v)| v.is_nan()) {
            return Err(RiskError::invalid_input(format!(
                "likelihood for '{ticker}' is NaN"
            )));
        }
        for (ticker, value) in likelihoods {
            match self.portfolio.position(ticker) {
                Some(i) => self.likelihoods[i] = value.clamp(0.0, 1.0),
                None => debug!(ticker = %ticker, "ignoring likelihood for unknown ticker"),
            }
        }
        Ok(self)
    }

    /// Likelihood of one holding.
    #[must_use]
    pub fn likelihood(&self, ticker: &str) -> Option<f64> {
        self.portfolio.position(ticker).map(|i| self.likelihoods[i])
    }

    /// Computes the matrix with impact read from computed metrics.
    ///
    /// The numeric side of the stored metric is used, so the impact equals
    /// the metric exactly.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMetric` if the configured impact key does not parse.
    pub fn compute_matrix(&self, metrics: &RiskMetricsResult) -> RiskResult<RiskMatrix> {
        let key: MetricKey = self.impact_metric.parse()?;
        let impact = extract_impact(&metrics.summary(false), key)?;
        Ok(self.compute_with_impact(impact))
    }

    /// Computes the matrix for an explicit impact value.
    #[must_use]
    pub fn compute_with_impact(&self, impact: f64) -> RiskMatrix {
        let n = self.likelihoods.len();
        let cells = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let likelihood = (self.likelihoods[i] + self.likelihoods[j]) / 2.0;
                        round_to(likelihood * impact, 6)
                    })
                    .collect()
            })
            .collect();

        debug!(assets = n, impact, "computed risk matrix");
        RiskMatrix {
            tickers: self.portfolio.tickers().to_vec(),
            cells,
        }
    }
}

/// Square, ticker-indexed risk-score matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMatrix {
    tickers: Vec<String>,
    cells: Vec<Vec<f64>>,
}

impl RiskMatrix {
    /// Row and column labels.
    #[must_use]
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Matrix dimension.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Returns true for an empty matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Cell by position.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Cell by ticker pair.
    #[must_use]
    pub fn value(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.tickers.iter().position(|t| t == row)?;
        let j = self.tickers.iter().position(|t| t == column)?;
        self.get(i, j)
    }

    /// Rows in ticker order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    /// Returns true if `m[i][j] == m[j][i]` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| (i + 1..n).all(|j| self.cells[i][j] == self.cells[j][i]))
    }

    /// Ticker-indexed table with one column per ticker.
    #[must_use]
    pub fn to_table(&self) -> SummaryTable {
        let mut table = SummaryTable::new("RiskMatrix", "Ticker", self.tickers.clone());
        for (ticker, row) in self.tickers.iter().zip(&self.cells) {
            table.push_row(ticker.clone(), row.iter().map(|v| Cell::Number(*v)).collect());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricValue;
    use approx::assert_relative_eq;

    fn portfolio() -> Portfolio {
        Portfolio::builder()
            .holding("AAPL", 0.4)
            .holding("GOOGL", 0.35)
            .holding("TSLA", 0.25)
            .build()
            .unwrap()
    }

    fn metrics_with_var(var: f64) -> RiskMetricsResult {
        let mut result = RiskMetricsResult::new();
        result.insert(MetricKey::VaR(95), MetricValue::new(MetricKey::VaR(95), var, 2));
        result
    }

    #[test]
    fn test_default_likelihoods() {
        let portfolio = portfolio();
        let matrix = RiskMatrixBuilder::new(&portfolio)
            .compute_matrix(&metrics_with_var(0.05))
            .unwrap();

        assert_eq!(matrix.len(), 3);
        for row in matrix.rows() {
            for cell in row {
                assert_relative_eq!(*cell, 0.005);
            }
        }
    }

    #[test]
    fn test_pairwise_average() {
        let portfolio = portfolio();
        let likelihoods: BTreeMap<String, f64> =
            [("AAPL".to_string(), 0.2), ("TSLA".to_string(), 0.4), ("XOM".to_string(), 0.9)]
                .into_iter()
                .collect();
        let builder = RiskMatrixBuilder::new(&portfolio)
            .likelihoods(&likelihoods)
            .unwrap();
        let matrix = builder.compute_with_impact(0.02);

        assert_relative_eq!(matrix.value("AAPL", "TSLA").unwrap(), 0.006);
        assert_relative_eq!(matrix.value("GOOGL", "GOOGL").unwrap(), 0.002);
        assert!(matrix.is_symmetric());
        assert_eq!(builder.likelihood("XOM"), None);
    }

    #[test]
    fn test_likelihoods_clamped() {
        let portfolio = portfolio();
        let likelihoods: BTreeMap<String, f64> =
            [("AAPL".to_string(), 3.0), ("GOOGL".to_string(), -1.0)].into_iter().collect();
        let builder = RiskMatrixBuilder::new(&portfolio)
            .likelihoods(&likelihoods)
            .unwrap();

        assert_eq!(builder.likelihood("AAPL"), Some(1.0));
        assert_eq!(builder.likelihood("GOOGL"), Some(0.0));
    }

    #[test]
    fn test_impact_uses_numeric_value() {
        let portfolio = portfolio();
        // 0.123456 formats as "12.35%", the matrix still sees 0.123456
        let matrix = RiskMatrixBuilder::new(&portfolio)
            .compute_matrix(&metrics_with_var(0.123_456))
            .unwrap();
        assert_relative_eq!(matrix.get(0, 0).unwrap(), round_to(0.1 * 0.123_456, 6));
    }

    #[test]
    fn test_extract_impact_forms() {
        let mut summary = BTreeMap::new();
        summary.insert(MetricKey::VaR(95), Cell::Text("0.36%".into()));
        summary.insert(MetricKey::CVaR(95), Cell::Number(0.05));

        assert_relative_eq!(
            extract_impact(&summary, MetricKey::VaR(95)).unwrap(),
            0.0036,
            epsilon = 1e-15
        );
        assert_relative_eq!(extract_impact(&summary, MetricKey::CVaR(95)).unwrap(), 0.05);
        assert_eq!(extract_impact(&summary, MetricKey::VaR(99)).unwrap(), 0.0);
    }

    #[test]
    fn test_missing_metric_gives_zero_matrix() {
        let portfolio = portfolio();
        let matrix = RiskMatrixBuilder::new(&portfolio)
            .impact_metric("CVaR_99")
            .compute_matrix(&metrics_with_var(0.05))
            .unwrap();
        assert!(matrix.rows().iter().flatten().all(|v| *v == 0.0));
    }

    #[test]
    fn test_unknown_metric_key() {
        let portfolio = portfolio();
        let err = RiskMatrixBuilder::new(&portfolio)
            .impact_metric("Beta")
            .compute_matrix(&metrics_with_var(0.05))
            .unwrap_err();
        assert!(matches!(err, RiskError::UnknownMetric { .. }));
    }

    #[test]
    fn test_to_table() {
        let portfolio = portfolio();
        let table = RiskMatrixBuilder::new(&portfolio)
            .compute_with_impact(0.05)
            .to_table();

        assert_eq!(table.columns, vec!["AAPL", "GOOGL", "TSLA"]);
        assert_eq!(table.cell("TSLA", "AAPL"), Some(&Cell::Number(0.005)));
    }
}
