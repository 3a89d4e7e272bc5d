//! Portfolio struct and core methods.

use crate::table::{Cell, SummaryTable};
use crate::types::RawTable;
use crate::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Asset class assigned to holdings without one.
pub const UNKNOWN_ASSET_CLASS: &str = "Unknown";

/// A single normalized position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, unique within the portfolio.
    pub ticker: String,

    /// Normalized weight in [0, 1].
    pub weight: f64,

    /// Asset class label (e.g. `Equity`, `Bond`).
    pub asset_class: String,
}

/// A weighted portfolio.
///
/// Weights are normalized to sum to one when the portfolio is built and the
/// holdings are read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PortfolioData")]
pub struct Portfolio {
    name: String,
    holdings: Vec<Holding>,
    #[serde(skip)]
    tickers: Vec<String>,
    #[serde(skip)]
    weights: Vec<f64>,
    #[serde(skip)]
    asset_classes: Vec<String>,
}

impl Portfolio {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn builder() -> super::PortfolioBuilder {
        super::PortfolioBuilder::new()
    }

    /// Loads a portfolio from tabular input.
    ///
    /// Column names are whitespace-stripped; an `Allocation` column is read as
    /// `Weight`; the asset class comes from `AssetType` or `AssetClass` when
    /// present and defaults to `Unknown`.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidPortfolio`] when the `Ticker` or weight
    /// column is missing, a weight does not parse or is negative, or the
    /// weights sum to zero.
    pub fn load(table: &RawTable) -> RiskResult<Self> {
        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|c| match c.trim() {
                "Allocation" => "Weight".to_string(),
                other => other.to_string(),
            })
            .collect();
        let find = |name: &str| columns.iter().position(|c| c == name);

        let ticker_col = find("Ticker")
            .ok_or_else(|| RiskError::invalid_portfolio("input must have a 'Ticker' column"))?;
        let weight_col = find("Weight").ok_or_else(|| {
            RiskError::invalid_portfolio("input must have a 'Weight' or 'Allocation' column")
        })?;
        let class_col = find("AssetType").or_else(|| find("AssetClass"));

        let mut builder = Self::builder();
        for row in 0..table.len() {
            let ticker = table.cell(row, ticker_col);
            let raw_weight = table.cell(row, weight_col);
            let weight: f64 = raw_weight.parse().map_err(|_| {
                RiskError::invalid_portfolio(format!(
                    "weight '{raw_weight}' for '{ticker}' is not a number"
                ))
            })?;
            let class = class_col.map(|c| table.cell(row, c)).unwrap_or_default();
            builder = builder.holding_with_class(ticker, weight, class);
        }

        builder.build()
    }

    /// Normalizes raw holdings. Called once, by the builder.
    pub(crate) fn from_raw(name: String, raw: Vec<Holding>) -> RiskResult<Self> {
        if raw.is_empty() {
            return Err(RiskError::invalid_portfolio("portfolio has no holdings"));
        }

        let mut seen = std::collections::HashSet::new();
        for h in &raw {
            if h.ticker.is_empty() {
                return Err(RiskError::invalid_portfolio("holding with empty ticker"));
            }
            if !seen.insert(h.ticker.as_str()) {
                return Err(RiskError::invalid_portfolio(format!(
                    "duplicate ticker '{}'",
                    h.ticker
                )));
            }
            if !h.weight.is_finite() || h.weight < 0.0 {
                return Err(RiskError::invalid_portfolio(format!(
                    "invalid weight {} for '{}'",
                    h.weight, h.ticker
                )));
            }
        }

        let total: f64 = raw.iter().map(|h| h.weight).sum();
        if total == 0.0 {
            return Err(RiskError::invalid_portfolio(
                "total weight of portfolio is zero",
            ));
        }

        let holdings: Vec<Holding> = raw
            .into_iter()
            .map(|h| Holding {
                weight: h.weight / total,
                asset_class: if h.asset_class.trim().is_empty() {
                    UNKNOWN_ASSET_CLASS.to_string()
                } else {
                    h.asset_class.trim().to_string()
                },
                ticker: h.ticker,
            })
            .collect();

        Ok(Self::index(name, holdings))
    }

    fn index(name: String, holdings: Vec<Holding>) -> Self {
        Self {
            tickers: holdings.iter().map(|h| h.ticker.clone()).collect(),
            weights: holdings.iter().map(|h| h.weight).collect(),
            asset_classes: holdings.iter().map(|h| h.asset_class.clone()).collect(),
            name,
            holdings,
        }
    }

    /// Portfolio name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized holdings, in input order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Tickers, in holding order.
    #[must_use]
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Normalized weights, in holding order.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Asset classes, in holding order.
    #[must_use]
    pub fn asset_classes(&self) -> &[String] {
        &self.asset_classes
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if the portfolio has no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of normalized weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Position of a ticker.
    #[must_use]
    pub fn position(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Weight of a ticker.
    #[must_use]
    pub fn weight_of(&self, ticker: &str) -> Option<f64> {
        self.position(ticker).map(|i| self.weights[i])
    }

    /// Asset class of a ticker.
    #[must_use]
    pub fn asset_class_of(&self, ticker: &str) -> Option<&str> {
        self.position(ticker).map(|i| self.asset_classes[i].as_str())
    }

    /// Positions of all holdings in an asset class.
    #[must_use]
    pub fn positions_in_class(&self, asset_class: &str) -> Vec<usize> {
        self.asset_classes
            .iter()
            .enumerate()
            .filter(|(_, c)| *c == asset_class)
            .map(|(i, _)| i)
            .collect()
    }

    /// Tickers of all holdings in an asset class.
    #[must_use]
    pub fn tickers_in_class(&self, asset_class: &str) -> Vec<&str> {
        self.positions_in_class(asset_class)
            .into_iter()
            .map(|i| self.tickers[i].as_str())
            .collect()
    }

    /// Ticker → weight map.
    #[must_use]
    pub fn weights_by_ticker(&self) -> BTreeMap<String, f64> {
        self.tickers
            .iter()
            .cloned()
            .zip(self.weights.iter().copied())
            .collect()
    }

    /// Tabular view: one row per holding with weight and asset class.
    #[must_use]
    pub fn summary(&self) -> SummaryTable {
        let mut table = SummaryTable::new(
            "Portfolio",
            "Ticker",
            vec!["Weight".to_string(), "AssetType".to_string()],
        );
        for h in &self.holdings {
            table.push_row(
                h.ticker.clone(),
                vec![Cell::Number(h.weight), Cell::Text(h.asset_class.clone())],
            );
        }
        table
    }
}

impl fmt::Display for Portfolio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Portfolio: {} assets, Total Weight: {:.2}>",
            self.len(),
            self.total_weight()
        )
    }
}

/// Serialized form; deserialization re-validates and re-normalizes.
#[derive(Deserialize)]
struct PortfolioData {
    name: String,
    holdings: Vec<Holding>,
}

impl TryFrom<PortfolioData> for Portfolio {
    type Error = RiskError;

    fn try_from(data: PortfolioData) -> RiskResult<Self> {
        Self::from_raw(data.name, data.holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RawTable {
        RawTable::from_strs(
            &["Ticker", "Weight"],
            &[&["AAPL", "0.4"], &["GOOGL", "0.35"], &["TSLA", "0.25"]],
        )
    }

    #[test]
    fn test_load() {
        let portfolio = Portfolio::load(&sample_table()).unwrap();

        assert_eq!(portfolio.tickers(), ["AAPL", "GOOGL", "TSLA"]);
        assert!((portfolio.weights()[0] - 0.4).abs() < 1e-12);
        assert!((portfolio.total_weight() - 1.0).abs() < 1e-9);
        assert!(portfolio.asset_classes().iter().all(|c| c == "Unknown"));
    }

    #[test]
    fn test_allocation_column_and_whitespace() {
        let table = RawTable::from_strs(
            &[" Ticker ", " Allocation", "AssetType "],
            &[&["AAPL", "40", "Equity"], &["TLT", "60", ""]],
        );
        let portfolio = Portfolio::load(&table).unwrap();

        assert!((portfolio.weight_of("AAPL").unwrap() - 0.4).abs() < 1e-12);
        assert!((portfolio.weight_of("TLT").unwrap() - 0.6).abs() < 1e-12);
        assert_eq!(portfolio.asset_class_of("AAPL"), Some("Equity"));
        assert_eq!(portfolio.asset_class_of("TLT"), Some("Unknown"));
    }

    #[test]
    fn test_missing_weight_column() {
        let table = RawTable::from_strs(&["Ticker", "Shares"], &[&["AAPL", "10"]]);
        let err = Portfolio::load(&table).unwrap_err();
        assert!(matches!(err, RiskError::InvalidPortfolio { .. }));
        assert!(err.to_string().contains("Allocation"));
    }

    #[test]
    fn test_zero_total_weight() {
        let table = RawTable::from_strs(&["Ticker", "Weight"], &[&["AAPL", "0"], &["MSFT", "0"]]);
        let err = Portfolio::load(&table).unwrap_err();
        assert!(err.to_string().contains("zero"));
    }

    #[test]
    fn test_unparseable_weight() {
        let table = RawTable::from_strs(&["Ticker", "Weight"], &[&["AAPL", "abc"]]);
        assert!(matches!(
            Portfolio::load(&table),
            Err(RiskError::InvalidPortfolio { .. })
        ));
    }

    #[test]
    fn test_class_lookup() {
        let table = RawTable::from_strs(
            &["Ticker", "Weight", "AssetClass"],
            &[&["AAPL", "1", "Equity"], &["TLT", "1", "Bond"], &["MSFT", "2", "Equity"]],
        );
        let portfolio = Portfolio::load(&table).unwrap();

        assert_eq!(portfolio.tickers_in_class("Equity"), vec!["AAPL", "MSFT"]);
        assert_eq!(portfolio.positions_in_class("Bond"), vec![1]);
        assert!(portfolio.tickers_in_class("Crypto").is_empty());
    }

    #[test]
    fn test_summary_and_display() {
        let portfolio = Portfolio::load(&sample_table()).unwrap();
        let summary = portfolio.summary();

        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.columns, vec!["Weight", "AssetType"]);
        assert_eq!(
            portfolio.to_string(),
            "<Portfolio: 3 assets, Total Weight: 1.00>"
        );
    }

    #[test]
    fn test_deserialize_rebuilds_index() {
        let portfolio = Portfolio::load(&sample_table()).unwrap();
        let json = serde_json::to_string(&portfolio).unwrap();
        let parsed: Portfolio = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.tickers(), portfolio.tickers());
        assert!((parsed.total_weight() - 1.0).abs() < 1e-9);
    }
}
