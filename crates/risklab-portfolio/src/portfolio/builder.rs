//! Portfolio builder for fluent construction.

use super::portfolio::Holding;
use crate::{Portfolio, RiskResult};

/// Builder for constructing a [`Portfolio`].
///
/// Weights may be given in any unit (fractions, percentages, notionals); they
/// are divided by their total on [`PortfolioBuilder::build`].
///
/// # Example
///
/// ```
/// use risklab_portfolio::Portfolio;
///
/// let portfolio = Portfolio::builder()
///     .name("Core")
///     .holding_with_class("AAPL", 40.0, "Equity")
///     .holding_with_class("TLT", 60.0, "Bond")
///     .build()
///     .unwrap();
///
/// assert!((portfolio.weight_of("TLT").unwrap() - 0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    name: Option<String>,
    holdings: Vec<Holding>,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a holding without an asset class.
    #[must_use]
    pub fn holding(self, ticker: impl Into<String>, weight: f64) -> Self {
        self.holding_with_class(ticker, weight, "")
    }

    /// Adds a holding with an asset class (blank means `Unknown`).
    #[must_use]
    pub fn holding_with_class(
        mut self,
        ticker: impl Into<String>,
        weight: f64,
        asset_class: impl Into<String>,
    ) -> Self {
        self.holdings.push(Holding {
            ticker: ticker.into().trim().to_string(),
            weight,
            asset_class: asset_class.into(),
        });
        self
    }

    /// Adds multiple `(ticker, weight)` holdings.
    #[must_use]
    pub fn holdings<I, S>(mut self, holdings: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (ticker, weight) in holdings {
            self = self.holding(ticker, weight);
        }
        self
    }

    /// Builds the portfolio, normalizing weights to sum to one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPortfolio` if there are no holdings, a ticker is empty
    /// or duplicated, a weight is negative or not finite, or the total
    /// weight is zero.
    pub fn build(self) -> RiskResult<Portfolio> {
        let name = self.name.unwrap_or_else(|| "Portfolio".to_string());
        Portfolio::from_raw(name, self.holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RiskError;

    #[test]
    fn test_basic_build() {
        let portfolio = PortfolioBuilder::new()
            .name("Test")
            .holding("AAPL", 0.4)
            .holding("GOOGL", 0.35)
            .holding("TSLA", 0.25)
            .build()
            .unwrap();

        assert_eq!(portfolio.name(), "Test");
        assert_eq!(portfolio.len(), 3);
        assert!((portfolio.total_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_name() {
        let portfolio = PortfolioBuilder::new().holding("AAPL", 1.0).build().unwrap();
        assert_eq!(portfolio.name(), "Portfolio");
    }

    #[test]
    fn test_batch_holdings_normalized() {
        let portfolio = PortfolioBuilder::new()
            .holdings([("A", 1.0), ("B", 1.0), ("C", 2.0)])
            .build()
            .unwrap();

        assert!((portfolio.weight_of("C").unwrap() - 0.5).abs() < 1e-12);
        assert!((portfolio.weight_of("A").unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_portfolio_rejected() {
        let result = PortfolioBuilder::new().build();
        assert!(matches!(result, Err(RiskError::InvalidPortfolio { .. })));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let result = PortfolioBuilder::new()
            .holding("AAPL", 1.0)
            .holding("SHORT", -0.5)
            .build();
        assert!(result.unwrap_err().to_string().contains("SHORT"));
    }

    #[test]
    fn test_duplicate_ticker_rejected() {
        let result = PortfolioBuilder::new()
            .holding("AAPL", 1.0)
            .holding("AAPL", 2.0)
            .build();
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }
}
