//! Extension helpers built on the public accessors.

use crate::metrics::RiskMetrics;
use crate::portfolio::Portfolio;
use crate::returns::ReturnsHistory;
use crate::RiskResult;
use std::collections::BTreeMap;

/// Ticker to normalized weight.
#[must_use]
pub fn portfolio_weights(portfolio: &Portfolio) -> BTreeMap<String, f64> {
    portfolio.weights_by_ticker()
}

/// Mean periodic return per ticker, in column order.
#[must_use]
pub fn average_daily_return(returns: &ReturnsHistory) -> Vec<(String, f64)> {
    returns.column_means()
}

/// The `n` holdings with the highest return volatility, riskiest first.
///
/// # Errors
///
/// Returns `InsufficientData` with fewer than two periods.
pub fn top_n_risky_assets(metrics: &RiskMetrics<'_>, n: usize) -> RiskResult<Vec<String>> {
    let mut vols = metrics.asset_volatilities()?;
    vols.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(vols.into_iter().take(n).map(|(ticker, _)| ticker).collect())
}
