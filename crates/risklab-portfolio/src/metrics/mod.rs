//! Risk metrics: volatility, historical VaR / CVaR and Sharpe ratio.
//!
//! - [`RiskMetrics`] - the engine over a portfolio and returns history
//! - [`RiskMetricsResult`] - numeric values with their display forms
//! - [`MetricKey`] - typed metric identifiers (`VaR_95`, ...)

mod engine;
mod key;
mod result;

pub use engine::RiskMetrics;
pub use key::MetricKey;
pub use result::{format_percent, parse_percent, MetricValue, RiskMetricsResult};
