//! # RiskLab Portfolio
//!
//! Portfolio risk metrics and scenario simulation.
//!
//! Given weighted holdings and a history of periodic returns, this crate
//! computes standard risk statistics, re-derives them under hypothetical
//! shocks, scores liquidity, and builds a likelihood x impact risk matrix.
//!
//! ## Design Philosophy
//!
//! - **No I/O**: all inputs are in-memory tables supplied by the caller
//! - **Borrowed inputs**: engines borrow the portfolio and returns; shocks
//!   work on private copies
//! - **Numeric and display values side by side**: formatting never loses
//!   the number behind it
//! - **Config-driven parallelism**: optional rayon support for scenario batches
//!
//! ## Features
//!
//! - **Portfolio Model**: normalized weights, asset classes, tabular loading
//! - **Risk Metrics**: volatility, historical VaR / CVaR, Sharpe ratio
//! - **Stress Testing**: ticker and asset-class shocks, standard presets
//! - **Liquidity**: weighted liquidity scores and liquidity shocks
//! - **Risk Matrix**: pairwise likelihood x impact scores
//! - **Reports**: summary tables with placeholders for missing sections
//!
//! ## Quick Start
//!
//! ```rust
//! use risklab_portfolio::prelude::*;
//!
//! let portfolio = Portfolio::builder()
//!     .holding_with_class("AAPL", 0.4, "Equity")
//!     .holding_with_class("GOOGL", 0.35, "Equity")
//!     .holding_with_class("TLT", 0.25, "Bond")
//!     .build()
//!     .unwrap();
//! let returns = seeded_returns(portfolio.tickers(), 252, 0.0, 0.01, 42).unwrap();
//!
//! let mut metrics = RiskMetrics::new(&portfolio, &returns).unwrap();
//! metrics.compute_all();
//!
//! let matrix = RiskMatrixBuilder::new(&portfolio)
//!     .compute_matrix(metrics.result())
//!     .unwrap();
//! assert!(matrix.is_symmetric());
//! ```
//!
//! ## Module Overview
//!
//! - [`portfolio`] - Portfolio and builder types
//! - [`returns`] - Returns history
//! - [`metrics`] - Risk metrics engine and results
//! - [`scenario`] - Shock sets, key resolution, scenario results
//! - [`stress`] - Stress testing and standard scenarios
//! - [`liquidity`] - Liquidity scores and shocks
//! - [`matrix`] - Risk matrix
//! - [`report`] - Report assembly
//! - [`extensions`] - Helpers on public accessors
//! - [`synthetic`] - Seeded synthetic returns
//! - [`types`] - Input table and configuration
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel evaluation of scenario batches

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extensions;
pub mod liquidity;
pub mod matrix;
pub mod metrics;
pub mod parallel;
pub mod portfolio;
pub mod report;
pub mod returns;
pub mod scenario;
pub mod stress;
pub mod synthetic;
pub mod table;
pub mod types;

// Re-export error types at crate root
pub use error::{RiskError, RiskResult};

// Re-export main types
pub use types::{RawTable, RiskConfig, ShockPolicy};

pub use portfolio::{Holding, Portfolio, PortfolioBuilder, UNKNOWN_ASSET_CLASS};
pub use returns::ReturnsHistory;

pub use metrics::{
    format_percent, parse_percent, MetricKey, MetricValue, RiskMetrics, RiskMetricsResult,
};

pub use scenario::{resolve_shocks, ResolvedShock, Scenario, ScenarioResults, ShockSet};
pub use stress::{standard as stress_scenarios, StressTest};

pub use liquidity::{Liquidity, LIQUIDITY_COLUMN};
pub use matrix::{extract_impact, RiskMatrix, RiskMatrixBuilder};
pub use report::{Report, SECTIONS};
pub use table::{Cell, SummaryTable, TableRow};

pub use parallel::maybe_parallel_map;
pub use synthetic::{generate_returns, seeded_returns};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::liquidity::Liquidity;
    pub use crate::matrix::{RiskMatrix, RiskMatrixBuilder};
    pub use crate::metrics::{MetricKey, RiskMetrics, RiskMetricsResult};
    pub use crate::portfolio::{Portfolio, PortfolioBuilder};
    pub use crate::report::Report;
    pub use crate::returns::ReturnsHistory;
    pub use crate::scenario::{Scenario, ShockSet};
    pub use crate::stress::StressTest;
    pub use crate::synthetic::{generate_returns, seeded_returns};
    pub use crate::table::{Cell, SummaryTable};
    pub use crate::types::{RawTable, RiskConfig, ShockPolicy};
}
