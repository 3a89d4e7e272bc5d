//! Stress testing.
//!
//! Provides scenario-based stress testing:
//! - Ticker shocks (one holding's returns scaled)
//! - Asset-class shocks (every holding of the class scaled)
//! - Standard presets (base, market crash, tech dip, bond rally)
//!
//! # Example
//!
//! ```
//! use risklab_portfolio::prelude::*;
//! use risklab_portfolio::stress::standard;
//!
//! let portfolio = Portfolio::builder()
//!     .holding_with_class("AAPL", 0.6, "Equity")
//!     .holding_with_class("TLT", 0.4, "Bond")
//!     .build()
//!     .unwrap();
//! let returns = seeded_returns(portfolio.tickers(), 100, 0.0, 0.01, 42).unwrap();
//!
//! let mut stress = StressTest::new(&portfolio, &returns).unwrap();
//! stress.apply_scenarios(&standard::all(&portfolio)).unwrap();
//! assert_eq!(stress.len(), 4);
//! ```

mod engine;
pub mod standard;

pub use engine::StressTest;
