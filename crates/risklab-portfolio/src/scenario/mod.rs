//! Scenario definitions shared by the stress and liquidity engines.
//!
//! - [`ShockSet`] / [`Scenario`] - named, ordered shocks by ticker or asset class
//! - [`resolve_shocks`] - maps shock keys to the tickers they move
//! - [`ScenarioResults`] - insertion-ordered name to result store

mod resolve;
mod results;
mod shocks;

pub use resolve::{resolve_shocks, ResolvedShock};
pub use results::ScenarioResults;
pub use shocks::{Scenario, ShockSet};
