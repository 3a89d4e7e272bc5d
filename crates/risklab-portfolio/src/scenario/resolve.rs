//! Shock key resolution.

use super::ShockSet;
use crate::portfolio::Portfolio;
use crate::types::ShockPolicy;
use crate::{RiskError, RiskResult};
use tracing::debug;

/// One shock key resolved to the tickers it moves.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShock {
    /// The key as written in the scenario.
    pub key: String,
    /// Tickers the shock applies to.
    pub tickers: Vec<String>,
    /// Fractional shock; values are multiplied by `1 + shock`.
    pub shock: f64,
}

impl ResolvedShock {
    /// Multiplier applied to targeted values.
    #[must_use]
    pub fn factor(&self) -> f64 {
        1.0 + self.shock
    }
}

/// Resolves each shock key against a ticker universe, then against the
/// portfolio's asset classes.
///
/// A key naming a ticker (as decided by `is_ticker`) targets that ticker
/// alone. Otherwise a key equal to an asset class carried by the portfolio
/// targets every holding of that class. Keys matching neither are skipped
/// under [`ShockPolicy::Lenient`]; under [`ShockPolicy::Strict`] they are
/// all reported at once and nothing is resolved.
pub fn resolve_shocks<F>(
    scenario: &str,
    shocks: &ShockSet,
    portfolio: &Portfolio,
    is_ticker: F,
    policy: ShockPolicy,
) -> RiskResult<Vec<ResolvedShock>>
where
    F: Fn(&str) -> bool,
{
    let mut resolved = Vec::with_capacity(shocks.len());
    let mut unresolved = Vec::new();

    for (key, shock) in shocks.iter() {
        let tickers = if is_ticker(key) {
            vec![key.to_string()]
        } else {
            portfolio
                .tickers_in_class(key)
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        if tickers.is_empty() {
            debug!(scenario, key, "shock key matches no ticker or asset class");
            unresolved.push(key.to_string());
            continue;
        }

        resolved.push(ResolvedShock {
            key: key.to_string(),
            tickers,
            shock,
        });
    }

    if policy.is_strict() && !unresolved.is_empty() {
        return Err(RiskError::UnresolvedShockKey {
            scenario: scenario.to_string(),
            keys: unresolved,
        });
    }

    Ok(resolved)
}
