//! Standard equity / bond stress scenarios.

use crate::portfolio::Portfolio;
use crate::scenario::{Scenario, ShockSet};

/// No shock on any holding.
#[must_use]
pub fn base(portfolio: &Portfolio) -> Scenario {
    Scenario::new("Base", ShockSet::uniform(portfolio.tickers().iter().cloned(), 0.0))
        .with_description("Unshocked returns")
}

/// Every holding's returns scaled down 10%.
#[must_use]
pub fn market_crash(portfolio: &Portfolio) -> Scenario {
    Scenario::new(
        "Market Crash",
        ShockSet::uniform(portfolio.tickers().iter().cloned(), -0.10),
    )
    .with_description("All holdings -10%")
}

/// Equity returns scaled down 15%.
#[must_use]
pub fn tech_dip() -> Scenario {
    Scenario::new("Tech Dip", ShockSet::new().with("Equity", -0.15))
        .with_description("Equity -15%")
}

/// Bond returns scaled up 5%.
#[must_use]
pub fn bond_rally() -> Scenario {
    Scenario::new("Bond Rally", ShockSet::new().with("Bond", 0.05))
        .with_description("Bond +5%")
}

/// Returns all standard scenarios for a portfolio.
#[must_use]
pub fn all(portfolio: &Portfolio) -> Vec<Scenario> {
    vec![
        base(portfolio),
        market_crash(portfolio),
        tech_dip(),
        bond_rally(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let portfolio = Portfolio::builder()
            .holding("AAPL", 0.5)
            .holding("TLT", 0.5)
            .build()
            .unwrap();

        let scenarios = all(&portfolio);
        let names: Vec<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Base", "Market Crash", "Tech Dip", "Bond Rally"]);

        assert_eq!(scenarios[1].shocks.get("TLT"), Some(-0.10));
        assert_eq!(scenarios[0].shocks.len(), 2);
        assert_eq!(scenarios[2].shocks.get("Equity"), Some(-0.15));
    }
}
