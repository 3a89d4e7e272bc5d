//! Combined report assembly.
//!
//! A [`Report`] gathers the summary table of every component into five
//! named sections. A component that is absent, or that has nothing to
//! show, is replaced by a one-row `Notice` table so consumers always see
//! the same sections.

use crate::liquidity::Liquidity;
use crate::matrix::RiskMatrix;
use crate::metrics::RiskMetricsResult;
use crate::portfolio::Portfolio;
use crate::stress::StressTest;
use crate::table::{Cell, SummaryTable};
use serde::{Deserialize, Serialize};

/// Section names, in report order.
pub const SECTIONS: [&str; 5] = ["Portfolio", "RiskMetrics", "StressTest", "Liquidity", "RiskMatrix"];

/// Summary tables of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    sections: Vec<SummaryTable>,
}

impl Report {
    /// Assembles the report sections.
    ///
    /// Metrics and stress results use their formatted display values.
    #[must_use]
    pub fn assemble(
        portfolio: &Portfolio,
        metrics: &RiskMetricsResult,
        stress: Option<&StressTest<'_>>,
        liquidity: Option<&Liquidity<'_>>,
        matrix: Option<&RiskMatrix>,
    ) -> Self {
        let holdings = non_empty(portfolio.summary(), "No portfolio data");

        let risk_metrics = if metrics.is_empty() {
            SummaryTable::notice("RiskMetrics", "No risk metrics computed")
        } else {
            metrics.to_table(true)
        };

        let stress = match stress {
            Some(stress) => non_empty(stress.summary(true), "No stress test results"),
            None => SummaryTable::notice("StressTest", "No stress test module provided"),
        };

        let liquidity = match liquidity {
            Some(liquidity) => Self::liquidity_section(liquidity),
            None => SummaryTable::notice("Liquidity", "No liquidity module provided"),
        };

        let matrix = match matrix {
            Some(matrix) => non_empty(matrix.to_table(), "No risk matrix computed"),
            None => SummaryTable::notice("RiskMatrix", "No risk matrix module provided"),
        };

        Self {
            sections: vec![holdings, risk_metrics, stress, liquidity, matrix],
        }
    }

    /// Liquidity section: the stored scenarios, or a single `Base` row with
    /// the current portfolio liquidity when none has been applied.
    #[must_use]
    pub fn liquidity_section(liquidity: &Liquidity<'_>) -> SummaryTable {
        let mut table = liquidity.summary();
        if table.is_empty() {
            table.push_row("Base", vec![Cell::Number(liquidity.portfolio_liquidity())]);
        }
        table
    }

    /// Sections in report order.
    #[must_use]
    pub fn sections(&self) -> &[SummaryTable] {
        &self.sections
    }

    /// Section by title.
    #[must_use]
    pub fn section(&self, title: &str) -> Option<&SummaryTable> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Titles in report order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.title.as_str())
    }
}

fn non_empty(table: SummaryTable, notice: &str) -> SummaryTable {
    if table.is_empty() {
        SummaryTable::notice(table.title, notice)
    } else {
        table
    }
}
