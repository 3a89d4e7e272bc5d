//! Liquidity command implementation.
//!
//! Scores portfolio liquidity and applies liquidity shock scenarios.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use risklab_portfolio::{Liquidity, Report, ShockSet};

use crate::cli::OutputFormat;
use crate::commands::{apply_assignments, parse_assignment};
use crate::output::{print_header, print_output, print_summary, print_warning};
use crate::session::Session;

/// Arguments for the liquidity command.
#[derive(Args, Debug)]
pub struct LiquidityArgs {
    /// Liquidity score override, TICKER=SCORE (repeatable)
    #[arg(long = "score")]
    pub scores: Vec<String>,

    /// Ad-hoc shock, KEY=SHOCK with KEY a ticker or asset class (repeatable)
    #[arg(long = "shock")]
    pub shocks: Vec<String>,

    /// Name of the ad-hoc scenario
    #[arg(long, default_value = "Custom")]
    pub name: String,

    /// Also list the per-holding scores
    #[arg(long)]
    pub holdings: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ScoreRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Score")]
    score: String,
}

/// Execute the liquidity command.
pub fn execute(args: LiquidityArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let mut scores = session.config.liquidity.scores.clone();
    apply_assignments(&mut scores, &args.scores)?;
    if scores.is_empty() && format == OutputFormat::Table {
        print_warning(&format!(
            "No liquidity scores configured; every holding scores {}",
            session.config.risk.default_liquidity
        ));
    }

    let mut liquidity = Liquidity::with_config(&session.portfolio, session.config.risk.clone())
        .with_scores(&scores)?;

    for scenario in &session.config.liquidity.scenarios {
        liquidity.apply_scenario(&scenario.name, &scenario.shocks)?;
    }
    if !args.shocks.is_empty() {
        let mut shocks = ShockSet::new();
        for pair in &args.shocks {
            let (key, shock) = parse_assignment(pair)?;
            shocks.set(key, shock);
        }
        liquidity.apply_scenario(&args.name, &shocks)?;
    }

    if args.holdings {
        let rows: Vec<ScoreRow> = liquidity
            .scores()
            .into_iter()
            .map(|(ticker, score)| ScoreRow {
                ticker: ticker.to_string(),
                weight: format!("{:.4}", session.portfolio.weight_of(ticker).unwrap_or(0.0)),
                score: format!("{:.4}", score),
            })
            .collect();
        if format == OutputFormat::Table {
            print_header("Liquidity Scores");
        }
        print_output(&rows, format)?;
    }

    print_summary(&Report::liquidity_section(&liquidity), format)
}
