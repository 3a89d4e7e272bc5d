//! Plugins command implementation.
//!
//! Runs the extension helpers over the session.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use risklab_portfolio::extensions::{average_daily_return, portfolio_weights, top_n_risky_assets};
use risklab_portfolio::RiskMetrics;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_info, print_output, KeyValue};
use crate::session::Session;

/// Arguments for the plugins command.
#[derive(Args, Debug)]
pub struct PluginsArgs {
    /// Number of riskiest assets to list
    #[arg(short = 'n', long, default_value = "3")]
    pub top: usize,
}

#[derive(Serialize)]
struct PluginOutput {
    weights: Vec<KeyValue>,
    average_returns: Vec<KeyValue>,
    top_risky: Vec<String>,
}

/// Execute the plugins command.
pub fn execute(args: PluginsArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let weights: Vec<KeyValue> = portfolio_weights(&session.portfolio)
        .into_iter()
        .map(|(ticker, weight)| KeyValue::from_f64(ticker, weight, 4))
        .collect();
    let average_returns: Vec<KeyValue> = average_daily_return(&session.returns)
        .into_iter()
        .map(|(ticker, mean)| KeyValue::from_f64(ticker, mean, 6))
        .collect();

    let metrics = RiskMetrics::with_config(
        &session.portfolio,
        &session.returns,
        session.config.risk.clone(),
    )?;
    let top_risky = top_n_risky_assets(&metrics, args.top)?;

    match format {
        OutputFormat::Json => {
            let output = PluginOutput {
                weights,
                average_returns,
                top_risky,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            print_header("Portfolio Weights");
            print_output(&weights, format)?;
            print_header("Average Daily Return");
            print_output(&average_returns, format)?;
            print_info(&format!("Top {} risky assets: {}", args.top, top_risky.join(", ")));
        }
        OutputFormat::Csv => {
            print_output(&weights, format)?;
            print_output(&average_returns, format)?;
        }
    }
    Ok(())
}
