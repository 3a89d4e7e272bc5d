//! Metrics command implementation.
//!
//! Computes volatility, VaR, CVaR and the Sharpe ratio of the portfolio.

use anyhow::Result;
use clap::Args;

use risklab_portfolio::RiskMetrics;

use crate::cli::OutputFormat;
use crate::commands::validate_confidence;
use crate::output::{print_summary, print_warning};
use crate::session::Session;

/// Arguments for the metrics command.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Confidence level for VaR / CVaR (e.g. 0.99)
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Annual risk-free rate for the Sharpe ratio (e.g. 0.02)
    #[arg(long)]
    pub risk_free: Option<f64>,

    /// Show raw numbers instead of formatted percentages
    #[arg(long)]
    pub raw: bool,
}

/// Execute the metrics command.
pub fn execute(args: MetricsArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let mut config = session.config.risk.clone();
    if let Some(confidence) = args.confidence {
        config = config.with_confidence(validate_confidence(confidence)?);
    }
    if let Some(rate) = args.risk_free {
        config = config.with_risk_free_rate(rate);
    }

    let mut metrics = RiskMetrics::with_config(&session.portfolio, &session.returns, config)?;
    metrics.compute_all();
    if format == OutputFormat::Table {
        for (key, err) in metrics.failures() {
            print_warning(&format!("{key} not computed: {err}"));
        }
    }

    print_summary(&metrics.summary_table(!args.raw), format)
}
