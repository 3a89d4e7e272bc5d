//! Matrix command implementation.
//!
//! Builds the pairwise likelihood x impact risk matrix.

use anyhow::Result;
use clap::Args;

use risklab_portfolio::{MetricKey, RiskMatrix, RiskMatrixBuilder, RiskMetrics};

use crate::cli::OutputFormat;
use crate::commands::apply_assignments;
use crate::output::print_summary;
use crate::session::Session;

/// Arguments for the matrix command.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Likelihood override, TICKER=LIKELIHOOD (repeatable)
    #[arg(long = "likelihood")]
    pub likelihoods: Vec<String>,

    /// Metric used as impact (e.g. VaR_95, CVaR_99, Volatility)
    #[arg(long)]
    pub impact_metric: Option<String>,

    /// Explicit impact value; skips the metrics computation
    #[arg(long, conflicts_with = "impact_metric")]
    pub impact: Option<f64>,
}

/// Execute the matrix command.
pub fn execute(args: MatrixArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let matrix = build(&args, session)?;
    print_summary(&matrix.to_table(), format)
}

fn build(args: &MatrixArgs, session: &Session) -> Result<RiskMatrix> {
    let mut config = session.config.risk.clone();
    if let Some(key) = &args.impact_metric {
        config = config.with_impact_metric(key.clone());
    }

    let mut likelihoods = session.config.likelihoods.clone();
    apply_assignments(&mut likelihoods, &args.likelihoods)?;
    let builder = RiskMatrixBuilder::with_config(&session.portfolio, &config).likelihoods(&likelihoods)?;

    if let Some(impact) = args.impact {
        return Ok(builder.compute_with_impact(impact));
    }

    let key: MetricKey = config.impact_metric.parse()?;
    let mut metrics = RiskMetrics::with_config(&session.portfolio, &session.returns, config)?;
    metrics.compute_all();
    // The impact metric may use a confidence other than the configured one
    match key {
        MetricKey::VaR(level) if metrics.metric(key).is_none() => {
            metrics.compute_var(f64::from(level) / 100.0)?;
        }
        MetricKey::CVaR(level) if metrics.metric(key).is_none() => {
            metrics.compute_cvar(f64::from(level) / 100.0)?;
        }
        _ => {}
    }

    Ok(builder.compute_matrix(metrics.result())?)
}
