//! Report command implementation.
//!
//! Runs every component over the session and prints the five report
//! sections, optionally exporting them to files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use risklab_ext_file::ReportExporter;
use risklab_portfolio::{Liquidity, Report, RiskMatrixBuilder, RiskMetrics, StressTest};

use crate::cli::OutputFormat;
use crate::output::{print_success, print_summaries};
use crate::session::Session;

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Export the report to files
    #[arg(short, long)]
    pub export: bool,

    /// Export target file name; .csv, .xlsx (CSV fallback) or .json
    #[arg(long)]
    pub filename: Option<String>,

    /// Export directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Execute the report command.
pub fn execute(args: ReportArgs, session: &Session, quiet: bool, format: OutputFormat) -> Result<()> {
    let report = build(session)?;

    if !quiet || !args.export {
        print_summaries(report.sections(), format)?;
    }

    if args.export {
        let output_dir = args
            .output_dir
            .unwrap_or_else(|| session.config.report.output_dir.clone());
        let filename = args
            .filename
            .unwrap_or_else(|| session.config.report.filename.clone());

        let written = ReportExporter::new(&output_dir).export(&report, &filename)?;
        info!(files = written.len(), "export complete");
        if format == OutputFormat::Table && !quiet {
            print_success(&format!(
                "Report exported to {} ({} file{})",
                output_dir.join(&filename).display(),
                written.len(),
                if written.len() == 1 { "" } else { "s" }
            ));
        }
    }
    Ok(())
}

/// Computes every component and assembles the report.
fn build(session: &Session) -> Result<Report> {
    let config = session.config.risk.clone();
    let portfolio = &session.portfolio;
    let returns = &session.returns;

    let mut metrics = RiskMetrics::with_config(portfolio, returns, config.clone())?;
    metrics.compute_all();

    let mut stress = StressTest::with_config(portfolio, returns, config.clone())?;
    stress.apply_scenarios(&session.stress_scenarios())?;

    let mut liquidity =
        Liquidity::with_config(portfolio, config.clone()).with_scores(&session.config.liquidity.scores)?;
    for scenario in &session.config.liquidity.scenarios {
        liquidity.apply_scenario(&scenario.name, &scenario.shocks)?;
    }

    let matrix = RiskMatrixBuilder::with_config(portfolio, &config)
        .likelihoods(&session.config.likelihoods)?
        .compute_matrix(metrics.result())?;

    Ok(Report::assemble(
        portfolio,
        metrics.result(),
        Some(&stress),
        Some(&liquidity),
        Some(&matrix),
    ))
}
