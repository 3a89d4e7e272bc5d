//! RiskLab CLI - Command-line interface for portfolio risk analytics.
//!
//! # Usage
//!
//! ```bash
//! # Risk metrics over synthetic returns
//! risklab --portfolio holdings.csv metrics
//!
//! # Standard stress scenarios against a returns file
//! risklab -p holdings.csv -r returns.csv stress
//!
//! # Liquidity with an ad-hoc crunch
//! risklab -p holdings.csv liquidity --score AAPL=0.9 --shock Equity=-0.2
//!
//! # Full report from a session file, exported to CSV
//! risklab --config session.toml report --export
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;
mod session;

use cli::{Cli, Commands};
use session::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table / JSON / CSV output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(cli.quiet).into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let session = Session::load(&cli)?;
    let format = cli.format;

    match cli.command {
        Commands::Metrics(args) => commands::metrics::execute(args, &session, format)?,
        Commands::Stress(args) => commands::stress::execute(args, &session, format)?,
        Commands::Liquidity(args) => commands::liquidity::execute(args, &session, format)?,
        Commands::Matrix(args) => commands::matrix::execute(args, &session, format)?,
        Commands::Report(args) => commands::report::execute(args, &session, cli.quiet, format)?,
        Commands::Plugins(args) => commands::plugins::execute(args, &session, format)?,
    }

    Ok(())
}

fn default_filter(quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        "info"
    }
}
