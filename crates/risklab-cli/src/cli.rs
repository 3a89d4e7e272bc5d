//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    LiquidityArgs, MatrixArgs, MetricsArgs, PluginsArgs, ReportArgs, StressArgs,
};

/// RiskLab - Portfolio risk metrics and scenario simulation
#[derive(Parser)]
#[command(name = "risklab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Session configuration file (TOML)
    #[arg(short, long, env = "RISKLAB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Holdings CSV (Ticker, Weight / Allocation, AssetType)
    #[arg(short, long, global = true)]
    pub portfolio: Option<PathBuf>,

    /// Returns CSV, one column per ticker. Synthetic returns if omitted.
    #[arg(short, long, global = true)]
    pub returns: Option<PathBuf>,

    /// Seed for synthetic returns
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute volatility, VaR, CVaR and Sharpe ratio
    Metrics(MetricsArgs),

    /// Re-run the metrics under stress scenarios
    Stress(StressArgs),

    /// Portfolio liquidity and liquidity shock scenarios
    Liquidity(LiquidityArgs),

    /// Pairwise likelihood x impact risk matrix
    Matrix(MatrixArgs),

    /// Print every report section and optionally export it
    Report(ReportArgs),

    /// Run the extension helpers (weights, average returns, riskiest assets)
    Plugins(PluginsArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
