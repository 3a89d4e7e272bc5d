//! Session configuration.
//!
//! A session names its inputs, the risk parameters and the scenarios to
//! run. Every field has a default, so an empty file (or no file) is a valid
//! session as long as a portfolio is given on the command line.
//!
//! ```toml
//! portfolio_file = "data/holdings.csv"
//!
//! [risk]
//! confidence = 0.99
//!
//! [[scenarios]]
//! name = "Market Crash"
//! shocks = { Equity = -0.1, Bond = -0.1 }
//!
//! [liquidity.scores]
//! AAPL = 0.9
//!
//! [[liquidity.scenarios]]
//! name = "Liquidity Crunch"
//! shocks = { Equity = -0.2, Bond = -0.05 }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use risklab_portfolio::{RiskConfig, Scenario};

use crate::error::{CliError, CliResult};

/// Top-level session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Holdings CSV.
    pub portfolio_file: Option<PathBuf>,

    /// Returns CSV. Synthetic returns are drawn when absent.
    pub returns_file: Option<PathBuf>,

    /// Synthetic returns parameters.
    #[serde(default)]
    pub synthetic: SyntheticConfig,

    /// Risk engine parameters.
    #[serde(default)]
    pub risk: RiskConfig,

    /// Stress scenarios. The standard presets are used when empty.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,

    /// Liquidity scores and scenarios.
    #[serde(default)]
    pub liquidity: LiquidityConfig,

    /// Per-ticker likelihoods for the risk matrix.
    #[serde(default)]
    pub likelihoods: BTreeMap<String, f64>,

    /// Report export settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Synthetic returns parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// RNG seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of periods
    #[serde(default = "default_periods")]
    pub periods: usize,

    /// Mean periodic return
    #[serde(default)]
    pub mean: f64,

    /// Standard deviation of periodic returns
    #[serde(default = "default_std")]
    pub std: f64,
}

fn default_seed() -> u64 {
    42
}

fn default_periods() -> usize {
    252
}

fn default_std() -> f64 {
    0.01
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            periods: default_periods(),
            mean: 0.0,
            std: default_std(),
        }
    }
}

/// Liquidity inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiquidityConfig {
    /// Score per ticker in [0, 1].
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,

    /// Liquidity shock scenarios.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// Report export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory receiving exported files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Target file name; its extension picks the format
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_filename() -> String {
    "RiskLab_Report.csv".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            filename: default_filename(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
