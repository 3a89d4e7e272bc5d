//! Loaded inputs shared by every command.

use anyhow::{Context, Result};
use tracing::{debug, info};

use risklab_ext_file::{CsvPortfolioSource, CsvReturnsSource};
use risklab_portfolio::{seeded_returns, stress_scenarios, Portfolio, ReturnsHistory, Scenario};

use crate::cli::Cli;
use crate::config::SessionConfig;
use crate::error::CliError;

/// Configuration plus the portfolio and returns it points at.
#[derive(Debug)]
pub struct Session {
    /// Effective configuration after command-line overrides.
    pub config: SessionConfig,
    /// Normalized holdings.
    pub portfolio: Portfolio,
    /// Returns from file, or synthetic.
    pub returns: ReturnsHistory,
}

impl Session {
    /// Resolves inputs; command-line paths and seed override the config file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = SessionConfig::load(cli.config.as_deref())?;
        if let Some(path) = &cli.portfolio {
            config.portfolio_file = Some(path.clone());
        }
        if let Some(path) = &cli.returns {
            config.returns_file = Some(path.clone());
        }
        if let Some(seed) = cli.seed {
            config.synthetic.seed = seed;
        }

        let portfolio_file = config.portfolio_file.clone().ok_or_else(|| {
            CliError::MissingArgument("--portfolio (or portfolio_file in the config)".into())
        })?;
        let portfolio = CsvPortfolioSource::new(&portfolio_file)
            .and_then(|source| source.load())
            .with_context(|| format!("loading portfolio from {}", portfolio_file.display()))?;
        info!("Loaded {}", portfolio);

        let returns = match &config.returns_file {
            Some(path) => CsvReturnsSource::new(path)
                .and_then(|source| source.load())
                .with_context(|| format!("loading returns from {}", path.display()))?,
            None => {
                let synthetic = &config.synthetic;
                debug!(
                    seed = synthetic.seed,
                    periods = synthetic.periods,
                    "drawing synthetic returns"
                );
                seeded_returns(
                    portfolio.tickers(),
                    synthetic.periods,
                    synthetic.mean,
                    synthetic.std,
                    synthetic.seed,
                )?
            }
        };

        Ok(Self {
            config,
            portfolio,
            returns,
        })
    }

    /// Configured stress scenarios, or the standard presets.
    pub fn stress_scenarios(&self) -> Vec<Scenario> {
        if self.config.scenarios.is_empty() {
            stress_scenarios::all(&self.portfolio)
        } else {
            self.config.scenarios.clone()
        }
    }
}
