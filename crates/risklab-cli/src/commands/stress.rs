//! Stress command implementation.
//!
//! Re-runs the risk metrics under each configured scenario, or under the
//! standard presets when the session names none.

use anyhow::Result;
use clap::Args;

use risklab_portfolio::{MetricKey, ShockPolicy, StressTest};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_info, print_summary};
use crate::session::Session;

/// Arguments for the stress command.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Only run the named scenario (repeatable)
    #[arg(short, long = "scenario")]
    pub scenarios: Vec<String>,

    /// Fail on shock keys matching neither a ticker nor an asset class
    #[arg(long)]
    pub strict: bool,

    /// Show raw numbers instead of formatted percentages
    #[arg(long)]
    pub raw: bool,
}

/// Execute the stress command.
pub fn execute(args: StressArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let mut config = session.config.risk.clone();
    if args.strict {
        config = config.with_shock_policy(ShockPolicy::Strict);
    }
    let var_key = MetricKey::var(config.confidence);

    let mut scenarios = session.stress_scenarios();
    if !args.scenarios.is_empty() {
        if let Some(missing) = args
            .scenarios
            .iter()
            .find(|name| !scenarios.iter().any(|s| &s.name == *name))
        {
            return Err(CliError::UnknownScenario(missing.clone()).into());
        }
        scenarios.retain(|s| args.scenarios.contains(&s.name));
    }

    let mut stress = StressTest::with_config(&session.portfolio, &session.returns, config)?;
    stress.apply_scenarios(&scenarios)?;

    print_summary(&stress.summary(!args.raw), format)?;

    if format == OutputFormat::Table {
        if let Some((name, var)) = stress.worst_case(var_key) {
            print_info(&format!("Worst {}: {} ({:.4}%)", var_key, name, var * 100.0));
        }
    }
    Ok(())
}
