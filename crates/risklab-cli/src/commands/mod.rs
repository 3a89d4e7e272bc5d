//! CLI command implementations.

pub mod liquidity;
pub mod matrix;
pub mod metrics;
pub mod plugins;
pub mod report;
pub mod stress;

// Re-export submodules for convenience
pub use liquidity::LiquidityArgs;
pub use matrix::MatrixArgs;
pub use metrics::MetricsArgs;
pub use plugins::PluginsArgs;
pub use report::ReportArgs;
pub use stress::StressArgs;

use std::collections::BTreeMap;

use crate::error::{CliError, CliResult};

/// Parses `TICKER=VALUE`.
pub fn parse_assignment(s: &str) -> CliResult<(String, f64)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| CliError::InvalidAssignment(s.to_string()))?;
    let key = key.trim();
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidAssignment(s.to_string()))?;
    if key.is_empty() {
        return Err(CliError::InvalidAssignment(s.to_string()));
    }
    Ok((key.to_string(), value))
}

/// Overlays `TICKER=VALUE` pairs on a mapping.
pub fn apply_assignments(base: &mut BTreeMap<String, f64>, pairs: &[String]) -> CliResult<()> {
    for pair in pairs {
        let (key, value) = parse_assignment(pair)?;
        base.insert(key, value);
    }
    Ok(())
}

/// Validates a confidence level.
pub fn validate_confidence(confidence: f64) -> CliResult<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(CliError::InvalidConfidence(confidence));
    }
    Ok(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("AAPL=0.9").unwrap(), ("AAPL".to_string(), 0.9));
        assert_eq!(parse_assignment(" TSLA = -0.2 ").unwrap(), ("TSLA".to_string(), -0.2));
        assert!(parse_assignment("AAPL").is_err());
        assert!(parse_assignment("AAPL=high").is_err());
        assert!(parse_assignment("=0.5").is_err());
    }

    #[test]
    fn test_validate_confidence() {
        assert!(validate_confidence(0.95).is_ok());
        assert!(validate_confidence(1.0).is_err());
        assert!(validate_confidence(0.0).is_err());
        assert!(validate_confidence(f64::NAN).is_err());
    }
}
