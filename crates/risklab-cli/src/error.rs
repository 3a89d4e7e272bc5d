//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing required input.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Malformed `KEY=VALUE` pair.
    #[error("Invalid assignment '{0}'. Use KEY=VALUE, e.g. AAPL=0.9.")]
    InvalidAssignment(String),

    /// Confidence outside (0, 1).
    #[error("Invalid confidence: {0}. Must be strictly between 0 and 1.")]
    InvalidConfidence(f64),

    /// Scenario name not found in the session.
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
