//! Error types for portfolio risk analytics.
//!
//! This module defines the error types used throughout the portfolio crate.

use risklab_math::MathError;
use thiserror::Error;

/// Result type for portfolio risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during portfolio risk operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Malformed or zero-weight portfolio input.
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// The reason the portfolio is invalid.
        reason: String,
    },

    /// Malformed returns history.
    #[error("Invalid returns: {reason}")]
    InvalidReturns {
        /// The reason the returns table is invalid.
        reason: String,
    },

    /// A portfolio ticker has no column in the returns history.
    #[error("No returns for ticker '{ticker}'")]
    MissingReturns {
        /// The ticker without returns.
        ticker: String,
    },

    /// Returns history too short for the requested statistic.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum observations required.
        required: usize,
        /// Observations available.
        actual: usize,
    },

    /// Shock keys matching neither a ticker nor an asset class (strict mode only).
    #[error("Scenario '{scenario}' has unresolved shock keys: {}", .keys.join(", "))]
    UnresolvedShockKey {
        /// The scenario name.
        scenario: String,
        /// The keys that matched nothing.
        keys: Vec<String>,
    },

    /// A statistic is undefined for the input (e.g. zero-variance Sharpe).
    #[error("Degenerate {metric}: {reason}")]
    DegenerateStatistic {
        /// The metric that could not be computed.
        metric: String,
        /// Why it is undefined.
        reason: String,
    },

    /// Invalid parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Metric key that does not parse.
    #[error("Unknown metric key '{key}'")]
    UnknownMetric {
        /// The key as given.
        key: String,
    },

    /// Underlying statistics failure.
    #[error(transparent)]
    Math(MathError),
}

impl From<MathError> for RiskError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            other => Self::Math(other),
        }
    }
}

impl RiskError {
    /// Create an invalid portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }

    /// Create an invalid returns error.
    #[must_use]
    pub fn invalid_returns(reason: impl Into<String>) -> Self {
        Self::InvalidReturns {
            reason: reason.into(),
        }
    }

    /// Create a missing returns error.
    #[must_use]
    pub fn missing_returns(ticker: impl Into<String>) -> Self {
        Self::MissingReturns {
            ticker: ticker.into(),
        }
    }

    /// Create a degenerate statistic error.
    #[must_use]
    pub fn degenerate(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DegenerateStatistic {
            metric: metric.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
