//! Error types for file loading and export.

use risklab_portfolio::RiskError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading inputs or writing reports.
#[derive(Error, Debug)]
pub enum FileError {
    /// Filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// Content that is well-formed CSV / JSON but not a usable table.
    #[error("Parse error in {path}: {reason}")]
    Parse {
        /// The file involved.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The loaded table was rejected by the risk engine.
    #[error(transparent)]
    Risk(#[from] RiskError),
}

impl FileError {
    /// Creates an I/O error for a path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a CSV error for a path.
    #[must_use]
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error for a path.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
