//! Error types for statistical operations.

use thiserror::Error;

/// A specialized Result type for statistical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during statistical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Vector and matrix dimensions are incompatible.
    #[error("Incompatible dimensions: vector of length {len} against ({rows}x{cols}) matrix")]
    DimensionMismatch {
        /// Length of the vector operand.
        len: usize,
        /// Rows in the matrix.
        rows: usize,
        /// Columns in the matrix.
        cols: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
