//! # RiskLab Math
//!
//! Statistics primitives for the RiskLab portfolio risk toolkit.
//!
//! This crate provides:
//!
//! - **Moments**: mean, sample variance and standard deviation
//! - **Order statistics**: linearly interpolated empirical percentiles
//! - **Covariance**: sample covariance matrices over return observations
//! - **Quadratic forms**: `wᵀ · Σ · w` for portfolio variance
//!
//! ## Design Philosophy
//!
//! - **Explicit conventions**: sample (`n - 1`) statistics throughout
//! - **No panics on bad data**: short or malformed series surface as [`MathError`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::statistics::{
        covariance_matrix, mean, percentile, quadratic_form, round_to, sample_std,
        sample_variance,
    };
}

pub use error::{MathError, MathResult};
