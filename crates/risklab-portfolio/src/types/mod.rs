//! Core types for portfolio risk analytics.
//!
//! This module contains the shared input and configuration types:
//! - [`RawTable`] - untyped tabular input from loaders
//! - [`RiskConfig`] - computation parameters
//! - [`ShockPolicy`] - handling of unresolved scenario keys

mod config;
mod raw_table;

pub use config::*;
pub use raw_table::*;
