//! # RiskLab Ext File
//!
//! File-based inputs and outputs for the RiskLab risk engine.
//!
//! This crate provides:
//! - CSV portfolio source (`Ticker`, `Weight` / `Allocation`, `AssetType`)
//! - CSV returns source (one column per ticker)
//! - Report exporter (per-section CSV or a single JSON document)
//!
//! The engine itself never touches the filesystem; everything here converts
//! files to and from its in-memory tables.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod export;
mod sources;

pub use error::{FileError, FileResult};
pub use export::{write_section, ExportFormat, ReportExporter};
pub use sources::{read_table, CsvPortfolioSource, CsvReturnsSource};
