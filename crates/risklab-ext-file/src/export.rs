//! Report export to CSV / JSON files.

use crate::error::{FileError, FileResult};
use risklab_portfolio::{Report, SummaryTable};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// On-disk layout chosen from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One `<stem>_<Section>.csv` file per section.
    Csv,
    /// One JSON document holding every section.
    Json,
}

impl ExportFormat {
    /// Format for a target file name.
    ///
    /// `.xlsx` maps to per-section CSV since no spreadsheet writer is linked.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for any other extension.
    pub fn for_target(target: &Path) -> FileResult<Self> {
        let ext = target
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some("xlsx") => {
                warn!(target = %target.display(), "no spreadsheet writer, falling back to CSV export");
                Ok(Self::Csv)
            }
            _ => Err(FileError::parse(
                target,
                "unsupported export extension (expected .csv, .json or .xlsx)",
            )),
        }
    }
}

/// Writes report sections below an output directory.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    output_dir: PathBuf,
}

impl ReportExporter {
    /// Exporter writing into `output_dir` (created on first export).
    #[must_use]
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// The output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Exports the report to `filename` and returns the files written.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for an unsupported extension, `Io` / `Csv` / `Json`
    /// on write failures.
    pub fn export(&self, report: &Report, filename: &str) -> FileResult<Vec<PathBuf>> {
        let target = self.output_dir.join(filename);
        let format = ExportFormat::for_target(&target)?;
        fs::create_dir_all(&self.output_dir).map_err(|e| FileError::io(&self.output_dir, e))?;

        let written = match format {
            ExportFormat::Csv => {
                let mut written = Vec::with_capacity(report.sections().len());
                for section in report.sections() {
                    let path = section_path(&target, &section.title);
                    write_section(&path, section)?;
                    written.push(path);
                }
                written
            }
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(report)?;
                fs::write(&target, json).map_err(|e| FileError::io(&target, e))?;
                vec![target.clone()]
            }
        };

        info!(
            target = %target.display(),
            sections = %report.titles().collect::<Vec<_>>().join(", "),
            "report exported"
        );
        Ok(written)
    }
}

/// `<dir>/<stem>_<section>.csv`.
fn section_path(target: &Path, section: &str) -> PathBuf {
    let stem = target
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    target.with_file_name(format!("{stem}_{section}.csv"))
}

/// Writes one table, index column first.
///
/// # Errors
///
/// Returns `Csv` / `Io` on write failures.
pub fn write_section(path: &Path, table: &SummaryTable) -> FileResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| FileError::csv(path, e))?;
    for record in table.to_records() {
        writer
            .write_record(&record)
            .map_err(|e| FileError::csv(path, e))?;
    }
    writer.flush().map_err(|e| FileError::io(path, e))?;
    Ok(())
}
