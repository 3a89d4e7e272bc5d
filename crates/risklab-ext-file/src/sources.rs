//! CSV-backed portfolio and returns sources.

use crate::error::{FileError, FileResult};
use risklab_portfolio::{Portfolio, RawTable, ReturnsHistory};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a CSV file with a header row into an uninterpreted [`RawTable`].
///
/// Rows may be shorter than the header; missing trailing cells read as blank.
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened, `Csv` on malformed records and
/// `Parse` if the file has no header.
pub fn read_table(path: impl AsRef<Path>) -> FileResult<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| FileError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if columns.iter().all(|c| c.trim().is_empty()) {
        return Err(FileError::parse(path, "missing header row"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FileError::csv(path, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(path = %path.display(), rows = rows.len(), "read table");
    Ok(RawTable::new(columns, rows))
}

// =============================================================================
// PORTFOLIO
// =============================================================================

/// Holdings file with `Ticker`, `Weight` (or `Allocation`) and optional
/// `AssetType` columns.
#[derive(Debug, Clone)]
pub struct CsvPortfolioSource {
    file_path: PathBuf,
    table: RawTable,
}

impl CsvPortfolioSource {
    /// Opens and reads the file.
    ///
    /// # Errors
    ///
    /// See [`read_table`].
    pub fn new(file_path: impl AsRef<Path>) -> FileResult<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        let table = read_table(&file_path)?;
        Ok(Self { file_path, table })
    }

    /// Re-reads the file.
    ///
    /// # Errors
    ///
    /// See [`read_table`]. The previous table is kept on failure.
    pub fn reload(&mut self) -> FileResult<()> {
        self.table = read_table(&self.file_path)?;
        Ok(())
    }

    /// Source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// The raw table as read.
    #[must_use]
    pub fn table(&self) -> &RawTable {
        &self.table
    }

    /// Builds the normalized portfolio.
    ///
    /// # Errors
    ///
    /// Returns `Risk(InvalidPortfolio)` if the table is rejected.
    pub fn load(&self) -> FileResult<Portfolio> {
        Ok(Portfolio::load(&self.table)?)
    }
}

// =============================================================================
// RETURNS
// =============================================================================

/// Returns file: one column per ticker, one row per period. A leading
/// `Date` (or unnamed index) column is ignored.
#[derive(Debug, Clone)]
pub struct CsvReturnsSource {
    file_path: PathBuf,
    table: RawTable,
}

impl CsvReturnsSource {
    /// Opens and reads the file.
    ///
    /// # Errors
    ///
    /// See [`read_table`].
    pub fn new(file_path: impl AsRef<Path>) -> FileResult<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        let table = read_table(&file_path)?;
        Ok(Self { file_path, table })
    }

    /// Re-reads the file.
    ///
    /// # Errors
    ///
    /// See [`read_table`].
    pub fn reload(&mut self) -> FileResult<()> {
        self.table = read_table(&self.file_path)?;
        Ok(())
    }

    /// Source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Builds the returns history.
    ///
    /// # Errors
    ///
    /// Returns `Risk(InvalidReturns)` for non-numeric cells or ragged rows.
    pub fn load(&self) -> FileResult<ReturnsHistory> {
        Ok(ReturnsHistory::from_table(&self.table)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_table_short_rows() {
        let file = write_csv("Ticker,Weight,AssetType\nAAPL,40,Equity\nTSLA,25\n");
        let table = read_table(file.path()).unwrap();

        assert_eq!(table.columns, vec!["Ticker", "Weight", "AssetType"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 2), "");
    }

    #[test]
    fn test_missing_file() {
        let err = read_table("/nonexistent/holdings.csv").unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }

    #[test]
    fn test_portfolio_source() {
        let file = write_csv("Ticker,Allocation,AssetType\nAAPL,40,Equity\nGOOGL,35,Equity\nTSLA,25,\n");
        let source = CsvPortfolioSource::new(file.path()).unwrap();
        let portfolio = source.load().unwrap();

        assert_eq!(portfolio.len(), 3);
        assert!((portfolio.weight_of("AAPL").unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(portfolio.asset_class_of("TSLA"), Some("Unknown"));
    }

    #[test]
    fn test_portfolio_source_rejects_zero_weights() {
        let file = write_csv("Ticker,Weight\nAAPL,0\n");
        let err = CsvPortfolioSource::new(file.path()).unwrap().load().unwrap_err();
        assert!(matches!(err, FileError::Risk(_)));
    }

    #[test]
    fn test_returns_source_skips_date() {
        let file = write_csv("Date,AAPL,MSFT\n2024-01-02,0.01,-0.02\n2024-01-03,0.005,0.01\n");
        let returns = CsvReturnsSource::new(file.path()).unwrap().load().unwrap();

        assert_eq!(returns.tickers(), &["AAPL", "MSFT"]);
        assert_eq!(returns.n_periods(), 2);
        assert_eq!(returns.column("MSFT"), Some(vec![-0.02, 0.01]));
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let mut file = write_csv("Ticker,Weight\nAAPL,1\n");
        let mut source = CsvPortfolioSource::new(file.path()).unwrap();
        file.write_all(b"MSFT,1\n").unwrap();
        file.flush().unwrap();

        source.reload().unwrap();
        assert_eq!(source.table().len(), 2);
    }
}
