//! Untyped tabular input.

use serde::{Deserialize, Serialize};

/// A header row plus string cells, as handed over by a tabular loader.
///
/// The loader does not interpret the cells; typed views (portfolio holdings,
/// returns) are derived from it exactly once at the component boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column names, in source order.
    pub columns: Vec<String>,

    /// Data rows. Short rows are treated as having blank trailing cells.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a table from a header and rows.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Convenience constructor from string slices.
    #[must_use]
    pub fn from_strs(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Trimmed cell value; blank for short rows.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", |c| c.trim())
    }
}
