//! Summary tables.
//!
//! Every engine exposes its results as a [`SummaryTable`]: a labelled index
//! column plus named value columns. Exporters and the CLI consume these
//! verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Numeric value.
    Number(f64),
    /// Preformatted text.
    Text(String),
    /// Missing value.
    Blank,
}

impl Cell {
    /// Numeric content, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true for [`Cell::Blank`].
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Blank => Ok(()),
        }
    }
}

/// One labelled row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Index label (ticker, scenario name, ...).
    pub label: String,
    /// One cell per column.
    pub cells: Vec<Cell>,
}

/// A titled table with an index column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Section title (used as sheet / file suffix by exporters).
    pub title: String,
    /// Header of the index column.
    pub index: String,
    /// Value column names.
    pub columns: Vec<String>,
    /// Data rows.
    pub rows: Vec<TableRow>,
}

impl SummaryTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new(title: impl Into<String>, index: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            title: title.into(),
            index: index.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Placeholder table carrying a single `Notice` message.
    #[must_use]
    pub fn notice(title: impl Into<String>, message: impl Into<String>) -> Self {
        let mut table = Self::new(title, "", vec!["Notice".to_string()]);
        table.push_row("0", vec![Cell::Text(message.into())]);
        table
    }

    /// Appends a row, padding or truncating cells to the column count.
    pub fn push_row(&mut self, label: impl Into<String>, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Blank);
        self.rows.push(TableRow {
            label: label.into(),
            cells,
        });
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if this is a [`SummaryTable::notice`] placeholder.
    #[must_use]
    pub fn is_notice(&self) -> bool {
        self.columns.len() == 1 && self.columns[0] == "Notice"
    }

    /// Cell lookup by row label and column name.
    #[must_use]
    pub fn cell(&self, label: &str, column: &str) -> Option<&Cell> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.label == label)
            .and_then(|r| r.cells.get(col))
    }

    /// Header row followed by data rows, all rendered as strings.
    #[must_use]
    pub fn to_records(&self) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(
            std::iter::once(self.index.clone())
                .chain(self.columns.iter().cloned())
                .collect(),
        );
        for row in &self.rows {
            records.push(
                std::iter::once(row.label.clone())
                    .chain(row.cells.iter().map(ToString::to_string))
                    .collect(),
            );
        }
        records
    }
}
