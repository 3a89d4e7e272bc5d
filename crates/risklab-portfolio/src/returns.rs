//! Historical returns.

use crate::types::RawTable;
use crate::{RiskError, RiskResult};
use nalgebra::DMatrix;
use std::collections::HashSet;

/// Periodic fractional returns, one column per ticker.
///
/// Rows are time periods in chronological order. Engines only ever borrow a
/// history; scenario shocks are applied to a private copy
/// (see [`ReturnsHistory::scaled`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsHistory {
    tickers: Vec<String>,
    data: DMatrix<f64>,
}

impl ReturnsHistory {
    /// Builds a history from row-major observations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReturns` for an empty or duplicated ticker set, ragged
    /// rows, or non-finite values.
    pub fn from_rows(tickers: Vec<String>, rows: &[Vec<f64>]) -> RiskResult<Self> {
        validate_tickers(&tickers)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != tickers.len() {
                return Err(RiskError::invalid_returns(format!(
                    "row {i} has {} values, expected {}",
                    row.len(),
                    tickers.len()
                )));
            }
        }

        let data = DMatrix::from_fn(rows.len(), tickers.len(), |i, j| rows[i][j]);
        Self::from_matrix(tickers, data)
    }

    /// Builds a history from named columns of equal length.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReturns` if the columns differ in length, a ticker
    /// repeats, or a value is not finite.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> RiskResult<Self> {
        let periods = columns.first().map_or(0, |(_, c)| c.len());
        let mut tickers = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(periods * columns.len());

        for (ticker, column) in columns {
            let ticker = ticker.into();
            if column.len() != periods {
                return Err(RiskError::invalid_returns(format!(
                    "column '{ticker}' has {} values, expected {periods}",
                    column.len()
                )));
            }
            tickers.push(ticker);
            values.extend(column);
        }

        validate_tickers(&tickers)?;
        let data = DMatrix::from_column_slice(periods, tickers.len(), &values);
        Self::from_matrix(tickers, data)
    }

    /// Wraps an existing `periods x tickers` matrix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReturns` if the column count does not match the
    /// tickers, a ticker repeats, or a value is not finite.
    pub fn from_matrix(tickers: Vec<String>, data: DMatrix<f64>) -> RiskResult<Self> {
        validate_tickers(&tickers)?;
        if data.ncols() != tickers.len() {
            return Err(RiskError::invalid_returns(format!(
                "{} columns for {} tickers",
                data.ncols(),
                tickers.len()
            )));
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            let (row, col) = (pos % data.nrows(), pos / data.nrows());
            return Err(RiskError::invalid_returns(format!(
                "non-finite return for '{}' in period {row}",
                tickers[col]
            )));
        }
        Ok(Self { tickers, data })
    }

    /// Parses a raw table whose header names the tickers.
    ///
    /// A leading `Date` (or unnamed index) column is skipped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReturns` when a cell does not parse as a number or the
    /// table is otherwise malformed.
    pub fn from_table(table: &RawTable) -> RiskResult<Self> {
        let skip = usize::from(table.columns.first().is_some_and(|c| {
            let c = c.trim();
            c.is_empty() || c.eq_ignore_ascii_case("date")
        }));
        let tickers: Vec<String> = table
            .columns
            .iter()
            .skip(skip)
            .map(|c| c.trim().to_string())
            .collect();

        let mut rows = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let parsed = (skip..table.columns.len())
                .map(|col| {
                    let cell = table.cell(row, col);
                    cell.parse::<f64>().map_err(|_| {
                        RiskError::invalid_returns(format!(
                            "period {row}, column '{}': cannot parse '{cell}'",
                            table.columns[col].trim()
                        ))
                    })
                })
                .collect::<RiskResult<Vec<f64>>>()?;
            rows.push(parsed);
        }

        Self::from_rows(tickers, &rows)
    }

    /// Column names.
    #[must_use]
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Number of periods (rows).
    #[must_use]
    pub fn n_periods(&self) -> usize {
        self.data.nrows()
    }

    /// Number of tickers (columns).
    #[must_use]
    pub fn n_assets(&self) -> usize {
        self.data.ncols()
    }

    /// The underlying `periods x tickers` matrix.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Column position of a ticker.
    #[must_use]
    pub fn column_index(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Returns of one ticker, oldest first.
    #[must_use]
    pub fn column(&self, ticker: &str) -> Option<Vec<f64>> {
        self.column_index(ticker)
            .map(|j| self.data.column(j).iter().copied().collect())
    }

    /// Returns of all tickers for one period.
    #[must_use]
    pub fn row(&self, period: usize) -> Option<Vec<f64>> {
        (period < self.n_periods()).then(|| self.data.row(period).iter().copied().collect())
    }

    /// Mean return per ticker, in column order.
    #[must_use]
    pub fn column_means(&self) -> Vec<(String, f64)> {
        self.tickers
            .iter()
            .enumerate()
            .map(|(j, t)| {
                let mean = if self.n_periods() == 0 {
                    f64::NAN
                } else {
                    self.data.column(j).mean()
                };
                (t.clone(), mean)
            })
            .collect()
    }

    /// Sub-matrix with the given tickers as columns, in that order.
    ///
    /// # Errors
    ///
    /// Returns `MissingReturns` for the first ticker without a column.
    pub fn select(&self, tickers: &[String]) -> RiskResult<DMatrix<f64>> {
        let indices = tickers
            .iter()
            .map(|t| {
                self.column_index(t)
                    .ok_or_else(|| RiskError::missing_returns(t.as_str()))
            })
            .collect::<RiskResult<Vec<usize>>>()?;
        Ok(self.data.select_columns(indices.iter()))
    }

    /// Copy with every value of `ticker` multiplied by `factor`.
    ///
    /// # Errors
    ///
    /// Returns `MissingReturns` if the ticker has no column.
    pub fn scaled(&self, ticker: &str, factor: f64) -> RiskResult<Self> {
        let mut copy = self.clone();
        copy.scale_column(ticker, factor)?;
        Ok(copy)
    }

    /// Multiplies one column in place. Only used on private copies.
    pub(crate) fn scale_column(&mut self, ticker: &str, factor: f64) -> RiskResult<()> {
        let j = self
            .column_index(ticker)
            .ok_or_else(|| RiskError::missing_returns(ticker))?;
        self.data.column_mut(j).scale_mut(factor);
        Ok(())
    }
}

fn validate_tickers(tickers: &[String]) -> RiskResult<()> {
    if tickers.is_empty() {
        return Err(RiskError::invalid_returns("no tickers"));
    }
    let mut seen = HashSet::with_capacity(tickers.len());
    for ticker in tickers {
        if ticker.trim().is_empty() {
            return Err(RiskError::invalid_returns("empty ticker name"));
        }
        if !seen.insert(ticker.as_str()) {
            return Err(RiskError::invalid_returns(format!(
                "duplicate ticker '{ticker}'"
            )));
        }
    }
    Ok(())
}
