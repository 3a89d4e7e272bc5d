//! Metric values and result sets.

use super::MetricKey;
use crate::table::{Cell, SummaryTable};
use crate::{RiskError, RiskResult};
use risklab_math::statistics::round_to;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Formats a fraction as a percentage string, e.g. `0.00524 -> "0.52%"`.
#[must_use]
pub fn format_percent(value: f64, decimals: u32) -> String {
    format!("{:.*}%", decimals as usize, value * 100.0)
}

/// Parses a displayed metric back to a number.
///
/// Text carrying a `%` sign is read as a percentage and divided by 100;
/// plain numeric text is returned as is.
///
/// # Errors
///
/// Returns `InvalidInput` if the text is not numeric.
pub fn parse_percent(text: &str) -> RiskResult<f64> {
    let text = text.trim();
    let (number, scale) = match text.strip_suffix('%') {
        Some(stripped) => (stripped.trim(), 100.0),
        None => (text, 1.0),
    };
    number
        .parse::<f64>()
        .map(|v| v / scale)
        .map_err(|_| RiskError::invalid_input(format!("cannot parse metric value '{text}'")))
}

/// A metric's numeric value with its display form.
///
/// The display form is derived once, when the metric is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Authoritative numeric value.
    pub value: f64,
    /// Display form: a percentage string, or a rounded number for ratios.
    pub formatted: Cell,
}

impl MetricValue {
    /// Builds the value/display pair for a metric.
    #[must_use]
    pub fn new(key: MetricKey, value: f64, percent_decimals: u32) -> Self {
        let formatted = if key.is_percentage() {
            Cell::Text(format_percent(value, percent_decimals))
        } else {
            Cell::Number(round_to(value, 4))
        };
        Self { value, formatted }
    }
}

/// Metrics computed over one returns history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskMetricsResult {
    values: BTreeMap<MetricKey, MetricValue>,
}

impl RiskMetricsResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a metric, replacing any previous value under the same key.
    pub fn insert(&mut self, key: MetricKey, value: MetricValue) {
        self.values.insert(key, value);
    }

    /// Value/display pair for a key.
    #[must_use]
    pub fn get(&self, key: MetricKey) -> Option<&MetricValue> {
        self.values.get(&key)
    }

    /// Numeric value for a key.
    #[must_use]
    pub fn value(&self, key: MetricKey) -> Option<f64> {
        self.values.get(&key).map(|v| v.value)
    }

    /// Keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = MetricKey> + '_ {
        self.values.keys().copied()
    }

    /// Iterates over stored metrics in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &MetricValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Number of stored metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Metric map: display forms when `formatted`, raw numbers otherwise.
    #[must_use]
    pub fn summary(&self, formatted: bool) -> BTreeMap<MetricKey, Cell> {
        self.values
            .iter()
            .map(|(k, v)| {
                let cell = if formatted {
                    v.formatted.clone()
                } else {
                    Cell::Number(v.value)
                };
                (*k, cell)
            })
            .collect()
    }

    /// One-row table with one column per metric.
    #[must_use]
    pub fn to_table(&self, formatted: bool) -> SummaryTable {
        let summary = self.summary(formatted);
        let columns = summary.keys().map(ToString::to_string).collect();
        let mut table = SummaryTable::new("RiskMetrics", "", columns);
        table.push_row("0", summary.into_values().collect());
        table
    }
}
