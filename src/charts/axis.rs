//! Vertical axis range derivation.
//!
//! Plotted values are offset by the axis lower bound (see
//! [`crate::charts::series`]), so label values are emitted relative to the
//! bound and [`AxisRange::tick_label`] reverses the offset when formatting
//! ticks.

use serde::{Deserialize, Serialize};

use super::series::Metric;
use crate::db::models::DayEntry;

/// Axis floor used when no readings exist yet.
pub const DEFAULT_LOWER_LIMIT: f64 = 50.0;
/// Axis ceiling used when no readings exist yet.
pub const DEFAULT_UPPER_LIMIT: f64 = 200.0;

/// Weekly averages over fewer populated days than this are misleading, so
/// the chart falls back to the daily series below it.
pub const MIN_DAYS_FOR_WEEK_CALCULATION: usize = 12;

/// Lower axis bound: the floored minimum reading, snapped down to a multiple
/// of 5, never above `default`. Returns `default` when no readings exist.
pub fn chart_lower_limit(default: f64, values: &[Option<f64>]) -> f64 {
    let min = values.iter().flatten().fold(f64::INFINITY, |a, &b| a.min(b));
    if !min.is_finite() {
        return default;
    }
    (default.max(min.floor()).abs() / 5.0).floor() * 5.0
}

/// Upper axis bound: the maximum reading, never below `default`. Returns
/// `default` when no readings exist.
pub fn chart_upper_limit(default: f64, values: &[Option<f64>]) -> f64 {
    let max = values
        .iter()
        .flatten()
        .fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if !max.is_finite() {
        return default;
    }
    default.max(max)
}

/// Whether `month` holds enough readings for `metric` to make a weekly
/// average meaningful. `entries` is expected to already be scoped to the
/// selected year.
pub fn has_enough_data_for_weekly(entries: &[DayEntry], month: u32, metric: Metric) -> bool {
    let populated = entries
        .iter()
        .filter(|e| e.month == month && metric.value_of(e).is_some())
        .count();
    populated >= MIN_DAYS_FOR_WEEK_CALCULATION
}

/// Vertical axis domain handed to the chart renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisRange {
    pub lower: f64,
    pub upper: f64,
    pub step: f64,
}

impl AxisRange {
    /// Label positions in plotted (offset) coordinates, from the lower bound
    /// up to the upper bound in increments of `step`.
    pub fn label_values(&self) -> Vec<f64> {
        let mut labels = Vec::new();
        let mut current = self.lower;
        while current <= self.upper {
            labels.push(current - self.lower);
            current += self.step;
        }
        labels
    }

    /// Reverses the plotting offset for a tick label.
    pub fn tick_label(&self, value: f64) -> f64 {
        value + self.lower
    }
}
