//! Turns day entries into chart-ready point series.
//!
//! Buckets with no valid readings are omitted rather than zero-filled, so a
//! series is sparse but always ordered by bucket. The caller-supplied
//! `offset` (normally the axis lower bound) is subtracted from every value to
//! keep the plotted range close to the axis start.

use serde::{Deserialize, Serialize};

use crate::calendar::days_in_month;
use crate::db::models::DayEntry;

/// Which weight series to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Morning,
    Evening,
}

impl Metric {
    pub fn value_of(&self, entry: &DayEntry) -> Option<f64> {
        match self {
            Metric::Morning => entry.morning_weight,
            Metric::Evening => entry.evening_weight,
        }
    }
}

/// Chart bucketing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Daily
    }
}

/// One plotted point; `x` is the bucket ordinal (day number, week-of-month
/// index, or 1-based month number).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// One point per day of `month` with a reading for `metric`, keyed by day
/// number. No averaging; days without a reading are skipped. Rows for days
/// past the end of the month are filtered out rather than plotted.
pub fn values_by_day(
    entries: &[DayEntry],
    year: i32,
    month: u32,
    offset: f64,
    metric: Metric,
) -> Vec<ChartPoint> {
    let month_len = days_in_month(year, month);
    let mut points: Vec<ChartPoint> = entries
        .iter()
        .filter(|e| e.year == year && e.month == month && e.day >= 1 && e.day <= month_len)
        .filter_map(|e| {
            metric.value_of(e).map(|weight| ChartPoint {
                x: e.day as f64,
                y: weight - offset,
            })
        })
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    points
}

/// Average of `metric` over consecutive 7-day windows of `month`, starting
/// at day 1. The last window is however many days remain, so the windows
/// partition the month exactly. Windows with zero readings are skipped.
/// Bucket index starts at 1.
pub fn values_by_week(
    entries: &[DayEntry],
    year: i32,
    month: u32,
    offset: f64,
    metric: Metric,
) -> Vec<ChartPoint> {
    if entries.is_empty() {
        return Vec::new();
    }

    let month_len = days_in_month(year, month);

    // Readings indexed by day number; later rows for a duplicate day would
    // win, but the natural key makes duplicates impossible upstream.
    let mut readings: Vec<Option<f64>> = vec![None; month_len as usize + 1];
    for entry in entries
        .iter()
        .filter(|e| e.year == year && e.month == month && e.day >= 1 && e.day <= month_len)
    {
        readings[entry.day as usize] = metric.value_of(entry);
    }

    let mut result = Vec::new();
    let mut start = 1u32;
    while start <= month_len {
        let window_len = (month_len - start + 1).min(7);
        let mut sum = 0.0;
        let mut valid = 0u32;
        for day in start..start + window_len {
            if let Some(weight) = readings[day as usize] {
                sum += weight - offset;
                valid += 1;
            }
        }
        if valid > 0 {
            result.push(ChartPoint {
                x: ((start - 1) / 7 + 1) as f64,
                y: sum / valid as f64,
            });
        }
        start += 7;
    }
    result
}

/// Average of `metric` per month of `year`, keyed by 1-based month number.
/// Months with zero readings are skipped.
pub fn values_by_month(
    entries: &[DayEntry],
    year: i32,
    offset: f64,
    metric: Metric,
) -> Vec<ChartPoint> {
    if entries.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::new();
    for month in 0..12u32 {
        let values: Vec<f64> = entries
            .iter()
            .filter(|e| e.year == year && e.month == month)
            .filter_map(|e| metric.value_of(e))
            .collect();
        if !values.is_empty() {
            let sum: f64 = values.iter().map(|w| w - offset).sum();
            result.push(ChartPoint {
                x: (month + 1) as f64,
                y: sum / values.len() as f64,
            });
        }
    }
    result
}

/// Whether a step count clears the configured daily goal. Drives the
/// red/green coloring of the steps field in the edit grid.
pub fn step_goal_met(steps: Option<u32>, target_steps: u32) -> bool {
    steps.unwrap_or(0) > target_steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(year: i32, month: u32, day: u32, morning: Option<f64>) -> DayEntry {
        DayEntry {
            morning_weight: morning,
            ..DayEntry::blank(year, month, day)
        }
    }

    #[test]
    fn by_day_skips_days_without_a_reading() {
        let entries = vec![
            entry(2024, 0, 1, Some(80.0)),
            entry(2024, 0, 2, None),
            entry(2024, 0, 3, Some(79.5)),
        ];
        let points = values_by_day(&entries, 2024, 0, 0.0, Metric::Morning);
        assert_eq!(
            points,
            vec![
                ChartPoint { x: 1.0, y: 80.0 },
                ChartPoint { x: 3.0, y: 79.5 },
            ]
        );
    }

    #[test]
    fn by_day_applies_the_offset_and_month_filter() {
        let entries = vec![
            entry(2024, 0, 5, Some(80.0)),
            entry(2024, 1, 5, Some(90.0)),
            entry(2023, 0, 5, Some(95.0)),
        ];
        let points = values_by_day(&entries, 2024, 0, 50.0, Metric::Morning);
        assert_eq!(points, vec![ChartPoint { x: 5.0, y: 30.0 }]);
    }

    #[test]
    fn by_day_drops_out_of_range_days() {
        // A day-31 row surviving navigation to a 30-day month.
        let entries = vec![
            entry(2024, 3, 30, Some(80.0)),
            entry(2024, 3, 31, Some(81.0)),
        ];
        let points = values_by_day(&entries, 2024, 3, 0.0, Metric::Morning);
        assert_eq!(points, vec![ChartPoint { x: 30.0, y: 80.0 }]);
    }

    #[test]
    fn by_week_averages_each_window() {
        // January 2024: windows 1-7, 8-14, 15-21, 22-28, 29-31.
        let entries = vec![
            entry(2024, 0, 1, Some(80.0)),
            entry(2024, 0, 7, Some(82.0)),
            entry(2024, 0, 10, Some(84.0)),
        ];
        let points = values_by_week(&entries, 2024, 0, 0.0, Metric::Morning);
        assert_eq!(
            points,
            vec![
                ChartPoint { x: 1.0, y: 81.0 },
                ChartPoint { x: 2.0, y: 84.0 },
            ]
        );
    }

    #[test]
    fn by_week_last_window_covers_the_tail_of_the_month() {
        // Day 31 lands in the fifth window of a 31-day month.
        let entries = vec![entry(2024, 0, 31, Some(77.0))];
        let points = values_by_week(&entries, 2024, 0, 0.0, Metric::Morning);
        assert_eq!(points, vec![ChartPoint { x: 5.0, y: 77.0 }]);
    }

    #[test]
    fn by_week_window_partition_is_exact() {
        for (year, month) in [(2023, 1), (2024, 1), (2024, 3), (2024, 0)] {
            let month_len = days_in_month(year, month);
            let mut covered = 0;
            let mut start = 1;
            while start <= month_len {
                let window_len = (month_len - start + 1).min(7);
                covered += window_len;
                start += 7;
            }
            assert_eq!(covered, month_len, "partition of {year}-{month}");

            let expected_last = month_len - 7 * ((month_len - 1) / 7);
            let last_start = 7 * ((month_len - 1) / 7) + 1;
            assert_eq!((month_len - last_start + 1).min(7), expected_last);
        }
    }

    #[test]
    fn by_week_skips_empty_windows_instead_of_dividing_by_zero() {
        let entries = vec![entry(2024, 0, 20, None)];
        assert!(values_by_week(&entries, 2024, 0, 0.0, Metric::Morning).is_empty());
    }

    #[test]
    fn by_month_averages_and_skips_empty_months() {
        let entries = vec![
            entry(2024, 0, 1, Some(80.0)),
            entry(2024, 0, 15, Some(82.0)),
            entry(2024, 5, 3, Some(78.0)),
            entry(2024, 7, 3, None),
            entry(2023, 2, 3, Some(99.0)),
        ];
        let points = values_by_month(&entries, 2024, 0.0, Metric::Morning);
        assert_eq!(
            points,
            vec![
                ChartPoint { x: 1.0, y: 81.0 },
                ChartPoint { x: 6.0, y: 78.0 },
            ]
        );
    }

    #[test]
    fn evening_metric_reads_the_other_column() {
        let mut e = entry(2024, 0, 4, Some(80.0));
        e.evening_weight = Some(81.5);
        let points = values_by_day(&[e], 2024, 0, 0.0, Metric::Evening);
        assert_eq!(points, vec![ChartPoint { x: 4.0, y: 81.5 }]);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(values_by_day(&[], 2024, 0, 0.0, Metric::Morning).is_empty());
        assert!(values_by_week(&[], 2024, 0, 0.0, Metric::Morning).is_empty());
        assert!(values_by_month(&[], 2024, 0.0, Metric::Morning).is_empty());
    }

    #[test]
    fn deterministic_over_repeated_runs() {
        let entries = vec![
            entry(2024, 0, 2, Some(80.0)),
            entry(2024, 0, 9, Some(81.0)),
        ];
        let first = values_by_week(&entries, 2024, 0, 0.0, Metric::Morning);
        let second = values_by_week(&entries, 2024, 0, 0.0, Metric::Morning);
        assert_eq!(first, second);
    }

    #[test]
    fn step_goal_predicate() {
        assert!(step_goal_met(Some(10001), 10000));
        assert!(!step_goal_met(Some(10000), 10000));
        assert!(!step_goal_met(None, 0));
        assert!(step_goal_met(Some(1), 0));
    }
}
