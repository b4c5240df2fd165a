//! Date helpers for the calendar grid.
//!
//! Controller state and the entries table both use 0-based months (0 =
//! January), while chrono expects 1-based months. Every conversion between
//! the two happens here and nowhere else.

use chrono::{Datelike, Local, NaiveDate};

/// Number of days in `month` (0-based) of `year`, leap-year aware.
///
/// `month` must be in `0..=11`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month <= 11, "month out of range: {month}");

    let first = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or_else(|| panic!("invalid year/month: {year}/{month}"));
    let next = if month == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    }
    .unwrap_or_else(|| panic!("invalid year/month: {year}/{month}"));

    (next - first).num_days() as u32
}

/// Year of the local clock.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Month of the local clock, 0-based.
pub fn current_month() -> u32 {
    Local::now().month0()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths_for_a_common_year() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, len) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2023, month as u32), *len);
        }
    }

    #[test]
    fn february_in_leap_years() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
    }

    #[test]
    fn december_crosses_the_year_boundary() {
        assert_eq!(days_in_month(2023, 11), 31);
    }
}
