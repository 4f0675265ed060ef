//! Standard day and calendar helpers.
//!
//! This module provides the date arithmetic shared by the balance operations:
//! the length of the standard day, the length of a month, and hour
//! durations between two timestamps.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;

/// Calculates the length of the standard day in hours.
///
/// Both times are projected onto a common day using only their hour and
/// minute components. The result is negative when `standard_end` precedes
/// `standard_start`; it is not clamped.
///
/// # Examples
///
/// ```
/// use punch_clock_engine::calculation::hours_per_standard_day;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
/// assert_eq!(hours_per_standard_day(start, end), Decimal::new(95, 1)); // 9.5
/// assert_eq!(hours_per_standard_day(end, start), Decimal::new(-95, 1));
/// ```
pub fn hours_per_standard_day(standard_start: NaiveTime, standard_end: NaiveTime) -> Decimal {
    let minutes = minutes_of_day(standard_end) - minutes_of_day(standard_start);
    minutes_to_hours(minutes)
}

/// Returns the number of days in the month containing `date`.
///
/// # Examples
///
/// ```
/// use punch_clock_engine::calculation::days_in_month;
/// use chrono::NaiveDate;
///
/// assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), 29);
/// assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2023, 2, 10).unwrap()), 28);
/// ```
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        // Only reachable for the last representable month.
        .unwrap_or(31)
}

/// Calculates whole minutes between two timestamps, truncated toward zero.
pub(crate) fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}

/// Converts whole minutes to hours.
pub(crate) fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::new(minutes, 0) / Decimal::new(60, 0)).normalize()
}

fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}
