//! Expected monthly hours projection.
//!
//! This module projects the weekly schedule across the calendar month that
//! contains a reference date.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::models::WeekdaySet;

use super::standard_day::{days_in_month, hours_per_standard_day};

/// Counts the days in the month of `reference_date` whose weekday is active.
///
/// Full weeks contribute `active_weekdays.len()` days each. The remaining
/// `days_in_month % 7` days are the last days of the month, counted back
/// from the final day, and each contributes one day when its weekday is
/// active.
///
/// Every remainder day is checked, not only the month's final day. For July
/// 2024 with a Monday to Friday week this gives 23 days; looking at the
/// final day alone would give 21.
pub fn count_matching_days(active_weekdays: WeekdaySet, reference_date: NaiveDate) -> u32 {
    let days = days_in_month(reference_date);
    let full_weeks = days / 7;
    let remainder = days % 7;

    let Some(last_day) = reference_date.with_day(days) else {
        return 0;
    };

    let remainder_matches = (0..remainder)
        .map(|offset| last_day - Duration::days(i64::from(offset)))
        .filter(|day| active_weekdays.contains(day.weekday()))
        .count() as u32;

    active_weekdays.len() as u32 * full_weeks + remainder_matches
}

/// Calculates the expected hours for the month containing `reference_date`.
///
/// The result is the standard day length multiplied by the number of active
/// days in the month, with its sign inverted: expected hours are reported as
/// a non-positive figure when the standard day is positive. A standard day
/// whose end precedes its start yields a positive figure.
///
/// # Arguments
///
/// * `active_weekdays` - Days of the week on which work is expected
/// * `standard_start` - Start of the standard day
/// * `standard_end` - End of the standard day
/// * `reference_date` - Any date within the target month
///
/// # Examples
///
/// ```
/// use punch_clock_engine::calculation::compute_expected_monthly_hours;
/// use punch_clock_engine::models::WeekdaySet;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// // July 2024: 31 days starting on a Monday, 23 weekdays.
/// let expected = compute_expected_monthly_hours(
///     WeekdaySet::WORKWEEK,
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
/// );
/// assert_eq!(expected, Decimal::new(-207, 0));
/// ```
pub fn compute_expected_monthly_hours(
    active_weekdays: WeekdaySet,
    standard_start: NaiveTime,
    standard_end: NaiveTime,
    reference_date: NaiveDate,
) -> Decimal {
    let hours_per_day = hours_per_standard_day(standard_start, standard_end);
    let matching_days = count_matching_days(active_weekdays, reference_date);

    // Normalizing also turns a negative zero into zero.
    (hours_per_day * Decimal::from(matching_days) * Decimal::NEGATIVE_ONE).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn days(labels: &str) -> WeekdaySet {
        labels.parse().unwrap()
    }

    /// EH-001: 5-day week across July 2024
    #[test]
    fn test_eh_001_workweek_july_2024() {
        // July 2024 starts Monday; remainder days 29, 30, 31 are Mon, Tue, Wed.
        assert_eq!(count_matching_days(WeekdaySet::WORKWEEK, date(2024, 7, 1)), 23);
        assert_eq!(
            compute_expected_monthly_hours(
                WeekdaySet::WORKWEEK,
                time(8, 0),
                time(17, 0),
                date(2024, 7, 31)
            ),
            dec("-207")
        );
    }

    /// EH-002: empty weekday set yields zero
    #[test]
    fn test_eh_002_empty_weekdays_zero() {
        let expected =
            compute_expected_monthly_hours(WeekdaySet::NONE, time(8, 0), time(17, 0), date(2024, 7, 15));
        assert_eq!(expected, Decimal::ZERO);
        assert!(expected.is_sign_positive());
    }

    /// EH-003: leap February adds the weekday of day 29
    #[test]
    fn test_eh_003_leap_february() {
        // 2024-02-29 is a Thursday; 2023-02 has exactly four weeks.
        let thursdays = days("Thu");
        let leap =
            compute_expected_monthly_hours(thursdays, time(8, 0), time(17, 0), date(2024, 2, 1));
        let common =
            compute_expected_monthly_hours(thursdays, time(8, 0), time(17, 0), date(2023, 2, 1));

        assert_eq!(common, dec("-36"));
        assert_eq!(leap, dec("-45"));
        assert_eq!(leap - common, dec("-9"));
    }

    /// EH-004: leap February does not change when day 29 is inactive
    #[test]
    fn test_eh_004_leap_february_inactive_day_29() {
        let mondays = days("Mon");
        let leap = compute_expected_monthly_hours(mondays, time(8, 0), time(17, 0), date(2024, 2, 1));
        let common =
            compute_expected_monthly_hours(mondays, time(8, 0), time(17, 0), date(2023, 2, 1));
        assert_eq!(leap, common);
    }

    /// EH-005: reversed standard day produces a positive figure
    #[test]
    fn test_eh_005_reversed_standard_day() {
        let expected = compute_expected_monthly_hours(
            WeekdaySet::WORKWEEK,
            time(17, 0),
            time(8, 0),
            date(2024, 7, 15),
        );
        assert_eq!(expected, dec("207"));
    }

    /// EH-006: fractional standard day
    #[test]
    fn test_eh_006_fractional_standard_day() {
        // September 2024: 30 days starting Sunday; remainder days 29 (Sun), 30 (Mon).
        assert_eq!(count_matching_days(WeekdaySet::WORKWEEK, date(2024, 9, 10)), 21);
        let expected = compute_expected_monthly_hours(
            WeekdaySet::WORKWEEK,
            time(9, 0),
            time(16, 30),
            date(2024, 9, 10),
        );
        assert_eq!(expected, dec("-157.5"));
    }

    #[test]
    fn test_every_day_counts_whole_month() {
        for (y, m, n) in [(2024, 2, 29), (2023, 2, 28), (2024, 4, 30), (2024, 12, 31)] {
            assert_eq!(count_matching_days(WeekdaySet::ALL, date(y, m, 1)), n);
        }
    }

    #[test]
    fn test_reference_day_within_month_is_irrelevant() {
        let set = days("Sat,Sun");
        let first = count_matching_days(set, date(2024, 6, 1));
        let last = count_matching_days(set, date(2024, 6, 30));
        assert_eq!(first, last);
        // June 2024 starts Saturday: weekends on 1,2,8,9,15,16,22,23,29,30.
        assert_eq!(first, 10);
    }

    #[test]
    fn test_single_weekday_matches_calendar() {
        let mut set = WeekdaySet::NONE;
        set.insert(Weekday::Wed);
        // July 2024 Wednesdays: 3, 10, 17, 24, 31.
        assert_eq!(count_matching_days(set, date(2024, 7, 15)), 5);
    }
}
