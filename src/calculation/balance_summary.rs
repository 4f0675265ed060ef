//! Balance summary calculation.

use chrono::{NaiveDate, Timelike};
use rust_decimal::Decimal;

use crate::models::{BalanceSummary, Punch, Schedule};

use super::daily_balance::compute_daily_balance;
use super::worked_hours::compute_total_worked_hours;

/// Produces the aggregate and per-day balances for a punch history.
///
/// Without a schedule the summary is zeroed. Otherwise the aggregate balance
/// is the total worked hours minus the hour component of the standard start
/// time, and the daily balance is [`compute_daily_balance`].
///
/// The aggregate does not use the expected monthly hours; callers that need
/// worked against expected can combine
/// [`compute_expected_monthly_hours`](super::compute_expected_monthly_hours)
/// with [`compute_total_worked_hours`] themselves, or read both figures from a
/// [`BalanceReport`](crate::models::BalanceReport).
///
/// `reference_date` is accepted for parity with the expected hours operation
/// and does not influence the result.
///
/// # Examples
///
/// ```
/// use punch_clock_engine::calculation::compute_balance_summary;
/// use punch_clock_engine::models::{BalanceSummary, Punch};
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
/// assert_eq!(compute_balance_summary(None, &[], reference), BalanceSummary::empty());
/// ```
pub fn compute_balance_summary(
    config: Option<&Schedule>,
    punches: &[Punch],
    _reference_date: NaiveDate,
) -> BalanceSummary {
    let Some(schedule) = config else {
        return BalanceSummary::empty();
    };

    let worked_hours = compute_total_worked_hours(punches);
    let start_hour = Decimal::from(schedule.standard_start.hour());

    BalanceSummary {
        aggregate_balance: (worked_hours - start_hour).normalize(),
        daily_balance: compute_daily_balance(
            punches,
            schedule.standard_start,
            schedule.standard_end,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayKey, WeekdaySet};
    use chrono::{NaiveDateTime, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn schedule(start: (u32, u32), end: (u32, u32)) -> Schedule {
        Schedule {
            standard_start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            standard_end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            active_weekdays: WeekdaySet::WORKWEEK,
        }
    }

    fn full_day() -> Vec<Punch> {
        vec![
            Punch::new(make_datetime("2024-07-15", "08:00:00")),
            Punch::new(make_datetime("2024-07-15", "17:00:00")),
        ]
    }

    /// BS-001: no schedule yields the zeroed summary
    #[test]
    fn test_bs_001_missing_schedule() {
        let summary = compute_balance_summary(None, &full_day(), make_date("2024-07-15"));
        assert_eq!(summary.aggregate_balance, Decimal::ZERO);
        assert!(summary.daily_balance.is_empty());
    }

    /// BS-002: full standard day
    #[test]
    fn test_bs_002_full_day() {
        let config = schedule((8, 0), (17, 0));
        let summary = compute_balance_summary(Some(&config), &full_day(), make_date("2024-07-15"));

        // 9 worked hours minus the start hour (8).
        assert_eq!(summary.aggregate_balance, dec("1"));
        let day = DayKey::from(make_date("2024-07-15"));
        assert_eq!(summary.daily_balance.get(&day), Some(Decimal::ZERO));
    }

    /// BS-003: only the hour of the start time is subtracted
    #[test]
    fn test_bs_003_start_minutes_ignored() {
        let config = schedule((8, 45), (17, 0));
        let summary = compute_balance_summary(Some(&config), &full_day(), make_date("2024-07-15"));
        assert_eq!(summary.aggregate_balance, dec("1"));
    }

    /// BS-004: empty history with a schedule
    #[test]
    fn test_bs_004_empty_history() {
        let config = schedule((9, 0), (18, 0));
        let summary = compute_balance_summary(Some(&config), &[], make_date("2024-07-15"));
        assert_eq!(summary.aggregate_balance, dec("-9"));
        assert!(summary.daily_balance.is_empty());
    }

    #[test]
    fn test_reference_date_does_not_change_summary() {
        let config = schedule((8, 0), (17, 0));
        let july = compute_balance_summary(Some(&config), &full_day(), make_date("2024-07-15"));
        let february = compute_balance_summary(Some(&config), &full_day(), make_date("2024-02-29"));
        assert_eq!(july, february);
    }
}
