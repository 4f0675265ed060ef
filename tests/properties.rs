//! Property tests for the balance operations.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use proptest::collection::SizeRange;
use proptest::prelude::*;
use rust_decimal::Decimal;

use punch_clock_engine::calculation::{
    compute_balance_summary, compute_daily_balance, compute_expected_monthly_hours,
    compute_total_worked_hours, days_in_month, hours_per_standard_day, pair_punches,
};
use punch_clock_engine::models::{BalanceSummary, Punch, WeekdaySet};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Quarter-hour times keep every hour figure exact.
fn time_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..4).prop_map(|(h, q)| NaiveTime::from_hms_opt(h, q * 15, 0).unwrap())
}

fn standard_day_strategy() -> impl Strategy<Value = (NaiveTime, NaiveTime)> {
    (time_strategy(), time_strategy()).prop_filter("end after start", |(start, end)| end > start)
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn weekday_set_strategy() -> impl Strategy<Value = WeekdaySet> {
    proptest::collection::vec(0usize..7, 0..7)
        .prop_map(|days| days.into_iter().map(|d| WEEKDAYS[d]).collect())
}

/// An ordered punch history built from quarter-hour gaps.
fn history_strategy(len: impl Into<SizeRange>) -> impl Strategy<Value = Vec<NaiveDateTime>> {
    (date_strategy(), proptest::collection::vec(0i64..72, len)).prop_map(|(date, gaps)| {
        let mut current = date.and_hms_opt(0, 0, 0).unwrap();
        gaps.into_iter()
            .map(|quarters| {
                current += Duration::minutes(quarters * 15);
                current
            })
            .collect()
    })
}

fn to_punches(history: &[NaiveDateTime]) -> Vec<Punch> {
    history.iter().copied().map(Punch::new).collect()
}

proptest! {
    #[test]
    fn expected_hours_non_positive_when_end_after_start(
        (start, end) in standard_day_strategy(),
        weekdays in weekday_set_strategy(),
        date in date_strategy(),
    ) {
        let expected = compute_expected_monthly_hours(weekdays, start, end, date);
        prop_assert!(expected <= Decimal::ZERO);
    }

    #[test]
    fn empty_weekday_set_expects_nothing(
        start in time_strategy(),
        end in time_strategy(),
        date in date_strategy(),
    ) {
        let expected = compute_expected_monthly_hours(WeekdaySet::NONE, start, end, date);
        prop_assert_eq!(expected, Decimal::ZERO);
    }

    #[test]
    fn every_weekday_expects_whole_month(date in date_strategy()) {
        let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let expected = compute_expected_monthly_hours(WeekdaySet::ALL, start, end, date);
        prop_assert_eq!(expected, -Decimal::from(days_in_month(date)));
    }

    #[test]
    fn two_pairs_sum_their_intervals(history in history_strategy(4)) {
        let punches = to_punches(&history);

        let first = (history[1] - history[0]).num_minutes();
        let second = (history[3] - history[2]).num_minutes();
        prop_assert_eq!(compute_total_worked_hours(&punches), hours(first + second));
    }

    #[test]
    fn trailing_punch_never_counts(
        history in history_strategy(1..12).prop_filter("odd length", |h| h.len() % 2 == 1),
    ) {
        let punches = to_punches(&history);
        let paired = &punches[..punches.len() - 1];

        prop_assert_eq!(
            compute_total_worked_hours(&punches),
            compute_total_worked_hours(paired)
        );
        prop_assert_eq!(pair_punches(&punches).open, history.last().copied());
    }

    #[test]
    fn ordered_history_never_negative(history in history_strategy(0..12)) {
        let punches = to_punches(&history);
        prop_assert!(compute_total_worked_hours(&punches) >= Decimal::ZERO);
    }

    #[test]
    fn daily_balances_account_for_all_worked_hours(
        history in history_strategy(0..12),
        start in time_strategy(),
        end in time_strategy(),
    ) {
        let punches = to_punches(&history);
        let daily = compute_daily_balance(&punches, start, end);
        let worked = compute_total_worked_hours(&punches);

        let seeded = hours_per_standard_day(start, end) * Decimal::from(daily.len() as u64);
        prop_assert_eq!(daily.total(), seeded - worked);
    }

    #[test]
    fn missing_schedule_always_zero(history in history_strategy(0..8), date in date_strategy()) {
        let punches = to_punches(&history);
        prop_assert_eq!(compute_balance_summary(None, &punches, date), BalanceSummary::empty());
    }

    #[test]
    fn leap_day_adds_one_contribution_when_active(
        year in (1904i32..2096).prop_filter("leap year", |y| y % 4 == 0 && (y % 100 != 0 || y % 400 == 0)),
        (start, end) in standard_day_strategy(),
    ) {
        let leap_day = NaiveDate::from_ymd_opt(year, 2, 29).unwrap();
        let mut weekdays = WeekdaySet::NONE;
        weekdays.insert(leap_day.weekday());

        let leap = compute_expected_monthly_hours(weekdays, start, end, leap_day);
        let common = compute_expected_monthly_hours(
            weekdays,
            start,
            end,
            NaiveDate::from_ymd_opt(year - 1, 2, 1).unwrap(),
        );

        prop_assert_eq!(leap - common, -hours_per_standard_day(start, end));
    }

    #[test]
    fn leap_day_changes_nothing_when_inactive(
        year in (1904i32..2096).prop_filter("leap year", |y| y % 4 == 0 && (y % 100 != 0 || y % 400 == 0)),
        (start, end) in standard_day_strategy(),
        weekdays in weekday_set_strategy(),
    ) {
        let leap_day = NaiveDate::from_ymd_opt(year, 2, 29).unwrap();
        let mut weekdays = weekdays;
        weekdays.remove(leap_day.weekday());

        let leap = compute_expected_monthly_hours(weekdays, start, end, leap_day);
        let common = compute_expected_monthly_hours(
            weekdays,
            start,
            end,
            NaiveDate::from_ymd_opt(year - 1, 2, 1).unwrap(),
        );

        prop_assert_eq!(leap, common);
    }
}
