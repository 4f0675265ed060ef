//! Per-day balance calculation.

use chrono::NaiveTime;

use crate::models::{DailyBalance, Punch};

use super::pairing::pair_punches;
use super::standard_day::hours_per_standard_day;

/// Calculates the balance of every day that has at least one work interval.
///
/// Each day starts owing a full standard day. Every interval booked to the
/// day (by its opening punch) reduces that debt by the hours worked in it,
/// so a day split by a lunch break is reduced twice. Positive values are
/// hours still owed, negative values are hours worked beyond the standard day.
///
/// # Arguments
///
/// * `punches` - Chronologically ordered punch history
/// * `standard_start` - Start of the standard day
/// * `standard_end` - End of the standard day
///
/// # Examples
///
/// ```
/// use punch_clock_engine::calculation::compute_daily_balance;
/// use punch_clock_engine::models::{DayKey, Punch};
/// use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let punches = vec![
///     Punch::new(at("2024-07-15 08:00")),
///     Punch::new(at("2024-07-15 17:00")),
/// ];
///
/// let balance = compute_daily_balance(
///     &punches,
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// );
/// let day = DayKey::from(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
/// assert_eq!(balance.get(&day), Some(Decimal::ZERO));
/// ```
pub fn compute_daily_balance(
    punches: &[Punch],
    standard_start: NaiveTime,
    standard_end: NaiveTime,
) -> DailyBalance {
    let hours_per_day = hours_per_standard_day(standard_start, standard_end);
    let mut balance = DailyBalance::new();

    for interval in pair_punches(punches).intervals {
        balance.deduct(interval.day_key(), hours_per_day, interval.hours());
    }

    balance
}
