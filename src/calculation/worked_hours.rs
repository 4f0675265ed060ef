//! Total worked hours calculation.

use rust_decimal::Decimal;

use crate::models::Punch;

use super::pairing::pair_punches;
use super::standard_day::minutes_to_hours;

/// Calculates the total hours worked across a punch history.
///
/// Punches are paired into intervals (see [`pair_punches`](super::pair_punches));
/// whole minutes of every interval are summed and converted to hours. An
/// unpaired trailing punch contributes nothing. The history must already be
/// in chronological order; it is not sorted here.
///
/// # Examples
///
/// ```
/// use punch_clock_engine::calculation::compute_total_worked_hours;
/// use punch_clock_engine::models::Punch;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let punches = vec![
///     Punch::new(at("2024-07-15 08:00")),
///     Punch::new(at("2024-07-15 17:00")),
/// ];
/// assert_eq!(compute_total_worked_hours(&punches), Decimal::new(9, 0));
/// ```
pub fn compute_total_worked_hours(punches: &[Punch]) -> Decimal {
    let total_minutes: i64 = pair_punches(punches)
        .intervals
        .iter()
        .map(|interval| interval.minutes())
        .sum();

    minutes_to_hours(total_minutes)
}
