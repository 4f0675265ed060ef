//! Balance models.
//!
//! This module contains the derived, never-persisted outputs of the balance
//! engine: the [`DayKey`] used to group intervals by calendar day, the
//! [`DailyBalance`] mapping and the [`BalanceSummary`].

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::{EngineError, EngineResult};

/// A calendar day used as a daily balance key.
///
/// Displayed and serialized as `M/D/YYYY` without zero padding, e.g. `7/15/2024`.
///
/// # Example
///
/// ```
/// use punch_clock_engine::models::DayKey;
/// use chrono::NaiveDate;
///
/// let key = DayKey::from(NaiveDate::from_ymd_opt(2024, 7, 5).unwrap());
/// assert_eq!(key.to_string(), "7/5/2024");
/// assert_eq!("7/5/2024".parse::<DayKey>().unwrap(), key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Returns the calendar date behind this key.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.0.month(), self.0.day(), self.0.year())
    }
}

impl FromStr for DayKey {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidDayKey {
            value: s.to_string(),
        };

        let mut parts = s.trim().split('/');
        let (Some(month), Some(day), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(DayKey)
            .ok_or_else(invalid)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Signed hours per calendar day, relative to the standard day.
///
/// A positive value means the day still owes hours; a negative value means
/// more than a standard day was worked. Entries are ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyBalance(BTreeMap<DayKey, Decimal>);

impl DailyBalance {
    /// Creates an empty daily balance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deducts worked hours from a day.
    ///
    /// The first deduction on a day starts from `seed` (the standard day
    /// length); later deductions on the same day continue from the running
    /// value, even when it has reached zero.
    ///
    /// # Example
    ///
    /// ```
    /// use punch_clock_engine::models::{DailyBalance, DayKey};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let day = DayKey::from(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
    /// let mut balance = DailyBalance::new();
    /// balance.deduct(day, Decimal::new(9, 0), Decimal::new(9, 0));
    /// balance.deduct(day, Decimal::new(9, 0), Decimal::new(1, 0));
    /// assert_eq!(balance.get(&day), Some(Decimal::new(-1, 0)));
    /// ```
    pub fn deduct(&mut self, day: DayKey, seed: Decimal, worked_hours: Decimal) {
        let entry = self.0.entry(day).or_insert(seed);
        *entry = (*entry - worked_hours).normalize();
    }

    /// Returns the balance for a day, if any interval was recorded on it.
    pub fn get(&self, day: &DayKey) -> Option<Decimal> {
        self.0.get(day).copied()
    }

    /// Number of days with a balance entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no day has an entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &Decimal)> {
        self.0.iter()
    }

    /// Sum of all daily balances.
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }
}

/// The balance output handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Single signed figure summarizing worked against expected hours.
    pub aggregate_balance: Decimal,
    /// Per-day balances.
    pub daily_balance: DailyBalance,
}

impl BalanceSummary {
    /// The zeroed summary returned when no schedule is configured.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::from(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_day_key_display_is_unpadded() {
        assert_eq!(key(2024, 7, 15).to_string(), "7/15/2024");
        assert_eq!(key(2024, 1, 2).to_string(), "1/2/2024");
        assert_eq!(key(2024, 12, 31).to_string(), "12/31/2024");
    }

    #[test]
    fn test_day_key_parse_accepts_padding() {
        assert_eq!("07/05/2024".parse::<DayKey>().unwrap(), key(2024, 7, 5));
    }

    #[test]
    fn test_day_key_parse_rejects_invalid() {
        for value in ["2024-07-15", "13/1/2024", "2/30/2024", "7/15", "7/15/2024/1", "a/b/c"] {
            match value.parse::<DayKey>() {
                Err(EngineError::InvalidDayKey { value: v }) => assert_eq!(v, value),
                other => panic!("Expected InvalidDayKey for {}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_day_keys_order_by_date() {
        assert!(key(2024, 2, 1) > key(2024, 1, 31));
        assert!(key(2023, 12, 31) < key(2024, 1, 1));
    }

    #[test]
    fn test_deduct_seeds_first_interval() {
        let mut balance = DailyBalance::new();
        balance.deduct(key(2024, 7, 15), Decimal::new(9, 0), Decimal::new(4, 0));
        assert_eq!(balance.get(&key(2024, 7, 15)), Some(Decimal::new(5, 0)));
        assert_eq!(balance.get(&key(2024, 7, 16)), None);
    }

    #[test]
    fn test_deduct_does_not_reseed_zero_balance() {
        let day = key(2024, 7, 15);
        let mut balance = DailyBalance::new();
        balance.deduct(day, Decimal::new(8, 0), Decimal::new(8, 0));
        assert_eq!(balance.get(&day), Some(Decimal::ZERO));

        balance.deduct(day, Decimal::new(8, 0), Decimal::new(2, 0));
        assert_eq!(balance.get(&day), Some(Decimal::new(-2, 0)));
    }

    #[test]
    fn test_daily_balance_serializes_as_map() {
        let mut balance = DailyBalance::new();
        balance.deduct(key(2024, 7, 15), Decimal::new(9, 0), Decimal::new(9, 0));
        balance.deduct(key(2024, 7, 16), Decimal::new(9, 0), Decimal::new(8, 0));

        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["7/15/2024"], "0");
        assert_eq!(json["7/16/2024"], "1");

        let back: DailyBalance = serde_json::from_value(json).unwrap();
        assert_eq!(back, balance);
    }

    #[test]
    fn test_daily_balance_total() {
        let mut balance = DailyBalance::new();
        balance.deduct(key(2024, 7, 15), Decimal::new(9, 0), Decimal::new(10, 0));
        balance.deduct(key(2024, 7, 16), Decimal::new(9, 0), Decimal::new(7, 0));
        assert_eq!(balance.total(), Decimal::new(1, 0));
        assert_eq!(balance.len(), 2);
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = BalanceSummary::empty();
        assert_eq!(summary.aggregate_balance, Decimal::ZERO);
        assert!(summary.daily_balance.is_empty());
    }
}
