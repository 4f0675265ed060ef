//! Punch model and related types.
//!
//! This module defines the [`Punch`] struct and [`PunchKind`] enum for
//! representing the entrance and exit events recorded by the punch clock.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::DayKey;

/// Whether a punch opens or closes a work interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    /// Start of a work interval.
    Entrance,
    /// End of a work interval.
    Exit,
}

impl std::fmt::Display for PunchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PunchKind::Entrance => write!(f, "entrance"),
            PunchKind::Exit => write!(f, "exit"),
        }
    }
}

/// A single recorded punch.
///
/// Punches are immutable once recorded. The `kind` is optional: older
/// histories only carry a timestamp, in which case entrance/exit is
/// inferred from the punch's position in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// When the punch was recorded (local wall-clock time).
    pub timestamp: NaiveDateTime,
    /// Explicit entrance/exit tag, if the history carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PunchKind>,
}

impl Punch {
    /// Creates a punch without an explicit kind.
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            kind: None,
        }
    }

    /// Creates an entrance punch.
    pub fn entrance(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            kind: Some(PunchKind::Entrance),
        }
    }

    /// Creates an exit punch.
    pub fn exit(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            kind: Some(PunchKind::Exit),
        }
    }

    /// Returns the calendar date the punch falls on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the daily balance key for this punch.
    ///
    /// # Examples
    ///
    /// ```
    /// use punch_clock_engine::models::Punch;
    /// use chrono::NaiveDateTime;
    ///
    /// let punch = Punch::new(
    ///     NaiveDateTime::parse_from_str("2024-07-15 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    /// );
    /// assert_eq!(punch.day_key().to_string(), "7/15/2024");
    /// ```
    pub fn day_key(&self) -> DayKey {
        DayKey::from(self.date())
    }
}
