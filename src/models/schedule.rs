//! Schedule model and weekday set.
//!
//! This module defines the [`Schedule`] configuration record (standard start,
//! standard end and active weekdays) and the [`WeekdaySet`] it uses to hold
//! the days on which work is expected.

use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A set of days of the week, stored as a bitmask.
///
/// Serialized as a list of weekday labels (`["Mon", "Tue"]`); any label
/// accepted by [`chrono::Weekday`] is accepted on input.
///
/// # Example
///
/// ```
/// use punch_clock_engine::models::WeekdaySet;
/// use chrono::Weekday;
///
/// let days: WeekdaySet = "Mon,Wed,Fri".parse().unwrap();
/// assert_eq!(days.len(), 3);
/// assert!(days.contains(Weekday::Wed));
/// assert!(!days.contains(Weekday::Sat));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    pub const NONE: WeekdaySet = WeekdaySet(0);
    /// Monday through Friday.
    pub const WORKWEEK: WeekdaySet = WeekdaySet(0b001_1111);
    /// Every day of the week.
    pub const ALL: WeekdaySet = WeekdaySet(0b111_1111);

    fn bit(weekday: Weekday) -> u8 {
        1 << weekday.num_days_from_monday()
    }

    /// Adds a weekday to the set.
    pub fn insert(&mut self, weekday: Weekday) {
        self.0 |= Self::bit(weekday);
    }

    /// Removes a weekday from the set.
    pub fn remove(&mut self, weekday: Weekday) {
        self.0 &= !Self::bit(weekday);
    }

    /// Returns true if the weekday is in the set.
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & Self::bit(weekday) != 0
    }

    /// Number of weekdays in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no weekday is active.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the members from Monday to Sunday.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + use<> {
        let set = *self;
        ALL_WEEKDAYS.into_iter().filter(move |day| set.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::NONE;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<Weekday>> for WeekdaySet {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<WeekdaySet> for Vec<Weekday> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().collect()
    }
}

impl FromStr for WeekdaySet {
    type Err = EngineError;

    /// Parses a comma-separated label list such as `"Mon,Tue,Fri"`.
    fn from_str(s: &str) -> EngineResult<Self> {
        s.split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(|label| {
                label
                    .parse::<Weekday>()
                    .map_err(|_| EngineError::InvalidSchedule {
                        field: "active_weekdays".to_string(),
                        message: format!("unknown weekday label '{}'", label),
                    })
            })
            .collect()
    }
}

impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<String> = self.iter().map(|day| day.to_string()).collect();
        write!(f, "{}", labels.join(","))
    }
}

/// The standard work schedule used to compute balances.
///
/// `standard_end` bounds the standard day together with `standard_start`;
/// when it precedes the start the standard day has a negative length.
///
/// # Example
///
/// ```
/// use punch_clock_engine::models::{Schedule, WeekdaySet};
///
/// let yaml = r#"
/// standard_start: "08:00"
/// standard_end: "17:00"
/// active_weekdays: [Mon, Tue, Wed, Thu, Fri]
/// "#;
/// let schedule: Schedule = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(schedule.active_weekdays, WeekdaySet::WORKWEEK);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Start of a standard workday.
    #[serde(with = "time_of_day")]
    pub standard_start: NaiveTime,
    /// End of a standard workday.
    #[serde(with = "time_of_day")]
    pub standard_end: NaiveTime,
    /// Days of the week on which work is expected.
    #[serde(default)]
    pub active_weekdays: WeekdaySet,
}

/// `HH:MM` time-of-day encoding; `HH:MM:SS` is also accepted on input.
mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| de::Error::custom(format!("invalid time of day '{}', expected HH:MM", raw)))
    }
}
