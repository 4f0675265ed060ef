//! Punch pairing and sequence validation.
//!
//! This module turns an ordered punch history into work intervals. Punches
//! pair by position: even index opens, odd index closes. Entrance/exit tags
//! are honoured only when every punch carries one and the tags alternate
//! starting with an entrance; that history pairs identically under both
//! rules. Tags that do not alternate are ignored and reported.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DayKey, Punch, PunchKind};

use super::standard_day::{minutes_between, minutes_to_hours};

/// How opening and closing punches are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingRule {
    /// Even positions open an interval, odd positions close it.
    Positional,
    /// Every punch is tagged and entrances alternate with exits.
    ExplicitKind,
}

impl PairingRule {
    /// Selects the rule for a punch history.
    ///
    /// # Example
    ///
    /// ```
    /// use punch_clock_engine::calculation::PairingRule;
    /// use punch_clock_engine::models::Punch;
    /// use chrono::NaiveDateTime;
    ///
    /// let ts = NaiveDateTime::parse_from_str("2024-07-15 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// assert_eq!(PairingRule::for_punches(&[Punch::entrance(ts)]), PairingRule::ExplicitKind);
    /// assert_eq!(
    ///     PairingRule::for_punches(&[Punch::entrance(ts), Punch::entrance(ts)]),
    ///     PairingRule::Positional
    /// );
    /// ```
    pub fn for_punches(punches: &[Punch]) -> Self {
        if all_tagged(punches) && first_kind_mismatch(punches).is_none() {
            PairingRule::ExplicitKind
        } else {
            PairingRule::Positional
        }
    }
}

impl std::fmt::Display for PairingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingRule::Positional => write!(f, "positional"),
            PairingRule::ExplicitKind => write!(f, "explicit_kind"),
        }
    }
}

fn all_tagged(punches: &[Punch]) -> bool {
    !punches.is_empty() && punches.iter().all(|p| p.kind.is_some())
}

/// First tagged punch whose kind breaks the entrance/exit alternation, as
/// `(index, expected, found)`. Untagged punches only advance the position.
fn first_kind_mismatch(punches: &[Punch]) -> Option<(usize, PunchKind, PunchKind)> {
    punches.iter().enumerate().find_map(|(index, punch)| {
        let expected = if index % 2 == 0 {
            PunchKind::Entrance
        } else {
            PunchKind::Exit
        };
        punch
            .kind
            .filter(|kind| *kind != expected)
            .map(|found| (index, expected, found))
    })
}

/// A closed work interval between an opening and a closing punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInterval {
    /// Timestamp of the opening punch.
    pub start: NaiveDateTime,
    /// Timestamp of the closing punch.
    pub end: NaiveDateTime,
}

impl WorkInterval {
    /// Whole minutes worked in the interval.
    pub fn minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }

    /// Hours worked in the interval.
    pub fn hours(&self) -> Decimal {
        minutes_to_hours(self.minutes())
    }

    /// The day the interval is booked to (the opening punch's day).
    pub fn day_key(&self) -> DayKey {
        DayKey::from(self.start.date())
    }
}

/// The outcome of pairing a punch history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedPunches {
    /// The rule that was applied.
    pub rule: PairingRule,
    /// Closed intervals in history order.
    pub intervals: Vec<WorkInterval>,
    /// Opening punch left without a closing punch at the end of the history.
    pub open: Option<NaiveDateTime>,
    /// Index of the first punch whose tag contradicts its position, when
    /// every punch is tagged but the tags do not alternate.
    pub ignored_kind_at: Option<usize>,
}

/// Pairs punches into work intervals.
///
/// A trailing opening punch is reported in [`PairedPunches::open`] and never
/// contributes to worked time. Tags never skip or move a punch; a fully
/// tagged history that does not alternate is paired positionally and the
/// first contradicting punch is reported in
/// [`PairedPunches::ignored_kind_at`].
///
/// # Example
///
/// ```
/// use punch_clock_engine::calculation::{pair_punches, PairingRule};
/// use punch_clock_engine::models::Punch;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let punches = vec![
///     Punch::new(at("2024-07-15 08:00")),
///     Punch::new(at("2024-07-15 12:00")),
///     Punch::new(at("2024-07-15 13:00")),
/// ];
///
/// let paired = pair_punches(&punches);
/// assert_eq!(paired.rule, PairingRule::Positional);
/// assert_eq!(paired.intervals.len(), 1);
/// assert_eq!(paired.open, Some(at("2024-07-15 13:00")));
/// ```
pub fn pair_punches(punches: &[Punch]) -> PairedPunches {
    let rule = PairingRule::for_punches(punches);

    let intervals = punches
        .chunks_exact(2)
        .map(|pair| WorkInterval {
            start: pair[0].timestamp,
            end: pair[1].timestamp,
        })
        .collect();
    let open = if punches.len() % 2 == 1 {
        punches.last().map(|p| p.timestamp)
    } else {
        None
    };
    let ignored_kind_at = if all_tagged(punches) {
        first_kind_mismatch(punches).map(|(index, _, _)| index)
    } else {
        None
    };

    PairedPunches {
        rule,
        intervals,
        open,
        ignored_kind_at,
    }
}

/// Selects the punches whose interval opens within `from..=to`.
///
/// The whole history is paired first, so a range that starts after an
/// overnight entrance drops that interval entirely instead of shifting the
/// pairing of every later punch. A trailing open punch is kept when its own
/// date lies in the range. Either bound may be omitted.
///
/// # Example
///
/// ```
/// use punch_clock_engine::calculation::punches_opened_within;
/// use punch_clock_engine::models::Punch;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let at = |s: &str| Punch::new(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap());
/// let punches = vec![
///     at("2024-07-14 22:00"),
///     at("2024-07-15 06:00"),
///     at("2024-07-15 08:00"),
///     at("2024-07-15 17:00"),
/// ];
///
/// let selected = punches_opened_within(&punches, NaiveDate::from_ymd_opt(2024, 7, 15), None);
/// assert_eq!(selected, punches[2..].to_vec());
/// ```
pub fn punches_opened_within(
    punches: &[Punch],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Punch> {
    punches
        .chunks(2)
        .filter(|pair| {
            let opened = pair[0].date();
            from.is_none_or(|from| opened >= from) && to.is_none_or(|to| opened <= to)
        })
        .flatten()
        .cloned()
        .collect()
}

/// Checks that a punch history is well formed.
///
/// The history must be in non-decreasing chronological order. When every
/// punch carries a kind, the kinds must alternate starting with an
/// entrance. A trailing open entrance is accepted.
///
/// The balance operations do not call this; they tolerate malformed input.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPunchSequence`] naming the first offending
/// punch.
pub fn validate_punch_sequence(punches: &[Punch]) -> EngineResult<()> {
    for (index, pair) in punches.windows(2).enumerate() {
        if pair[1].timestamp < pair[0].timestamp {
            return Err(EngineError::InvalidPunchSequence {
                index: index + 1,
                message: format!(
                    "punch at {} precedes the previous punch at {}",
                    pair[1].timestamp, pair[0].timestamp
                ),
            });
        }
    }

    if all_tagged(punches) {
        if let Some((index, expected, found)) = first_kind_mismatch(punches) {
            return Err(EngineError::InvalidPunchSequence {
                index,
                message: format!("expected {} but found {}", expected, found),
            });
        }
    }

    Ok(())
}
