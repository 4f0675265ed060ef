//! The punch ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::models::Punch;

use super::events::{StoreEvent, event_channel};

/// A punch together with the identifier the ledger assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedPunch {
    /// Sequential identifier, starting at 1.
    pub id: u64,
    /// The recorded punch.
    #[serde(flatten)]
    pub punch: Punch,
}

/// An in-memory, chronologically ordered punch history.
///
/// Punches may be recorded out of order; the ledger inserts each one at its
/// chronological position, after any punch with the same timestamp. The
/// history handed out is therefore always valid input for the balance
/// operations.
///
/// # Example
///
/// ```
/// use punch_clock_engine::models::Punch;
/// use punch_clock_engine::store::PunchLedger;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let mut ledger = PunchLedger::new();
/// ledger.record(Punch::new(at("2024-07-15 17:00")));
/// ledger.record(Punch::new(at("2024-07-15 08:00")));
///
/// let punches = ledger.punches();
/// assert_eq!(punches[0].timestamp, at("2024-07-15 08:00"));
/// ```
#[derive(Debug, Clone)]
pub struct PunchLedger {
    entries: Vec<RecordedPunch>,
    next_id: u64,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl Default for PunchLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PunchLedger {
    /// Creates an empty ledger with its own event channel.
    pub fn new() -> Self {
        Self::with_event_sender(event_channel())
    }

    /// Creates an empty ledger that publishes on an existing channel.
    pub fn with_event_sender(event_tx: broadcast::Sender<StoreEvent>) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            event_tx,
        }
    }

    /// Records a punch and returns its identifier.
    pub fn record(&mut self, punch: Punch) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let position = self
            .entries
            .partition_point(|entry| entry.punch.timestamp <= punch.timestamp);
        debug!(id, position, timestamp = %punch.timestamp, "Recording punch");
        self.entries.insert(position, RecordedPunch { id, punch });

        let _ = self.event_tx.send(StoreEvent::PunchRecorded { id });
        id
    }

    /// Returns the recorded entries in chronological order.
    pub fn entries(&self) -> &[RecordedPunch] {
        &self.entries
    }

    /// Returns a copy of the punch history in chronological order.
    pub fn punches(&self) -> Vec<Punch> {
        self.entries.iter().map(|entry| entry.punch.clone()).collect()
    }

    /// Returns the entries whose calendar date lies within `from..=to`, in
    /// chronological order.
    ///
    /// Either bound may be omitted.
    pub fn between(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<RecordedPunch> {
        self.entries
            .iter()
            .filter(|entry| from.is_none_or(|from| entry.punch.date() >= from))
            .filter(|entry| to.is_none_or(|to| entry.punch.date() <= to))
            .cloned()
            .collect()
    }

    /// Number of recorded punches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no punch has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every punch.
    ///
    /// Identifiers keep increasing after a clear.
    pub fn clear(&mut self) {
        self.entries.clear();
        let _ = self.event_tx.send(StoreEvent::PunchesCleared);
    }

    /// Subscribes to ledger events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }
}
