//! Store change events.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Number of events buffered per channel before slow receivers lag.
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// A change to one of the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A punch was added to the ledger.
    PunchRecorded {
        /// Identifier assigned to the punch.
        id: u64,
    },
    /// All punches were removed.
    PunchesCleared,
    /// The schedule was created or replaced.
    ScheduleUpdated,
    /// The schedule was removed.
    ScheduleCleared,
}

/// Creates a broadcast channel for store events.
///
/// The initial receiver is dropped; observers call `subscribe` on the sender.
pub fn event_channel() -> broadcast::Sender<StoreEvent> {
    let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    event_tx
}
