//! The schedule store.

use tokio::sync::broadcast;
use tracing::debug;

use crate::models::Schedule;

use super::events::{StoreEvent, event_channel};

/// Holds the optional working schedule.
///
/// There is at most one schedule; [`set`](Self::set) creates it or replaces
/// the existing one.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    schedule: Option<Schedule>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleStore {
    /// Creates an empty store with its own event channel.
    pub fn new() -> Self {
        Self::with_event_sender(event_channel())
    }

    /// Creates an empty store that publishes on an existing channel.
    pub fn with_event_sender(event_tx: broadcast::Sender<StoreEvent>) -> Self {
        Self {
            schedule: None,
            event_tx,
        }
    }

    /// Returns the schedule, if one is configured.
    pub fn get(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Creates or replaces the schedule.
    pub fn set(&mut self, schedule: Schedule) {
        debug!(
            standard_start = %schedule.standard_start,
            standard_end = %schedule.standard_end,
            active_weekdays = %schedule.active_weekdays,
            "Updating schedule"
        );
        self.schedule = Some(schedule);
        let _ = self.event_tx.send(StoreEvent::ScheduleUpdated);
    }

    /// Removes the schedule, returning the previous one.
    pub fn clear(&mut self) -> Option<Schedule> {
        let previous = self.schedule.take();
        let _ = self.event_tx.send(StoreEvent::ScheduleCleared);
        previous
    }

    /// Subscribes to schedule events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }
}
