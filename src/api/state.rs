//! Application state for the punch clock API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{RwLock, broadcast};

use crate::calculation::punches_opened_within;
use crate::config::ConfigLoader;
use crate::models::{Punch, Schedule};
use crate::store::{PunchLedger, ScheduleStore, StoreEvent, event_channel};

/// Shared application state.
///
/// Holds the punch ledger and the schedule store behind async read-write
/// locks. Both stores publish on one event channel.
#[derive(Clone)]
pub struct AppState {
    punches: Arc<RwLock<PunchLedger>>,
    schedule: Arc<RwLock<ScheduleStore>>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a state with an empty ledger and no schedule.
    pub fn new() -> Self {
        let event_tx = event_channel();
        Self {
            punches: Arc::new(RwLock::new(PunchLedger::with_event_sender(event_tx.clone()))),
            schedule: Arc::new(RwLock::new(ScheduleStore::with_event_sender(
                event_tx.clone(),
            ))),
            event_tx,
        }
    }

    /// Creates a state whose schedule is taken from a loaded configuration.
    pub async fn from_config(config: ConfigLoader) -> Self {
        let state = Self::new();
        state.schedule.write().await.set(config.into_schedule());
        state
    }

    /// Returns the punch ledger.
    pub fn punches(&self) -> &RwLock<PunchLedger> {
        &self.punches
    }

    /// Returns the schedule store.
    pub fn schedule(&self) -> &RwLock<ScheduleStore> {
        &self.schedule
    }

    /// Subscribes to events from both stores.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    /// Copies the current schedule out of its lock.
    pub async fn schedule_snapshot(&self) -> Option<Schedule> {
        self.schedule.read().await.get().cloned()
    }

    /// Copies the recorded punches whose interval opens within `from..=to`
    /// out of the lock.
    ///
    /// The full history is paired before the range applies, so both punches
    /// of an interval are kept or dropped together.
    pub async fn punches_snapshot(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<Punch> {
        let history = self.punches.read().await.punches();
        punches_opened_within(&history, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_clones_share_stores() {
        let state = AppState::new();
        let clone = state.clone();
        let mut events = state.subscribe();

        clone.punches().write().await.record(Punch::new(
            NaiveDateTime::parse_from_str("2024-07-15 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
        ));

        assert_eq!(state.punches_snapshot(None, None).await.len(), 1);
        assert_eq!(events.recv().await.unwrap(), StoreEvent::PunchRecorded { id: 1 });
    }

    #[tokio::test]
    async fn test_snapshot_range_drops_whole_overnight_pair() {
        let state = AppState::new();
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        {
            let mut ledger = state.punches().write().await;
            for ts in [
                "2024-07-14 22:00:00",
                "2024-07-15 06:00:00",
                "2024-07-15 08:00:00",
                "2024-07-15 17:00:00",
            ] {
                ledger.record(Punch::new(at(ts)));
            }
        }

        let snapshot = state
            .punches_snapshot(NaiveDate::from_ymd_opt(2024, 7, 15), None)
            .await;
        let timestamps: Vec<NaiveDateTime> = snapshot.iter().map(|p| p.timestamp).collect();
        assert_eq!(
            timestamps,
            vec![at("2024-07-15 08:00:00"), at("2024-07-15 17:00:00")]
        );
    }

    #[tokio::test]
    async fn test_from_config_sets_schedule() {
        let config = ConfigLoader::load("./config/default").unwrap();
        let state = AppState::from_config(config).await;
        assert!(state.schedule_snapshot().await.is_some());
    }
}
