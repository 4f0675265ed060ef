//! In-memory stores for punches and the working schedule.
//!
//! The [`PunchLedger`] keeps the recorded punch history in chronological
//! order and the [`ScheduleStore`] holds the optional schedule. Both
//! announce every mutation as a [`StoreEvent`] on a broadcast channel so
//! that observers can refresh derived balances.

mod events;
mod ledger;
mod schedule_store;

pub use events::{EVENT_CHANNEL_CAPACITY, StoreEvent, event_channel};
pub use ledger::{PunchLedger, RecordedPunch};
pub use schedule_store::ScheduleStore;
