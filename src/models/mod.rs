//! Core data models for the Punch Clock Balance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod punch;
mod report;
mod schedule;

pub use balance::{BalanceSummary, DailyBalance, DayKey};
pub use punch::{Punch, PunchKind};
pub use report::{AuditStep, AuditTrace, AuditWarning, BalanceReport};
pub use schedule::{Schedule, WeekdaySet};
