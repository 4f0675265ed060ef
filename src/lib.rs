//! Punch Clock Balance Engine
//!
//! This crate turns a personal punch-clock history (entrance/exit timestamps) and a
//! standard work schedule into expected monthly hours, worked hours, per-day
//! balances and an aggregate balance.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
