//! HTTP API module for the punch clock engine.
//!
//! This module provides the REST API endpoints for computing balances and
//! for managing the stored punches and schedule.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BalanceRequest, PunchRangeQuery, RecordPunchRequest, SummaryQuery};
pub use response::{ApiError, ApiErrorResponse, RecordPunchResponse};
pub use state::AppState;
