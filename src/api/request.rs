//! Request types for the punch clock API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! API endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Punch, PunchKind, Schedule};

/// Request body for the `/balance` endpoint.
///
/// Carries everything needed to compute a report without touching the
/// stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRequest {
    /// The schedule to compute against; omitted when none is configured.
    #[serde(default)]
    pub schedule: Option<Schedule>,
    /// The punch history, in chronological order.
    pub punches: Vec<Punch>,
    /// Any date within the month the expected hours refer to.
    pub reference_date: NaiveDate,
    /// Reject the history if it is out of order or its kinds do not alternate.
    #[serde(default)]
    pub strict: bool,
}

/// Request body for `POST /punches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPunchRequest {
    /// When the punch happened (local wall-clock time).
    pub timestamp: NaiveDateTime,
    /// Optional entrance/exit tag.
    #[serde(default)]
    pub kind: Option<PunchKind>,
}

impl From<RecordPunchRequest> for Punch {
    fn from(req: RecordPunchRequest) -> Self {
        Punch {
            timestamp: req.timestamp,
            kind: req.kind,
        }
    }
}

/// Query string for `GET /punches`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PunchRangeQuery {
    /// First calendar date to include.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last calendar date to include.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl PunchRangeQuery {
    /// Returns true unless `from` falls after `to`.
    pub fn is_valid(&self) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= to,
            _ => true,
        }
    }
}

/// Query string for `GET /summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// Any date within the target month; defaults to today.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    /// First calendar date of punches to include.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last calendar date of punches to include.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl SummaryQuery {
    /// The punch range part of the query.
    pub fn range(&self) -> PunchRangeQuery {
        PunchRangeQuery {
            from: self.from,
            to: self.to,
        }
    }
}
