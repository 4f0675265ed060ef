//! Balance report models.
//!
//! This module contains the [`BalanceReport`] type and the audit structures
//! that record how each figure in a report was reached.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BalanceSummary;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs the engine tolerates but that likely produce
/// misleading figures (an unpaired punch, a negative standard day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>, severity: &str) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.to_string(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use punch_clock_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(!trace.has_warning("UNPAIRED_TRAILING_PUNCH"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of a balance computation.
///
/// Carries the [`BalanceSummary`] alongside the intermediate figures the
/// presentation layer displays (expected monthly hours, total worked hours)
/// and an audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Any date within the month the expected hours refer to.
    pub reference_date: NaiveDate,
    /// Length of the standard day in hours, absent without a schedule.
    pub hours_per_standard_day: Option<Decimal>,
    /// Expected hours for the reference month (non-positive by convention).
    pub expected_monthly_hours: Decimal,
    /// Hours worked across all paired punches.
    pub total_worked_hours: Decimal,
    /// Aggregate and per-day balances.
    pub summary: BalanceSummary,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
