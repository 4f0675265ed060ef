//! Balance report orchestration.
//!
//! This module runs the balance operations in sequence and records an audit
//! step for each one, together with warnings for inputs the engine accepts
//! but that are likely to produce misleading figures.

use std::time::Instant;

use chrono::{NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::models::{AuditStep, AuditTrace, AuditWarning, BalanceReport, Punch, Schedule};

use super::balance_summary::compute_balance_summary;
use super::expected_hours::{compute_expected_monthly_hours, count_matching_days};
use super::pairing::pair_punches;
use super::standard_day::hours_per_standard_day;
use super::worked_hours::compute_total_worked_hours;

/// Warning code raised when no schedule is configured.
pub const WARNING_SCHEDULE_NOT_CONFIGURED: &str = "SCHEDULE_NOT_CONFIGURED";
/// Warning code raised when the history ends with an opening punch.
pub const WARNING_UNPAIRED_TRAILING_PUNCH: &str = "UNPAIRED_TRAILING_PUNCH";
/// Warning code raised when the standard day ends before it starts.
pub const WARNING_NEGATIVE_STANDARD_DAY: &str = "NEGATIVE_STANDARD_DAY";
/// Warning code raised when a punch precedes the one before it.
pub const WARNING_UNORDERED_PUNCHES: &str = "UNORDERED_PUNCHES";
/// Warning code raised when the schedule has no active weekday.
pub const WARNING_NO_ACTIVE_WEEKDAYS: &str = "NO_ACTIVE_WEEKDAYS";
/// Warning code raised when punch tags do not alternate and were ignored.
pub const WARNING_PUNCH_KINDS_IGNORED: &str = "PUNCH_KINDS_IGNORED";

/// Builds a complete balance report with an audit trace.
///
/// The figures are exactly those returned by the individual operations; the
/// report adds the audit trace and warnings around them. Without a schedule
/// the expected hours are zero, the summary is zeroed and a
/// `SCHEDULE_NOT_CONFIGURED` warning is raised, while total worked hours are
/// still computed from the punches.
///
/// # Examples
///
/// ```
/// use punch_clock_engine::calculation::build_balance_report;
/// use punch_clock_engine::models::{Punch, Schedule};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let schedule: Schedule = serde_json::from_str(
///     r#"{"standard_start": "08:00", "standard_end": "17:00", "active_weekdays": ["Mon", "Tue", "Wed", "Thu", "Fri"]}"#,
/// ).unwrap();
/// let punches = vec![
///     Punch::new(at("2024-07-15 08:00")),
///     Punch::new(at("2024-07-15 17:00")),
/// ];
///
/// let report = build_balance_report(
///     Some(&schedule),
///     &punches,
///     NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
/// );
/// assert_eq!(report.total_worked_hours, Decimal::new(9, 0));
/// assert_eq!(report.expected_monthly_hours, Decimal::new(-207, 0));
/// assert!(report.audit_trace.warnings.is_empty());
/// ```
pub fn build_balance_report(
    config: Option<&Schedule>,
    punches: &[Punch],
    reference_date: NaiveDate,
) -> BalanceReport {
    let start_time = Instant::now();
    let calculation_id = Uuid::new_v4();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    // Step 1: pair punches
    let paired = pair_punches(punches);
    steps.push(AuditStep {
        step_number: 1,
        rule_id: "punch_pairing".to_string(),
        rule_name: "Punch Pairing".to_string(),
        input: json!({
            "punch_count": punches.len(),
        }),
        output: json!({
            "rule": paired.rule,
            "interval_count": paired.intervals.len(),
            "open_punch": paired.open,
            "ignored_kind_at": paired.ignored_kind_at,
        }),
        reasoning: format!(
            "Paired {} punches into {} intervals using the {} rule",
            punches.len(),
            paired.intervals.len(),
            paired.rule
        ),
    });

    if let Some(open) = paired.open {
        warnings.push(AuditWarning::new(
            WARNING_UNPAIRED_TRAILING_PUNCH,
            format!("Punch at {} has no closing punch and was not counted", open),
            "low",
        ));
    }

    if let Some(index) = paired.ignored_kind_at {
        warnings.push(AuditWarning::new(
            WARNING_PUNCH_KINDS_IGNORED,
            format!(
                "Punch at index {} is tagged against the entrance/exit alternation; tags were ignored and punches paired by position",
                index
            ),
            "medium",
        ));
    }

    if let Some(index) = punches
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        warnings.push(AuditWarning::new(
            WARNING_UNORDERED_PUNCHES,
            format!(
                "Punch at index {} precedes the punch before it; intervals may be negative",
                index + 1
            ),
            "high",
        ));
    }

    // Step 2: expected monthly hours
    let (hours_per_day, expected_monthly_hours) = match config {
        Some(schedule) => {
            let hours_per_day =
                hours_per_standard_day(schedule.standard_start, schedule.standard_end);
            let matching_days = count_matching_days(schedule.active_weekdays, reference_date);
            let expected = compute_expected_monthly_hours(
                schedule.active_weekdays,
                schedule.standard_start,
                schedule.standard_end,
                reference_date,
            );

            if hours_per_day < Decimal::ZERO {
                warnings.push(AuditWarning::new(
                    WARNING_NEGATIVE_STANDARD_DAY,
                    format!(
                        "Standard day ends at {} before it starts at {}; hours per day is {}",
                        schedule.standard_end.format("%H:%M"),
                        schedule.standard_start.format("%H:%M"),
                        hours_per_day
                    ),
                    "high",
                ));
            }
            if schedule.active_weekdays.is_empty() {
                warnings.push(AuditWarning::new(
                    WARNING_NO_ACTIVE_WEEKDAYS,
                    "Schedule has no active weekdays; no hours are expected",
                    "medium",
                ));
            }

            steps.push(AuditStep {
                step_number: 2,
                rule_id: "expected_monthly_hours".to_string(),
                rule_name: "Expected Monthly Hours".to_string(),
                input: json!({
                    "active_weekdays": schedule.active_weekdays,
                    "standard_start": schedule.standard_start.format("%H:%M").to_string(),
                    "standard_end": schedule.standard_end.format("%H:%M").to_string(),
                    "reference_date": reference_date,
                }),
                output: json!({
                    "hours_per_standard_day": hours_per_day,
                    "matching_days": matching_days,
                    "expected_monthly_hours": expected,
                }),
                reasoning: format!(
                    "{} active days in the month of {} at {} hours each, reported as {}",
                    matching_days, reference_date, hours_per_day, expected
                ),
            });

            (Some(hours_per_day), expected)
        }
        None => {
            warnings.push(AuditWarning::new(
                WARNING_SCHEDULE_NOT_CONFIGURED,
                "No schedule is configured; balances are reported as zero",
                "medium",
            ));

            steps.push(AuditStep {
                step_number: 2,
                rule_id: "expected_monthly_hours".to_string(),
                rule_name: "Expected Monthly Hours".to_string(),
                input: json!({
                    "reference_date": reference_date,
                }),
                output: json!({
                    "expected_monthly_hours": Decimal::ZERO,
                }),
                reasoning: "No schedule configured; no hours are expected".to_string(),
            });

            (None, Decimal::ZERO)
        }
    };

    // Step 3: total worked hours
    let total_worked_hours = compute_total_worked_hours(punches);
    steps.push(AuditStep {
        step_number: 3,
        rule_id: "total_worked_hours".to_string(),
        rule_name: "Total Worked Hours".to_string(),
        input: json!({
            "interval_count": paired.intervals.len(),
        }),
        output: json!({
            "total_worked_hours": total_worked_hours,
        }),
        reasoning: format!(
            "Summed whole minutes of {} intervals: {} hours",
            paired.intervals.len(),
            total_worked_hours
        ),
    });

    // Step 4: daily balance
    let summary = compute_balance_summary(config, punches, reference_date);
    if config.is_some() {
        steps.push(AuditStep {
            step_number: 4,
            rule_id: "daily_balance".to_string(),
            rule_name: "Daily Balance".to_string(),
            input: json!({
                "hours_per_standard_day": hours_per_day,
                "interval_count": paired.intervals.len(),
            }),
            output: json!(summary.daily_balance),
            reasoning: format!(
                "Seeded {} days with the standard day and deducted worked hours",
                summary.daily_balance.len()
            ),
        });
    }

    // Step 5: aggregate
    steps.push(AuditStep {
        step_number: steps.len() as u32 + 1,
        rule_id: "aggregate_balance".to_string(),
        rule_name: "Aggregate Balance".to_string(),
        input: json!({
            "total_worked_hours": total_worked_hours,
            "standard_start_hour": config.map(|s| s.standard_start.hour()),
        }),
        output: json!({
            "aggregate_balance": summary.aggregate_balance,
        }),
        reasoning: match config {
            Some(_) => format!(
                "Total worked hours minus the standard start hour: {}",
                summary.aggregate_balance
            ),
            None => "No schedule configured; aggregate balance is zero".to_string(),
        },
    });

    let duration = start_time.elapsed();
    debug!(
        calculation_id = %calculation_id,
        punch_count = punches.len(),
        warnings = warnings.len(),
        duration_us = duration.as_micros() as u64,
        "Balance report built"
    );

    BalanceReport {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        reference_date,
        hours_per_standard_day: hours_per_day,
        expected_monthly_hours,
        total_worked_hours,
        summary,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: duration.as_micros() as u64,
        },
    }
}
