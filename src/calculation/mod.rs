//! Balance calculation logic for the punch clock engine.
//!
//! This module contains the pure functions that turn a punch history and a
//! schedule into balances: standard day length, expected monthly hours,
//! total worked hours, per-day balances and the aggregate summary. It also
//! provides punch pairing, sequence validation and the report builder that
//! wraps the operations in an audit trace.

mod balance_summary;
mod daily_balance;
mod expected_hours;
mod pairing;
mod report;
mod standard_day;
mod worked_hours;

pub use balance_summary::compute_balance_summary;
pub use daily_balance::compute_daily_balance;
pub use expected_hours::{compute_expected_monthly_hours, count_matching_days};
pub use pairing::{
    PairedPunches, PairingRule, WorkInterval, pair_punches, punches_opened_within,
    validate_punch_sequence,
};
pub use report::{
    WARNING_NEGATIVE_STANDARD_DAY, WARNING_NO_ACTIVE_WEEKDAYS, WARNING_PUNCH_KINDS_IGNORED,
    WARNING_SCHEDULE_NOT_CONFIGURED, WARNING_UNORDERED_PUNCHES, WARNING_UNPAIRED_TRAILING_PUNCH,
    build_balance_report,
};
pub use standard_day::{days_in_month, hours_per_standard_day};
pub use worked_hours::compute_total_worked_hours;
