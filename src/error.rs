//! Error types for the Punch Clock Balance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the error conditions that can occur around balance computation.
//! The balance operations themselves never fail; errors come from loading
//! configuration, validating punch sequences and parsing external input.

use thiserror::Error;

/// The main error type for the Punch Clock Balance Engine.
///
/// # Example
///
/// ```
/// use punch_clock_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A schedule field held a value that cannot be used.
    #[error("Invalid schedule field '{field}': {message}")]
    InvalidSchedule {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A punch sequence was out of order or had mismatched kinds.
    #[error("Invalid punch sequence at index {index}: {message}")]
    InvalidPunchSequence {
        /// Position of the offending punch.
        index: usize,
        /// A description of the problem.
        message: String,
    },

    /// A day key string could not be parsed as a calendar date.
    #[error("Invalid day key: {value}")]
    InvalidDayKey {
        /// The rejected input.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
