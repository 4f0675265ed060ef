//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the working
//! schedule from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Schedule;

/// Name of the schedule file inside a configuration directory.
pub const SCHEDULE_FILE: &str = "schedule.yaml";

/// Loads and provides access to the working schedule.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── schedule.yaml   # Standard day and active weekdays
/// ```
///
/// `schedule.yaml` looks like:
///
/// ```yaml
/// standard_start: "08:00"
/// standard_end: "17:00"
/// active_weekdays: [Mon, Tue, Wed, Thu, Fri]
/// ```
///
/// # Example
///
/// ```no_run
/// use punch_clock_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Active weekdays: {}", loader.schedule().active_weekdays);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schedule: Schedule,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `schedule.yaml` is missing (`ConfigNotFound`)
    /// - the file is not valid YAML, a time is not `HH:MM`/`HH:MM:SS`, or a
    ///   weekday label is unknown (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let schedule = Self::load_yaml::<Schedule>(&path.as_ref().join(SCHEDULE_FILE))?;
        Ok(Self { schedule })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Consumes the loader, returning the schedule.
    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }
}
