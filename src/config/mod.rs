//! Configuration loading for the punch clock engine.
//!
//! This module loads the working schedule (standard day and active weekdays)
//! from a YAML file in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use punch_clock_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Standard day starts at {}", config.schedule().standard_start);
//! ```

mod loader;

pub use loader::{ConfigLoader, SCHEDULE_FILE};
