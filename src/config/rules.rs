//! Attendance and payroll tuning loaded from config.toml.
//!
//! Grace windows, the overtime threshold, and the standard-month divisor used
//! to derive an hourly rate from a fixed salary are deployment-wide constants,
//! not per-tenant data, so they live in the config file rather than the
//! database. Every generation and attendance query takes an [`AttendanceRules`]
//! value; tests construct their own instead of reading a file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Engine tuning values
    #[serde(default)]
    pub rules: AttendanceRules,
}

/// Tolerances and constants applied by the attendance and payroll engines.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttendanceRules {
    /// Minutes after the scheduled start before a clock-in counts as late
    pub late_grace_minutes: i64,
    /// Minutes before the scheduled end a clock-out may fall without counting
    /// as undertime
    pub undertime_grace_minutes: i64,
    /// Minutes past the scheduled end before extra time counts as overtime
    pub overtime_threshold_minutes: i64,
    /// Hours in a standard work month, used to derive an hourly-equivalent
    /// rate from a fixed monthly salary
    pub standard_monthly_hours: f64,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            late_grace_minutes: 5,
            undertime_grace_minutes: 5,
            overtime_threshold_minutes: 5,
            standard_monthly_hours: 160.0,
        }
    }
}

/// Loads engine tuning from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads engine tuning from the default location (./config.toml), falling back
/// to built-in defaults when the file does not exist.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}
