#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::sources::{DEFAULT_BASE_URL, DEFAULT_SCHEDULE_YEAR, DEFAULT_STATION_YEAR};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCHEDULE_FILENAME: &str = "zurich.csv";
pub const DEFAULT_STATION_FILENAME: &str = "zurich_stationen.csv";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// What to do when one schedule source cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Abort,
    Skip,
}

/// Fully resolved run settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub year: String,
    pub station_year: String,
    pub output_dir: PathBuf,
    pub schedule_filename: String,
    pub station_filename: String,
    pub timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            year: DEFAULT_SCHEDULE_YEAR.to_string(),
            station_year: DEFAULT_STATION_YEAR.to_string(),
            output_dir: default_output_dir(),
            schedule_filename: DEFAULT_SCHEDULE_FILENAME.to_string(),
            station_filename: DEFAULT_STATION_FILENAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            failure_policy: FailurePolicy::Abort,
        }
    }
}

/// Outputs land next to the executable unless configured otherwise.
pub fn default_output_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.base_url)?;
        validation::validate_year("source.year", &self.year)?;
        validation::validate_year("source.station_year", &self.station_year)?;
        validation::validate_positive_number(
            "source.timeout_seconds",
            self.timeout.as_secs(),
            1,
        )?;
        validation::validate_path("load.output_dir", &self.output_dir.to_string_lossy())?;
        validation::validate_file_name("load.schedule_filename", &self.schedule_filename)?;
        validation::validate_file_name("load.station_filename", &self.station_filename)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.year, "2024");
        assert_eq!(settings.station_year, "2023");
        assert_eq!(settings.schedule_filename, "zurich.csv");
        assert_eq!(settings.station_filename, "zurich_stationen.csv");
        assert_eq!(settings.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let settings = Settings {
            timeout: Duration::from_secs(0),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
