use crate::config::{FailurePolicy, Settings};
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Optional configuration file. Every key may be omitted; omitted keys keep
/// the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub load: Option<LoadConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub year: Option<String>,
    pub station_year: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    pub output_dir: Option<String>,
    pub schedule_filename: Option<String>,
    pub station_filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorHandlingConfig {
    pub on_source_failure: Option<FailurePolicy>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Overlays the keys present in this file onto `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(source) = &self.source {
            if let Some(base_url) = &source.base_url {
                settings.base_url = base_url.clone();
            }
            if let Some(year) = &source.year {
                settings.year = year.clone();
            }
            if let Some(station_year) = &source.station_year {
                settings.station_year = station_year.clone();
            }
            if let Some(timeout) = source.timeout_seconds {
                settings.timeout = Duration::from_secs(timeout);
            }
        }

        if let Some(load) = &self.load {
            if let Some(output_dir) = &load.output_dir {
                settings.output_dir = PathBuf::from(output_dir);
            }
            if let Some(name) = &load.schedule_filename {
                settings.schedule_filename = name.clone();
            }
            if let Some(name) = &load.station_filename {
                settings.station_filename = name.clone();
            }
        }

        if let Some(policy) = self
            .error_handling
            .as_ref()
            .and_then(|eh| eh.on_source_failure)
        {
            settings.failure_policy = policy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
base_url = "https://mirror.example.com"
year = "2025"
station_year = "2025"
timeout_seconds = 10

[load]
output_dir = "./out"
schedule_filename = "schedule.csv"

[error_handling]
on_source_failure = "skip"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut settings = Settings::default();
        config.apply(&mut settings);

        assert_eq!(settings.base_url, "https://mirror.example.com");
        assert_eq!(settings.year, "2025");
        assert_eq!(settings.station_year, "2025");
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.output_dir, PathBuf::from("./out"));
        assert_eq!(settings.schedule_filename, "schedule.csv");
        assert_eq!(settings.station_filename, "zurich_stationen.csv");
        assert_eq!(settings.failure_policy, FailurePolicy::Skip);
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let mut settings = Settings::default();
        config.apply(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ZURICH_ETL_TEST_YEAR", "2026");

        let config = TomlConfig::from_toml_str(
            r#"
[source]
year = "${ZURICH_ETL_TEST_YEAR}"
station_year = "${ZURICH_ETL_TEST_UNSET_VAR}"
"#,
        )
        .unwrap();
        let source = config.source.unwrap();
        assert_eq!(source.year.as_deref(), Some("2026"));
        assert_eq!(
            source.station_year.as_deref(),
            Some("${ZURICH_ETL_TEST_UNSET_VAR}")
        );

        std::env::remove_var("ZURICH_ETL_TEST_YEAR");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfig::from_toml_str("[source]\nendpoint = \"x\"\n").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        let mut settings = Settings::default();
        config.apply(&mut settings);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nyear = \"2022\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.unwrap().year.as_deref(), Some("2022"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/nonexistent/zurich-etl.toml").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }
}
