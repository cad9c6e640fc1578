use crate::config::toml_config::TomlConfig;
use crate::config::{FailurePolicy, Settings};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "zurich-etl")]
#[command(about = "Downloads Zurich waste collection calendars and recycling stations as CSV")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Year of the collection calendars
    #[arg(long)]
    pub year: Option<String>,

    /// Year of the recycling station list
    #[arg(long)]
    pub station_year: Option<String>,

    /// Host serving the open data sets
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for the output files (default: next to the executable)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Per-request timeout
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Log and skip collection calendars that fail instead of aborting
    #[arg(long)]
    pub skip_failed_sources: bool,

    /// Print the resolved sources and outputs without downloading
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Resolves defaults, then the config file, then flags, and validates the result.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::info!("Loading configuration from: {}", path.display());
            TomlConfig::from_file(path)?.apply(&mut settings);
        }

        if let Some(year) = &self.year {
            settings.year = year.clone();
        }
        if let Some(station_year) = &self.station_year {
            settings.station_year = station_year.clone();
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout = Duration::from_secs(timeout);
        }
        if self.skip_failed_sources {
            settings.failure_policy = FailurePolicy::Skip;
        }

        settings.validate()?;
        Ok(settings)
    }
}
