pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{HttpFetcher, LocalStorage};
pub use crate::app::{run_all, run_with};
pub use crate::config::{FailurePolicy, Settings};
pub use crate::core::etl::{EtlEngine, PipelineReport};
pub use crate::utils::error::{EtlError, Result};
