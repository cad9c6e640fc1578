pub mod pipelines;

use crate::adapters::{HttpFetcher, LocalStorage};
use crate::config::Settings;
use crate::core::etl::{EtlEngine, PipelineReport};
use crate::domain::ports::{Fetcher, Storage};
use crate::utils::error::Result;
use pipelines::{SchedulePipeline, StationPipeline};

/// Runs both pipelines against the live portal and the local output directory.
pub async fn run_all(settings: &Settings) -> Result<Vec<PipelineReport>> {
    let fetcher = HttpFetcher::new(settings.timeout)?;
    let storage = LocalStorage::new(settings.output_dir.clone());
    run_with(fetcher, storage, settings).await
}

/// Schedules first, then stations. The first error ends the run.
pub async fn run_with<F, S>(fetcher: F, storage: S, settings: &Settings) -> Result<Vec<PipelineReport>>
where
    F: Fetcher + Clone,
    S: Storage + Clone,
{
    let schedules = EtlEngine::new(SchedulePipeline::new(
        fetcher.clone(),
        storage.clone(),
        settings.clone(),
    ))
    .run()
    .await?;

    let stations = EtlEngine::new(StationPipeline::new(fetcher, storage, settings.clone()))
        .run()
        .await?;

    Ok(vec![schedules, stations])
}
