use crate::app::pipelines::collect_source;
use crate::config::Settings;
use crate::core::mapper::StationMapper;
use crate::core::sources::station_source;
use crate::core::writer::DelimitedWriter;
use crate::domain::model::StationRecord;
use crate::domain::ports::{Fetcher, Pipeline, Storage};
use crate::utils::error::Result;
use std::path::PathBuf;

/// Recycling stations. A single source, so failures always abort.
pub struct StationPipeline<F: Fetcher, S: Storage> {
    fetcher: F,
    storage: S,
    settings: Settings,
}

impl<F: Fetcher, S: Storage> StationPipeline<F, S> {
    pub fn new(fetcher: F, storage: S, settings: Settings) -> Self {
        Self {
            fetcher,
            storage,
            settings,
        }
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, S: Storage> Pipeline for StationPipeline<F, S> {
    type Row = StationRecord;

    fn name(&self) -> &'static str {
        "station"
    }

    async fn extract(&self) -> Result<Vec<StationRecord>> {
        let url = station_source(&self.settings.base_url, &self.settings.station_year);
        tracing::info!("Fetching recycling stations from: {}", url);
        collect_source(&self.fetcher, &url, &StationMapper).await
    }

    async fn load(&self, rows: Vec<StationRecord>) -> Result<PathBuf> {
        let data = DelimitedWriter::encode(&rows)?;
        self.storage
            .write_file(&self.settings.station_filename, &data)
            .await
    }
}
