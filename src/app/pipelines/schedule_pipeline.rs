use crate::app::pipelines::collect_source;
use crate::config::{FailurePolicy, Settings};
use crate::core::mapper::ScheduleMapper;
use crate::core::sources::schedule_sources;
use crate::core::writer::DelimitedWriter;
use crate::domain::model::ScheduleRecord;
use crate::domain::ports::{Fetcher, Pipeline, Storage};
use crate::utils::error::Result;
use std::path::PathBuf;

/// All collection calendars, concatenated in source table order into one file.
pub struct SchedulePipeline<F: Fetcher, S: Storage> {
    fetcher: F,
    storage: S,
    settings: Settings,
}

impl<F: Fetcher, S: Storage> SchedulePipeline<F, S> {
    pub fn new(fetcher: F, storage: S, settings: Settings) -> Self {
        Self {
            fetcher,
            storage,
            settings,
        }
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, S: Storage> Pipeline for SchedulePipeline<F, S> {
    type Row = ScheduleRecord;

    fn name(&self) -> &'static str {
        "schedule"
    }

    async fn extract(&self) -> Result<Vec<ScheduleRecord>> {
        let sources = schedule_sources(&self.settings.base_url, &self.settings.year);
        let total = sources.len();
        let mut records = Vec::new();
        let mut last_error = None;
        let mut failed = 0;

        for (waste_type, url) in sources {
            tracing::info!("Fetching {} calendar from: {}", waste_type, url);

            match collect_source(&self.fetcher, &url, &ScheduleMapper::new(waste_type)).await {
                Ok(rows) => {
                    tracing::info!("{}: {} rows", waste_type, rows.len());
                    records.extend(rows);
                }
                Err(e) if self.settings.failure_policy == FailurePolicy::Skip => {
                    tracing::warn!("Skipping {} calendar: {}", waste_type, e);
                    failed += 1;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        // Nothing usable when every source was skipped.
        if failed == total {
            if let Some(e) = last_error {
                return Err(e);
            }
        }
        if failed > 0 {
            tracing::warn!("{} of {} calendars skipped", failed, total);
        }

        Ok(records)
    }

    async fn load(&self, rows: Vec<ScheduleRecord>) -> Result<PathBuf> {
        let data = DelimitedWriter::encode(&rows)?;
        self.storage
            .write_file(&self.settings.schedule_filename, &data)
            .await
    }
}
