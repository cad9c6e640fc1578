use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::time::Instant;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub pipeline: &'static str,
    pub rows: usize,
    pub output_path: PathBuf,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<PipelineReport> {
        let name = self.pipeline.name();
        let started = Instant::now();
        tracing::info!("Starting {} pipeline", name);

        let rows = self.pipeline.extract().await?;
        let count = rows.len();
        tracing::info!("Extracted {} {} rows", count, name);

        let output_path = self.pipeline.load(rows).await?;
        tracing::info!(
            "Finished {} pipeline in {:?}: {} rows written to {}",
            name,
            started.elapsed(),
            count,
            output_path.display()
        );

        Ok(PipelineReport {
            pipeline: name,
            rows: count,
            output_path,
        })
    }
}
