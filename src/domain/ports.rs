use crate::domain::model::SourceRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

/// Downloads the text body of a source URL.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait Storage: Send + Sync {
    /// Writes `data` under `name`, replacing any previous file, and returns
    /// the final path.
    fn write_file(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

/// Turns one parsed input row into one output row.
pub trait RowMapper {
    type Output;

    fn map(&self, row: &SourceRecord, origin: &str) -> Result<Self::Output>;
}

/// A serializable output row whose field order matches `HEADER`.
pub trait OutputRecord: Serialize {
    const HEADER: &'static [&'static str];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Row: Send;

    fn name(&self) -> &'static str;
    async fn extract(&self) -> Result<Vec<Self::Row>>;
    async fn load(&self, rows: Vec<Self::Row>) -> Result<PathBuf>;
}
