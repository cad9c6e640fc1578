pub mod schedule_pipeline;
pub mod station_pipeline;

pub use schedule_pipeline::SchedulePipeline;
pub use station_pipeline::StationPipeline;

use crate::core::reader::DelimitedReader;
use crate::domain::ports::{Fetcher, RowMapper};
use crate::utils::error::Result;

/// Fetch, parse and map a single source. Stops at the first bad row.
pub async fn collect_source<F, M>(fetcher: &F, url: &str, mapper: &M) -> Result<Vec<M::Output>>
where
    F: Fetcher,
    M: RowMapper + Sync,
    M::Output: std::fmt::Debug,
{
    let text = fetcher.fetch(url).await?;

    let rows = DelimitedReader::new(text, url)
        .records()?
        .map(|row| -> Result<M::Output> {
            let row = row?;
            let mapped = mapper.map(&row, url)?;
            tracing::trace!(origin = url, line = row.line(), "Mapped row {:?}", mapped);
            Ok(mapped)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Mapped {} rows from {}", rows.len(), url);
    Ok(rows)
}


#[cfg(test)]
mod tests {
    use super::test_support::MockFetcher;
    use super::*;
    use crate::core::mapper::ScheduleMapper;
    use crate::domain::model::WasteType;
    use crate::utils::error::EtlError;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_collect_source_maps_every_row() {
        let fetcher = MockFetcher::default().with(
            "http://test/a.csv",
            "PLZ,Abholdatum,Station\n8001,2024-01-05,\n8002,2024-01-06,Hof\n",
        );

        let rows = collect_source(
            &fetcher,
            "http://test/a.csv",
            &ScheduleMapper::new(WasteType::Paper),
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].station, "Hof");
        assert!(rows.iter().all(|r| r.waste_type == WasteType::Paper));
    }

    #[tokio::test]
    async fn test_collect_source_stops_at_missing_column() {
        let fetcher = MockFetcher::default().with(
            "http://test/a.csv",
            "Abholdatum,Station\n2024-01-05,\n2024-01-06,\n",
        );

        let err = collect_source(
            &fetcher,
            "http://test/a.csv",
            &ScheduleMapper::new(WasteType::Paper),
        )
        .await
        .unwrap_err();

        match err {
            EtlError::MissingFieldError { field, origin, line } => {
                assert_eq!(field, "PLZ");
                assert_eq!(origin, "http://test/a.csv");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_collect_source_traces_each_mapped_row() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let fetcher = MockFetcher::default().with(
            "http://test/a.csv",
            "PLZ,Abholdatum,Station\n8001,2024-01-05,\n8002,2024-01-06,Hof\n",
        );
        collect_source(
            &fetcher,
            "http://test/a.csv",
            &ScheduleMapper::new(WasteType::Paper),
        )
        .await
        .unwrap();

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        let traced: Vec<_> = output.lines().filter(|l| l.contains("Mapped row")).collect();
        assert_eq!(traced.len(), 2);
        assert!(traced[0].contains("line=2") && traced[0].contains("\"8001\""));
        assert!(traced[1].contains("line=3") && traced[1].contains("\"Hof\""));
        assert!(traced.iter().all(|l| l.contains("origin=\"http://test/a.csv\"")));
    }
}
