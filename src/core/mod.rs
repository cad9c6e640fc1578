pub mod etl;
pub mod mapper;
pub mod reader;
pub mod sources;
pub mod writer;

pub use crate::domain::model::{ScheduleRecord, SourceRecord, StationRecord, WasteType};
pub use crate::domain::ports::{Fetcher, OutputRecord, Pipeline, RowMapper, Storage};
pub use crate::utils::error::Result;
