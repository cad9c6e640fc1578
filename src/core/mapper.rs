use crate::domain::model::{ScheduleRecord, SourceRecord, StationRecord, WasteType, REGION};
use crate::domain::ports::RowMapper;
use crate::utils::error::{EtlError, Result};

/// Upstream marks a station capability with a lowercase `x`.
pub const MARKER: &str = "x";

fn required<'a>(row: &'a SourceRecord, column: &str, origin: &str) -> Result<&'a str> {
    row.get(column).ok_or_else(|| EtlError::MissingFieldError {
        field: column.to_string(),
        origin: origin.to_string(),
        line: row.line(),
    })
}

fn is_marked(value: &str) -> bool {
    value == MARKER
}

/// Maps collection calendar rows, tagging each with the waste type of the
/// source it came from.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleMapper {
    waste_type: WasteType,
}

impl ScheduleMapper {
    pub fn new(waste_type: WasteType) -> Self {
        Self { waste_type }
    }
}

impl RowMapper for ScheduleMapper {
    type Output = ScheduleRecord;

    fn map(&self, row: &SourceRecord, origin: &str) -> Result<ScheduleRecord> {
        let zip = required(row, "PLZ", origin)?;
        let col_date = required(row, "Abholdatum", origin)?;

        Ok(ScheduleRecord {
            region: REGION,
            zip: zip.to_string(),
            area: zip.to_string(),
            station: row.get("Station").unwrap_or_default().to_string(),
            waste_type: self.waste_type,
            col_date: col_date.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StationMapper;

impl RowMapper for StationMapper {
    type Output = StationRecord;

    fn map(&self, row: &SourceRecord, origin: &str) -> Result<StationRecord> {
        let zip = required(row, "PLZ", origin)?;
        let name = required(row, "Station", origin)?;

        Ok(StationRecord {
            region: REGION,
            zip: zip.to_string(),
            name: name.to_string(),
            oil: is_marked(required(row, "Oel", origin)?),
            glass: is_marked(required(row, "Glas", origin)?),
            metal: is_marked(required(row, "Metall", origin)?),
            textile: is_marked(required(row, "Textilien", origin)?),
        })
    }
}
