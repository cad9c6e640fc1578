use crate::domain::ports::OutputRecord;
use csv::StringRecord;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Every output row carries this region constant.
pub const REGION: &str = "zurich";

/// One parsed input row: the shared header plus this row's values.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    headers: Arc<StringRecord>,
    values: StringRecord,
    line: u64,
}

impl SourceRecord {
    pub fn new(headers: Arc<StringRecord>, values: StringRecord, line: u64) -> Self {
        Self {
            headers,
            values,
            line,
        }
    }

    pub fn from_pairs<'a, I>(pairs: I, line: u64) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (headers, values): (Vec<&str>, Vec<&str>) = pairs.into_iter().unzip();
        Self {
            headers: Arc::new(StringRecord::from(headers)),
            values: StringRecord::from(values),
            line,
        }
    }

    /// Value of the named column. When a header repeats, the last column wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| *h == column)
            .last()
            .and_then(|(idx, _)| self.values.get(idx))
    }

    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Logical waste category of a schedule source. The tag comes from the
/// source table, never from row data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteType {
    Organic,
    Cargotram,
    Etram,
    Cardboard,
    Waste,
    Paper,
    Special,
}

impl WasteType {
    pub fn as_str(self) -> &'static str {
        match self {
            WasteType::Organic => "organic",
            WasteType::Cargotram => "cargotram",
            WasteType::Etram => "etram",
            WasteType::Cardboard => "cardboard",
            WasteType::Waste => "waste",
            WasteType::Paper => "paper",
            WasteType::Special => "special",
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of `zurich.csv`. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRecord {
    pub region: &'static str,
    pub zip: String,
    pub area: String,
    pub station: String,
    pub waste_type: WasteType,
    pub col_date: String,
}

impl OutputRecord for ScheduleRecord {
    const HEADER: &'static [&'static str] =
        &["region", "zip", "area", "station", "waste_type", "col_date"];
}

/// Row of `zurich_stationen.csv`. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRecord {
    pub region: &'static str,
    pub zip: String,
    pub name: String,
    pub oil: bool,
    pub glass: bool,
    pub metal: bool,
    pub textile: bool,
}

impl OutputRecord for StationRecord {
    const HEADER: &'static [&'static str] =
        &["region", "zip", "name", "oil", "glass", "metal", "textile"];
}
