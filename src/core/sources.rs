//! Download locations of the Zurich open data sets.
//!
//! Paths carry a `{year}` placeholder; the host is configurable so tests and
//! mirrors can serve the same layout.

use crate::domain::model::WasteType;

pub const DEFAULT_BASE_URL: &str = "https://data.stadt-zuerich.ch";
pub const DEFAULT_SCHEDULE_YEAR: &str = "2024";
pub const DEFAULT_STATION_YEAR: &str = "2023";

const YEAR_PLACEHOLDER: &str = "{year}";

/// Collection calendars, one per waste type, in output order.
pub const SCHEDULE_SOURCES: [(WasteType, &str); 7] = [
    (
        WasteType::Organic,
        "/dataset/erz_entsorgungskalender_bioabfall/download/entsorgungskalender_bioabfall_{year}.csv",
    ),
    (
        WasteType::Cargotram,
        "/dataset/erz_entsorgungskalender_cargotram/download/entsorgungskalender_cargoTram_{year}.csv",
    ),
    (
        WasteType::Etram,
        "/dataset/erz_entsorgungskalender_etram/download/entsorgungskalender_eTram_{year}.csv",
    ),
    (
        WasteType::Cardboard,
        "/dataset/erz_entsorgungskalender_karton/download/entsorgungskalender_karton_{year}.csv",
    ),
    (
        WasteType::Waste,
        "/dataset/erz_entsorgungskalender_kehricht/download/entsorgungskalender_kehricht_{year}.csv",
    ),
    (
        WasteType::Paper,
        "/dataset/erz_entsorgungskalender_papier/download/entsorgungskalender_papier_{year}.csv",
    ),
    (
        WasteType::Special,
        "/dataset/erz_entsorgungskalender_sonderabfall/download/entsorgungskalender_sonderabfall_{year}.csv",
    ),
];

pub const STATION_SOURCE: &str =
    "/dataset/erz_entsorgungskalender_sammelstellen/download/entsorgungskalender_sammelstellen_{year}.csv";

fn resolve(base_url: &str, template: &str, year: &str) -> String {
    format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        template.replace(YEAR_PLACEHOLDER, year)
    )
}

/// `(waste type, url)` pairs for every schedule source, in table order.
pub fn schedule_sources(base_url: &str, year: &str) -> Vec<(WasteType, String)> {
    SCHEDULE_SOURCES
        .iter()
        .map(|(waste_type, template)| (*waste_type, resolve(base_url, template, year)))
        .collect()
}

pub fn station_source(base_url: &str, year: &str) -> String {
    resolve(base_url, STATION_SOURCE, year)
}
