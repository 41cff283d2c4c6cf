use quai::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapStationDto {
    pub station_key: String,
    pub coordinate: Coordinate,
    pub mode: String,
    pub color: String,
    pub operator: Option<String>,
    pub total_pct_validations: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDto {
    pub center: Option<Coordinate>,
    pub stations: Vec<MapStationDto>,
}

impl MapDto {
    pub fn from(summary: GeoSummary) -> Self {
        let center = summary.center();
        let stations = summary
            .stations
            .into_iter()
            .map(|station| MapStationDto {
                station_key: station.station_key,
                coordinate: station.coordinate,
                mode: station.mode.label().to_string(),
                color: station.mode.color().to_string(),
                operator: station.operator,
                total_pct_validations: station.total_pct_validations,
            })
            .collect();
        Self { center, stations }
    }
}
