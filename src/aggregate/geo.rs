use std::{cmp::Ordering, collections::HashMap};

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    aggregate::Observation,
    repository::{JoinedRecord, Mode},
    shared::Coordinate,
};

/// A placeable station with its summed validation share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTotal {
    pub station_key: String,
    pub coordinate: Coordinate,
    pub mode: Mode,
    pub operator: Option<String>,
    /// Sum over every day type and hour present in the input.
    pub total_pct_validations: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoSummary {
    pub stations: Vec<StationTotal>,
}

impl GeoSummary {
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Mean position of the placed stations, used to centre the map.
    pub fn center(&self) -> Option<Coordinate> {
        if self.stations.is_empty() {
            return None;
        }
        Some(self.stations.iter().map(|station| station.coordinate).sum())
    }
}

type GroupKey<'a> = (&'a str, u64, u64, Mode, Option<&'a str>);

/// Sums validation shares per (station, lat, lon, mode, operator).
///
/// Records without both coordinates cannot be placed and are left out. Stations
/// come out sorted by key, then latitude, then longitude.
pub fn geo_summary<'a, I>(records: I) -> GeoSummary
where
    I: IntoIterator<Item = &'a JoinedRecord>,
{
    let mut lookup: HashMap<GroupKey<'a>, usize> = HashMap::new();
    let mut stations: Vec<StationTotal> = Vec::new();
    for record in records {
        let Some(station) = &record.station else {
            continue;
        };
        let Some(coordinate) = station.coordinate() else {
            continue;
        };
        let key: GroupKey = (
            station.station_key.as_ref(),
            coordinate.latitude.to_bits(),
            coordinate.longitude.to_bits(),
            station.mode,
            station.operator.as_deref(),
        );
        let index = *lookup.entry(key).or_insert_with(|| {
            stations.push(StationTotal {
                station_key: station.station_key.to_string(),
                coordinate,
                mode: station.mode,
                operator: station.operator.as_deref().map(String::from),
                total_pct_validations: 0.0,
            });
            stations.len() - 1
        });
        stations[index].total_pct_validations += record.pct_validations();
    }

    stations.par_sort_by(|a, b| {
        a.station_key
            .cmp(&b.station_key)
            .then_with(|| {
                a.coordinate
                    .latitude
                    .partial_cmp(&b.coordinate.latitude)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                a.coordinate
                    .longitude
                    .partial_cmp(&b.coordinate.longitude)
                    .unwrap_or(Ordering::Equal)
            })
    });
    GeoSummary { stations }
}

#[cfg(test)]
use crate::{aggregate::record, repository::StationRecord};

#[cfg(test)]
fn placed(station: &str, day_type: &str, pct: f64, lat: Option<f64>) -> JoinedRecord {
    JoinedRecord {
        validation: record(station, day_type, 8, pct),
        station: Some(StationRecord {
            station_key: crate::shared::normalize(station).into(),
            lat,
            lon: Some(2.35),
            mode: Mode::Metro,
            operator: Some("RATP".into()),
            indicators: Default::default(),
        }),
    }
}

#[test]
fn geo_sums_across_day_types() {
    let records = [
        placed("Nation", "semaine", 2.0, Some(48.85)),
        placed("Nation", "samedi", 3.0, Some(48.85)),
    ];
    let summary = geo_summary(&records);
    assert_eq!(summary.stations.len(), 1);
    assert_eq!(summary.stations[0].total_pct_validations, 5.0);
    assert_eq!(summary.stations[0].operator.as_deref(), Some("RATP"));
}

#[test]
fn geo_skips_unplaced() {
    let records = [
        placed("Nation", "semaine", 2.0, None),
        JoinedRecord {
            validation: record("Nowhere", "semaine", 8, 1.0),
            station: None,
        },
    ];
    assert!(geo_summary(&records).is_empty());
}

#[test]
fn geo_center() {
    let records = [
        placed("Nation", "semaine", 2.0, Some(48.0)),
        placed("Opéra", "semaine", 2.0, Some(49.0)),
    ];
    let summary = geo_summary(&records);
    assert_eq!(summary.center(), Some(Coordinate::new(48.5, 2.35)));
    assert_eq!(GeoSummary::default().center(), None);
}
