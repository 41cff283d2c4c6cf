use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate::Observation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilePoint {
    pub hour: u32,
    pub day_type: String,
    pub pct_validations: f64,
}

/// One line of the hourly profile chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationProfile {
    pub station_key: String,
    /// Ordered by hour. Points sharing an hour keep their input order.
    pub points: Vec<ProfilePoint>,
}

/// Groups records by station, then orders each station's points by hour.
/// Stations come out sorted by key. Nothing is reduced.
pub fn hourly_profile<'a, T, I>(records: I) -> Vec<StationProfile>
where
    T: Observation + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut by_station: BTreeMap<&str, Vec<ProfilePoint>> = BTreeMap::new();
    for record in records {
        by_station
            .entry(record.station_key())
            .or_default()
            .push(ProfilePoint {
                hour: record.hour(),
                day_type: record.day_type().to_string(),
                pct_validations: record.pct_validations(),
            });
    }

    by_station
        .into_iter()
        .map(|(station_key, mut points)| {
            points.sort_by_key(|point| point.hour);
            StationProfile {
                station_key: station_key.to_string(),
                points,
            }
        })
        .collect()
}

#[cfg(test)]
use crate::aggregate::record;

#[test]
fn profile_orders_by_station_then_hour() {
    let records = [
        record("Opéra", "JOHV", 9, 2.0),
        record("Nation", "JOHV", 9, 5.0),
        record("Nation", "JOHV", 7, 3.0),
        record("Nation", "SAHV", 7, 1.0),
    ];
    let profile = hourly_profile(&records);
    assert_eq!(profile.len(), 2);
    assert_eq!(profile[0].station_key, "nation");
    assert_eq!(profile[1].station_key, "opera");

    let hours: Vec<_> = profile[0].points.iter().map(|point| point.hour).collect();
    assert_eq!(hours, vec![7, 7, 9]);
    assert_eq!(profile[0].points[0].day_type, "JOHV");
    assert_eq!(profile[0].points[1].day_type, "SAHV");
}

#[test]
fn profile_empty() {
    let records: Vec<crate::repository::ValidationRecord> = Vec::new();
    assert!(hourly_profile(&records).is_empty());
}
