use std::{collections::HashMap, time::Instant};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::repository::{JoinedRecord, StationRecord, ValidationRecord};

type KeyToStations<'a> = HashMap<&'a str, Vec<&'a StationRecord>>;

/// Left outer join of validations to stations on the station key.
///
/// Each validation appears once per matching station, or once with no station
/// when nothing matches. Output follows the order of `validations`, and for a
/// given validation the order of `stations`.
pub fn join(validations: &[ValidationRecord], stations: &[StationRecord]) -> Vec<JoinedRecord> {
    debug!("Joining {} validations to {} stations...", validations.len(), stations.len());
    let now = Instant::now();
    let lookup = index(stations);
    for (key, matches) in lookup.iter().filter(|(_, matches)| matches.len() > 1) {
        warn!(
            "Station key \"{key}\" is shared by {} station rows, its validations are repeated for each",
            matches.len()
        );
    }

    let joined: Vec<JoinedRecord> = validations
        .par_iter()
        .flat_map_iter(|validation| {
            let matches = lookup
                .get(validation.station_key.as_ref())
                .map(|matches| matches.as_slice())
                .unwrap_or_default();
            if matches.is_empty() {
                vec![JoinedRecord {
                    validation: validation.clone(),
                    station: None,
                }]
            } else {
                matches
                    .iter()
                    .map(|station| JoinedRecord {
                        validation: validation.clone(),
                        station: Some((*station).clone()),
                    })
                    .collect()
            }
        })
        .collect();
    debug!("Joining took {:?}, {} rows", now.elapsed(), joined.len());
    joined
}

/// Station keys carried by more than one station row, with how many rows share each.
/// Sorted by key.
pub fn key_collisions(stations: &[StationRecord]) -> Vec<(String, usize)> {
    let mut collisions: Vec<(String, usize)> = index(stations)
        .into_iter()
        .filter(|(_, matches)| matches.len() > 1)
        .map(|(key, matches)| (key.to_string(), matches.len()))
        .collect();
    collisions.sort();
    collisions
}

fn index(stations: &[StationRecord]) -> KeyToStations<'_> {
    let mut lookup: KeyToStations = HashMap::new();
    for station in stations {
        lookup
            .entry(station.station_key.as_ref())
            .or_default()
            .push(station);
    }
    lookup
}
