use std::{sync::Arc, time::Instant};

use tracing::debug;

use crate::{
    repository::{Mode, ModeIndicators, StationRecord, ValidationRecord},
    shared::{normalize, parse_float, parse_geo_point},
    source::{self, Config, RawStation, RawValidation, Source},
};

/// Loads the hourly validation profiles with the default [`Config`].
pub fn load_validations<S: Into<Source>>(
    source: S,
) -> Result<Vec<ValidationRecord>, source::Error> {
    load_validations_with(&source.into(), &Config::default())
}

/// Loads the station locations with the default [`Config`].
pub fn load_stations<S: Into<Source>>(source: S) -> Result<Vec<StationRecord>, source::Error> {
    load_stations_with(&source.into(), &Config::default())
}

pub fn load_validations_with(
    source: &Source,
    config: &Config,
) -> Result<Vec<ValidationRecord>, source::Error> {
    debug!("Loading validations from {source}...");
    let now = Instant::now();
    let rows: Vec<RawValidation> = source::read_rows(source, &config.validation_columns, config)?;
    let total = rows.len();
    let records: Vec<ValidationRecord> = rows.into_iter().filter_map(validation_record).collect();
    debug!(
        "Loading validations took {:?}, kept {} of {total} rows",
        now.elapsed(),
        records.len()
    );
    Ok(records)
}

pub fn load_stations_with(
    source: &Source,
    config: &Config,
) -> Result<Vec<StationRecord>, source::Error> {
    debug!("Loading stations from {source}...");
    let now = Instant::now();
    let rows: Vec<RawStation> = source::read_rows(source, &config.station_columns, config)?;
    let total = rows.len();
    let records: Vec<StationRecord> = rows.into_iter().filter_map(station_record).collect();
    debug!(
        "Loading stations took {:?}, kept {} of {total} rows",
        now.elapsed(),
        records.len()
    );
    Ok(records)
}

/// Start hour of an hour bucket label: "6H-7H" is 6.
///
/// Takes the text before the first `-`, drops the trailing unit letter and
/// parses the rest. Anything else is `None`.
pub fn parse_hour(label: &str) -> Option<u32> {
    let start = label.split('-').next()?.trim();
    let start = start.strip_suffix(['H', 'h']).unwrap_or(start).trim();
    start.parse().ok()
}

#[test]
fn hour_from_bucket() {
    assert_eq!(parse_hour("6H-7H"), Some(6));
    assert_eq!(parse_hour("23H-0H"), Some(23));
    assert_eq!(parse_hour("0h-1h"), Some(0));
}

#[test]
fn hour_from_bad_bucket() {
    assert_eq!(parse_hour("abc"), None);
    assert_eq!(parse_hour("H-7H"), None);
    assert_eq!(parse_hour(""), None);
    assert_eq!(parse_hour("ND"), None);
}

fn validation_record(row: RawValidation) -> Option<ValidationRecord> {
    let station_key = normalize(&row.station);
    if station_key.is_empty() {
        return None;
    }
    let day_type = row.day_type.filter(|value| !value.trim().is_empty())?;
    let hour_bucket = row.hour_bucket?;
    let pct_validations = row.pct_validations.as_deref().and_then(parse_float)?;
    let hour = parse_hour(&hour_bucket)?;
    Some(ValidationRecord {
        station_key: station_key.into(),
        day_type: day_type.into(),
        hour_bucket_label: hour_bucket.into(),
        hour,
        pct_validations,
    })
}

fn station_record(row: RawStation) -> Option<StationRecord> {
    let station_key = normalize(&row.station);
    if station_key.is_empty() {
        return None;
    }
    let (lat, lon) = parse_geo_point(row.geo_point.as_deref());
    let indicators = ModeIndicators {
        metro: ModeIndicators::flag(row.termetro.as_deref()),
        rer: ModeIndicators::flag(row.terrer.as_deref()),
        train: ModeIndicators::flag(row.tertrain.as_deref()),
        tram: ModeIndicators::flag(row.tertram.as_deref()),
        val: ModeIndicators::flag(row.terval.as_deref()),
    };
    Some(StationRecord {
        station_key: station_key.into(),
        lat,
        lon,
        mode: row
            .mode
            .as_deref()
            .and_then(Mode::parse)
            .unwrap_or_else(|| Mode::infer(&indicators)),
        operator: row
            .operator
            .filter(|value| !value.trim().is_empty())
            .map(Arc::from),
        indicators,
    })
}
