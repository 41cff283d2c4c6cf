mod dataset;
mod views;

pub use dataset::*;
pub use views::*;

use axum::http::StatusCode;
use quai::prelude::Filter;
use std::collections::HashMap;

/// Day type value meaning "every day type".
const ALL_DAY_TYPES: &str = "Tous";

/// Builds a [`Filter`] from `day_type`, `stations` (comma separated), `from` and `to`.
pub fn filter_from_params(params: &HashMap<String, String>) -> Result<Filter, StatusCode> {
    let mut filter = Filter::new();
    if let Some(day_type) = params.get("day_type")
        && !day_type.is_empty()
        && day_type != ALL_DAY_TYPES
    {
        filter = filter.day_type(day_type.as_str());
    }
    if let Some(stations) = params.get("stations") {
        filter = filter.stations(stations.split(','));
    }
    let from = parse_hour_param(params, "from")?;
    let to = parse_hour_param(params, "to")?;
    Ok(filter.hours(from, to))
}

fn parse_hour_param(params: &HashMap<String, String>, name: &str) -> Result<Option<u32>, StatusCode> {
    match params.get(name) {
        Some(value) => match value.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(StatusCode::BAD_REQUEST),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn empty_params_match_everything() {
    assert_eq!(filter_from_params(&params(&[])), Ok(Filter::new()));
}

#[test]
fn all_day_types_is_no_filter() {
    let filter = filter_from_params(&params(&[("day_type", "Tous")])).unwrap();
    assert_eq!(filter.day_type, None);
}

#[test]
fn full_params() {
    let filter = filter_from_params(&params(&[
        ("day_type", "JOHV"),
        ("stations", "Nation,Châtelet"),
        ("from", "6"),
        ("to", "10"),
    ]))
    .unwrap();
    assert_eq!(
        filter,
        Filter::new()
            .day_type("JOHV")
            .stations(["nation", "chatelet"])
            .hours(Some(6), Some(10))
    );
}

#[test]
fn bad_hour_is_rejected() {
    assert_eq!(
        filter_from_params(&params(&[("from", "six")])),
        Err(StatusCode::BAD_REQUEST)
    );
}
