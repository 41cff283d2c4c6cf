//! Reductions feeding the dashboard views.
//!
//! Every function here is a pure read over already filtered records. Empty input
//! gives an empty result, which callers render as "no data for this filter".

use std::collections::BTreeSet;

use rayon::prelude::*;

mod distribution;
mod geo;
mod heatmap;
mod profile;
pub use distribution::*;
pub use geo::*;
pub use heatmap::*;
pub use profile::*;

use crate::{
    repository::{JoinedRecord, ValidationRecord},
    shared::normalize,
};

/// The validation fields every view reads, shared by plain and joined records.
pub trait Observation {
    fn station_key(&self) -> &str;
    fn day_type(&self) -> &str;
    fn hour(&self) -> u32;
    fn pct_validations(&self) -> f64;
}

impl Observation for ValidationRecord {
    fn station_key(&self) -> &str {
        &self.station_key
    }

    fn day_type(&self) -> &str {
        &self.day_type
    }

    fn hour(&self) -> u32 {
        self.hour
    }

    fn pct_validations(&self) -> f64 {
        self.pct_validations
    }
}

impl Observation for JoinedRecord {
    fn station_key(&self) -> &str {
        &self.validation.station_key
    }

    fn day_type(&self) -> &str {
        &self.validation.day_type
    }

    fn hour(&self) -> u32 {
        self.validation.hour
    }

    fn pct_validations(&self) -> f64 {
        self.validation.pct_validations
    }
}

/// Day type, station and hour selection applied before aggregating.
/// Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub day_type: Option<String>,
    /// Normalized station keys.
    pub stations: BTreeSet<String>,
    /// Inclusive lower hour bound.
    pub from_hour: Option<u32>,
    /// Inclusive upper hour bound.
    pub to_hour: Option<u32>,
}

impl Filter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn day_type<S: Into<String>>(mut self, day_type: S) -> Self {
        self.day_type = Some(day_type.into());
        self
    }

    /// Station names are normalized, so raw labels and keys both work.
    pub fn stations<I, S>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stations = stations
            .into_iter()
            .map(|station| normalize(station.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        self
    }

    pub fn hours(mut self, from: Option<u32>, to: Option<u32>) -> Self {
        self.from_hour = from;
        self.to_hour = to;
        self
    }

    pub fn matches<T: Observation>(&self, record: &T) -> bool {
        if let Some(day_type) = &self.day_type
            && record.day_type() != day_type
        {
            return false;
        }
        if !self.stations.is_empty() && !self.stations.contains(record.station_key()) {
            return false;
        }
        if let Some(from) = self.from_hour
            && record.hour() < from
        {
            return false;
        }
        if let Some(to) = self.to_hour
            && record.hour() > to
        {
            return false;
        }
        true
    }

    /// The matching records, in input order.
    pub fn apply<'a, T>(&self, records: &'a [T]) -> Vec<&'a T>
    where
        T: Observation + Sync,
    {
        records
            .par_iter()
            .filter(|record| self.matches(*record))
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn record(station: &str, day_type: &str, hour: u32, pct: f64) -> ValidationRecord {
    ValidationRecord {
        station_key: normalize(station).into(),
        day_type: day_type.into(),
        hour_bucket_label: format!("{hour}H-{}H", (hour + 1) % 24).into(),
        hour,
        pct_validations: pct,
    }
}

#[test]
fn filter_unset_matches_all() {
    let records = [record("Nation", "JOHV", 8, 4.0), record("Opéra", "SAHV", 9, 2.0)];
    assert_eq!(Filter::new().apply(&records).len(), 2);
}

#[test]
fn filter_by_day_type_station_and_hours() {
    let records = [
        record("Nation", "JOHV", 7, 3.0),
        record("Nation", "JOHV", 8, 4.0),
        record("Nation", "SAHV", 8, 1.0),
        record("Opéra", "JOHV", 8, 2.0),
        record("Nation", "JOHV", 20, 1.5),
    ];
    let filter = Filter::new()
        .day_type("JOHV")
        .stations(["NATION"])
        .hours(Some(8), Some(19));
    let kept = filter.apply(&records);
    assert_eq!(kept, vec![&records[1]]);
}

#[test]
fn filter_normalizes_station_names() {
    let filter = Filter::new().stations(["Châtelet-Les Halles", "  "]);
    assert_eq!(
        filter.stations,
        BTreeSet::from(["chatelet les halles".to_string()])
    );
}
