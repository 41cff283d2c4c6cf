use std::collections::BTreeSet;

use serde::Serialize;

mod entities;
mod join;
mod loader;
pub use entities::*;
pub use join::*;
pub use loader::*;

use crate::{
    aggregate::{Filter, Observation},
    source::{self, Config, Source},
};

/// Counters shown above the dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Stations picked by the filter, or every selectable station when none are picked.
    pub selected_stations: usize,
    /// Filtered validation rows (hour x station x day type).
    pub combinations: usize,
    /// Distinct day types left after filtering.
    pub day_types: usize,
}

/// Both datasets and their join, built once per load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub validations: Box<[ValidationRecord]>,
    pub stations: Box<[StationRecord]>,
    pub joined: Box<[JoinedRecord]>,
}

impl Dataset {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads both sources and joins them. Depending on the size of the data this
    /// can be a long blocking function.
    pub fn load(
        validations: &Source,
        stations: &Source,
        config: &Config,
    ) -> Result<Self, source::Error> {
        let validations = load_validations_with(validations, config)?;
        let stations = load_stations_with(stations, config)?;
        Ok(Self::from_records(validations, stations))
    }

    pub fn from_records(validations: Vec<ValidationRecord>, stations: Vec<StationRecord>) -> Self {
        let joined = join(&validations, &stations);
        Self {
            validations: validations.into(),
            stations: stations.into(),
            joined: joined.into(),
        }
    }

    /// Distinct day types, sorted.
    pub fn day_types(&self) -> Vec<&str> {
        self.validations
            .iter()
            .map(|record| record.day_type.as_ref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Station keys that matched a station row, sorted. These are the stations
    /// a caller can meaningfully pick in a filter.
    pub fn selectable_stations(&self) -> Vec<&str> {
        self.joined
            .iter()
            .filter(|record| record.mode().is_some())
            .map(|record| record.station_key())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Lowest and highest hour present in the validations.
    pub fn hour_range(&self) -> Option<(u32, u32)> {
        let min = self.validations.iter().map(|record| record.hour).min()?;
        let max = self.validations.iter().map(|record| record.hour).max()?;
        Some((min, max))
    }

    pub fn filtered_validations(&self, filter: &Filter) -> Vec<&ValidationRecord> {
        filter.apply(&self.validations)
    }

    pub fn filtered_joined(&self, filter: &Filter) -> Vec<&JoinedRecord> {
        filter.apply(&self.joined)
    }

    pub fn summary(&self, filter: &Filter) -> Summary {
        let filtered = self.filtered_validations(filter);
        let selected_stations = if filter.stations.is_empty() {
            self.selectable_stations().len()
        } else {
            filter.stations.len()
        };
        let day_types = filtered
            .iter()
            .map(|record| record.day_type())
            .collect::<BTreeSet<_>>()
            .len();
        Summary {
            selected_stations,
            combinations: filtered.len(),
            day_types,
        }
    }
}
