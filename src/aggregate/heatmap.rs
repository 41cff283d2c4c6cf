use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{aggregate::Observation, shared::stats};

/// Mean validation share per (day type, hour).
///
/// Rows are day types and columns are hours, both sorted. A combination with no
/// record is an empty cell, not zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heatmap {
    pub day_types: Vec<String>,
    pub hours: Vec<u32>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl Heatmap {
    pub fn is_empty(&self) -> bool {
        self.day_types.is_empty()
    }

    pub fn get(&self, day_type: &str, hour: u32) -> Option<f64> {
        let row = self.day_types.iter().position(|value| value == day_type)?;
        let column = self.hours.binary_search(&hour).ok()?;
        self.cells[row][column]
    }
}

pub fn heatmap<'a, T, I>(records: I) -> Heatmap
where
    T: Observation + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut groups: BTreeMap<(&str, u32), Vec<f64>> = BTreeMap::new();
    let mut hours: BTreeSet<u32> = BTreeSet::new();
    for record in records {
        hours.insert(record.hour());
        groups
            .entry((record.day_type(), record.hour()))
            .or_default()
            .push(record.pct_validations());
    }

    let day_types: Vec<&str> = groups
        .keys()
        .map(|(day_type, _)| *day_type)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let hours: Vec<u32> = hours.into_iter().collect();
    let cells = day_types
        .iter()
        .map(|day_type| {
            hours
                .iter()
                .map(|hour| {
                    groups
                        .get(&(*day_type, *hour))
                        .and_then(|values| stats::mean(values))
                })
                .collect()
        })
        .collect();

    Heatmap {
        day_types: day_types.into_iter().map(String::from).collect(),
        hours,
        cells,
    }
}

#[cfg(test)]
use crate::aggregate::record;

#[test]
fn heatmap_means_per_cell() {
    let records = [
        record("Nation", "JOHV", 8, 4.0),
        record("Opéra", "JOHV", 8, 2.0),
        record("Nation", "SAHV", 9, 1.0),
        record("Nation", "DIJFP", 8, 0.5),
    ];
    let map = heatmap(&records);
    assert_eq!(map.day_types, vec!["DIJFP", "JOHV", "SAHV"]);
    assert_eq!(map.hours, vec![8, 9]);
    assert_eq!(map.get("JOHV", 8), Some(3.0));
    assert_eq!(map.get("SAHV", 9), Some(1.0));
}

#[test]
fn heatmap_missing_cells_are_empty() {
    let records = [record("Nation", "JOHV", 8, 4.0), record("Nation", "SAHV", 9, 1.0)];
    let map = heatmap(&records);
    assert_eq!(map.get("JOHV", 9), None);
    assert_eq!(map.cells, vec![vec![Some(4.0), None], vec![None, Some(1.0)]]);
}

#[test]
fn heatmap_empty() {
    let records: Vec<crate::repository::ValidationRecord> = Vec::new();
    assert!(heatmap(&records).is_empty());
}
