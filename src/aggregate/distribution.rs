use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;

use crate::{
    aggregate::Observation,
    repository::{JoinedRecord, Mode},
    shared::stats,
};

/// Every validation share observed for one mode, for a box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeDistribution {
    pub mode: Mode,
    pub label: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
    pub median: f64,
}

/// Groups joined records by the mode of their station, keeping every point.
///
/// Records without a station are left out. Groups are ordered by descending
/// median, ties keep the [`Mode`] declaration order.
pub fn mode_distribution<'a, I>(records: I) -> Vec<ModeDistribution>
where
    I: IntoIterator<Item = &'a JoinedRecord>,
{
    let mut by_mode: BTreeMap<Mode, Vec<f64>> = BTreeMap::new();
    for record in records {
        if let Some(mode) = record.mode() {
            by_mode
                .entry(mode)
                .or_default()
                .push(record.pct_validations());
        }
    }

    let mut distributions: Vec<ModeDistribution> = by_mode
        .into_iter()
        .filter_map(|(mode, values)| {
            let median = stats::median(&values)?;
            Some(ModeDistribution {
                mode,
                label: mode.label(),
                color: mode.color(),
                values,
                median,
            })
        })
        .collect();
    distributions.sort_by(|a, b| b.median.partial_cmp(&a.median).unwrap_or(Ordering::Equal));
    distributions
}

#[cfg(test)]
use crate::{aggregate::record, repository::StationRecord};

#[cfg(test)]
fn joined(station: &str, pct: f64, mode: Option<Mode>) -> JoinedRecord {
    JoinedRecord {
        validation: record(station, "JOHV", 8, pct),
        station: mode.map(|mode| StationRecord {
            station_key: crate::shared::normalize(station).into(),
            lat: None,
            lon: None,
            mode,
            operator: None,
            indicators: Default::default(),
        }),
    }
}

#[test]
fn distribution_keeps_all_points() {
    let records = [
        joined("Nation", 4.0, Some(Mode::Metro)),
        joined("Opéra", 2.0, Some(Mode::Metro)),
        joined("Opéra", 2.0, Some(Mode::Metro)),
        joined("Auber", 9.0, Some(Mode::Rer)),
    ];
    let distribution = mode_distribution(&records);
    assert_eq!(distribution.len(), 2);
    assert_eq!(distribution[0].mode, Mode::Rer);
    assert_eq!(distribution[1].mode, Mode::Metro);
    assert_eq!(distribution[1].values, vec![4.0, 2.0, 2.0]);
    assert_eq!(distribution[1].median, 2.0);
    assert_eq!(distribution[1].label, "Métro");
}

#[test]
fn distribution_skips_unmatched() {
    let records = [joined("Nowhere", 4.0, None)];
    assert!(mode_distribution(&records).is_empty());
}

#[test]
fn distribution_ties_keep_mode_order() {
    let records = [
        joined("Gare du Nord", 3.0, Some(Mode::Train)),
        joined("Nation", 3.0, Some(Mode::Metro)),
    ];
    let modes: Vec<_> = mode_distribution(&records)
        .into_iter()
        .map(|distribution| distribution.mode)
        .collect();
    assert_eq!(modes, vec![Mode::Metro, Mode::Train]);
}
