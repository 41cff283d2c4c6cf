use quai::{cache::Fingerprint, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDto {
    pub path: String,
    pub modified: String,
}

impl From<&Fingerprint> for SourceDto {
    fn from(value: &Fingerprint) -> Self {
        Self {
            path: value.path.display().to_string(),
            modified: value.modified.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionDto {
    pub station_key: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDto {
    pub sources: Vec<SourceDto>,
    pub validations: usize,
    pub stations: usize,
    pub joined: usize,
    pub hour_range: Option<(u32, u32)>,
    pub key_collisions: Vec<CollisionDto>,
}

impl DatasetDto {
    pub fn from(dataset: &Dataset, fingerprints: &[Fingerprint]) -> Self {
        let key_collisions = key_collisions(&dataset.stations)
            .into_iter()
            .map(|(station_key, count)| CollisionDto { station_key, count })
            .collect();
        Self {
            sources: fingerprints.iter().map(SourceDto::from).collect(),
            validations: dataset.validations.len(),
            stations: dataset.stations.len(),
            joined: dataset.joined.len(),
            hour_range: dataset.hour_range(),
            key_collisions,
        }
    }
}
