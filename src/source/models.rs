use serde::{Deserialize, Serialize};

/// One line of the validation profile export, after header renaming.
/// Every cell is kept as text so coercion failures drop the row later instead of failing the read.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawValidation {
    pub station: Option<String>,
    pub day_type: Option<String>,
    pub hour_bucket: Option<String>,
    pub pct_validations: Option<String>,
}

/// One line of the station location export, after header renaming.
/// Only these fields survive, every other source column is discarded.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawStation {
    pub station: Option<String>,
    pub geo_point: Option<String>,
    pub mode: Option<String>,
    pub operator: Option<String>,
    pub termetro: Option<String>,
    pub terrer: Option<String>,
    pub tertrain: Option<String>,
    pub tertram: Option<String>,
    pub terval: Option<String>,
}
