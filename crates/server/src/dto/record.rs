use quai::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDto {
    pub station_key: String,
    pub day_type: String,
    pub hour_bucket: String,
    pub hour: u32,
    pub pct_validations: f64,
}

impl RecordDto {
    pub fn from(record: &ValidationRecord) -> Self {
        Self {
            station_key: record.station_key.to_string(),
            day_type: record.day_type.to_string(),
            hour_bucket: record.hour_bucket_label.to_string(),
            hour: record.hour,
            pct_validations: record.pct_validations,
        }
    }
}
