//! Ingestion, join and aggregation of rail ridership data.
//!
//! Two semicolon separated exports are read: hourly validation profiles per
//! station, and station locations. Station names are normalized into a shared
//! key, the profiles are left joined to the stations, and the joined rows feed
//! the hourly profile, mode distribution, heatmap and map views.
//!
//! ```no_run
//! use quai::prelude::*;
//!
//! let validations = load_validations("validations.csv")?;
//! let stations = load_stations("gares.csv")?;
//! let joined = join(&validations, &stations);
//! let map = geo_summary(&joined);
//! # Ok::<(), quai::source::Error>(())
//! ```

pub mod aggregate;
pub mod cache;
pub mod repository;
pub mod shared;
pub mod source;

pub mod prelude {
    pub use crate::aggregate::{
        Filter, GeoSummary, Heatmap, ModeDistribution, Observation, StationProfile,
        StationTotal, geo_summary, heatmap, hourly_profile, mode_distribution,
    };
    pub use crate::cache::{Fingerprint, Memoized};
    pub use crate::repository::{
        Dataset, JoinedRecord, Mode, ModeIndicators, StationRecord, Summary, ValidationRecord,
        join, key_collisions, load_stations, load_validations,
    };
    pub use crate::shared::{Coordinate, normalize};
    pub use crate::source::{Config, Source};
}
