use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::shared::{Coordinate, normalize};

/// Share of a station's daily validations falling in one hour bucket of one day type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRecord {
    /// Normalized station name, the join key.
    pub station_key: Arc<str>,
    /// Kind of day the profile describes (e.g. "JOHV", "SAHV", "DIJFP").
    pub day_type: Arc<str>,
    /// The raw one-hour window label, e.g. "6H-7H".
    pub hour_bucket_label: Arc<str>,
    /// Start hour of the bucket.
    pub hour: u32,
    /// Percentage of the day's validations, on a 0-100 scale.
    pub pct_validations: f64,
}

/// Rail transport category serving a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mode {
    Metro,
    #[serde(rename = "RER")]
    Rer,
    Train,
    Tram,
    #[serde(rename = "VAL")]
    Val,
    Other,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Mode {
    /// Display label used by the dashboard.
    pub const fn label(&self) -> &'static str {
        match self {
            Mode::Metro => "Métro",
            Mode::Rer => "RER",
            Mode::Train => "Train",
            Mode::Tram => "Tram",
            Mode::Val => "VAL",
            Mode::Other => "Autre",
        }
    }

    /// Palette colour, shared by every view that colours by mode.
    pub const fn color(&self) -> &'static str {
        match self {
            Mode::Metro => "#0099DD",
            Mode::Rer => "#009854",
            Mode::Train => "#8A4B8F",
            Mode::Tram => "#FF7900",
            Mode::Val => "#F7E300",
            Mode::Other => "#A9A9A9",
        }
    }

    /// Reads an explicit mode cell. Blank text is `None`, unknown text is [`Mode::Other`].
    pub fn parse(text: &str) -> Option<Mode> {
        let key = normalize(text);
        if key.is_empty() {
            return None;
        }
        let mode = match key.as_str() {
            "metro" => Mode::Metro,
            "rer" => Mode::Rer,
            "train" | "transilien" => Mode::Train,
            "tram" | "tramway" => Mode::Tram,
            "val" => Mode::Val,
            _ => Mode::Other,
        };
        Some(mode)
    }

    /// Infers the mode from the indicator flags. The first set flag in
    /// [`MODE_PRIORITY`] wins, none set is [`Mode::Other`].
    pub fn infer(indicators: &ModeIndicators) -> Mode {
        MODE_PRIORITY
            .iter()
            .find(|(served, _)| served(indicators))
            .map(|(_, mode)| *mode)
            .unwrap_or(Mode::Other)
    }
}

type Served = fn(&ModeIndicators) -> bool;

/// Indicator checks in priority order.
pub const MODE_PRIORITY: [(Served, Mode); 5] = [
    (ModeIndicators::metro, Mode::Metro),
    (ModeIndicators::rer, Mode::Rer),
    (ModeIndicators::train, Mode::Train),
    (ModeIndicators::tram, Mode::Tram),
    (ModeIndicators::val, Mode::Val),
];

/// The five per-mode flags of the station export. A missing column counts as unset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeIndicators {
    pub metro: bool,
    pub rer: bool,
    pub train: bool,
    pub tram: bool,
    pub val: bool,
}

impl ModeIndicators {
    fn metro(&self) -> bool {
        self.metro
    }

    fn rer(&self) -> bool {
        self.rer
    }

    fn train(&self) -> bool {
        self.train
    }

    fn tram(&self) -> bool {
        self.tram
    }

    fn val(&self) -> bool {
        self.val
    }

    /// Reads an indicator cell. Only a numeric one (`1`, `1.0`) or `true` sets the flag.
    pub fn flag(cell: Option<&str>) -> bool {
        match cell.map(str::trim) {
            Some(text) if text.eq_ignore_ascii_case("true") => true,
            Some(text) => text.parse::<f64>().is_ok_and(|value| value == 1.0),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    /// Normalized station name, the join key.
    pub station_key: Arc<str>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub mode: Mode,
    pub operator: Option<Arc<str>>,
    pub indicators: ModeIndicators,
}

impl StationRecord {
    /// Both coordinates, or nothing.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lon?))
    }
}

/// A validation row with at most one matching station row.
/// Stations sharing a key yield one joined record each.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub validation: ValidationRecord,
    pub station: Option<StationRecord>,
}

impl JoinedRecord {
    pub fn lat(&self) -> Option<f64> {
        self.station.as_ref()?.lat
    }

    pub fn lon(&self) -> Option<f64> {
        self.station.as_ref()?.lon
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.station.as_ref()?.coordinate()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.station.as_ref().map(|station| station.mode)
    }

    pub fn operator(&self) -> Option<&Arc<str>> {
        self.station.as_ref()?.operator.as_ref()
    }
}

#[test]
fn infer_metro_first() {
    let indicators = ModeIndicators {
        metro: true,
        rer: true,
        ..Default::default()
    };
    assert_eq!(Mode::infer(&indicators), Mode::Metro);
}

#[test]
fn infer_follows_priority() {
    let indicators = ModeIndicators {
        tram: true,
        val: true,
        ..Default::default()
    };
    assert_eq!(Mode::infer(&indicators), Mode::Tram);
    let indicators = ModeIndicators {
        val: true,
        ..Default::default()
    };
    assert_eq!(Mode::infer(&indicators), Mode::Val);
}

#[test]
fn infer_none_set() {
    assert_eq!(Mode::infer(&ModeIndicators::default()), Mode::Other);
}

#[test]
fn parse_explicit_mode() {
    assert_eq!(Mode::parse("Métro"), Some(Mode::Metro));
    assert_eq!(Mode::parse(" RER "), Some(Mode::Rer));
    assert_eq!(Mode::parse("Tramway"), Some(Mode::Tram));
    assert_eq!(Mode::parse("Funiculaire"), Some(Mode::Other));
    assert_eq!(Mode::parse(""), None);
}

#[test]
fn indicator_flags() {
    assert!(ModeIndicators::flag(Some("1")));
    assert!(ModeIndicators::flag(Some("1.0")));
    assert!(ModeIndicators::flag(Some("True")));
    assert!(!ModeIndicators::flag(Some("0")));
    assert!(!ModeIndicators::flag(Some("2")));
    assert!(!ModeIndicators::flag(None));
}
