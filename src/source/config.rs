use csv::StringRecord;

/// Column names of the hourly validation profile export, mapped to the fields of
/// [`RawValidation`](super::RawValidation).
pub const VALIDATION_COLUMNS: &[(&str, &str)] = &[
    ("libelle_arret", "station"),
    ("cat_jour", "day_type"),
    ("trnc_horr_60", "hour_bucket"),
    ("pourcentage_validations", "pct_validations"),
];

pub const VALIDATION_REQUIRED: &[&str] = &["station", "day_type", "hour_bucket", "pct_validations"];

/// Column names of the station location export, mapped to the fields of
/// [`RawStation`](super::RawStation). Earlier entries win when two source
/// columns map to the same field.
pub const STATION_COLUMNS: &[(&str, &str)] = &[
    ("nom_long", "station"),
    ("gare", "station"),
    ("geo_point_2d", "geo_point"),
    ("mode", "mode"),
    ("exploitant", "operator"),
    ("termetro", "termetro"),
    ("terrer", "terrer"),
    ("tertrain", "tertrain"),
    ("tertram", "tertram"),
    ("terval", "terval"),
];

pub const STATION_REQUIRED: &[&str] = &["station"];

/// Static rename table from source column names to canonical field names.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    renames: Vec<(String, String)>,
    required: Vec<String>,
}

impl ColumnMap {
    pub fn new(renames: &[(&str, &str)], required: &[&str]) -> Self {
        Self {
            renames: renames
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            required: required.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn validations() -> Self {
        Self::new(VALIDATION_COLUMNS, VALIDATION_REQUIRED)
    }

    pub fn stations() -> Self {
        Self::new(STATION_COLUMNS, STATION_REQUIRED)
    }

    /// Rewrites a header row to canonical names.
    ///
    /// A column already carrying a canonical name keeps it. Otherwise the table is
    /// walked in order and each canonical name goes to the first matching column.
    /// Columns that lose the race, or match nothing, keep their source name.
    pub fn rename(&self, headers: &StringRecord) -> StringRecord {
        let mut renamed: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let mut claimed: Vec<bool> = headers
            .iter()
            .map(|header| self.renames.iter().any(|(_, to)| to == header))
            .collect();

        for (from, to) in &self.renames {
            if renamed.iter().zip(&claimed).any(|(name, c)| *c && name == to) {
                continue;
            }
            let position = renamed
                .iter()
                .zip(&claimed)
                .position(|(name, c)| !*c && name.eq_ignore_ascii_case(from));
            if let Some(i) = position {
                renamed[i] = to.clone();
                claimed[i] = true;
            }
        }
        StringRecord::from(renamed)
    }

    /// The first required canonical field absent from the renamed header, if any.
    pub fn missing_required<'a>(&'a self, headers: &StringRecord) -> Option<&'a str> {
        self.required
            .iter()
            .find(|required| !headers.iter().any(|header| header == required.as_str()))
            .map(|required| required.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub delimiter: u8,
    pub validation_columns: ColumnMap,
    pub station_columns: ColumnMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b';',
            validation_columns: ColumnMap::validations(),
            station_columns: ColumnMap::stations(),
        }
    }
}

#[test]
fn rename_validation_headers() {
    let headers = StringRecord::from(vec![
        "code_stif",
        "libelle_arret",
        "cat_jour",
        "trnc_horr_60",
        "pourcentage_validations",
    ]);
    let renamed = ColumnMap::validations().rename(&headers);
    assert_eq!(
        renamed,
        StringRecord::from(vec![
            "code_stif",
            "station",
            "day_type",
            "hour_bucket",
            "pct_validations"
        ])
    );
}

#[test]
fn rename_prefers_earlier_entry() {
    let headers = StringRecord::from(vec!["gare", "nom_long"]);
    let renamed = ColumnMap::stations().rename(&headers);
    assert_eq!(renamed, StringRecord::from(vec!["gare", "station"]));
}

#[test]
fn rename_keeps_canonical_column() {
    let headers = StringRecord::from(vec!["nom_long", "station"]);
    let renamed = ColumnMap::stations().rename(&headers);
    assert_eq!(renamed, StringRecord::from(vec!["nom_long", "station"]));
}

#[test]
fn missing_required_column() {
    let map = ColumnMap::validations();
    let headers = map.rename(&StringRecord::from(vec!["libelle_arret", "cat_jour"]));
    assert_eq!(map.missing_required(&headers), Some("hour_bucket"));
}
