use quai::{prelude::*, source};

fn data(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn load_validations_test() {
    let validations = load_validations(data("validations.csv").as_str()).unwrap();
    assert_eq!(validations.len(), 7);

    let first = &validations[0];
    assert_eq!(first.station_key.as_ref(), "chatelet les halles");
    assert_eq!(first.day_type.as_ref(), "JOHV");
    assert_eq!(first.hour_bucket_label.as_ref(), "6H-7H");
    assert_eq!(first.hour, 6);
    assert_eq!(first.pct_validations, 2.5);

    for record in validations.iter() {
        if record.station_key.is_empty() {
            panic!("station_key should never be empty");
        }
        if record.day_type.is_empty() {
            panic!("day_type should never be empty");
        }
    }
}

#[test]
fn load_validations_drops_bad_rows() {
    let validations = load_validations(data("validations.csv").as_str()).unwrap();
    // "ND" hour bucket, "12,5" percentage, blank percentage and blank station.
    assert!(
        !validations
            .iter()
            .any(|record| record.hour_bucket_label.as_ref() == "ND")
    );
    assert!(
        !validations
            .iter()
            .any(|record| record.station_key.as_ref() == "nation" && record.hour >= 8)
    );
}

#[test]
fn load_validations_normalizes_names() {
    let validations = load_validations(data("validations.csv").as_str()).unwrap();
    assert!(
        validations
            .iter()
            .any(|record| record.station_key.as_ref() == "la defense grande arche")
    );
}

#[test]
fn load_stations_test() {
    let stations = load_stations(data("stations.csv").as_str()).unwrap();
    assert_eq!(stations.len(), 5);

    let chatelet = &stations[0];
    assert_eq!(chatelet.station_key.as_ref(), "chatelet les halles");
    assert_eq!(chatelet.lat, Some(48.862));
    assert_eq!(chatelet.lon, Some(2.347));
    assert_eq!(chatelet.mode, Mode::Metro);
    assert_eq!(chatelet.operator.as_deref(), Some("RATP"));
    assert!(chatelet.indicators.metro && chatelet.indicators.rer);
}

#[test]
fn load_stations_geo_point_without_comma() {
    let stations = load_stations(data("stations.csv").as_str()).unwrap();
    let orly = stations
        .iter()
        .find(|station| station.station_key.as_ref() == "orly")
        .unwrap();
    assert_eq!(orly.lat, None);
    assert_eq!(orly.lon, None);
    assert_eq!(orly.mode, Mode::Val);
}

#[test]
fn load_stations_infers_other() {
    let stations = load_stations(data("stations.csv").as_str()).unwrap();
    let perdue = stations
        .iter()
        .find(|station| station.station_key.as_ref() == "gare perdue")
        .unwrap();
    assert_eq!(perdue.mode, Mode::Other);
}

#[test]
fn load_stations_explicit_mode() {
    let stations = load_stations(data("stations_mode.csv").as_str()).unwrap();
    let modes: Vec<_> = stations.iter().map(|station| station.mode).collect();
    assert_eq!(modes, vec![Mode::Rer, Mode::Metro, Mode::Other]);
}

#[test]
fn load_stations_without_indicator_columns() {
    let stations = load_stations(data("stations_no_indicators.csv").as_str()).unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].mode, Mode::Other);
    assert_eq!(stations[0].indicators, ModeIndicators::default());
}

#[test]
fn load_from_zip_test() {
    let archive = data("exports.zip");
    let validations = load_validations(Source::zip(&archive, "validations.csv")).unwrap();
    assert_eq!(validations.len(), 7);
    let stations = load_stations(Source::parse(&format!("{archive}!stations.csv"))).unwrap();
    assert_eq!(stations.len(), 5);
}

#[test]
fn load_missing_zip_entry() {
    let result = load_validations(Source::zip(data("exports.zip"), "missing.csv"));
    assert!(matches!(result, Err(source::Error::FileNotFound(_))));
}

#[test]
fn load_missing_file() {
    let result = load_validations(data("missing.csv").as_str());
    match result {
        Err(source::Error::FileNotFound(name)) => assert!(name.ends_with("missing.csv")),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn load_wrong_delimiter() {
    let result = load_validations(data("comma_delimited.csv").as_str());
    assert!(matches!(
        result,
        Err(source::Error::MissingColumn { ref column, .. }) if column == "station"
    ));
}

#[test]
fn load_empty_sources() {
    assert!(load_validations(data("empty.csv").as_str()).unwrap().is_empty());
    assert!(load_stations(data("empty.csv").as_str()).unwrap().is_empty());
    assert!(load_validations(data("header_only.csv").as_str()).unwrap().is_empty());
}

#[test]
fn load_stations_short_rows() {
    let stations = load_stations(data("stations_short_rows.csv").as_str()).unwrap();
    assert_eq!(stations.len(), 2);

    let opera = &stations[1];
    assert_eq!(opera.station_key.as_ref(), "opera");
    assert_eq!(opera.lat, Some(48.871));
    assert_eq!(opera.lon, Some(2.331));
    assert_eq!(opera.operator, None);
    assert_eq!(opera.indicators, ModeIndicators::default());
    assert_eq!(opera.mode, Mode::Other);
}

#[test]
fn load_validations_short_rows() {
    let validations = load_validations(data("validations_short_rows.csv").as_str()).unwrap();
    let keys: Vec<_> = validations
        .iter()
        .map(|record| record.station_key.as_ref())
        .collect();
    assert_eq!(keys, vec!["nation", "opera"]);
    assert_eq!(validations[1].pct_validations, 2.0);
}

#[test]
fn load_empty_header() {
    let result = load_validations(data("header_empty.csv").as_str());
    match result {
        Err(source::Error::MissingHeader(name)) => assert!(name.ends_with("header_empty.csv")),
        other => panic!("expected MissingHeader, got {other:?}"),
    }
}
