use quai::prelude::*;

fn data(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn dataset() -> Dataset {
    Dataset::load(
        &Source::file(data("validations.csv")),
        &Source::file(data("stations.csv")),
        &Config::default(),
    )
    .unwrap()
}

#[test]
fn dataset_queries() {
    let dataset = dataset();
    assert_eq!(dataset.day_types(), vec!["DIJFP", "JOHV", "SAHV"]);
    assert_eq!(
        dataset.selectable_stations(),
        vec!["chatelet les halles", "la defense grande arche", "nation"]
    );
    assert_eq!(dataset.hour_range(), Some((6, 10)));
    assert_eq!(Dataset::new().hour_range(), None);
}

#[test]
fn summary_test() {
    let dataset = dataset();
    let summary = dataset.summary(&Filter::new());
    assert_eq!(summary.selected_stations, 3);
    assert_eq!(summary.combinations, 7);
    assert_eq!(summary.day_types, 3);

    let summary = dataset.summary(&Filter::new().stations(["Nation"]).day_type("JOHV"));
    assert_eq!(summary.selected_stations, 1);
    assert_eq!(summary.combinations, 1);
    assert_eq!(summary.day_types, 1);
}

#[test]
fn hourly_profile_test() {
    let dataset = dataset();
    let filter = Filter::new().stations(["Châtelet-Les Halles"]);
    let profile = hourly_profile(dataset.filtered_validations(&filter));
    assert_eq!(profile.len(), 1);
    let hours: Vec<_> = profile[0].points.iter().map(|point| point.hour).collect();
    assert_eq!(hours, vec![6, 7, 7]);
}

#[test]
fn mode_distribution_test() {
    let dataset = dataset();
    let distribution = mode_distribution(dataset.joined.iter());
    assert_eq!(distribution.len(), 1);
    assert_eq!(distribution[0].mode, Mode::Metro);
    assert_eq!(distribution[0].values.len(), 6);
    assert_eq!(distribution[0].median, 3.5);
}

#[test]
fn heatmap_test() {
    let dataset = dataset();
    let map = heatmap(dataset.validations.iter());
    assert_eq!(map.day_types, vec!["DIJFP", "JOHV", "SAHV"]);
    assert_eq!(map.hours, vec![6, 7, 8, 10]);
    assert_eq!(map.get("JOHV", 7), Some(7.375));
    assert_eq!(map.get("SAHV", 7), Some(3.5));
    assert_eq!(map.get("DIJFP", 7), None);
}

#[test]
fn geo_summary_test() {
    let dataset = dataset();
    let summary = geo_summary(dataset.joined.iter());
    let totals: Vec<_> = summary
        .stations
        .iter()
        .map(|station| (station.station_key.as_str(), station.total_pct_validations))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("chatelet les halles", 13.75),
            ("la defense grande arche", 0.75),
            ("nation", 10.5),
        ]
    );
    assert!(summary.center().is_some());
}

#[test]
fn geo_summary_sums_day_types() {
    let records: Vec<JoinedRecord> = ["semaine", "samedi"]
        .into_iter()
        .zip([2.0, 3.0])
        .map(|(day_type, pct)| JoinedRecord {
            validation: ValidationRecord {
                station_key: "nation".into(),
                day_type: day_type.into(),
                hour_bucket_label: "8H-9H".into(),
                hour: 8,
                pct_validations: pct,
            },
            station: Some(StationRecord {
                station_key: "nation".into(),
                lat: Some(48.85),
                lon: Some(2.35),
                mode: Mode::Metro,
                operator: None,
                indicators: ModeIndicators::default(),
            }),
        })
        .collect();
    let summary = geo_summary(&records);
    assert_eq!(summary.stations.len(), 1);
    assert_eq!(summary.stations[0].total_pct_validations, 5.0);
}

#[test]
fn filtered_views_can_be_empty() {
    let dataset = dataset();
    let filter = Filter::new().day_type("NOPE");
    assert!(hourly_profile(dataset.filtered_validations(&filter)).is_empty());
    assert!(mode_distribution(dataset.filtered_joined(&filter)).is_empty());
    assert!(heatmap(dataset.filtered_validations(&filter)).is_empty());
    assert!(geo_summary(dataset.filtered_joined(&filter)).is_empty());
}
