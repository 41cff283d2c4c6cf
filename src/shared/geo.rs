use std::iter::Sum;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Averages the coordinates. An empty iterator sums to `NaN, NaN`.
impl Sum for Coordinate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut count: usize = 0;
        let mut lat: f64 = 0.0;
        let mut lon: f64 = 0.0;
        iter.for_each(|coordinate| {
            count += 1;
            lat += coordinate.latitude;
            lon += coordinate.longitude;
        });
        let count = count as f64;
        Self {
            latitude: lat / count,
            longitude: lon / count,
        }
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Splits a combined `"lat, lon"` geo-point into its two parts.
///
/// Anything other than exactly two comma separated parts yields `(None, None)`.
/// Each part is parsed on its own, so a bad latitude does not discard a good longitude.
pub fn parse_geo_point(text: Option<&str>) -> (Option<f64>, Option<f64>) {
    let Some(text) = text else {
        return (None, None);
    };
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 2 {
        return (None, None);
    }
    (parse_float(parts[0]), parse_float(parts[1]))
}

/// Lenient float coercion. Blank, unparseable or `NaN` text is `None`.
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| !value.is_nan())
}

#[test]
fn geo_point_pair() {
    assert_eq!(parse_geo_point(Some("48.85, 2.35")), (Some(48.85), Some(2.35)));
}

#[test]
fn geo_point_single_value() {
    assert_eq!(parse_geo_point(Some("48.85")), (None, None));
}

#[test]
fn geo_point_too_many_parts() {
    assert_eq!(parse_geo_point(Some("48.85, 2.35, 10")), (None, None));
}

#[test]
fn geo_point_partial() {
    assert_eq!(parse_geo_point(Some("north, 2.35")), (None, Some(2.35)));
}

#[test]
fn float_rejects_decimal_comma() {
    assert_eq!(parse_float("12,5"), None);
    assert_eq!(parse_float(" 12.5 "), Some(12.5));
    assert_eq!(parse_float("NaN"), None);
}

#[test]
fn geo_point_missing() {
    assert_eq!(parse_geo_point(None), (None, None));
}

#[test]
fn coordinate_mean() {
    let center: Coordinate = [Coordinate::new(48.0, 2.0), Coordinate::new(49.0, 3.0)]
        .into_iter()
        .sum();
    assert_eq!(center, Coordinate::new(48.5, 2.5));
}
