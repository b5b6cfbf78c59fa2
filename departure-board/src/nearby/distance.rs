//! Great-circle distance between two coordinates.
//!
//! Uses the haversine formula on a spherical Earth. Distances are in
//! **meters**.

use crate::domain::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distance in meters from `origin` to `target`.
///
/// Returns exactly 0 for identical points.
pub fn distance(origin: Coordinate, target: Coordinate) -> f64 {
    let phi1 = origin.latitude().to_radians();
    let phi2 = target.latitude().to_radians();
    let d_phi = (target.latitude() - origin.latitude()).to_radians();
    let d_lambda = (target.longitude() - origin.longitude()).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Human-readable distance, e.g. "340m away" or "1.2km away".
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m away", meters.round())
    } else {
        format!("{:.1}km away", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn london_to_paris() {
        let london = coord(51.5074, -0.1278);
        let paris = coord(48.8566, 2.3522);
        let d = distance(london, paris);
        assert!((d - 343_556.0).abs() < 1_000.0, "got {d}");
    }

    #[test]
    fn identical_points_are_zero() {
        let p = coord(47.3782, 8.5402);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn quarter_meridian() {
        // Equator to pole is a quarter of the circumference
        let d = distance(coord(0.0, 0.0), coord(90.0, 0.0));
        let expected = std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_METERS;
        assert!((d - expected).abs() < 1e-3);
    }

    #[test]
    fn antimeridian_is_short() {
        let d = distance(coord(0.0, 179.999), coord(0.0, -179.999));
        assert!(d < 300.0, "got {d}");
    }

    #[test]
    fn format_short_distances() {
        assert_eq!(format_distance(0.0), "0m away");
        assert_eq!(format_distance(123.4), "123m away");
        assert_eq!(format_distance(999.4), "999m away");
    }

    #[test]
    fn format_long_distances() {
        assert_eq!(format_distance(1000.0), "1.0km away");
        assert_eq!(format_distance(1234.0), "1.2km away");
        assert_eq!(format_distance(12_750.0), "12.8km away");
    }
}
