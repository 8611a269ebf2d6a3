//! Geospatial constants and helpers for proximity search.
//!
//! The item discovery query filters and sorts by great-circle distance from a
//! caller-supplied origin. Distance is computed with the haversine formula,
//! both here (for validation and tests) and as the equivalent SQL expression
//! in the repository layer, so no PostGIS extension is required.

/// Mean Earth radius in meters (IUGG value, same sphere the database query uses).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default search radius in kilometers when the caller supplies coordinates
/// without an explicit radius.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Minimum accepted search radius in kilometers.
pub const MIN_RADIUS_KM: f64 = 0.1;

/// Maximum accepted search radius in kilometers.
pub const MAX_RADIUS_KM: f64 = 50.0;

/// A longitude/latitude pair in degrees (WGS 84 order: x = longitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lng: f64,
    pub lat: f64,
}

impl Point {
    /// Construct a point, validating both coordinates.
    pub fn new(lng: f64, lat: f64) -> Result<Self, String> {
        validate_coordinates(lng, lat)?;
        Ok(Self { lng, lat })
    }
}

/// Validate a longitude/latitude pair.
///
/// Longitude must lie in [-180, 180] and latitude in [-90, 90]. NaN fails
/// both checks.
pub fn validate_coordinates(lng: f64, lat: f64) -> Result<(), String> {
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("Longitude must be between -180 and 180, got {lng}"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("Latitude must be between -90 and 90, got {lat}"));
    }
    Ok(())
}

/// Clamp a caller-supplied radius in kilometers to the accepted range,
/// falling back to [`DEFAULT_RADIUS_KM`] when absent.
pub fn clamp_radius_km(radius_km: Option<f64>) -> f64 {
    radius_km
        .unwrap_or(DEFAULT_RADIUS_KM)
        .clamp(MIN_RADIUS_KM, MAX_RADIUS_KM)
}

/// Convert kilometers to meters.
pub fn km_to_m(km: f64) -> f64 {
    km * 1000.0
}

/// Great-circle distance in meters between two points, haversine formula.
///
/// Mirrors the SQL expression used by the discovery query so distances
/// asserted in tests match what the database returns.
pub fn haversine_distance_m(from: Point, to: Point) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = (to.lat - from.lat).to_radians();
    let dlng = (to.lng - from.lng).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lng: f64, lat: f64) -> Point {
        Point { lng, lat }
    }

    // -- validate_coordinates ------------------------------------------------

    #[test]
    fn valid_coordinates_pass() {
        assert!(validate_coordinates(0.0, 0.0).is_ok());
        assert!(validate_coordinates(-180.0, -90.0).is_ok());
        assert!(validate_coordinates(180.0, 90.0).is_ok());
        assert!(validate_coordinates(-122.4194, 37.7749).is_ok());
    }

    #[test]
    fn out_of_range_longitude_fails() {
        let err = validate_coordinates(181.0, 0.0).unwrap_err();
        assert!(err.contains("Longitude"));
        assert!(validate_coordinates(-180.1, 0.0).is_err());
    }

    #[test]
    fn out_of_range_latitude_fails() {
        let err = validate_coordinates(0.0, 90.5).unwrap_err();
        assert!(err.contains("Latitude"));
        assert!(validate_coordinates(0.0, -91.0).is_err());
    }

    #[test]
    fn nan_coordinates_fail() {
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::NAN).is_err());
    }

    // -- clamp_radius_km -----------------------------------------------------

    #[test]
    fn radius_defaults_when_absent() {
        assert_eq!(clamp_radius_km(None), DEFAULT_RADIUS_KM);
    }

    #[test]
    fn radius_clamped_to_bounds() {
        assert_eq!(clamp_radius_km(Some(0.01)), MIN_RADIUS_KM);
        assert_eq!(clamp_radius_km(Some(500.0)), MAX_RADIUS_KM);
        assert_eq!(clamp_radius_km(Some(12.5)), 12.5);
    }

    // -- haversine_distance_m ------------------------------------------------

    #[test]
    fn distance_to_self_is_zero() {
        let origin = p(-122.4194, 37.7749);
        assert_eq!(haversine_distance_m(origin, origin), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = p(-122.4194, 37.7749);
        let b = p(-122.2712, 37.8044);
        let ab = haversine_distance_m(a, b);
        let ba = haversine_distance_m(b, a);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn known_distance_san_francisco_to_oakland() {
        // SF city hall to Oakland city hall, roughly 13.4 km.
        let sf = p(-122.4194, 37.7793);
        let oakland = p(-122.2711, 37.8044);
        let d = haversine_distance_m(sf, oakland);
        assert!((13_000.0..14_000.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_latitude_is_about_111_km() {
        let d = haversine_distance_m(p(0.0, 0.0), p(0.0, 1.0));
        assert!((110_000.0..112_500.0).contains(&d), "got {d}");
    }

    #[test]
    fn nearby_points_within_default_radius() {
        // Two points ~1.5 km apart must fall inside the 5 km default radius.
        let a = p(-122.4194, 37.7749);
        let b = p(-122.4068, 37.7858);
        let d = haversine_distance_m(a, b);
        assert!(d <= km_to_m(DEFAULT_RADIUS_KM), "got {d}");
    }
}
