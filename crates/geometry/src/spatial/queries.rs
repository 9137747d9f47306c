//! Spatial query utilities for distance calculations.
//!
//! Uses Haversine formula for distances on Earth's surface, in kilometers.

use geo::{ClosestPoint, Line, Point};

use crate::models::types::GeoPoint;

/// Mean Earth radius used for every stored route length
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = (b.lat() - a.lat()).to_radians();
    let dlon = (b.lon() - a.lon()).to_radians();

    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    // Rounding can push h just past 1.0 for antipodal points
    let h = (sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon)
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from a point to a line segment in kilometers.
///
/// The closest point is found in degree space and then measured with
/// Haversine, which is accurate enough at city scale.
pub fn haversine_km_to_segment(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> f64 {
    // geo reports a zero-length line as Indeterminate
    if start == end {
        return haversine_km(point, start);
    }

    let line = Line::new(start, end);

    match line.closest_point(&Point::from(point)) {
        geo::Closest::Intersection(p) | geo::Closest::SinglePoint(p) => {
            haversine_km(point, p.into())
        }
        geo::Closest::Indeterminate => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_known_distance_in_tacna() {
        let a = GeoPoint::new(-71.3378, -17.6396);
        let b = GeoPoint::new(-71.3278, -17.6396);

        assert_abs_diff_eq!(haversine_km(a, b), 1.06, epsilon = 0.05);
    }

    #[test]
    fn test_long_distance() {
        // NYC to LA is approximately 3,936 km
        let nyc = GeoPoint::new(-74.0060, 40.7128);
        let la = GeoPoint::new(-118.2437, 34.0522);

        assert_abs_diff_eq!(haversine_km(nyc, la), 3936.0, epsilon = 50.0);
    }

    #[test]
    fn test_antipodal_points_are_half_circumference() {
        let a = GeoPoint::new(-180.0, -87.4853);
        let b = GeoPoint::new(0.0, 87.4853);

        let d = haversine_km(a, b);
        assert!(d.is_finite());
        assert_abs_diff_eq!(d, std::f64::consts::PI * EARTH_RADIUS_KM, epsilon = 1e-3);
    }

    #[test]
    fn test_antipodal_sweep_stays_finite() {
        for i in 0..10_000 {
            let lat = -89.99 + f64::from(i) * 0.018;
            let lon = -180.0 + f64::from(i) * 0.036;
            let d = haversine_km(GeoPoint::new(lon, lat), GeoPoint::new(lon + 180.0, -lat));
            assert!(d.is_finite() && d >= 0.0, "{d} at ({lon}, {lat})");
        }
    }

    #[test]
    fn test_symmetry_and_identity() {
        let pairs = [
            (GeoPoint::new(-71.3378, -17.6396), GeoPoint::new(-71.2, -17.9)),
            (GeoPoint::new(0.0, 0.0), GeoPoint::new(179.9, 0.0)),
            (GeoPoint::new(12.5, 89.9), GeoPoint::new(-167.5, 89.9)),
        ];

        for (a, b) in pairs {
            assert_abs_diff_eq!(haversine_km(a, b), haversine_km(b, a), epsilon = 1e-12);
            assert_eq!(haversine_km(a, a), 0.0);
            assert!(haversine_km(a, b) >= 0.0);
        }
    }

    #[test]
    fn test_distance_to_segment() {
        let start = GeoPoint::new(-74.0, 40.6);
        let end = GeoPoint::new(-74.0, 40.8);

        // Point is on the segment
        let on_line = haversine_km_to_segment(GeoPoint::new(-74.0, 40.7), start, end);
        assert!(on_line < 0.1);

        // Beyond the end, the closest point is the endpoint itself
        let beyond = GeoPoint::new(-74.0, 40.9);
        assert_abs_diff_eq!(
            haversine_km_to_segment(beyond, start, end),
            haversine_km(beyond, end),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_degenerate_segment() {
        let p = GeoPoint::new(-71.3378, -17.6396);
        let q = GeoPoint::new(-71.3278, -17.6396);
        assert_abs_diff_eq!(haversine_km_to_segment(q, p, p), haversine_km(q, p), epsilon = 1e-9);
    }
}
