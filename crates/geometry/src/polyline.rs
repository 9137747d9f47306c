//! Editable route polyline.
//!
//! A [`RoutePolyline`] is an immutable value: appending, undoing, and
//! clearing each return a new polyline and leave the original untouched.
//! Points live behind an `Arc<[GeoPoint]>`, so clones are cheap and a
//! polyline can be shared freely between threads.

use std::sync::Arc;

use geo::{Coord, LineString};

use crate::models::types::GeoPoint;
use crate::spatial::queries::haversine_km;

/// Minimum number of points for a route that can be persisted
pub const MIN_PERSISTABLE_POINTS: usize = 2;

#[derive(Clone, Debug)]
pub struct RoutePolyline {
    points: Arc<[GeoPoint]>,
}

impl RoutePolyline {
    pub fn new() -> Self {
        Self {
            points: Arc::from(Vec::new()),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = GeoPoint>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<GeoPoint> {
        self.points.last().copied()
    }

    /// New polyline with `point` added at the end
    pub fn append_point(&self, point: GeoPoint) -> Self {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points);
        points.push(point);
        Self {
            points: points.into(),
        }
    }

    /// New polyline without the most recent point (undo).
    ///
    /// An empty polyline stays empty.
    pub fn remove_last_point(&self) -> Self {
        match self.points.split_last() {
            Some((_, rest)) => Self {
                points: rest.into(),
            },
            None => self.clone(),
        }
    }

    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Consecutive point pairs, first to last
    pub fn segments(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn segment_lengths_km(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments().map(|(a, b)| haversine_km(a, b))
    }

    /// Total length in kilometers, summed first segment to last.
    ///
    /// Zero for fewer than two points.
    pub fn length_km(&self) -> f64 {
        self.segment_lengths_km().sum()
    }

    pub fn is_persistable(&self) -> bool {
        self.points.len() >= MIN_PERSISTABLE_POINTS
    }

    pub fn to_line_string(&self) -> LineString {
        LineString::from(
            self.points
                .iter()
                .map(|p| Coord::from(*p))
                .collect::<Vec<_>>(),
        )
    }
}

impl Default for RoutePolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for RoutePolyline {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.points, &other.points) || self.points == other.points
    }
}

impl From<LineString> for RoutePolyline {
    fn from(line: LineString) -> Self {
        Self::from_points(line.0.into_iter().map(GeoPoint::from))
    }
}

impl FromIterator<GeoPoint> for RoutePolyline {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::queries::haversine_km;
    use approx::assert_abs_diff_eq;

    fn tacna_line() -> RoutePolyline {
        RoutePolyline::from_points([
            GeoPoint::new(-71.3378, -17.6396),
            GeoPoint::new(-71.3278, -17.6396),
            GeoPoint::new(-71.3178, -17.6396),
        ])
    }

    #[test]
    fn test_degenerate_lengths() {
        assert_eq!(RoutePolyline::new().length_km(), 0.0);

        let single = RoutePolyline::new().append_point(GeoPoint::new(-71.3378, -17.6396));
        assert_eq!(single.length_km(), 0.0);
        assert!(!single.is_persistable());
    }

    #[test]
    fn test_three_point_length() {
        let line = tacna_line();
        assert!(line.is_persistable());
        assert_abs_diff_eq!(line.length_km(), 2.12, epsilon = 0.1);
    }

    #[test]
    fn test_length_is_in_order_sum() {
        let line = tacna_line();
        let p = line.points();
        let expected = haversine_km(p[0], p[1]) + haversine_km(p[1], p[2]);
        assert_eq!(line.length_km(), expected);

        // Visiting the far end first doubles back over the middle
        let reordered = RoutePolyline::from_points([p[0], p[2], p[1]]);
        assert!((reordered.length_km() - line.length_km()).abs() > 0.5);
    }

    #[test]
    fn test_append_then_undo_round_trip() {
        let base = tacna_line();
        let edited = base.append_point(GeoPoint::new(-71.30, -17.65));

        assert_eq!(edited.len(), 4);
        assert_eq!(base.len(), 3); // original untouched
        assert_eq!(edited.remove_last_point(), base);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let empty = RoutePolyline::new();
        assert_eq!(empty.remove_last_point(), empty);
        assert!(empty.remove_last_point().is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let line = tacna_line();
        assert_eq!(line.clear(), RoutePolyline::new());
        assert_eq!(line.clear().clear(), line.clear());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let p = GeoPoint::new(-71.3378, -17.6396);
        let line = RoutePolyline::new().append_point(p).append_point(p);
        assert_eq!(line.len(), 2);
        assert_eq!(line.length_km(), 0.0);
    }

    #[test]
    fn test_line_string_round_trip_keeps_order() {
        let line = tacna_line();
        let back = RoutePolyline::from(line.to_line_string());
        assert_eq!(back, line);
        assert_eq!(back.first(), Some(GeoPoint::new(-71.3378, -17.6396)));
        assert_eq!(back.last(), Some(GeoPoint::new(-71.3178, -17.6396)));
    }
}
