//! Stop-to-route proximity.
//!
//! Every query is a plain scan over route points × candidates. Routes and
//! stop sets are small (tens to low hundreds each), so there is no index.
//!
//! ## Measuring modes
//!
//! - [`ProximityMode::Vertex`] measures a stop against the clicked points only.
//!   A stop halfway along a long segment can be missed. This is the stored
//!   behaviour and the default.
//! - [`ProximityMode::Segment`] measures against the closest point of every
//!   segment, so such a stop is found.

use std::collections::HashSet;

use tracing::trace;

use crate::identifiers::StopIdentifier;
use crate::models::config::ProximityMode;
use crate::models::types::{GeoPoint, StopCandidate};
use crate::polyline::RoutePolyline;
use crate::spatial::queries::{haversine_km, haversine_km_to_segment};

/// Identifiers of stops found near a route, in candidate order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProximityResult {
    ids: Vec<StopIdentifier>,
}

impl ProximityResult {
    pub fn ids(&self) -> &[StopIdentifier] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &StopIdentifier) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StopIdentifier> {
        self.ids.iter()
    }
}

impl IntoIterator for ProximityResult {
    type Item = StopIdentifier;
    type IntoIter = std::vec::IntoIter<StopIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProximityResult {
    type Item = &'a StopIdentifier;
    type IntoIter = std::slice::Iter<'a, StopIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl FromIterator<StopIdentifier> for ProximityResult {
    fn from_iter<I: IntoIterator<Item = StopIdentifier>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// A matched stop together with its distance to the route
#[derive(Clone, Debug, PartialEq)]
pub struct StopMatch {
    pub id: StopIdentifier,
    pub distance_km: f64,
}

/// Distance from `point` to the closest clicked point, `None` for an empty route
pub fn nearest_vertex_distance_km(polyline: &RoutePolyline, point: GeoPoint) -> Option<f64> {
    polyline
        .points()
        .iter()
        .map(|vertex| haversine_km(*vertex, point))
        .min_by(f64::total_cmp)
}

/// Distance from `point` to the route under the given mode, `None` for an empty route
pub fn distance_to_route_km(
    polyline: &RoutePolyline,
    point: GeoPoint,
    mode: ProximityMode,
) -> Option<f64> {
    match mode {
        ProximityMode::Vertex => nearest_vertex_distance_km(polyline, point),
        // A single point has no segments to measure against
        ProximityMode::Segment if polyline.len() < 2 => nearest_vertex_distance_km(polyline, point),
        ProximityMode::Segment => polyline
            .segments()
            .map(|(start, end)| haversine_km_to_segment(point, start, end))
            .min_by(f64::total_cmp),
    }
}

fn within_tolerance(
    polyline: &RoutePolyline,
    point: GeoPoint,
    tolerance_km: f64,
    mode: ProximityMode,
) -> bool {
    match mode {
        ProximityMode::Vertex => polyline
            .points()
            .iter()
            .any(|vertex| haversine_km(*vertex, point) <= tolerance_km),
        ProximityMode::Segment => {
            distance_to_route_km(polyline, point, mode).is_some_and(|d| d <= tolerance_km)
        }
    }
}

/// Stops with any route vertex within `tolerance_km`.
///
/// Candidate order is preserved; a repeated identifier is reported once.
pub fn find_nearby_stops(
    polyline: &RoutePolyline,
    candidates: &[StopCandidate],
    tolerance_km: f64,
) -> ProximityResult {
    find_nearby_stops_with_mode(polyline, candidates, tolerance_km, ProximityMode::Vertex)
}

pub fn find_nearby_stops_with_mode(
    polyline: &RoutePolyline,
    candidates: &[StopCandidate],
    tolerance_km: f64,
    mode: ProximityMode,
) -> ProximityResult {
    if polyline.is_empty() {
        return ProximityResult::default();
    }

    let mut seen = HashSet::new();
    let result: ProximityResult = candidates
        .iter()
        .filter(|stop| within_tolerance(polyline, stop.location, tolerance_km, mode))
        .filter(|stop| seen.insert(stop.id.clone()))
        .map(|stop| stop.id.clone())
        .collect();

    trace!(
        points = polyline.len(),
        candidates = candidates.len(),
        matched = result.len(),
        tolerance_km,
        ?mode,
        "proximity scan"
    );

    result
}

/// Like [`find_nearby_stops_with_mode`], but keeps each stop's distance
pub fn rank_stops(
    polyline: &RoutePolyline,
    candidates: &[StopCandidate],
    tolerance_km: f64,
    mode: ProximityMode,
) -> Vec<StopMatch> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter_map(|stop| {
            let distance_km = distance_to_route_km(polyline, stop.location, mode)?;
            (distance_km <= tolerance_km).then(|| StopMatch {
                id: stop.id.clone(),
                distance_km,
            })
        })
        .filter(|m| seen.insert(m.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tacna_line() -> RoutePolyline {
        RoutePolyline::from_points([
            GeoPoint::new(-71.3378, -17.6396),
            GeoPoint::new(-71.3278, -17.6396),
            GeoPoint::new(-71.3178, -17.6396),
        ])
    }

    fn stops() -> Vec<StopCandidate> {
        vec![
            // ~50 m north of the middle vertex
            StopCandidate::new("plaza", "Plaza de Armas", GeoPoint::new(-71.3278, -17.6391)),
            // midpoint of the first segment
            StopCandidate::new("midway", "Av. Bolognesi", GeoPoint::new(-71.3328, -17.6396)),
            // far away
            StopCandidate::new("airport", "Aeropuerto", GeoPoint::new(-70.2758, -18.0533)),
            // exactly on the first vertex
            StopCandidate::new("terminal", "Terminal", GeoPoint::new(-71.3378, -17.6396)),
        ]
    }

    #[test]
    fn test_vertex_mode_scenario() {
        let line = tacna_line();
        let result = find_nearby_stops(&line, &stops(), 0.1);

        let ids: Vec<&str> = result.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["plaza", "terminal"]);
        assert!(!result.contains(&StopIdentifier::new("midway")));
    }

    #[test]
    fn test_midpoint_distance_is_half_segment() {
        let line = tacna_line();
        let d = nearest_vertex_distance_km(&line, GeoPoint::new(-71.3328, -17.6396)).unwrap();
        assert_abs_diff_eq!(d, 0.53, epsilon = 0.05);
    }

    #[test]
    fn test_segment_mode_finds_midpoint() {
        let line = tacna_line();
        let result = find_nearby_stops_with_mode(&line, &stops(), 0.1, ProximityMode::Segment);

        let ids: Vec<&str> = result.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["plaza", "midway", "terminal"]);
    }

    #[test]
    fn test_empty_polyline_matches_nothing() {
        let empty = RoutePolyline::new();
        for tolerance in [0.0, 0.1, 1_000.0, f64::INFINITY] {
            assert!(find_nearby_stops(&empty, &stops(), tolerance).is_empty());
            assert!(
                find_nearby_stops_with_mode(&empty, &stops(), tolerance, ProximityMode::Segment)
                    .is_empty()
            );
        }
        assert_eq!(nearest_vertex_distance_km(&empty, GeoPoint::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_tolerance_is_monotonic() {
        let line = tacna_line();
        let candidates = stops();
        let tolerances = [-1.0, 0.0, 0.01, 0.1, 0.5, 0.6, 10.0, 500.0, f64::INFINITY];

        for mode in [ProximityMode::Vertex, ProximityMode::Segment] {
            let mut previous = ProximityResult::default();
            for tolerance in tolerances {
                let current = find_nearby_stops_with_mode(&line, &candidates, tolerance, mode);
                assert!(
                    previous.iter().all(|id| current.contains(id)),
                    "{mode:?} shrank at tolerance {tolerance}"
                );
                previous = current;
            }
            assert_eq!(previous.len(), candidates.len());
        }
    }

    #[test]
    fn test_nan_tolerance_matches_nothing() {
        assert!(find_nearby_stops(&tacna_line(), &stops(), f64::NAN).is_empty());
    }

    #[test]
    fn test_duplicate_candidates_reported_once() {
        let line = tacna_line();
        let mut candidates = stops();
        candidates.push(StopCandidate::new(
            "plaza",
            "Plaza de Armas (copy)",
            GeoPoint::new(-71.3278, -17.6396),
        ));

        let result = find_nearby_stops(&line, &candidates, 0.1);
        assert_eq!(result.iter().filter(|id| id.as_str() == "plaza").count(), 1);
    }

    #[test]
    fn test_rank_stops_reports_distances() {
        let line = tacna_line();
        let ranked = rank_stops(&line, &stops(), 0.1, ProximityMode::Vertex);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id.as_str(), "plaza");
        assert_abs_diff_eq!(ranked[0].distance_km, 0.0556, epsilon = 0.005);
        assert_eq!(ranked[1].id.as_str(), "terminal");
        assert_eq!(ranked[1].distance_km, 0.0);
    }

    #[test]
    fn test_single_point_segment_mode_falls_back() {
        let line = RoutePolyline::new().append_point(GeoPoint::new(-71.3378, -17.6396));
        let p = GeoPoint::new(-71.3278, -17.6396);
        assert_eq!(
            distance_to_route_km(&line, p, ProximityMode::Segment),
            distance_to_route_km(&line, p, ProximityMode::Vertex)
        );
    }
}
