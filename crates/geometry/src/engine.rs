//! Route geometry engine.
//!
//! A thin, configured facade over [`RoutePolyline`] and the spatial queries.
//! Every operation is a total, synchronous function; the engine holds no
//! state beyond its configuration and can be shared between threads.

use crate::encoding::linestring::round_km;
use crate::models::config::EngineConfig;
use crate::models::types::{GeoPoint, StopCandidate};
use crate::polyline::RoutePolyline;
use crate::spatial::proximity::{self, ProximityResult, StopMatch};
use crate::spatial::queries::haversine_km;

#[derive(Clone, Debug, Default)]
pub struct RouteGeometryEngine {
    config: EngineConfig,
}

impl RouteGeometryEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn append_point(&self, polyline: &RoutePolyline, point: GeoPoint) -> RoutePolyline {
        polyline.append_point(point)
    }

    pub fn remove_last_point(&self, polyline: &RoutePolyline) -> RoutePolyline {
        polyline.remove_last_point()
    }

    pub fn clear(&self, polyline: &RoutePolyline) -> RoutePolyline {
        polyline.clear()
    }

    /// Unrounded route length in kilometers
    pub fn compute_length(&self, polyline: &RoutePolyline) -> f64 {
        polyline.length_km()
    }

    /// Route length rounded to the configured number of decimals
    pub fn stored_length(&self, polyline: &RoutePolyline) -> f64 {
        round_km(polyline.length_km(), self.config.length_decimals)
    }

    pub fn point_distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        haversine_km(a, b)
    }

    /// Stops near the route using the configured tolerance and mode
    pub fn find_nearby_stops(
        &self,
        polyline: &RoutePolyline,
        candidates: &[StopCandidate],
    ) -> ProximityResult {
        self.find_nearby_stops_within(polyline, candidates, self.config.tolerance_km)
    }

    /// Stops near the route with an explicit tolerance
    pub fn find_nearby_stops_within(
        &self,
        polyline: &RoutePolyline,
        candidates: &[StopCandidate],
        tolerance_km: f64,
    ) -> ProximityResult {
        proximity::find_nearby_stops_with_mode(
            polyline,
            candidates,
            tolerance_km,
            self.config.proximity_mode,
        )
    }

    pub fn rank_stops(
        &self,
        polyline: &RoutePolyline,
        candidates: &[StopCandidate],
    ) -> Vec<StopMatch> {
        proximity::rank_stops(
            polyline,
            candidates,
            self.config.tolerance_km,
            self.config.proximity_mode,
        )
    }
}
