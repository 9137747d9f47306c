//! Route-drawing session.
//!
//! Tracks one user drawing one route: taps append points, undo drops the
//! most recent one, and saving turns the polyline into a [`SavedRoute`] for
//! the data store. Validation that belongs to the form (enough points, a
//! route picked) lives here so the engine itself stays total.
//!
//! ```text
//! Empty ──append──▶ Drawing ──save──▶ Saved
//!   ▲                 │  │
//!   └──undo (last)────┘  └──abandon──▶ Abandoned
//!
//! clear: any state ──▶ Empty
//! ```

use tracing::debug;

use crate::encoding::linestring::to_wkt;
use crate::engine::RouteGeometryEngine;
use crate::identifiers::RouteIdentifier;
use crate::models::traits::RouteSink;
use crate::models::types::*;
use crate::polyline::{RoutePolyline, MIN_PERSISTABLE_POINTS};
use crate::spatial::proximity::ProximityResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Empty,
    Drawing,
    Saved,
    Abandoned,
}

impl SessionState {
    fn accepts_edits(self) -> bool {
        matches!(self, Self::Empty | Self::Drawing)
    }
}

#[derive(Clone, Debug)]
pub struct RouteDrawingSession {
    engine: RouteGeometryEngine,
    polyline: RoutePolyline,
    state: SessionState,
}

impl RouteDrawingSession {
    pub fn new(engine: RouteGeometryEngine) -> Self {
        Self {
            engine,
            polyline: RoutePolyline::new(),
            state: SessionState::Empty,
        }
    }

    /// Resume editing an already drawn polyline
    pub fn from_polyline(engine: RouteGeometryEngine, polyline: RoutePolyline) -> Self {
        let state = if polyline.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Drawing
        };
        Self {
            engine,
            polyline,
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn polyline(&self) -> &RoutePolyline {
        &self.polyline
    }

    pub fn engine(&self) -> &RouteGeometryEngine {
        &self.engine
    }

    /// Live length read-out, unrounded
    pub fn length_km(&self) -> f64 {
        self.engine.compute_length(&self.polyline)
    }

    pub fn nearby_stops(&self, candidates: &[StopCandidate]) -> ProximityResult {
        self.engine.find_nearby_stops(&self.polyline, candidates)
    }

    pub fn append_point(&mut self, point: GeoPoint) -> Result<&RoutePolyline> {
        self.ensure_open()?;
        self.polyline = self.engine.append_point(&self.polyline, point);
        self.state = SessionState::Drawing;
        debug!(
            points = self.polyline.len(),
            lon = point.lon(),
            lat = point.lat(),
            "point appended"
        );
        Ok(&self.polyline)
    }

    pub fn remove_last_point(&mut self) -> Result<&RoutePolyline> {
        self.ensure_open()?;
        self.polyline = self.engine.remove_last_point(&self.polyline);
        if self.polyline.is_empty() {
            self.state = SessionState::Empty;
        }
        debug!(points = self.polyline.len(), "last point removed");
        Ok(&self.polyline)
    }

    /// Drop every point; reopens a saved or abandoned session
    pub fn clear(&mut self) {
        self.polyline = self.engine.clear(&self.polyline);
        self.state = SessionState::Empty;
        debug!("session cleared");
    }

    /// Discard the drawing without saving
    pub fn abandon(&mut self) -> Result<()> {
        self.ensure_open()?;
        debug!(points = self.polyline.len(), "session abandoned");
        self.polyline = self.engine.clear(&self.polyline);
        self.state = SessionState::Abandoned;
        Ok(())
    }

    /// Validate and build the saved record, moving the session to `Saved`
    pub fn save(
        &mut self,
        route_id: Option<RouteIdentifier>,
        candidates: &[StopCandidate],
    ) -> Result<SavedRoute> {
        let record = self.prepare(route_id, candidates)?;
        self.mark_saved(&record);
        Ok(record)
    }

    /// Like [`save`](Self::save), but hands the record to `sink` first.
    ///
    /// If the sink fails the session stays in `Drawing`.
    pub fn save_into(
        &mut self,
        route_id: Option<RouteIdentifier>,
        candidates: &[StopCandidate],
        sink: &dyn RouteSink,
    ) -> Result<SavedRoute> {
        let record = self.prepare(route_id, candidates)?;
        sink.persist_route(&record)?;
        self.mark_saved(&record);
        Ok(record)
    }

    fn prepare(
        &self,
        route_id: Option<RouteIdentifier>,
        candidates: &[StopCandidate],
    ) -> Result<SavedRoute> {
        self.ensure_open()?;

        let route_id = route_id.ok_or(GeometryError::MissingSelection)?;

        if self.polyline.len() < MIN_PERSISTABLE_POINTS {
            debug!(%route_id, points = self.polyline.len(), "save rejected");
            return Err(GeometryError::InvalidSaveAttempt {
                points: self.polyline.len(),
            });
        }

        Ok(SavedRoute {
            route_id,
            geometry: to_wkt(&self.polyline),
            length_km: self.engine.stored_length(&self.polyline),
            stop_ids: self.nearby_stops(candidates),
        })
    }

    fn mark_saved(&mut self, record: &SavedRoute) {
        self.state = SessionState::Saved;
        debug!(
            route_id = %record.route_id,
            length_km = record.length_km,
            stops = record.stop_ids.len(),
            "route saved"
        );
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state.accepts_edits() {
            Ok(())
        } else {
            Err(GeometryError::SessionClosed { state: self.state })
        }
    }
}

impl Default for RouteDrawingSession {
    fn default() -> Self {
        Self::new(RouteGeometryEngine::default())
    }
}
