//! Core value types and errors for route geometry.

use geo::{Coord, Point};

use crate::identifiers::*;
use crate::session::SessionState;
use crate::spatial::proximity::ProximityResult;

// ============================================================================
// Data Structures
// ============================================================================

/// A WGS84 coordinate in decimal degrees.
///
/// Stored as (longitude, latitude), matching the x/y order used by `geo`
/// and by the persisted linestring text.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    /// Build a point without range checks; map clicks are trusted.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Build a point from untrusted input, rejecting NaN and infinities.
    pub fn checked(lon: f64, lat: f64) -> Result<Self> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate { lon, lat });
        }
        Ok(Self::new(lon, lat))
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl From<Point> for GeoPoint {
    fn from(point: Point) -> Self {
        Self::new(point.x(), point.y())
    }
}

impl From<Coord> for GeoPoint {
    fn from(coord: Coord) -> Self {
        Self::new(coord.x, coord.y)
    }
}

impl From<GeoPoint> for Point {
    fn from(point: GeoPoint) -> Self {
        Point::new(point.lon, point.lat)
    }
}

impl From<GeoPoint> for Coord {
    fn from(point: GeoPoint) -> Self {
        Coord {
            x: point.lon,
            y: point.lat,
        }
    }
}

/// A transit stop that may be associated with a route.
///
/// Owned by the data store; the engine only reads `location`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopCandidate {
    pub id: StopIdentifier,
    pub name: String,
    pub location: GeoPoint,
}

impl StopCandidate {
    pub fn new(id: impl Into<StopIdentifier>, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

/// The record handed to the data store when a drawn route is saved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SavedRoute {
    pub route_id: RouteIdentifier,
    /// `LINESTRING(lon lat,...)` text
    pub geometry: String,
    /// Total length, already rounded for storage
    pub length_km: f64,
    pub stop_ids: ProximityResult,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("A route needs at least 2 points to be saved, got {points}")]
    InvalidSaveAttempt { points: usize },

    #[error("No route selected for this geometry")]
    MissingSelection,

    #[error("Invalid linestring: {0}")]
    InvalidLinestring(String),

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("Coordinate is not finite: ({lon}, {lat})")]
    NonFiniteCoordinate { lon: f64, lat: f64 },

    #[error("Drawing session is {state:?} and no longer accepts edits")]
    SessionClosed { state: SessionState },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
