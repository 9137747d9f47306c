//! # busline-geometry
//!
//! Route drawing, length, and stop proximity for bus routes.
//!
//! ## Features
//!
//! - **Immutable polylines**: every edit returns a new value, safe to share
//! - **Haversine lengths**: great-circle distances with R = 6371 km
//! - **Stop proximity**: which stops sit within a tolerance of a drawn route
//! - **Drawing sessions**: save validation and the record sent to storage
//! - **Interchange**: WKT linestrings, plus GeoJSON with the `geojson` feature
//!
//! ## Example
//!
//! ```
//! use busline_geometry::prelude::*;
//!
//! let engine = RouteGeometryEngine::default();
//! let mut route = RoutePolyline::new();
//! for lon in [-71.3378, -71.3278, -71.3178] {
//!     route = engine.append_point(&route, GeoPoint::new(lon, -17.6396));
//! }
//!
//! let stops = vec![
//!     StopCandidate::new("terminal", "Terminal", GeoPoint::new(-71.3378, -17.6396)),
//!     StopCandidate::new("midway", "Midway", GeoPoint::new(-71.3328, -17.6396)),
//! ];
//!
//! assert!((engine.compute_length(&route) - 2.12).abs() < 0.05);
//!
//! // Only clicked points count, so the stop between them is not matched
//! let nearby = engine.find_nearby_stops(&route, &stops);
//! assert_eq!(nearby.len(), 1);
//! assert!(nearby.contains(&StopIdentifier::new("terminal")));
//! ```

pub mod encoding;
pub mod engine;
pub mod identifiers;
pub mod models;
pub mod polyline;
pub mod provider;
pub mod session;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::encoding::linestring::{parse_wkt, round_km, to_wkt};
    pub use crate::engine::RouteGeometryEngine;
    pub use crate::identifiers::*;
    pub use crate::models::{config::*, traits::*, types::*};
    pub use crate::polyline::RoutePolyline;
    pub use crate::provider::StaticStopProvider;
    pub use crate::session::{RouteDrawingSession, SessionState};
    pub use crate::spatial::proximity::{ProximityResult, StopMatch};
}

pub use prelude::*;
