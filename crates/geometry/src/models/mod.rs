//! Geometry value types, boundary traits, and engine configuration.

pub mod config;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::{EngineConfig, ProximityMode, DEFAULT_LENGTH_DECIMALS, DEFAULT_TOLERANCE_KM};
pub use traits::{RouteSink, StopSource};
pub use types::{GeoPoint, GeometryError, Result, SavedRoute, StopCandidate};
