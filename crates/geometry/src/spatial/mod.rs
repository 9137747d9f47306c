//! Distance and proximity queries.

pub mod proximity;
pub mod queries;

pub use proximity::{find_nearby_stops, find_nearby_stops_with_mode, ProximityResult, StopMatch};
pub use queries::{haversine_km, haversine_km_to_segment, EARTH_RADIUS_KM};
