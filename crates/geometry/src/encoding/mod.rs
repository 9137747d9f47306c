//! Persistence and interchange formats for routes.

pub mod linestring;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use linestring::{parse_wkt, round_km, to_wkt};
