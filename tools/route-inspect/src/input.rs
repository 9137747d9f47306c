use anyhow::{bail, Context, Result};
use busline_geometry::encoding::geojson::{polyline_from_geojson, stops_from_geojson};
use busline_geometry::prelude::*;
use geojson::GeoJson;
use std::path::Path;

/// Read a route from a file, detecting GeoJSON by its leading '{'
pub fn read_route(path: &Path) -> Result<RoutePolyline> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route file: {}", path.display()))?;

    parse_route(&content).with_context(|| format!("Invalid route in: {}", path.display()))
}

fn parse_route(content: &str) -> Result<RoutePolyline> {
    if content.trim_start().starts_with('{') {
        let geojson: GeoJson = content.parse().context("Failed to parse GeoJSON")?;
        Ok(polyline_from_geojson(geojson)?)
    } else {
        Ok(parse_wkt(content)?)
    }
}

/// Read stop candidates from a GeoJSON file
pub fn read_stops(path: &Path) -> Result<Vec<StopCandidate>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stops file: {}", path.display()))?;

    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("Failed to parse GeoJSON from: {}", path.display()))?;

    stops_from_geojson(geojson).with_context(|| format!("Invalid stops in: {}", path.display()))
}

/// Load engine configuration; missing fields keep their defaults
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Invalid config in: {}", path.display()))
}

fn parse_config(content: &str) -> Result<EngineConfig> {
    Ok(serde_json::from_str(content)?)
}

/// Route picked for saving; a blank id counts as nothing picked
pub fn route_selection(route_id: Option<&str>) -> Option<RouteIdentifier> {
    route_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(RouteIdentifier::new)
}

pub fn validate_tolerance(tolerance_km: f64) -> Result<()> {
    if !tolerance_km.is_finite() || tolerance_km < 0.0 {
        bail!("Tolerance must be a non-negative number of kilometers, got {tolerance_km}");
    }
    Ok(())
}
