use anyhow::{Context, Result};
use busline_geometry::encoding::geojson::overlay_feature_collection;
use busline_geometry::prelude::*;
use geojson::GeoJson;
use serde::Serialize;
use std::path::Path;

/// What the tool reports when no route id is given
#[derive(Debug, Serialize)]
pub struct RouteSummary<'a> {
    pub points: usize,
    pub length_km: f64,
    pub stored_length_km: f64,
    pub persistable: bool,
    pub tolerance_km: f64,
    pub proximity_mode: ProximityMode,
    pub stop_ids: &'a ProximityResult,
}

impl<'a> RouteSummary<'a> {
    pub fn new(
        engine: &RouteGeometryEngine,
        route: &RoutePolyline,
        nearby: &'a ProximityResult,
    ) -> Self {
        Self {
            points: route.len(),
            length_km: engine.compute_length(route),
            stored_length_km: engine.stored_length(route),
            persistable: route.is_persistable(),
            tolerance_km: engine.config().tolerance_km,
            proximity_mode: engine.config().proximity_mode,
            stop_ids: nearby,
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Write the route and every stop as one GeoJSON FeatureCollection
pub fn write_overlay_geojson(
    output_path: &Path,
    route: &RoutePolyline,
    length_km: f64,
    stops: &[StopCandidate],
    nearby: &ProximityResult,
) -> Result<()> {
    log::info!(
        "Writing route and {} stops to {}",
        stops.len(),
        output_path.display()
    );

    let feature_collection = overlay_feature_collection(route, length_km, stops, nearby);
    let geojson = GeoJson::from(feature_collection);
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
