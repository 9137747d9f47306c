//! GeoJSON interchange with the map surface.
//!
//! Routes travel as `LineString` geometries and stops as `Point` features.
//! The overlay collection bundles both so a map can draw the route and
//! highlight matched stops in one layer.

use geojson::{feature::Id, Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde_json::json;

use crate::models::types::{GeoPoint, GeometryError, Result, StopCandidate};
use crate::polyline::RoutePolyline;
use crate::spatial::proximity::ProximityResult;

/// Convert a polyline to a GeoJSON LineString geometry
pub fn polyline_to_geometry(polyline: &RoutePolyline) -> Geometry {
    let coords: Vec<Vec<f64>> = polyline
        .points()
        .iter()
        .map(|p| vec![p.lon(), p.lat()])
        .collect();

    Geometry::new(Value::LineString(coords))
}

/// Read a route from a Geometry, a Feature, or the first LineString in a collection
pub fn polyline_from_geojson(geojson: GeoJson) -> Result<RoutePolyline> {
    match geojson {
        GeoJson::Geometry(geom) => geometry_to_polyline(geom.value),
        GeoJson::Feature(feature) => match feature.geometry {
            Some(geom) => geometry_to_polyline(geom.value),
            None => Err(invalid("Feature has no geometry")),
        },
        GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .filter_map(|f| f.geometry)
            .find(|g| matches!(g.value, Value::LineString(_)))
            .map(|g| geometry_to_polyline(g.value))
            .unwrap_or_else(|| Err(invalid("No LineString found in FeatureCollection"))),
    }
}

fn geometry_to_polyline(value: Value) -> Result<RoutePolyline> {
    match value {
        Value::LineString(coords) => coords.iter().map(|c| position_to_point(c)).collect(),
        _ => Err(invalid("route geometry must be a LineString")),
    }
}

/// Read stop candidates from Point features.
///
/// The identifier comes from `properties.id`, falling back to the feature id.
/// The name comes from `properties.name`, falling back to the identifier.
pub fn stops_from_geojson(geojson: GeoJson) -> Result<Vec<StopCandidate>> {
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(invalid("stops must be Features carrying an id"));
        }
    };

    features.iter().map(feature_to_stop).collect()
}

fn feature_to_stop(feature: &Feature) -> Result<StopCandidate> {
    let id = feature
        .property("id")
        .and_then(json_to_string)
        .or_else(|| match &feature.id {
            Some(Id::String(s)) => Some(s.clone()),
            Some(Id::Number(n)) => Some(n.to_string()),
            None => None,
        })
        .ok_or_else(|| invalid("stop feature has no id"))?;

    let location = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(position)) => position_to_point(position)?,
        _ => return Err(invalid(format!("stop '{id}' is not a Point"))),
    };

    let name = feature
        .property("name")
        .and_then(json_to_string)
        .unwrap_or_else(|| id.clone());

    Ok(StopCandidate::new(id, name, location))
}

fn json_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn position_to_point(position: &[f64]) -> Result<GeoPoint> {
    match position {
        [lon, lat, ..] => GeoPoint::checked(*lon, *lat),
        _ => Err(invalid("position needs at least 2 values")),
    }
}

/// Route plus stops as one FeatureCollection, each stop flagged with `near_route`
pub fn overlay_feature_collection(
    polyline: &RoutePolyline,
    length_km: f64,
    stops: &[StopCandidate],
    nearby: &ProximityResult,
) -> FeatureCollection {
    let mut route_props = serde_json::Map::new();
    route_props.insert("feature_type".to_string(), json!("route"));
    route_props.insert("length_km".to_string(), json!(length_km));
    route_props.insert("point_count".to_string(), json!(polyline.len()));

    let mut features = vec![Feature {
        bbox: None,
        geometry: Some(polyline_to_geometry(polyline)),
        id: None,
        properties: Some(route_props),
        foreign_members: None,
    }];

    features.extend(stops.iter().map(|stop| {
        let mut props = serde_json::Map::new();
        props.insert("feature_type".to_string(), json!("stop"));
        props.insert("id".to_string(), json!(stop.id.as_str()));
        props.insert("name".to_string(), json!(stop.name));
        props.insert("near_route".to_string(), json!(nearby.contains(&stop.id)));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                stop.location.lon(),
                stop.location.lat(),
            ]))),
            id: None,
            properties: Some(props),
            foreign_members: None,
        }
    }));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn invalid(msg: impl Into<String>) -> GeometryError {
    GeometryError::InvalidGeoJson(msg.into())
}
