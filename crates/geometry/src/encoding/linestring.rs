//! Text encoding used when a route is persisted.
//!
//! Routes are stored as WKT, `LINESTRING(lon1 lat1,lon2 lat2,...)`. The
//! reader also accepts the `SRID=4326;` prefix that PostGIS emits for EWKT.

use crate::models::types::{GeoPoint, GeometryError, Result};
use crate::polyline::RoutePolyline;

const KEYWORD: &str = "LINESTRING";
const EMPTY: &str = "EMPTY";

/// Encode a polyline as WKT
pub fn to_wkt(polyline: &RoutePolyline) -> String {
    if polyline.is_empty() {
        return format!("{KEYWORD} {EMPTY}");
    }

    let coords: Vec<String> = polyline
        .points()
        .iter()
        .map(|p| format!("{} {}", p.lon(), p.lat()))
        .collect();

    format!("{KEYWORD}({})", coords.join(","))
}

/// Decode WKT or EWKT linestring text
pub fn parse_wkt(text: &str) -> Result<RoutePolyline> {
    let mut body = text.trim();

    if let Some(rest) = strip_keyword(body, "SRID=") {
        let (srid, geometry) = rest
            .split_once(';')
            .ok_or_else(|| invalid("SRID prefix is not followed by ';'"))?;
        srid.trim()
            .parse::<u32>()
            .map_err(|_| invalid(format!("bad SRID '{}'", srid.trim())))?;
        body = geometry.trim();
    }

    let body = strip_keyword(body, KEYWORD)
        .ok_or_else(|| invalid(format!("expected {KEYWORD}, got '{}'", truncate(body))))?
        .trim();

    if body.eq_ignore_ascii_case(EMPTY) {
        return Ok(RoutePolyline::new());
    }

    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| invalid("coordinates must be wrapped in parentheses"))?;

    if inner.trim().is_empty() {
        return Err(invalid(format!("no coordinates, use '{KEYWORD} {EMPTY}'")));
    }

    inner.split(',').map(parse_pair).collect()
}

/// Most decimals an f64 length can meaningfully carry
pub const MAX_LENGTH_DECIMALS: u32 = 15;

/// Round a length for storage, half away from zero.
///
/// `decimals` is capped at [`MAX_LENGTH_DECIMALS`].
pub fn round_km(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_LENGTH_DECIMALS) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

fn parse_pair(pair: &str) -> Result<GeoPoint> {
    let mut parts = pair.split_whitespace();
    let (lon, lat) = match (parts.next(), parts.next(), parts.next()) {
        (Some(lon), Some(lat), None) => (lon, lat),
        _ => return Err(invalid(format!("expected 'lon lat', got '{}'", pair.trim()))),
    };

    let lon = parse_number(lon)?;
    let lat = parse_number(lat)?;
    GeoPoint::checked(lon, lat).map_err(|e| invalid(e.to_string()))
}

fn parse_number(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|_| invalid(format!("'{s}' is not a number")))
}

fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let head = s.get(..keyword.len())?;
    head.eq_ignore_ascii_case(keyword).then(|| &s[keyword.len()..])
}

fn truncate(s: &str) -> String {
    s.chars().take(24).collect()
}

fn invalid(msg: impl Into<String>) -> GeometryError {
    GeometryError::InvalidLinestring(msg.into())
}
