use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod input;
mod output;

use busline_geometry::prelude::*;
use input::{load_config, read_route, read_stops, route_selection, validate_tolerance};
use output::{print_json, write_overlay_geojson, RouteSummary};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Measure stops against clicked points only
    Vertex,
    /// Measure stops against the whole drawn line
    Segment,
}

impl From<Mode> for ProximityMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Vertex => ProximityMode::Vertex,
            Mode::Segment => ProximityMode::Segment,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "route-inspect",
    author,
    version,
    about = "Measure a drawn bus route and find the stops along it",
    long_about = "Reads a route drawn as WKT (LINESTRING(lon lat,...)) or GeoJSON, reports its \
                  haversine length, and lists the stops within tolerance of the route.\n\n\
                  With --route-id the route goes through the same checks as saving from the \
                  editor, and the record that would be stored is printed as JSON."
)]
struct Args {
    /// Route file, WKT linestring or GeoJSON LineString
    #[arg(short, long)]
    route: PathBuf,

    /// Stop candidates as a GeoJSON FeatureCollection of Points
    #[arg(short, long)]
    stops: Option<PathBuf>,

    /// Engine configuration as JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Proximity tolerance in kilometers (overrides config)
    #[arg(short, long)]
    tolerance_km: Option<f64>,

    /// How stops are measured against the route (overrides config)
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Validate the route for saving under this identifier
    #[arg(long)]
    route_id: Option<String>,

    /// Write route and stops as a GeoJSON overlay to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(tolerance_km) = args.tolerance_km {
        config.tolerance_km = tolerance_km;
    }
    if let Some(mode) = args.mode {
        config.proximity_mode = mode.into();
    }
    validate_tolerance(config.tolerance_km)?;

    log::debug!("Config: {:?}", config);

    let route = read_route(&args.route)?;
    let stops = match &args.stops {
        Some(path) => read_stops(path)?,
        None => Vec::new(),
    };

    log::info!("Route: {} ({} points)", args.route.display(), route.len());
    log::info!("Stop candidates: {}", stops.len());

    let engine = RouteGeometryEngine::new(config);
    let length_km = engine.compute_length(&route);
    let nearby = engine.find_nearby_stops(&route, &stops);

    log::info!("Length: {:.3} km", length_km);
    for matched in engine.rank_stops(&route, &stops) {
        log::info!("  {} at {:.3} km", matched.id, matched.distance_km);
    }
    if !route.is_persistable() {
        log::warn!("Route has fewer than 2 points and cannot be saved");
    }

    if let Some(path) = &args.output {
        write_overlay_geojson(path, &route, engine.stored_length(&route), &stops, &nearby)?;
    }

    match args.route_id.as_deref() {
        Some(route_id) => {
            let mut session = RouteDrawingSession::from_polyline(engine, route);
            let saved = session
                .save(route_selection(Some(route_id)), &stops)
                .context("Route cannot be saved")?;
            print_json(&saved)?;
        }
        None => {
            let summary = RouteSummary::new(&engine, &route, &nearby);
            print_json(&summary)?;
        }
    }

    Ok(())
}
