//! One lookup request against a loaded grid.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use wrf_grid::{
    CellSelection, Coordinate, CurvilinearGrid, GridIndex, GridLocator, LocatorConfig, NearestCell,
};

/// What to compute for a query location.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub target: Coordinate,
    /// Search radius in meters.
    pub radius: Option<f64>,
    /// Report ring-expansion candidates instead of the cell selection.
    pub neighbors: bool,
}

/// Ring-expansion candidates around the nearest cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborReport {
    pub target: Coordinate,
    pub radius: f64,
    pub nearest: NearestCell,
    pub candidates: Vec<GridIndex>,
}

/// Result of a lookup, printed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LookupReport {
    Selection(CellSelection),
    Neighbors(NeighborReport),
}

/// Build the query coordinate from `LON LAT [HGT]`.
pub fn parse_location(values: &[f64]) -> Result<Coordinate> {
    let coordinate = match *values {
        [lon, lat] => Coordinate::new(lon, lat),
        [lon, lat, height] => Coordinate::new(lon, lat).with_height(height),
        _ => bail!(
            "--location expects LON LAT [HGT], got {} values",
            values.len()
        ),
    };
    coordinate.validate().context("Invalid --location")?;
    Ok(coordinate)
}

/// Run `request` against `grid`.
pub fn run_lookup(
    grid: &CurvilinearGrid,
    config: LocatorConfig,
    request: &LookupRequest,
) -> Result<LookupReport> {
    let locator = GridLocator::with_config(grid, config).context("Invalid locator configuration")?;
    let target = request.target;

    if request.neighbors {
        let Some(radius) = request.radius else {
            bail!("--neighbors requires --radius");
        };

        let nearest = locator.nearest(target.lon, target.lat)?;
        let candidates = locator.direct_neighbors(nearest.index, radius, target.lon, target.lat)?;
        debug!(
            center = %nearest.index,
            radius,
            candidates = candidates.len(),
            "Expanded neighbor rings"
        );

        return Ok(LookupReport::Neighbors(NeighborReport {
            target,
            radius,
            nearest,
            candidates,
        }));
    }

    let selection = locator.select(target, request.radius)?;
    info!(
        lon = target.lon,
        lat = target.lat,
        nearest = %selection.nearest.index,
        distance = selection.nearest.distance,
        cells = selection.cells.len(),
        "Resolved location"
    );
    Ok(LookupReport::Selection(selection))
}
