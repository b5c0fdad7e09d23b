//! Horizontal lookups: nearest cell, ring-expansion candidates and radius
//! membership.
//!
//! Every result set is sorted row-major and free of duplicates. Distances are
//! great-circle meters from [`haversine`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::LocatorConfig;
use crate::distance::haversine;
use crate::error::{GridError, GridResult};
use crate::grid::{Coordinate, CurvilinearGrid, GridIndex};

/// The grid cell closest to a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestCell {
    pub index: GridIndex,
    /// Distance from the query point to the cell center, in meters.
    pub distance: f64,
}

/// Runs lookups against one grid with a fixed configuration.
///
/// Holds only shared references; any number of locators may query the same
/// grid concurrently.
#[derive(Debug, Clone)]
pub struct GridLocator<'a> {
    grid: &'a CurvilinearGrid,
    config: LocatorConfig,
}

impl<'a> GridLocator<'a> {
    /// Create a locator with the default configuration.
    pub fn new(grid: &'a CurvilinearGrid) -> Self {
        Self {
            grid,
            config: LocatorConfig::default(),
        }
    }

    /// Create a locator with a validated configuration.
    pub fn with_config(grid: &'a CurvilinearGrid, config: LocatorConfig) -> GridResult<Self> {
        config.validate()?;
        Ok(Self { grid, config })
    }

    pub fn grid(&self) -> &'a CurvilinearGrid {
        self.grid
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Distance from `(lon, lat)` to every cell center, row-major.
    ///
    /// Large grids are evaluated on the rayon pool; the output order and
    /// values are the same either way.
    pub fn distances(&self, lon: f64, lat: f64) -> Vec<f64> {
        let lons = self.grid.lon();
        let lats = self.grid.lat();

        if self.config.use_parallel(self.grid.len()) {
            lons.par_iter()
                .zip(lats.par_iter())
                .map(|(&x, &y)| haversine(lon, lat, x, y))
                .collect()
        } else {
            lons.iter()
                .zip(lats)
                .map(|(&x, &y)| haversine(lon, lat, x, y))
                .collect()
        }
    }

    /// Find the cell whose center is closest to `(lon, lat)`.
    ///
    /// Ties go to the first cell in row-major order. Cells with non-finite
    /// coordinates never win.
    pub fn nearest(&self, lon: f64, lat: f64) -> GridResult<NearestCell> {
        Coordinate::new(lon, lat).validate()?;

        let mut best: Option<(usize, f64)> = None;
        for (flat, distance) in self.distances(lon, lat).into_iter().enumerate() {
            if distance.is_nan() {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((flat, distance)),
            }
        }

        let (flat, distance) = best.ok_or(GridError::NoValidCells)?;
        let index = self.grid.grid_index(flat);
        debug!(%index, distance, lon, lat, "Resolved nearest grid cell");

        Ok(NearestCell { index, distance })
    }

    /// Collect candidate cells around `center` by walking index-space rings.
    ///
    /// Ring `r` holds the in-bounds cells at Chebyshev index distance `r`
    /// from `center`. The center is always a candidate; each further ring is
    /// added while at least one of its cells lies within `radius` of
    /// `(lon, lat)`, and the first ring without such a cell ends the walk.
    /// A radius of zero (or less) yields no candidates.
    ///
    /// This is an approximation for near-uniform grids. Use
    /// [`cells_in_radius`](Self::cells_in_radius) for exact membership.
    pub fn direct_neighbors(
        &self,
        center: GridIndex,
        radius: f64,
        lon: f64,
        lat: f64,
    ) -> GridResult<Vec<GridIndex>> {
        self.grid.check_index(center)?;
        Coordinate::new(lon, lat).validate()?;

        if !(radius > 0.0) {
            return Ok(Vec::new());
        }

        let shape = self.grid.shape();
        let mut candidates = vec![center];
        let mut depth = 0;

        loop {
            depth += 1;
            let ring = ring_cells(center, depth, shape);
            if ring.is_empty() {
                break;
            }

            let hits = ring
                .iter()
                .filter(|&&index| self.distance_to(index, lon, lat) <= radius)
                .count();
            trace!(depth, cells = ring.len(), hits, "Visited ring");

            if hits == 0 {
                break;
            }
            candidates.extend(ring);
        }

        candidates.sort_unstable();
        debug!(
            %center,
            radius,
            rings = depth - 1,
            candidates = candidates.len(),
            "Collected ring-expansion candidates"
        );

        Ok(candidates)
    }

    /// Every cell whose center lies within `radius` meters of `(lon, lat)`.
    ///
    /// `center` and `center_distance` are the result of
    /// [`nearest`](Self::nearest) for the same point. The radius must be
    /// strictly larger than `center_distance`, which guarantees the nearest
    /// cell is part of the result.
    ///
    /// Scans the whole grid unless the locator is configured to seed the
    /// search with [`direct_neighbors`](Self::direct_neighbors).
    pub fn cells_in_radius(
        &self,
        center: GridIndex,
        center_distance: f64,
        radius: f64,
        lon: f64,
        lat: f64,
    ) -> GridResult<Vec<GridIndex>> {
        self.check_radius_query(center, center_distance, radius, lon, lat)?;

        if self.config.seed_with_neighbors {
            let candidates = self.direct_neighbors(center, radius, lon, lat)?;
            return self.filter_candidates(&candidates, radius, lon, lat);
        }

        let inside: Vec<GridIndex> = self
            .distances(lon, lat)
            .into_iter()
            .enumerate()
            .filter(|&(_, distance)| distance <= radius)
            .map(|(flat, _)| self.grid.grid_index(flat))
            .collect();

        debug!(%center, radius, cells = inside.len(), "Selected grid cells in radius");
        Ok(inside)
    }

    /// Like [`cells_in_radius`](Self::cells_in_radius), but only considers
    /// `candidates` (for example the output of
    /// [`direct_neighbors`](Self::direct_neighbors)).
    pub fn cells_in_radius_seeded(
        &self,
        center: GridIndex,
        center_distance: f64,
        radius: f64,
        lon: f64,
        lat: f64,
        candidates: &[GridIndex],
    ) -> GridResult<Vec<GridIndex>> {
        self.check_radius_query(center, center_distance, radius, lon, lat)?;
        self.filter_candidates(candidates, radius, lon, lat)
    }

    fn check_radius_query(
        &self,
        center: GridIndex,
        center_distance: f64,
        radius: f64,
        lon: f64,
        lat: f64,
    ) -> GridResult<()> {
        self.grid.check_index(center)?;
        Coordinate::new(lon, lat).validate()?;

        if !(radius > center_distance) {
            return Err(GridError::InvalidRadius {
                radius,
                nearest_distance: center_distance,
            });
        }

        Ok(())
    }

    fn filter_candidates(
        &self,
        candidates: &[GridIndex],
        radius: f64,
        lon: f64,
        lat: f64,
    ) -> GridResult<Vec<GridIndex>> {
        let mut sorted = candidates.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut inside = Vec::with_capacity(sorted.len());
        for index in sorted {
            self.grid.check_index(index)?;
            if self.distance_to(index, lon, lat) <= radius {
                inside.push(index);
            }
        }

        debug!(
            candidates = candidates.len(),
            radius,
            cells = inside.len(),
            "Filtered candidate cells by radius"
        );
        Ok(inside)
    }

    /// Distance from `(lon, lat)` to the center of an in-bounds cell.
    fn distance_to(&self, index: GridIndex, lon: f64, lat: f64) -> f64 {
        let flat = self.grid.flat_index(index);
        haversine(lon, lat, self.grid.lon()[flat], self.grid.lat()[flat])
    }
}

/// In-bounds cells at Chebyshev distance `depth` from `center`, row-major.
fn ring_cells(center: GridIndex, depth: usize, shape: (usize, usize)) -> Vec<GridIndex> {
    let r = depth as isize;
    let mut cells = Vec::with_capacity(8 * depth);

    for d_row in -r..=r {
        if d_row.abs() == r {
            cells.extend((-r..=r).filter_map(|d_col| center.offset(d_row, d_col, shape)));
        } else {
            cells.extend(center.offset(d_row, -r, shape));
            cells.extend(center.offset(d_row, r, shape));
        }
    }

    cells
}

/// Find the cell whose center is closest to `(lon, lat)`.
///
/// See [`GridLocator::nearest`].
pub fn find_nearest_gridcell(grid: &CurvilinearGrid, lon: f64, lat: f64) -> GridResult<NearestCell> {
    GridLocator::new(grid).nearest(lon, lat)
}

/// Ring-expansion candidates around `center`.
///
/// See [`GridLocator::direct_neighbors`].
pub fn find_direct_neighbors(
    center: GridIndex,
    radius: f64,
    lon: f64,
    lat: f64,
    grid: &CurvilinearGrid,
) -> GridResult<Vec<GridIndex>> {
    GridLocator::new(grid).direct_neighbors(center, radius, lon, lat)
}

/// Every cell within `radius` meters of `(lon, lat)`.
///
/// See [`GridLocator::cells_in_radius`].
pub fn find_grid_cells_in_radius(
    center: GridIndex,
    center_distance: f64,
    radius: f64,
    lon: f64,
    lat: f64,
    grid: &CurvilinearGrid,
) -> GridResult<Vec<GridIndex>> {
    GridLocator::new(grid).cells_in_radius(center, center_distance, radius, lon, lat)
}
