//! Resolve a query location into the grid cells data should be read from.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::haversine;
use crate::error::{GridError, GridResult};
use crate::grid::{Coordinate, GridIndex};
use crate::search::{GridLocator, NearestCell};

/// One selected cell with its center and distance to the query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellMatch {
    pub index: GridIndex,
    pub lon: f64,
    pub lat: f64,
    /// Distance from the query point in meters.
    pub distance: f64,
}

/// Cells selected for one query location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSelection {
    pub target: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    pub nearest: NearestCell,
    /// Selected cells in row-major order. Never empty.
    pub cells: Vec<CellMatch>,
}

impl CellSelection {
    /// Whether more than the nearest cell was selected.
    pub fn is_multi_cell(&self) -> bool {
        self.cells.len() > 1
    }

    pub fn indices(&self) -> Vec<GridIndex> {
        self.cells.iter().map(|cell| cell.index).collect()
    }
}

impl GridLocator<'_> {
    /// Pick the cells for `target`.
    ///
    /// Without a radius, or with one that does not reach past the nearest
    /// cell, only the nearest cell is selected. Otherwise every cell within
    /// the radius is. A non-finite radius is rejected.
    pub fn select(&self, target: Coordinate, radius: Option<f64>) -> GridResult<CellSelection> {
        target.validate()?;
        let nearest = self.nearest(target.lon, target.lat)?;

        if let Some(radius) = radius.filter(|radius| !radius.is_finite()) {
            return Err(GridError::InvalidRadius {
                radius,
                nearest_distance: nearest.distance,
            });
        }

        let indices = match radius {
            Some(radius) if radius > nearest.distance => {
                self.cells_in_radius(nearest.index, nearest.distance, radius, target.lon, target.lat)?
            }
            Some(radius) => {
                debug!(
                    radius,
                    nearest_distance = nearest.distance,
                    "Radius does not reach past nearest cell, using nearest cell only"
                );
                vec![nearest.index]
            }
            None => vec![nearest.index],
        };

        let grid = self.grid();
        let cells: Vec<CellMatch> = indices
            .into_iter()
            .filter_map(|index| {
                let (lon, lat) = grid.coord(index)?;
                Some(CellMatch {
                    index,
                    lon,
                    lat,
                    distance: haversine(target.lon, target.lat, lon, lat),
                })
            })
            .collect();

        debug!(
            lon = target.lon,
            lat = target.lat,
            nearest = %nearest.index,
            cells = cells.len(),
            "Selected grid cells for location"
        );

        Ok(CellSelection {
            target,
            radius,
            nearest,
            cells,
        })
    }
}

/// Pick the cells for `target` with the default configuration.
///
/// See [`GridLocator::select`].
pub fn select_cells(
    grid: &crate::CurvilinearGrid,
    target: Coordinate,
    radius: Option<f64>,
) -> GridResult<CellSelection> {
    GridLocator::new(grid).select(target, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CurvilinearGrid;
    use test_utils::assert_coords_approx_eq;

    fn alpine_grid() -> CurvilinearGrid {
        let arrays = test_utils::regular_grid(10.0, 44.0, 0.1, 21, 21);
        CurvilinearGrid::new(arrays.rows, arrays.cols, arrays.lon, arrays.lat).unwrap()
    }

    #[test]
    fn test_select_without_radius() {
        let grid = alpine_grid();
        let selection = select_cells(&grid, Coordinate::new(11.02, 45.03), None).unwrap();
        assert_eq!(selection.cells.len(), 1);
        assert!(!selection.is_multi_cell());

        let cell = selection.cells[0];
        assert_eq!(cell.index, selection.nearest.index);
        assert_eq!(cell.distance, selection.nearest.distance);
        assert_coords_approx_eq!((cell.lon, cell.lat), (11.0, 45.0), 1e-9);
    }

    #[test]
    fn test_select_small_radius_falls_back_to_nearest() {
        let grid = alpine_grid();
        let selection = select_cells(&grid, Coordinate::new(11.02, 45.03), Some(100.0)).unwrap();
        assert_eq!(selection.indices(), vec![selection.nearest.index]);
        assert_eq!(selection.radius, Some(100.0));
    }

    #[test]
    fn test_select_rejects_non_finite_radius() {
        let grid = alpine_grid();
        let target = Coordinate::new(11.02, 45.03);
        for radius in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = select_cells(&grid, target, Some(radius)).unwrap_err();
            assert!(matches!(err, GridError::InvalidRadius { .. }), "radius {}", radius);
        }
    }

    #[test]
    fn test_select_with_radius() {
        let grid = alpine_grid();
        let target = Coordinate::new(11.0, 45.0).with_height(300.0);
        let selection = select_cells(&grid, target, Some(10_000.0)).unwrap();

        // East-west neighbors are 7.9 km away, north-south ones 11.1 km.
        assert_eq!(
            selection.indices(),
            vec![
                GridIndex::new(10, 9),
                GridIndex::new(10, 10),
                GridIndex::new(10, 11)
            ]
        );
        assert!(selection.is_multi_cell());
        assert!(selection.cells.iter().all(|cell| cell.distance <= 10_000.0));
        assert_eq!(selection.target.height_agl, Some(300.0));
    }

    #[test]
    fn test_selection_serializes() {
        let grid = alpine_grid();
        let selection = select_cells(&grid, Coordinate::new(11.0, 45.0), None).unwrap();
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["nearest"]["index"]["row"], 10);
        assert_eq!(json["cells"].as_array().unwrap().len(), 1);
        assert!(json.get("radius").is_none());
    }
}
