//! Geospatial lookups on curvilinear atmospheric model grids.
//!
//! Given the 2-D longitude/latitude arrays of a model domain (for WRF,
//! `XLONG` and `XLAT`), this crate resolves a query coordinate into:
//! - the nearest grid cell and its great-circle distance
//! - ring-expansion candidates around a cell (a cheap pre-filter)
//! - every cell within a physical radius
//! - the nearest vertical level of a column for a height above ground
//!
//! The crate performs no I/O and knows nothing about the variables stored at
//! the returned indices.
//!
//! # Example
//!
//! ```
//! use wrf_grid::{find_grid_cells_in_radius, find_nearest_gridcell, CurvilinearGrid};
//!
//! let lons: Vec<f64> = (0..21).map(|i| 10.0 + i as f64 * 0.1).collect();
//! let lats: Vec<f64> = (0..21).map(|i| 44.0 + i as f64 * 0.1).collect();
//! let grid = CurvilinearGrid::meshgrid(&lons, &lats)?;
//!
//! let nearest = find_nearest_gridcell(&grid, 11.02, 45.03)?;
//! let cells = find_grid_cells_in_radius(
//!     nearest.index,
//!     nearest.distance,
//!     20_000.0,
//!     11.02,
//!     45.03,
//!     &grid,
//! )?;
//! assert!(cells.contains(&nearest.index));
//! # Ok::<(), wrf_grid::GridError>(())
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod grid;
pub mod search;
pub mod selection;
pub mod vertical;

pub use config::LocatorConfig;
pub use distance::{haversine, haversine_many, EARTH_RADIUS_M};
pub use error::{GridError, GridResult};
pub use grid::{Coordinate, CurvilinearGrid, GridIndex};
pub use search::{
    find_direct_neighbors, find_grid_cells_in_radius, find_nearest_gridcell, GridLocator,
    NearestCell,
};
pub use selection::{select_cells, CellMatch, CellSelection};
pub use vertical::{find_nearest_vlevel, ColumnGeopotential, NearestLevel, VerticalStagger};
