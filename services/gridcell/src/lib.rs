//! Command-line layer for WRF grid lookups.
//!
//! Loads grid coordinates from disk, runs one lookup with [`wrf_grid`] and
//! reports the result as JSON.

pub mod grid_file;
pub mod lookup;

pub use grid_file::{load_grid, GridFile};
pub use lookup::{parse_location, run_lookup, LookupReport, LookupRequest, NeighborReport};
