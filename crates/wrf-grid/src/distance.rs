//! Great-circle distances on a spherical Earth.
//!
//! All functions take longitude/latitude in degrees and return meters.

use crate::error::{GridError, GridResult};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points using the haversine formula.
///
/// The `asin` argument is clamped to [0, 1] so rounding can never produce NaN
/// for antipodal points. Non-finite input coordinates still yield NaN.
///
/// ```
/// use wrf_grid::haversine;
///
/// let d = haversine(34.0, 42.0, 35.0, 42.0);
/// assert!((d - 82_633.464_752_871_54).abs() < 1e-3);
/// ```
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_M * c
}

/// Distances from one point to many points.
///
/// `lon2` and `lat2` are co-indexed and must have the same length; the result
/// has that length and the same order.
pub fn haversine_many(lon1: f64, lat1: f64, lon2: &[f64], lat2: &[f64]) -> GridResult<Vec<f64>> {
    if lon2.len() != lat2.len() {
        return Err(GridError::LengthMismatch {
            expected: lon2.len(),
            actual: lat2.len(),
        });
    }

    Ok(lon2
        .iter()
        .zip(lat2)
        .map(|(&lon, &lat)| haversine(lon1, lat1, lon, lat))
        .collect())
}
