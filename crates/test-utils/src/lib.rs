//! Shared test utilities for the wrf-gridcell workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic grid generators (regular, global, Lambert conformal)
//! - Reference domains and query points
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Generators return [`GridArrays`], plain row-major coordinate vectors, so
//! this crate does not depend on the crates it is used to test.

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Assert that two floats differ by at most `epsilon`.
///
/// NaN on either side always fails, so a masked value can never slip
/// through a tolerance check.
///
/// ```
/// use test_utils::{assert_approx_eq, distances};
///
/// assert_approx_eq!(82_633.4647, distances::ONE_DEGREE_LON_AT_42N, 0.01);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon): (f64, f64, f64) = ($left, $right, $epsilon);
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "values differ: {} vs {} (|diff| = {}, tolerance {})",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that two `(lon, lat)` pairs agree within `epsilon` degrees.
///
/// ```
/// use test_utils::assert_coords_approx_eq;
///
/// assert_coords_approx_eq!((11.0001, 45.0001), (11.0, 45.0), 0.001);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($lon1:expr, $lat1:expr), ($lon2:expr, $lat2:expr), $epsilon:expr) => {{
        let (lon1, lat1, lon2, lat2): (f64, f64, f64, f64) = ($lon1, $lat1, $lon2, $lat2);
        let epsilon: f64 = $epsilon;
        let (d_lon, d_lat) = ((lon1 - lon2).abs(), (lat1 - lat2).abs());
        if !(d_lon <= epsilon && d_lat <= epsilon) {
            panic!(
                "coordinates differ: ({}, {}) vs ({}, {}) (tolerance {} deg)",
                lon1, lat1, lon2, lat2, epsilon
            );
        }
    }};
}
