//! Common test fixtures for wrf-gridcell tests.
//!
//! Reference domains and query points that tests across the workspace share.

/// Model domains for testing.
pub mod domains {
    use crate::generators::LambertDomain;

    /// 3 km Lambert conformal domain over the Alps, centered on 46N 11E.
    ///
    /// Roughly 300 km x 240 km; similar in layout to the WRF runs the lookups
    /// are used with.
    pub const ALPS: LambertDomain = LambertDomain {
        center_lat: 46.0,
        center_lon: 11.0,
        true_lat: 46.0,
        stand_lon: 11.0,
        dx: 3000.0,
        nx: 101,
        ny: 81,
    };

    /// Same projection with 1 km spacing and 500 x 500 cells, for benchmarks
    /// and parallel-path tests.
    pub const ALPS_1KM_LARGE: LambertDomain = LambertDomain {
        center_lat: 46.0,
        center_lon: 11.0,
        true_lat: 46.0,
        stand_lon: 11.0,
        dx: 1000.0,
        nx: 500,
        ny: 500,
    };
}

/// Query points for testing, as (lon, lat).
pub mod points {
    /// Cortina d'Ampezzo, inside [`ALPS`](super::domains::ALPS).
    pub const CORTINA: (f64, f64) = (12.14, 46.54);

    /// Bolzano, inside [`ALPS`](super::domains::ALPS).
    pub const BOLZANO: (f64, f64) = (11.35, 46.5);

    /// Trento, inside [`ALPS`](super::domains::ALPS).
    pub const TRENTO: (f64, f64) = (11.12, 46.07);

    /// Paris, well outside [`ALPS`](super::domains::ALPS).
    pub const PARIS: (f64, f64) = (2.3522, 48.8566);
}

/// Reference distances for testing, in meters.
pub mod distances {
    /// `haversine(34, 42, 35, 42)`.
    pub const ONE_DEGREE_LON_AT_42N: f64 = 82_633.464_752_871_54;

    /// `haversine(34, 42, 36, 42)`.
    pub const TWO_DEGREES_LON_AT_42N: f64 = 165_264.111_721_13;
}
