//! Synthetic model grids.
//!
//! Every generator returns cell-center coordinates in row-major order:
//! row 0 is the southernmost row, column 0 the westernmost column.

use std::f64::consts::PI;

/// Mean Earth radius used by the projection generators, in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Row-major longitude/latitude arrays of a `rows` x `cols` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridArrays {
    pub rows: usize,
    pub cols: usize,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
}

impl GridArrays {
    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(lon, lat)` of cell `(row, col)`.
    pub fn coord(&self, row: usize, col: usize) -> (f64, f64) {
        let flat = row * self.cols + col;
        (self.lon[flat], self.lat[flat])
    }

    /// Coordinates as nested `[row][col]` arrays, the way model files store them.
    pub fn to_nested(&self) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let lon = self.lon.chunks(self.cols).map(<[f64]>::to_vec).collect();
        let lat = self.lat.chunks(self.cols).map(<[f64]>::to_vec).collect();
        (lon, lat)
    }

    /// Replace the coordinates of the given `(row, col)` cells with NaN,
    /// as masked cells appear in some model output.
    pub fn with_nan_cells(mut self, cells: &[(usize, usize)]) -> Self {
        for &(row, col) in cells {
            if row < self.rows && col < self.cols {
                let flat = row * self.cols + col;
                self.lon[flat] = f64::NAN;
                self.lat[flat] = f64::NAN;
            }
        }
        self
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// # Example
///
/// ```
/// use test_utils::linspace;
///
/// assert_eq!(linspace(-90.0, 90.0, 5), vec![-90.0, -45.0, 0.0, 45.0, 90.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Every row repeats `lons`, every column repeats `lats`.
pub fn meshgrid(lons: &[f64], lats: &[f64]) -> GridArrays {
    let mut lon = Vec::with_capacity(lons.len() * lats.len());
    let mut lat = Vec::with_capacity(lons.len() * lats.len());
    for &y in lats {
        for &x in lons {
            lon.push(x);
            lat.push(y);
        }
    }
    GridArrays {
        rows: lats.len(),
        cols: lons.len(),
        lon,
        lat,
    }
}

/// Global grid with `nx` longitudes over [-180, 180] and `ny` latitudes over
/// [-90, 90].
///
/// With odd `nx` and `ny` the point (0, 0) is a cell center; with even `nx`
/// it lies exactly between two cells.
pub fn global_grid(nx: usize, ny: usize) -> GridArrays {
    meshgrid(&linspace(-180.0, 180.0, nx), &linspace(-90.0, 90.0, ny))
}

/// Regular lat/lon grid starting at (`lon0`, `lat0`) with `step` degrees
/// spacing in both directions.
pub fn regular_grid(lon0: f64, lat0: f64, step: f64, nx: usize, ny: usize) -> GridArrays {
    let lons: Vec<f64> = (0..nx).map(|i| lon0 + i as f64 * step).collect();
    let lats: Vec<f64> = (0..ny).map(|j| lat0 + j as f64 * step).collect();
    meshgrid(&lons, &lats)
}

/// Parameters of a WRF-style Lambert conformal domain.
#[derive(Debug, Clone, Copy)]
pub struct LambertDomain {
    /// Latitude of the domain center (degrees).
    pub center_lat: f64,
    /// Longitude of the domain center (degrees).
    pub center_lon: f64,
    /// Standard parallel of the tangent cone (degrees).
    pub true_lat: f64,
    /// Central meridian (degrees).
    pub stand_lon: f64,
    /// Grid spacing in meters.
    pub dx: f64,
    /// Number of west-east cells.
    pub nx: usize,
    /// Number of south-north cells.
    pub ny: usize,
}

impl LambertDomain {
    /// Cell-center coordinates of the domain.
    ///
    /// Cells are spaced `dx` apart on the projection plane, so their spacing
    /// on the sphere varies slightly across the domain and grid rows are
    /// curved in lon/lat space.
    pub fn grid(&self) -> GridArrays {
        let to_rad = PI / 180.0;
        let true_lat = self.true_lat * to_rad;

        // Tangent cone
        let n = true_lat.sin();
        let f = true_lat.cos() * (PI / 4.0 + true_lat / 2.0).tan().powf(n) / n;
        let rho_of = |lat: f64| EARTH_RADIUS_M * f / (PI / 4.0 + lat / 2.0).tan().powf(n);

        let rho_origin = rho_of(self.center_lat * to_rad);
        let theta_center = n * (self.center_lon - self.stand_lon) * to_rad;
        let x_center = rho_origin * theta_center.sin();
        let y_center = rho_origin - rho_origin * theta_center.cos();

        let mut lon = Vec::with_capacity(self.nx * self.ny);
        let mut lat = Vec::with_capacity(self.nx * self.ny);
        for row in 0..self.ny {
            for col in 0..self.nx {
                let x = x_center + (col as f64 - (self.nx as f64 - 1.0) / 2.0) * self.dx;
                let y = y_center + (row as f64 - (self.ny as f64 - 1.0) / 2.0) * self.dx;

                let rho = n.signum() * (x * x + (rho_origin - y) * (rho_origin - y)).sqrt();
                let theta = x.atan2(rho_origin - y);

                let lat_rad = 2.0 * (EARTH_RADIUS_M * f / rho).powf(1.0 / n).atan() - PI / 2.0;
                lat.push(lat_rad / to_rad);
                lon.push(self.stand_lon + theta / n / to_rad);
            }
        }

        GridArrays {
            rows: self.ny,
            cols: self.nx,
            lon,
            lat,
        }
    }
}

/// Great-circle distance used to check generated spacing.
pub fn sphere_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().clamp(0.0, 1.0).asin()
}
