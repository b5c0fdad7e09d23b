//! Curvilinear model grids and the indices that address them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Position of one cell in a 2-D grid.
///
/// `row` runs along the south-north dimension and `col` along west-east.
/// The derived ordering is row-major, which is the order every result set
/// of this crate is returned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridIndex {
    pub row: usize,
    pub col: usize,
}

impl GridIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset this index by a signed step, or `None` if it would leave the
    /// `rows` x `cols` extent.
    pub fn offset(&self, d_row: isize, d_col: isize, shape: (usize, usize)) -> Option<GridIndex> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        if row < shape.0 && col < shape.1 {
            Some(GridIndex { row, col })
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for GridIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<GridIndex> for (usize, usize) {
    fn from(index: GridIndex) -> Self {
        (index.row, index.col)
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A query location in degrees east / degrees north.
///
/// `height_agl` is carried for callers that extract vertical data; the
/// horizontal lookups ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_agl: Option<f64>,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            height_agl: None,
        }
    }

    pub fn with_height(mut self, height_agl: f64) -> Self {
        self.height_agl = Some(height_agl);
        self
    }

    /// Fail unless both components are finite.
    pub fn validate(&self) -> GridResult<()> {
        if self.lon.is_finite() && self.lat.is_finite() {
            Ok(())
        } else {
            Err(GridError::invalid_coordinate(format!(
                "lon={}, lat={}",
                self.lon, self.lat
            )))
        }
    }
}

/// Cell-center coordinates of a model domain.
///
/// Longitudes and latitudes are stored row-major in two flat arrays of
/// `rows * cols` values. Construction rejects empty and mis-shaped input, so
/// every instance has at least one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvilinearGrid {
    rows: usize,
    cols: usize,
    lon: Vec<f64>,
    lat: Vec<f64>,
}

impl CurvilinearGrid {
    /// Build a grid from flat row-major coordinate arrays.
    pub fn new(rows: usize, cols: usize, lon: Vec<f64>, lat: Vec<f64>) -> GridResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        let expected = rows.checked_mul(cols).ok_or(GridError::LengthMismatch {
            expected: usize::MAX,
            actual: lon.len(),
        })?;
        for values in [&lon, &lat] {
            if values.len() != expected {
                return Err(GridError::LengthMismatch {
                    expected,
                    actual: values.len(),
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            lon,
            lat,
        })
    }

    /// Build a grid from nested `[row][col]` arrays, as stored in model output
    /// (`XLONG[south_north][west_east]`).
    pub fn from_nested(lon: Vec<Vec<f64>>, lat: Vec<Vec<f64>>) -> GridResult<Self> {
        let lon_shape = nested_shape(&lon)?;
        let lat_shape = nested_shape(&lat)?;
        if lon_shape != lat_shape {
            return Err(GridError::ShapeMismatch {
                lon: lon_shape,
                lat: lat_shape,
            });
        }

        let (rows, cols) = lon_shape;
        Self::new(
            rows,
            cols,
            lon.into_iter().flatten().collect(),
            lat.into_iter().flatten().collect(),
        )
    }

    /// Build a regular lat/lon grid: every row repeats `lons`, every column
    /// repeats `lats`.
    pub fn meshgrid(lons: &[f64], lats: &[f64]) -> GridResult<Self> {
        let rows = lats.len();
        let cols = lons.len();
        let mut lon = Vec::with_capacity(rows * cols);
        let mut lat = Vec::with_capacity(rows * cols);
        for &y in lats {
            for &x in lons {
                lon.push(x);
                lat.push(y);
            }
        }
        Self::new(rows, cols, lon, lat)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false for a constructed grid; kept for slice-like ergonomics.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat longitude array, row-major.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Flat latitude array, row-major.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        index.row < self.rows && index.col < self.cols
    }

    /// Fail with `IndexOutOfBounds` unless `index` addresses a cell.
    pub fn check_index(&self, index: GridIndex) -> GridResult<()> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(GridError::IndexOutOfBounds {
                index,
                shape: self.shape(),
            })
        }
    }

    /// Position of `index` in the flat arrays. The index must be in bounds.
    pub fn flat_index(&self, index: GridIndex) -> usize {
        index.row * self.cols + index.col
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    pub fn grid_index(&self, flat: usize) -> GridIndex {
        GridIndex {
            row: flat / self.cols,
            col: flat % self.cols,
        }
    }

    /// Cell-center `(lon, lat)`, or `None` outside the grid.
    pub fn coord(&self, index: GridIndex) -> Option<(f64, f64)> {
        if !self.contains(index) {
            return None;
        }
        let flat = self.flat_index(index);
        Some((self.lon[flat], self.lat[flat]))
    }

    /// All indices in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        (0..self.len()).map(move |flat| self.grid_index(flat))
    }
}

fn nested_shape(values: &[Vec<f64>]) -> GridResult<(usize, usize)> {
    let cols = values.first().map_or(0, Vec::len);
    for (row, line) in values.iter().enumerate() {
        if line.len() != cols {
            return Err(GridError::RaggedRows {
                row,
                expected: cols,
                actual: line.len(),
            });
        }
    }
    Ok((values.len(), cols))
}
