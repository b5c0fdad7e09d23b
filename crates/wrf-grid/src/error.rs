//! Error types for grid lookups.

use thiserror::Error;

use crate::grid::GridIndex;

/// Result type for grid lookup operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur while resolving coordinates against a grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// The requested radius cannot contain the nearest grid cell.
    #[error("Radius has to be larger than distance between nearest grid cell and target location.")]
    InvalidRadius { radius: f64, nearest_distance: f64 },

    /// Longitude and latitude arrays have different shapes.
    #[error("coordinate arrays differ in shape: lon {lon:?}, lat {lat:?}")]
    ShapeMismatch {
        lon: (usize, usize),
        lat: (usize, usize),
    },

    /// The grid has zero rows or zero columns.
    #[error("grid has no cells")]
    EmptyGrid,

    /// A flat array does not match the length it was declared with.
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Nested coordinate rows of unequal length.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A caller-supplied index lies outside the grid.
    #[error("index {index} is outside grid of shape {shape:?}")]
    IndexOutOfBounds {
        index: GridIndex,
        shape: (usize, usize),
    },

    /// The query coordinate is not a finite number.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Every cell center in the grid is non-finite.
    #[error("grid has no cell with finite coordinates")]
    NoValidCells,

    /// Malformed vertical column input.
    #[error("invalid vertical profile: {0}")]
    InvalidProfile(String),

    /// Invalid locator configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GridError {
    /// Create an InvalidCoordinate error.
    pub fn invalid_coordinate(msg: impl Into<String>) -> Self {
        Self::InvalidCoordinate(msg.into())
    }

    /// Create an InvalidProfile error.
    pub fn invalid_profile(msg: impl Into<String>) -> Self {
        Self::InvalidProfile(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
