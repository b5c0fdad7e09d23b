//! Loading grid coordinates from disk.
//!
//! A grid file holds the cell-center coordinates of one model domain as
//! nested `[south_north][west_east]` arrays:
//!
//! ```json
//! {"xlong": [[10.0, 10.1], [10.0, 10.1]], "xlat": [[45.0, 45.0], [45.1, 45.1]]}
//! ```
//!
//! Files ending in `.yaml`/`.yml` are parsed as YAML, everything else as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use wrf_grid::CurvilinearGrid;

/// On-disk layout of a grid file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridFile {
    /// Cell-center longitudes (`XLONG`).
    #[serde(alias = "XLONG")]
    pub xlong: Vec<Vec<f64>>,
    /// Cell-center latitudes (`XLAT`).
    #[serde(alias = "XLAT")]
    pub xlat: Vec<Vec<f64>>,
}

impl GridFile {
    /// Parse file contents, choosing the format from the path's extension.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );

        if is_yaml {
            serde_yaml::from_str(content)
                .with_context(|| format!("Failed to parse YAML grid file: {:?}", path))
        } else {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON grid file: {:?}", path))
        }
    }

    /// Validate the arrays and build the grid.
    pub fn into_grid(self) -> Result<CurvilinearGrid> {
        CurvilinearGrid::from_nested(self.xlong, self.xlat).context("Invalid grid coordinates")
    }
}

/// Read and validate the grid stored at `path`.
pub fn load_grid(path: &Path) -> Result<CurvilinearGrid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file: {:?}", path))?;
    let grid = GridFile::parse(path, &content)?.into_grid()?;

    info!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        "Loaded grid"
    );
    Ok(grid)
}
