//! Configuration for grid lookups.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Tuning knobs for [`GridLocator`](crate::GridLocator).
///
/// None of these change which cells a query returns on a regular grid; they
/// only trade memory and threads for speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Grids with at least this many cells compute per-cell distances on the
    /// rayon pool. `usize::MAX` disables parallel evaluation.
    pub parallel_threshold: usize,

    /// Filter the ring-expansion candidates instead of the whole grid when
    /// answering radius queries.
    pub seed_with_neighbors: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 65_536,
            seed_with_neighbors: false,
        }
    }
}

impl LocatorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_PARALLEL_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                config.parallel_threshold = threshold;
            }
        }

        if let Ok(val) = std::env::var("GRID_SEED_NEIGHBORS") {
            config.seed_with_neighbors = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> GridResult<()> {
        if self.parallel_threshold == 0 {
            return Err(GridError::config("parallel_threshold must be > 0"));
        }

        Ok(())
    }

    /// Whether a grid of `cells` cells should be evaluated in parallel.
    pub fn use_parallel(&self, cells: usize) -> bool {
        cells >= self.parallel_threshold
    }
}
