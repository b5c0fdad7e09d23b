//! Nearest model level for a height above ground.
//!
//! WRF stores geopotential on full (staggered) levels as a base state `PHB`
//! plus a perturbation `PH`. Mass-point variables live on the half levels in
//! between.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GridError, GridResult};

/// Standard gravity used to turn geopotential into geometric height.
pub const GRAVITY: f64 = 9.81;

/// Vertical placement of the variable a level is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalStagger {
    /// Full levels (`bottom_top_stag`), same as the geopotential.
    Full,
    /// Half levels (`bottom_top`), midway between full levels.
    Half,
}

/// Geopotential of one grid column over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGeopotential {
    /// Base-state geopotential `[time][full level]` in m^2/s^2.
    pub base: Vec<Vec<f64>>,
    /// Perturbation geopotential `[time][full level]` in m^2/s^2.
    pub perturbation: Vec<Vec<f64>>,
    /// Terrain height of the column in meters.
    pub terrain_height: f64,
}

impl ColumnGeopotential {
    /// Heights above ground `[time][level]` on the requested levels.
    pub fn heights_agl(&self, stagger: VerticalStagger) -> GridResult<Vec<Vec<f64>>> {
        if self.base.len() != self.perturbation.len() {
            return Err(GridError::invalid_profile(format!(
                "PHB has {} time steps, PH has {}",
                self.base.len(),
                self.perturbation.len()
            )));
        }

        let mut heights = Vec::with_capacity(self.base.len());
        for (time, (phb, ph)) in self.base.iter().zip(&self.perturbation).enumerate() {
            if phb.len() != ph.len() {
                return Err(GridError::invalid_profile(format!(
                    "time {}: PHB has {} levels, PH has {}",
                    time,
                    phb.len(),
                    ph.len()
                )));
            }

            let full: Vec<f64> = phb.iter().zip(ph).map(|(b, p)| (b + p) / GRAVITY).collect();
            let levels = match stagger {
                VerticalStagger::Full => full,
                VerticalStagger::Half => full.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect(),
            };
            if levels.is_empty() {
                return Err(GridError::invalid_profile(format!(
                    "time {}: not enough levels for {:?} stagger",
                    time, stagger
                )));
            }

            heights.push(
                levels
                    .into_iter()
                    .map(|z| z - self.terrain_height)
                    .collect(),
            );
        }

        Ok(heights)
    }
}

/// Level closest to the target height at one time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestLevel {
    pub level: usize,
    /// Height of that level above ground, in meters.
    pub height_agl: f64,
}

/// For every time step, find the level whose height above ground is closest
/// to `target_agl`. Ties go to the lower level.
pub fn find_nearest_vlevel(
    column: &ColumnGeopotential,
    stagger: VerticalStagger,
    target_agl: f64,
) -> GridResult<Vec<NearestLevel>> {
    if !target_agl.is_finite() {
        return Err(GridError::invalid_profile(format!(
            "target height {} is not finite",
            target_agl
        )));
    }

    let levels: Vec<NearestLevel> = column
        .heights_agl(stagger)?
        .into_iter()
        .map(|heights| {
            let mut best = NearestLevel {
                level: 0,
                height_agl: heights[0],
            };
            for (level, &height_agl) in heights.iter().enumerate().skip(1) {
                if (height_agl - target_agl).abs() < (best.height_agl - target_agl).abs() {
                    best = NearestLevel { level, height_agl };
                }
            }
            best
        })
        .collect();

    debug!(times = levels.len(), target_agl, ?stagger, "Resolved nearest vertical levels");
    Ok(levels)
}
