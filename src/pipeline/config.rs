//! Run configuration.

use crate::mask::MaskParams;
use crate::trim_error::TrimError;

/// Values consumed by one pipeline run. Distances are in input units.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// Largest midpoint distance at which a LOW and a HIGH line may pair.
    pub max_pair_distance: f64,
    /// Half-width of the corridor buffered around every talus line.
    pub corridor_half_width: f64,
    /// Talus lines not longer than this get no corridor.
    pub min_corridor_length: f64,
    /// Outward growth of building footprints; 0 keeps them as drawn.
    pub building_margin: f64,
    /// Half-width of the corridor around open building outlines (walls).
    pub outline_half_width: f64,
    /// Arc steps per quarter turn for round joins.
    pub join_segments: usize,
    /// Boundary tolerance: points this close to the mask count as masked.
    pub epsilon: f64,
    /// Trim worker threads; 0 lets rayon pick.
    pub workers: usize,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            max_pair_distance: 13.8,
            corridor_half_width: 3.0,
            min_corridor_length: 0.1,
            building_margin: 0.0,
            outline_half_width: 1.6,
            join_segments: 8,
            epsilon: 1e-6,
            workers: 0,
        }
    }
}

impl TrimConfig {
    pub fn validate(&self) -> Result<(), TrimError> {
        let non_negative = [
            ("max_pair_distance", self.max_pair_distance),
            ("corridor_half_width", self.corridor_half_width),
            ("min_corridor_length", self.min_corridor_length),
            ("building_margin", self.building_margin),
            ("outline_half_width", self.outline_half_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TrimError::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(TrimError::InvalidConfig(format!(
                "epsilon must be finite and > 0, got {}",
                self.epsilon
            )));
        }
        if self.join_segments == 0 {
            return Err(TrimError::InvalidConfig("join_segments must be >= 1".into()));
        }
        Ok(())
    }

    pub fn mask_params(&self) -> MaskParams {
        MaskParams {
            corridor_half_width: self.corridor_half_width,
            min_corridor_length: self.min_corridor_length,
            building_margin: self.building_margin,
            outline_half_width: self.outline_half_width,
            join_segments: self.join_segments,
        }
    }
}
