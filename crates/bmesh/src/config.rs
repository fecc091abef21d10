//! BMeshConfig - tunables for the generation passes.

use glam::Vec3;

use crate::constants::{DEFAULT_HULL_EPSILON, DEFAULT_STEP_DISTANCE, DEGENERATE_LENGTH_SQ};
use crate::error::{BMeshError, Result};

/// Configuration for subdivision, sweep and stitch.
#[derive(Clone, Debug, PartialEq)]
pub struct BMeshConfig {
  /// Target spacing between balls along a subdivided bone.
  pub step_distance: f32,

  /// Direction assigned to a root that carries none when sweep starts.
  pub root_direction: Vec3,

  /// Re-run frame propagation over the root's branches after capping.
  pub resweep_after_stitch: bool,

  /// Plane-side tolerance for the default convex hull.
  pub hull_epsilon: f32,
}

impl BMeshConfig {
  /// Check that every field is usable.
  pub fn validate(&self) -> Result<()> {
    if !self.step_distance.is_finite() || self.step_distance <= 0.0 {
      return Err(BMeshError::InvalidConfig(format!(
        "step_distance must be finite and positive, got {}",
        self.step_distance
      )));
    }
    if !self.hull_epsilon.is_finite() || self.hull_epsilon <= 0.0 {
      return Err(BMeshError::InvalidConfig(format!(
        "hull_epsilon must be finite and positive, got {}",
        self.hull_epsilon
      )));
    }
    if !self.root_direction.is_finite() || self.root_direction.length_squared() <= DEGENERATE_LENGTH_SQ {
      return Err(BMeshError::InvalidConfig(format!(
        "root_direction must be a finite non-zero vector, got {}",
        self.root_direction
      )));
    }
    Ok(())
  }

  /// Same config with a different step distance.
  pub fn with_step_distance(mut self, step_distance: f32) -> Self {
    self.step_distance = step_distance;
    self
  }
}

impl Default for BMeshConfig {
  fn default() -> Self {
    Self {
      step_distance: DEFAULT_STEP_DISTANCE,
      root_direction: Vec3::Y,
      resweep_after_stitch: true,
      hull_epsilon: DEFAULT_HULL_EPSILON,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
