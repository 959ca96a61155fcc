//! OctreeConfig - root geometry and subdivision policy.

use serde::Deserialize;

use crate::constants::{MAX_DEPTH, MAX_POINTS, MAX_SIZE};
use crate::error::ConfigError;
use crate::point::Point;

/// Configuration for the root cube and leaf subdivision.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
  /// Center of the root cube.
  pub center: Point,

  /// Edge length of the root cube.
  pub size: f64,

  /// Points a leaf holds before subdividing.
  pub max_points: usize,

  /// Depth at which leaves stop subdividing and accept unbounded points.
  pub max_depth: u32,
}

impl OctreeConfig {
  /// Root cube at `center` with edge length `size`, default leaf policy.
  pub fn with_bounds(center: Point, size: f64) -> Self {
    Self {
      center,
      size,
      ..Self::default()
    }
  }

  /// Check the configuration describes a usable tree.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !self.size.is_finite() || self.size <= 0.0 {
      return Err(ConfigError::InvalidSize(self.size));
    }
    if !self.center.is_finite() {
      return Err(ConfigError::InvalidCenter(self.center));
    }
    if self.max_points == 0 {
      return Err(ConfigError::ZeroLeafCapacity);
    }
    // Halving stays exact while the deepest cell size is a normal float.
    if !self.size_at_depth(self.max_depth).is_normal() {
      return Err(ConfigError::DepthTooDeep {
        max_depth: self.max_depth,
        size: self.size,
      });
    }
    Ok(())
  }

  /// Edge length of a node at `depth`.
  /// size_at_depth = size / 2^depth
  #[inline]
  pub fn size_at_depth(&self, depth: u32) -> f64 {
    let exponent = i32::try_from(depth).unwrap_or(i32::MAX);
    self.size / 2.0_f64.powi(exponent)
  }

  /// Whether a leaf at `depth` holding `len` points takes another point
  /// without subdividing.
  #[inline]
  pub fn leaf_accepts(&self, len: usize, depth: u32) -> bool {
    len < self.max_points || depth >= self.max_depth
  }
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self {
      center: Point::ORIGIN,
      size: MAX_SIZE,
      max_points: MAX_POINTS,
      max_depth: MAX_DEPTH,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
