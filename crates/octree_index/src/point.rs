//! Point - immutable 3-D coordinate with tolerant equality.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;
use crate::error::ParsePointError;

/// 3-D point in index space.
///
/// Equality is approximate: two points compare equal when every coordinate
/// differs by less than [`EPSILON`]. Lookup, deletion and collision
/// self-exclusion all rely on this, so `PartialEq` is not
/// transitive and there is no `Eq`/`Hash`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

impl Point {
  /// Origin (0, 0, 0).
  pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

  pub const fn new(x: f64, y: f64, z: f64) -> Self {
    Self { x, y, z }
  }

  /// Same coordinates on all three axes.
  pub const fn splat(v: f64) -> Self {
    Self::new(v, v, v)
  }

  #[inline]
  pub fn as_dvec3(&self) -> DVec3 {
    DVec3::new(self.x, self.y, self.z)
  }

  /// Euclidean distance to `other`.
  #[inline]
  pub fn distance_to(&self, other: &Point) -> f64 {
    self.as_dvec3().distance(other.as_dvec3())
  }

  /// Per-axis tolerant comparison with an explicit epsilon.
  #[inline]
  pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
    (self.x - other.x).abs() < epsilon
      && (self.y - other.y).abs() < epsilon
      && (self.z - other.z).abs() < epsilon
  }

  /// Copy of this point shifted by `(dx, dy, dz)`.
  #[inline]
  pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
    Self::new(self.x + dx, self.y + dy, self.z + dz)
  }

  /// True when no coordinate is NaN or infinite.
  #[inline]
  pub fn is_finite(&self) -> bool {
    self.as_dvec3().is_finite()
  }
}

impl PartialEq for Point {
  fn eq(&self, other: &Self) -> bool {
    self.approx_eq(other, EPSILON)
  }
}

impl From<DVec3> for Point {
  fn from(v: DVec3) -> Self {
    Self::new(v.x, v.y, v.z)
  }
}

impl From<Point> for DVec3 {
  fn from(p: Point) -> Self {
    p.as_dvec3()
  }
}

impl From<[f64; 3]> for Point {
  fn from([x, y, z]: [f64; 3]) -> Self {
    Self::new(x, y, z)
  }
}

impl From<(f64, f64, f64)> for Point {
  fn from((x, y, z): (f64, f64, f64)) -> Self {
    Self::new(x, y, z)
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {}, {})", self.x, self.y, self.z)
  }
}

/// Parses three whitespace-separated coordinates, e.g. `"1.5 -2 30"`.
impl FromStr for Point {
  type Err = ParsePointError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut fields = s.split_whitespace();
    let mut coords = [0.0f64; 3];
    for (axis, slot) in coords.iter_mut().enumerate() {
      let field = fields.next().ok_or(ParsePointError::MissingCoordinate { axis })?;
      *slot = field.parse().map_err(|source| ParsePointError::InvalidCoordinate {
        field: field.to_string(),
        source,
      })?;
    }
    if let Some(extra) = fields.next() {
      return Err(ParsePointError::TrailingInput(extra.to_string()));
    }
    let point = Point::from(coords);
    if !point.is_finite() {
      return Err(ParsePointError::NonFinite(point));
    }
    Ok(point)
  }
}

#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;
