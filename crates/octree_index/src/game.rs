//! Point movement on top of the octree: collision-checked moves, directional
//! steps, and a lock-guarded handle for sharing one index between callers.
//!
//! A move is a two-phase sequence:
//!
//! 1. **Check**: reject if the destination collides with any stored point
//!    other than itself.
//! 2. **Relocate**: delete the old point, insert the new one only if the
//!    delete succeeded.
//!
//! [`move_point`] runs both phases on a plain [`Octree`] with no atomicity.
//! [`GameIndex`] runs each public operation, both phases included, under
//! one exclusive lock.

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::constants::{COLLISION_SIZE, STEP};
use crate::error::{ConfigError, DirectionError};
use crate::octree::{NodeSnapshot, Octree, TreeStats};
use crate::point::Point;

// =============================================================================
// Direction
// =============================================================================

/// One of the six axis-aligned movement directions.
///
/// | token | name    | axis |
/// |-------|---------|------|
/// | `w`   | forward | +Y   |
/// | `s`   | back    | -Y   |
/// | `a`   | left    | -X   |
/// | `d`   | right   | +X   |
/// | `e`   | up      | +Z   |
/// | `f`   | down    | -Z   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Forward,
  Back,
  Left,
  Right,
  Up,
  Down,
}

impl Direction {
  pub const ALL: [Direction; 6] = [
    Direction::Forward,
    Direction::Back,
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
  ];

  /// Single-key token for this direction.
  pub fn token(self) -> char {
    match self {
      Direction::Forward => 'w',
      Direction::Back => 's',
      Direction::Left => 'a',
      Direction::Right => 'd',
      Direction::Up => 'e',
      Direction::Down => 'f',
    }
  }

  /// Unit offset along the direction's axis.
  pub fn unit(self) -> Point {
    match self {
      Direction::Forward => Point::new(0.0, 1.0, 0.0),
      Direction::Back => Point::new(0.0, -1.0, 0.0),
      Direction::Left => Point::new(-1.0, 0.0, 0.0),
      Direction::Right => Point::new(1.0, 0.0, 0.0),
      Direction::Up => Point::new(0.0, 0.0, 1.0),
      Direction::Down => Point::new(0.0, 0.0, -1.0),
    }
  }

  /// `point` moved `step` units in this direction.
  pub fn apply(self, point: &Point, step: f64) -> Point {
    (point.as_dvec3() + self.unit().as_dvec3() * step).into()
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Direction::Forward => "forward",
      Direction::Back => "back",
      Direction::Left => "left",
      Direction::Right => "right",
      Direction::Up => "up",
      Direction::Down => "down",
    };
    f.write_str(name)
  }
}

/// Accepts the single-key tokens and the long names, case-insensitively.
impl FromStr for Direction {
  type Err = DirectionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "w" | "forward" => Ok(Direction::Forward),
      "s" | "back" | "backward" => Ok(Direction::Back),
      "a" | "left" => Ok(Direction::Left),
      "d" | "right" => Ok(Direction::Right),
      "e" | "up" => Ok(Direction::Up),
      "f" | "down" => Ok(Direction::Down),
      _ => Err(DirectionError(s.to_string())),
    }
  }
}

// =============================================================================
// GameConfig
// =============================================================================

/// Movement tuning.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
  /// Distance covered by one directional move.
  pub step: f64,
  /// Points closer than this to a destination block the move.
  pub collision_radius: f64,
}

impl GameConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !self.step.is_finite() {
      return Err(ConfigError::InvalidStep(self.step));
    }
    if !self.collision_radius.is_finite() || self.collision_radius < 0.0 {
      return Err(ConfigError::InvalidCollisionRadius(self.collision_radius));
    }
    Ok(())
  }
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      step: STEP,
      collision_radius: COLLISION_SIZE,
    }
  }
}

// =============================================================================
// Moves on a plain tree
// =============================================================================

/// Result of a move request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
  /// The point now lives at `to`.
  Moved { from: Point, to: Point },
  /// The destination is occupied; nothing changed.
  Collision { current: Point, blocked: Point },
  /// No stored point matches the source; nothing changed.
  NotFound { requested: Point },
}

impl MoveOutcome {
  pub fn is_moved(&self) -> bool {
    matches!(self, MoveOutcome::Moved { .. })
  }
}

/// Collision-check `new`, then relocate `old` to it.
///
/// The check runs against the tree as it stands, old point included: a
/// step shorter than `radius` collides with the point's own old position.
pub fn move_point(tree: &mut Octree, old: &Point, new: Point, radius: f64) -> MoveOutcome {
  if tree.detect_collision(&new, radius) {
    tracing::debug!(from = %old, to = %new, "move rejected: collision");
    return MoveOutcome::Collision {
      current: *old,
      blocked: new,
    };
  }
  if tree.update_point(old, new) {
    tracing::debug!(from = %old, to = %new, "point moved");
    MoveOutcome::Moved { from: *old, to: new }
  } else {
    tracing::debug!(point = %old, "move rejected: source not found");
    MoveOutcome::NotFound { requested: *old }
  }
}

/// Step `current` one `step` in `direction`, through [`move_point`].
pub fn move_by_direction(
  tree: &mut Octree,
  current: &Point,
  direction: Direction,
  step: f64,
  radius: f64,
) -> MoveOutcome {
  let target = direction.apply(current, step);
  move_point(tree, current, target, radius)
}

// =============================================================================
// GameIndex - lock-guarded shared handle
// =============================================================================

/// Shared, lock-guarded octree with movement settings.
///
/// Every method takes the lock once and holds it for the whole operation,
/// so a collision check and the relocation it guards cannot interleave
/// with another caller's mutation. Wrap in an `Arc` to share.
#[derive(Debug)]
pub struct GameIndex {
  tree: Mutex<Octree>,
  config: GameConfig,
}

impl GameIndex {
  pub fn new(tree: Octree, config: GameConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self {
      tree: Mutex::new(tree),
      config,
    })
  }

  pub fn config(&self) -> &GameConfig {
    &self.config
  }

  // A panic inside an operation leaves at most that operation half done;
  // the tree itself stays structurally valid.
  fn lock(&self) -> MutexGuard<'_, Octree> {
    self.tree.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Run `f` with exclusive access to the tree while holding the lock.
  pub fn with_tree_mut<R>(&self, f: impl FnOnce(&mut Octree) -> R) -> R {
    f(&mut self.lock())
  }

  pub fn insert(&self, point: Point) -> bool {
    self.lock().insert(point)
  }

  pub fn delete(&self, point: &Point) -> bool {
    self.lock().delete(point)
  }

  pub fn search(&self, point: &Point) -> Option<Point> {
    self.lock().search(point)
  }

  pub fn range(&self, min: &Point, max: &Point) -> Vec<Point> {
    self.lock().range_query(min, max)
  }

  /// Up to `k` points nearest-first.
  pub fn nearest(&self, target: &Point, k: usize) -> Vec<Point> {
    self.lock().k_nearest(target, k)
  }

  pub fn all_points(&self) -> Vec<Point> {
    self.lock().get_all_points()
  }

  pub fn structure(&self) -> NodeSnapshot {
    self.lock().snapshot()
  }

  pub fn stats(&self) -> TreeStats {
    self.lock().stats()
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  /// Whether `point` collides with any other stored point.
  pub fn check_collision(&self, point: &Point) -> bool {
    self.lock().detect_collision(point, self.config.collision_radius)
  }

  /// Collision-checked move from `old` to `new`, atomic with respect to
  /// other callers of this handle.
  pub fn move_point(&self, old: &Point, new: Point) -> MoveOutcome {
    let mut tree = self.lock();
    move_point(&mut tree, old, new, self.config.collision_radius)
  }

  /// Parse `token` and step `current` one configured step that way.
  ///
  /// An unknown token is an input error and never touches the tree.
  pub fn move_by_direction(&self, current: &Point, token: &str) -> Result<MoveOutcome, DirectionError> {
    let direction: Direction = token.parse()?;
    Ok(self.step(current, direction))
  }

  /// Step `current` one configured step in `direction`.
  pub fn step(&self, current: &Point, direction: Direction) -> MoveOutcome {
    let mut tree = self.lock();
    move_by_direction(
      &mut tree,
      current,
      direction,
      self.config.step,
      self.config.collision_radius,
    )
  }

  /// Release the tree.
  pub fn into_inner(self) -> Octree {
    self.tree.into_inner().unwrap_or_else(PoisonError::into_inner)
  }
}

impl Default for GameIndex {
  fn default() -> Self {
    Self {
      tree: Mutex::new(Octree::default()),
      config: GameConfig::default(),
    }
  }
}

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;
