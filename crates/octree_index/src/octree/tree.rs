//! Octree - facade owning the root node.
//!
//! Every operation starts at the root. Point-targeted operations (insert,
//! search, delete) follow a single root-to-leaf path; range, nearest and
//! enumeration walk every relevant subtree.

use super::bounds::Aabb;
use super::config::OctreeConfig;
use super::node::OctreeNode;
use super::snapshot::NodeSnapshot;
use super::stats::TreeStats;
use crate::constants::COLLISION_SIZE;
use crate::error::ConfigError;
use crate::point::Point;

/// Point octree.
///
/// Single-threaded: no operation locks, and multi-step operations such as
/// [`Octree::update_point`] are not atomic. Callers sharing one tree across
/// threads must serialize access (see [`crate::game::GameIndex`]).
#[derive(Clone, Debug)]
pub struct Octree {
  config: OctreeConfig,
  root: OctreeNode,
}

impl Octree {
  /// Create an empty tree after validating `config`.
  pub fn new(config: OctreeConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    let root = OctreeNode::new(config.center, config.size, 0);
    Ok(Self { config, root })
  }

  /// Empty tree rooted at `center` with edge length `size`.
  pub fn with_bounds(center: Point, size: f64) -> Result<Self, ConfigError> {
    Self::new(OctreeConfig::with_bounds(center, size))
  }

  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// Read-only access to the root node.
  pub fn root(&self) -> &OctreeNode {
    &self.root
  }

  /// Cube covered by the root.
  pub fn bounds(&self) -> Aabb {
    self.root.bounds()
  }

  /// Number of stored points.
  pub fn len(&self) -> usize {
    self.root.point_count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Drop every point, leaving a single empty root leaf.
  pub fn clear(&mut self) {
    self.root = OctreeNode::new(self.config.center, self.config.size, 0);
  }

  /// Insert a point. Always true for a well-formed point.
  ///
  /// Points outside the root cube are accepted and routed to the nearest
  /// edge cell, but range queries prune by cell bounds and may miss them.
  pub fn insert(&mut self, point: Point) -> bool {
    self.root.insert(point, &self.config)
  }

  /// Insert only if no approximately-equal point is already stored.
  pub fn insert_unique(&mut self, point: Point) -> bool {
    if self.contains(&point) {
      return false;
    }
    self.insert(point)
  }

  /// Find a stored point approximately equal to `point`.
  pub fn search(&self, point: &Point) -> Option<Point> {
    self.root.search(point)
  }

  pub fn contains(&self, point: &Point) -> bool {
    self.search(point).is_some()
  }

  /// Remove one stored point approximately equal to `point`.
  pub fn delete(&mut self, point: &Point) -> bool {
    self.root.delete(point)
  }

  /// All points with `min <= p <= max` on every axis.
  pub fn range_query(&self, min: &Point, max: &Point) -> Vec<Point> {
    self.query_box(&Aabb::new(*min, *max))
  }

  /// All points inside `query` (inclusive).
  pub fn query_box(&self, query: &Aabb) -> Vec<Point> {
    let mut out = Vec::new();
    self.root.range_query(query, &mut out);
    out
  }

  /// Closest stored point to `target`, or `None` for an empty tree.
  ///
  /// Ties keep the point found first in depth-first, octant-ascending order.
  pub fn find_nearest_neighbor(&self, target: &Point) -> Option<Point> {
    self.nearest_with_distance(target).map(|(point, _)| point)
  }

  /// Closest stored point together with its distance to `target`.
  pub fn nearest_with_distance(&self, target: &Point) -> Option<(Point, f64)> {
    let mut best = None;
    self.root.nearest_neighbor(target, &mut best);
    best
  }

  /// Up to `k` points ordered nearest-first.
  ///
  /// `k == 1` goes through [`Octree::find_nearest_neighbor`]. Larger `k`
  /// enumerates every point, drops those approximately equal to `target`,
  /// and stable-sorts by distance.
  pub fn k_nearest(&self, target: &Point, k: usize) -> Vec<Point> {
    match k {
      0 => Vec::new(),
      1 => self.find_nearest_neighbor(target).into_iter().collect(),
      _ => {
        let mut by_distance: Vec<(Point, f64)> = self
          .get_all_points()
          .into_iter()
          .filter(|p| p != target)
          .map(|p| (p, target.distance_to(&p)))
          .collect();
        by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
        by_distance.into_iter().take(k).map(|(p, _)| p).collect()
      }
    }
  }

  /// Every stored point, depth-first, octant-ascending.
  pub fn get_all_points(&self) -> Vec<Point> {
    let mut out = Vec::with_capacity(self.len());
    self.root.collect_points(&mut out);
    out
  }

  /// Whether any other point lies strictly closer than `radius` to `point`.
  ///
  /// Candidates come from a cube of edge `radius` centered on `point`.
  /// Stored points approximately equal to `point` are treated as `point`
  /// itself and ignored.
  pub fn detect_collision(&self, point: &Point, radius: f64) -> bool {
    let candidates = self.query_box(&Aabb::from_center_size(*point, radius));
    candidates
      .iter()
      .filter(|candidate| *candidate != point)
      .any(|candidate| point.distance_to(candidate) < radius)
  }

  /// [`Octree::detect_collision`] with the default radius.
  pub fn detect_collision_default(&self, point: &Point) -> bool {
    self.detect_collision(point, COLLISION_SIZE)
  }

  /// Move a stored point: delete `old`, then insert `new` only if the
  /// delete succeeded.
  ///
  /// Not atomic; a caller interleaving other mutations between the two
  /// steps must provide its own exclusion.
  pub fn update_point(&mut self, old: &Point, new: Point) -> bool {
    if self.delete(old) {
      return self.insert(new);
    }
    false
  }

  /// Nested copy of the whole tree for visualization.
  pub fn snapshot(&self) -> NodeSnapshot {
    NodeSnapshot::capture(&self.root)
  }

  pub fn stats(&self) -> TreeStats {
    TreeStats::collect(&self.root)
  }
}

impl Default for Octree {
  fn default() -> Self {
    let config = OctreeConfig::default();
    let root = OctreeNode::new(config.center, config.size, 0);
    Self { config, root }
  }
}

impl Extend<Point> for Octree {
  fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
    for point in iter {
      self.insert(point);
    }
  }
}

impl FromIterator<Point> for Octree {
  fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
    let mut tree = Octree::default();
    tree.extend(iter);
    tree
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
