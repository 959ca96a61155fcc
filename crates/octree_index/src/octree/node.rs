//! OctreeNode - one cubic cell of the point octree.
//!
//! A node is either a leaf holding points directly or an internal node with
//! exactly eight children indexed by octant. Leaves become internal exactly
//! once (on overflow) and never merge back.

use std::array;

use smallvec::SmallVec;

use super::bounds::Aabb;
use super::config::OctreeConfig;
use crate::constants::{MAX_POINTS, OCTANT_SIGNS, OCTANT_X_BIT, OCTANT_Y_BIT, OCTANT_Z_BIT};
use crate::point::Point;

/// Inline storage sized for the default leaf capacity.
pub type LeafPoints = SmallVec<[Point; MAX_POINTS]>;

/// Eight child slots indexed by octant.
pub type Children = [Option<Box<OctreeNode>>; 8];

/// Leaf/internal state of a node.
#[derive(Clone, Debug)]
pub enum NodeKind {
  /// Points stored directly, in insertion order.
  Leaf(LeafPoints),
  /// Exactly eight child slots; subdivision fills every slot.
  Internal(Box<Children>),
}

/// Compute the octant of `point` relative to `center`.
///
/// Bits: X (bit 2), Y (bit 1), Z (bit 0), each set when the coordinate is
/// `>=` the center's. Ties go to the positive side.
#[inline]
pub fn octant_of(center: &Point, point: &Point) -> usize {
  let mut octant = 0;
  if point.x >= center.x {
    octant |= OCTANT_X_BIT;
  }
  if point.y >= center.y {
    octant |= OCTANT_Y_BIT;
  }
  if point.z >= center.z {
    octant |= OCTANT_Z_BIT;
  }
  octant
}

/// Cubic region of the octree.
#[derive(Clone, Debug)]
pub struct OctreeNode {
  center: Point,
  size: f64,
  depth: u32,
  /// Points stored anywhere in this subtree.
  point_count: usize,
  kind: NodeKind,
}

impl OctreeNode {
  /// Create an empty leaf.
  ///
  /// # Panics
  /// Panics if `size` is not finite and positive.
  pub fn new(center: Point, size: f64, depth: u32) -> Self {
    assert!(
      size.is_finite() && size > 0.0,
      "octree node size must be finite and positive, got {size}"
    );
    Self {
      center,
      size,
      depth,
      point_count: 0,
      kind: NodeKind::Leaf(LeafPoints::new()),
    }
  }

  #[inline]
  pub fn center(&self) -> Point {
    self.center
  }

  /// Edge length of the cube.
  #[inline]
  pub fn size(&self) -> f64 {
    self.size
  }

  /// Distance from the root (root = 0).
  #[inline]
  pub fn depth(&self) -> u32 {
    self.depth
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self.kind, NodeKind::Leaf(_))
  }

  /// Number of points stored anywhere in this subtree.
  #[inline]
  pub fn point_count(&self) -> usize {
    self.point_count
  }

  pub fn kind(&self) -> &NodeKind {
    &self.kind
  }

  /// Points stored directly in this node (empty for internal nodes).
  pub fn points(&self) -> &[Point] {
    match &self.kind {
      NodeKind::Leaf(points) => points,
      NodeKind::Internal(_) => &[],
    }
  }

  /// Child slots, or `None` for a leaf.
  pub fn children(&self) -> Option<&Children> {
    match &self.kind {
      NodeKind::Leaf(_) => None,
      NodeKind::Internal(children) => Some(children),
    }
  }

  /// The node's cube as a closed box.
  #[inline]
  pub fn bounds(&self) -> Aabb {
    Aabb::from_center_size(self.center, self.size)
  }

  /// Octant of `point` relative to this node's center.
  #[inline]
  pub fn octant(&self, point: &Point) -> usize {
    octant_of(&self.center, point)
  }

  /// Build the child leaf occupying `octant`.
  ///
  /// Child center = parent center ± size/4 per axis, child size = size/2.
  fn make_child(&self, octant: usize) -> OctreeNode {
    let quarter = self.size / 4.0;
    let [sx, sy, sz] = OCTANT_SIGNS[octant];
    let center = self.center.offset(sx * quarter, sy * quarter, sz * quarter);
    OctreeNode::new(center, self.size / 2.0, self.depth + 1)
  }

  /// Turn this leaf into an internal node and push its points down.
  ///
  /// Each stored point's octant is recomputed against this node's center,
  /// then inserted into the fresh child. `point_count` is unchanged: the
  /// same points now live one level deeper.
  fn subdivide(&mut self, config: &OctreeConfig) {
    let NodeKind::Leaf(points) = &mut self.kind else {
      return;
    };
    let points = std::mem::take(points);

    tracing::trace!(
      depth = self.depth,
      size = self.size,
      center = %self.center,
      "subdividing leaf"
    );

    let mut children: Children = array::from_fn(|octant| Some(Box::new(self.make_child(octant))));
    for point in points {
      let octant = self.octant(&point);
      if let Some(child) = children[octant].as_deref_mut() {
        child.insert(point, config);
      }
    }
    self.kind = NodeKind::Internal(Box::new(children));
  }

  /// Insert a point into this subtree.
  ///
  /// Always succeeds for a well-formed point. Counts are bumped only along
  /// the path actually taken.
  pub fn insert(&mut self, point: Point, config: &OctreeConfig) -> bool {
    if let NodeKind::Leaf(points) = &mut self.kind {
      if config.leaf_accepts(points.len(), self.depth) {
        points.push(point);
        self.point_count += 1;
        return true;
      }
      self.subdivide(config);
    }

    let octant = self.octant(&point);
    let NodeKind::Internal(children) = &mut self.kind else {
      return false;
    };
    let inserted = match children[octant].as_deref_mut() {
      Some(child) => child.insert(point, config),
      None => false,
    };
    if inserted {
      self.point_count += 1;
    }
    inserted
  }

  /// Find a stored point approximately equal to `point`.
  ///
  /// Descends into the single child selected by `point`'s own octant; a
  /// match sitting across a partition plane within tolerance is not found.
  pub fn search(&self, point: &Point) -> Option<Point> {
    match &self.kind {
      NodeKind::Leaf(points) => points.iter().find(|p| *p == point).copied(),
      NodeKind::Internal(children) => children[self.octant(point)].as_deref()?.search(point),
    }
  }

  /// Remove the first stored point approximately equal to `point`.
  ///
  /// Returns false when the terminal leaf has no match; siblings are never
  /// scanned.
  pub fn delete(&mut self, point: &Point) -> bool {
    let removed = match &mut self.kind {
      NodeKind::Leaf(points) => match points.iter().position(|p| p == point) {
        Some(index) => {
          points.remove(index);
          true
        }
        None => false,
      },
      NodeKind::Internal(children) => {
        let octant = octant_of(&self.center, point);
        match children[octant].as_deref_mut() {
          Some(child) => child.delete(point),
          None => false,
        }
      }
    };
    if removed {
      self.point_count -= 1;
    }
    removed
  }

  /// Append every stored point inside `query` (inclusive) to `out`.
  ///
  /// Subtrees whose cube is disjoint from `query` are skipped without
  /// descending. Results come out depth-first, octant-ascending.
  pub fn range_query(&self, query: &Aabb, out: &mut Vec<Point>) {
    if !self.bounds().overlaps(query) {
      return;
    }
    match &self.kind {
      NodeKind::Leaf(points) => {
        out.extend(points.iter().filter(|p| query.contains_point(p)).copied());
      }
      NodeKind::Internal(children) => {
        for child in children.iter().flatten() {
          child.range_query(query, out);
        }
      }
    }
  }

  /// Update `best` with the closest point to `target` in this subtree.
  ///
  /// Exhaustive: every non-empty child is visited in octant order and a
  /// point replaces the current best only when strictly closer, so the
  /// first point found at the minimum distance wins.
  pub fn nearest_neighbor(&self, target: &Point, best: &mut Option<(Point, f64)>) {
    match &self.kind {
      NodeKind::Leaf(points) => {
        for point in points {
          let distance = target.distance_to(point);
          let closer = match best {
            Some((_, best_distance)) => distance < *best_distance,
            None => true,
          };
          if closer {
            *best = Some((*point, distance));
          }
        }
      }
      NodeKind::Internal(children) => {
        for child in children.iter().flatten() {
          if child.point_count > 0 {
            child.nearest_neighbor(target, best);
          }
        }
      }
    }
  }

  /// Append every stored point to `out`, depth-first, octant-ascending.
  pub fn collect_points(&self, out: &mut Vec<Point>) {
    match &self.kind {
      NodeKind::Leaf(points) => out.extend_from_slice(points),
      NodeKind::Internal(children) => {
        for child in children.iter().flatten() {
          child.collect_points(out);
        }
      }
    }
  }

  /// Visit this node and every descendant, parents before children.
  pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a OctreeNode)) {
    f(self);
    if let NodeKind::Internal(children) = &self.kind {
      for child in children.iter().flatten() {
        child.visit(f);
      }
    }
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
