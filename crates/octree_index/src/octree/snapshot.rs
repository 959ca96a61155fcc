//! Serializable structural dump of an octree, for visualization and
//! debugging.
//!
//! The field names follow the JSON shape front ends already consume:
//!
//! ```text
//! { center, size, depth, is_leaf, points, pt_count, min, max, children }
//! ```
//!
//! Internal nodes always emit all eight child slots in octant order; an
//! absent slot is `null` rather than omitted.

use serde::{Deserialize, Serialize};

use super::node::{NodeKind, OctreeNode};
use crate::point::Point;

/// Owned, recursive copy of a node and its subtree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
  pub center: Point,
  pub size: f64,
  pub depth: u32,
  pub is_leaf: bool,
  /// Points stored directly (empty for internal nodes).
  pub points: Vec<Point>,
  /// Points stored anywhere in the subtree.
  pub pt_count: usize,
  pub min: Point,
  pub max: Point,
  /// Empty for leaves, exactly eight slots for internal nodes.
  pub children: Vec<Option<NodeSnapshot>>,
}

impl NodeSnapshot {
  /// Capture `node` and everything below it.
  pub fn capture(node: &OctreeNode) -> Self {
    let bounds = node.bounds();
    let (points, children) = match node.kind() {
      NodeKind::Leaf(points) => (points.to_vec(), Vec::new()),
      NodeKind::Internal(children) => (
        Vec::new(),
        children
          .iter()
          .map(|slot| slot.as_deref().map(NodeSnapshot::capture))
          .collect(),
      ),
    };
    Self {
      center: node.center(),
      size: node.size(),
      depth: node.depth(),
      is_leaf: node.is_leaf(),
      points,
      pt_count: node.point_count(),
      min: bounds.min,
      max: bounds.max,
      children,
    }
  }

  /// Number of nodes in this snapshot, including itself.
  pub fn node_count(&self) -> usize {
    1 + self.children.iter().flatten().map(NodeSnapshot::node_count).sum::<usize>()
  }
}

impl From<&OctreeNode> for NodeSnapshot {
  fn from(node: &OctreeNode) -> Self {
    Self::capture(node)
  }
}
