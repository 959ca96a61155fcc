//! Structural statistics for an octree.

use super::node::OctreeNode;

/// Counts gathered by walking every node once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
	/// Total nodes, root included.
	pub nodes: usize,
	/// Nodes holding points directly.
	pub leaves: usize,
	/// Nodes with eight children.
	pub internal: usize,
	/// Depth of the deepest node (root = 0).
	pub max_depth: u32,
	/// Points stored in the tree.
	pub points: usize,
	/// Largest number of points held by a single leaf.
	pub fullest_leaf: usize,
}

impl TreeStats {
	/// Walk `root` and tally its structure.
	pub fn collect(root: &OctreeNode) -> Self {
		let mut stats = Self {
			points: root.point_count(),
			..Self::default()
		};
		root.visit(&mut |node| {
			stats.nodes += 1;
			stats.max_depth = stats.max_depth.max(node.depth());
			if node.is_leaf() {
				stats.leaves += 1;
				stats.fullest_leaf = stats.fullest_leaf.max(node.points().len());
			} else {
				stats.internal += 1;
			}
		});
		stats
	}
}
