//! Octree module: recursive point partitioning.
//!
//! Every node is an axis-aligned cube. Leaves hold up to `max_points`
//! points; on overflow a leaf splits into eight half-size children and
//! pushes its points down. Splitting stops at `max_depth`, where leaves
//! grow without bound.
//!
//! ```text
//! child center = parent center ± size/4 (per axis, by octant bit)
//! child size   = parent size / 2
//! ```
//!
//! # Module Structure
//!
//! - [`bounds`]: `Aabb` - closed boxes for node cells and range queries
//! - [`config`]: `OctreeConfig` - root geometry and leaf policy
//! - [`node`]: `OctreeNode` - recursive leaf/internal cell
//! - [`tree`]: `Octree` - facade owning the root
//! - [`snapshot`]: `NodeSnapshot` - serializable structure dump
//! - [`stats`]: `TreeStats` - structural counters

pub mod bounds;
pub mod config;
pub mod node;
pub mod snapshot;
pub mod stats;
pub mod tree;

// Re-exports
pub use bounds::Aabb;
pub use config::OctreeConfig;
pub use node::{octant_of, NodeKind, OctreeNode};
pub use snapshot::NodeSnapshot;
pub use stats::TreeStats;
pub use tree::Octree;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
