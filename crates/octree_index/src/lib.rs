//! octree_index - In-memory point-region octree for 3-D points
//!
//! Stores points in a cubic region that splits into eight octants once a
//! leaf overflows. On top of the index sit collision-checked moves for
//! "game" objects and a best-effort loader for plain-text point lists.
//!
//! # Features
//!
//! - **Point queries**: insert, tolerance search, delete, inclusive range
//!   query, nearest and k-nearest neighbours
//! - **Collision**: radius test against every other stored point
//! - **Moves**: relocate a point only when its destination is free, either
//!   to explicit coordinates or one step along an axis
//! - **Structure dump**: serializable snapshot of the whole node tree
//!
//! # Example
//!
//! ```
//! use octree_index::{Octree, Point};
//!
//! let mut tree = Octree::default();
//! tree.insert(Point::new(10.0, 10.0, 10.0));
//! tree.insert(Point::new(20.0, 20.0, 20.0));
//!
//! let inside = tree.range_query(&Point::splat(0.0), &Point::splat(15.0));
//! assert_eq!(inside, vec![Point::new(10.0, 10.0, 10.0)]);
//! ```

pub mod constants;
pub mod error;
pub mod point;

pub use error::{ConfigError, DirectionError, LoadError, ParsePointError};
pub use point::Point;

// Spatial index
pub mod octree;
pub use octree::{Aabb, NodeSnapshot, Octree, OctreeConfig, OctreeNode, TreeStats};

// Collision-checked movement and the shared handle
pub mod game;
pub use game::{Direction, GameConfig, GameIndex, MoveOutcome};

// Plain-text bulk load / save
pub mod loader;
pub use loader::LoadReport;
