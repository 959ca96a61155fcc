//! Default tuning constants for the point index.
//!
//! # Octant Layout
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          │
//!          └───────── +X
//!         /
//!        /
//!       +Z
//!
//! Octant index bits (binary: XYZ), set when coord >= center:
//!   0 = (-,-,-)    4 = (+,-,-)
//!   1 = (-,-,+)    5 = (+,-,+)
//!   2 = (-,+,-)    6 = (+,+,-)
//!   3 = (-,+,+)    7 = (+,+,+)
//! ```
//!
//! Ties on a partition plane always route to the positive side, so every
//! point maps to exactly one child.

/// Default edge length of the root cube.
pub const MAX_SIZE: f64 = 1000.0;

/// Default depth at which leaves stop subdividing.
pub const MAX_DEPTH: u32 = 5;

/// Default number of points a leaf holds before it subdivides.
pub const MAX_POINTS: usize = 2;

/// Default collision radius for move checks.
pub const COLLISION_SIZE: f64 = 30.0;

/// Default step length for directional moves.
pub const STEP: f64 = 50.0;

/// Per-axis tolerance for approximate point equality.
pub const EPSILON: f64 = 1e-6;

/// Bit set in the octant index when `x >= center.x`.
pub const OCTANT_X_BIT: usize = 0b100;

/// Bit set in the octant index when `y >= center.y`.
pub const OCTANT_Y_BIT: usize = 0b010;

/// Bit set in the octant index when `z >= center.z`.
pub const OCTANT_Z_BIT: usize = 0b001;

/// Sign of each child's center offset relative to its parent, by octant.
///
/// Child `i` sits at `parent.center + OCTANT_SIGNS[i] * size / 4`.
pub const OCTANT_SIGNS: [[f64; 3]; 8] = [
  [-1.0, -1.0, -1.0], // 0
  [-1.0, -1.0, 1.0],  // 1
  [-1.0, 1.0, -1.0],  // 2
  [-1.0, 1.0, 1.0],   // 3
  [1.0, -1.0, -1.0],  // 4
  [1.0, -1.0, 1.0],   // 5
  [1.0, 1.0, -1.0],   // 6
  [1.0, 1.0, 1.0],    // 7
];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
