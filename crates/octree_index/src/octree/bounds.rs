//! Closed axis-aligned box used for node bounds and range queries.

use glam::DVec3;
use serde::Serialize;

use crate::point::Point;

/// Double-precision axis-aligned bounding box.
///
/// Both corners are inclusive. Used for a node's cube and for query boxes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Aabb {
	/// Minimum corner (inclusive).
	pub min: Point,
	/// Maximum corner (inclusive).
	pub max: Point,
}

impl Aabb {
	/// Create a new AABB from min and max corners.
	///
	/// Corners are taken as given: a box with `min > max` on some axis is
	/// empty and contains no point.
	pub fn new(min: Point, max: Point) -> Self {
		Self { min, max }
	}

	/// Create a cube from its center and edge length.
	pub fn from_center_size(center: Point, size: f64) -> Self {
		let half = DVec3::splat(size / 2.0);
		let c = center.as_dvec3();
		Self {
			min: (c - half).into(),
			max: (c + half).into(),
		}
	}

	/// Check if this AABB overlaps with another.
	///
	/// Touching at a face, edge or corner counts as overlapping.
	#[inline]
	pub fn overlaps(&self, other: &Aabb) -> bool {
		self.min.x <= other.max.x
			&& self.max.x >= other.min.x
			&& self.min.y <= other.max.y
			&& self.max.y >= other.min.y
			&& self.min.z <= other.max.z
			&& self.max.z >= other.min.z
	}

	/// Check if this AABB contains a point (inclusive on all faces).
	#[inline]
	pub fn contains_point(&self, point: &Point) -> bool {
		point.x >= self.min.x
			&& point.x <= self.max.x
			&& point.y >= self.min.y
			&& point.y <= self.max.y
			&& point.z >= self.min.z
			&& point.z <= self.max.z
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max.as_dvec3() - self.min.as_dvec3()
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> Point {
		((self.min.as_dvec3() + self.max.as_dvec3()) * 0.5).into()
	}
}
