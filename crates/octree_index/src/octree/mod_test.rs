use super::*;
use crate::point::Point;

// =========================================================================
// End-to-end scenarios on a 1000-unit tree centered at the origin
// =========================================================================

fn seeded(points: &[(f64, f64, f64)]) -> Octree {
  let mut tree = Octree::with_bounds(Point::ORIGIN, 1000.0).expect("valid bounds");
  for &p in points {
    assert!(tree.insert(p.into()));
  }
  tree
}

#[test]
fn test_insert_into_empty_tree_is_found() {
  let tree = seeded(&[(10.0, 10.0, 10.0)]);
  assert_eq!(tree.search(&Point::splat(10.0)), Some(Point::splat(10.0)));
}

#[test]
fn test_range_returns_points_inside_box() {
  let tree = seeded(&[(10.0, 10.0, 10.0), (20.0, 20.0, 20.0), (30.0, 30.0, 30.0)]);
  let found = tree.range_query(&Point::splat(0.0), &Point::splat(25.0));

  assert_eq!(found.len(), 2);
  assert!(found.contains(&Point::splat(10.0)));
  assert!(found.contains(&Point::splat(20.0)));
  assert!(!found.contains(&Point::splat(30.0)));
}

/// (10,10,10) and (20,20,20) are both 8.66 from (15,15,15); the tie goes
/// to (10,10,10), which sits in a lower octant and is visited first.
#[test]
fn test_nearest_neighbor_picks_closest() {
  let tree = seeded(&[(10.0, 10.0, 10.0), (20.0, 20.0, 20.0), (30.0, 30.0, 30.0)]);
  let nearest = tree.find_nearest_neighbor(&Point::splat(15.0)).expect("non-empty");
  assert_eq!(nearest, Point::splat(10.0));

  let nearest = tree.find_nearest_neighbor(&Point::splat(12.0)).expect("non-empty");
  assert_eq!(nearest, Point::splat(10.0));
  let nearest = tree.find_nearest_neighbor(&Point::splat(29.0)).expect("non-empty");
  assert_eq!(nearest, Point::splat(30.0));
}

#[test]
fn test_collision_depends_on_radius() {
  let tree = seeded(&[(10.0, 10.0, 10.0), (15.0, 15.0, 15.0)]);
  assert!(tree.detect_collision(&Point::splat(10.0), 30.0));
  assert!(!tree.detect_collision(&Point::splat(10.0), 1.0));
}

#[test]
fn test_overflowing_leaf_subdivides_and_keeps_points() {
  let points = [(10.0, 10.0, 10.0), (-10.0, 20.0, 30.0), (200.0, -50.0, 5.0)];
  let tree = seeded(&points);

  assert!(!tree.root().is_leaf(), "Third point exceeds leaf capacity 2");
  let children = tree.root().children().expect("internal root");
  assert!(children.iter().all(Option::is_some));
  for p in points {
    let p = Point::from(p);
    assert_eq!(tree.search(&p), Some(p));
  }
  assert_eq!(tree.len(), 3);
}
