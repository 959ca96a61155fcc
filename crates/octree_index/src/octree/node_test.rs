use super::*;

fn config() -> OctreeConfig {
  OctreeConfig::default()
}

fn root() -> OctreeNode {
  OctreeNode::new(Point::ORIGIN, 1000.0, 0)
}

/// Sum of children's counts (or own points for a leaf) must equal the
/// node's aggregate count, at every node.
fn assert_counts_consistent(node: &OctreeNode) {
  node.visit(&mut |n| {
    let expected = match n.children() {
      None => n.points().len(),
      Some(children) => {
        assert!(n.points().is_empty(), "Internal node must not hold points");
        assert!(children.iter().all(Option::is_some), "Internal node must have 8 children");
        children.iter().flatten().map(|c| c.point_count()).sum::<usize>()
      }
    };
    assert_eq!(
      n.point_count(),
      expected,
      "Count mismatch at depth {} center {}",
      n.depth(),
      n.center()
    );
  });
}

// =========================================================================
// Octant classification
// =========================================================================

/// Octant bits: X (bit 2), Y (bit 1), Z (bit 0).
#[test]
fn test_octant_bits() {
  let c = Point::ORIGIN;
  assert_eq!(octant_of(&c, &Point::new(-1.0, -1.0, -1.0)), 0);
  assert_eq!(octant_of(&c, &Point::new(-1.0, -1.0, 1.0)), 1);
  assert_eq!(octant_of(&c, &Point::new(-1.0, 1.0, -1.0)), 2);
  assert_eq!(octant_of(&c, &Point::new(1.0, -1.0, -1.0)), 4);
  assert_eq!(octant_of(&c, &Point::new(1.0, 1.0, 1.0)), 7);
}

/// Coordinates equal to the center route to the positive side.
#[test]
fn test_octant_ties_go_positive() {
  let c = Point::new(10.0, 20.0, 30.0);
  assert_eq!(octant_of(&c, &c), 7);
  assert_eq!(octant_of(&c, &Point::new(10.0, 0.0, 0.0)), 4);
  assert_eq!(octant_of(&c, &Point::new(0.0, 20.0, 0.0)), 2);
  assert_eq!(octant_of(&c, &Point::new(0.0, 0.0, 30.0)), 1);
}

// =========================================================================
// Construction and subdivision
// =========================================================================

#[test]
fn test_new_node_is_empty_leaf() {
  let node = root();
  assert!(node.is_leaf());
  assert_eq!(node.point_count(), 0);
  assert!(node.points().is_empty());
  assert!(node.children().is_none());
  assert_eq!(node.bounds().min, Point::splat(-500.0));
  assert_eq!(node.bounds().max, Point::splat(500.0));
}

#[test]
#[should_panic(expected = "finite and positive")]
fn test_new_node_rejects_zero_size() {
  let _ = OctreeNode::new(Point::ORIGIN, 0.0, 0);
}

#[test]
fn test_leaf_holds_up_to_capacity() {
  let mut node = root();
  let config = config();
  assert!(node.insert(Point::splat(10.0), &config));
  assert!(node.insert(Point::splat(-10.0), &config));
  assert!(node.is_leaf(), "Two points fit in a leaf with capacity 2");
  assert_eq!(node.points(), &[Point::splat(10.0), Point::splat(-10.0)]);
}

/// Third point overflows the root: 8 children in octant order, each half
/// size, centered at ±size/4.
#[test]
fn test_overflow_subdivides_into_eight_children() {
  let mut node = root();
  let config = config();
  node.insert(Point::splat(10.0), &config);
  node.insert(Point::splat(-10.0), &config);
  node.insert(Point::new(100.0, -100.0, 100.0), &config);

  assert!(!node.is_leaf());
  assert!(node.points().is_empty());
  assert_eq!(node.point_count(), 3);

  let children = node.children().expect("Internal node has children");
  for (octant, slot) in children.iter().enumerate() {
    let child = slot.as_deref().expect("Subdivision fills every slot");
    assert_eq!(child.size(), 500.0, "Octant {} size", octant);
    assert_eq!(child.depth(), 1, "Octant {} depth", octant);
    let [sx, sy, sz] = OCTANT_SIGNS[octant];
    assert_eq!(
      child.center(),
      Point::new(sx * 250.0, sy * 250.0, sz * 250.0),
      "Octant {} center",
      octant
    );
  }

  assert_eq!(children[7].as_ref().unwrap().points(), &[Point::splat(10.0)]);
  assert_eq!(children[0].as_ref().unwrap().points(), &[Point::splat(-10.0)]);
  assert_eq!(children[5].as_ref().unwrap().points(), &[Point::new(100.0, -100.0, 100.0)]);
  assert_counts_consistent(&node);
}

/// Redistribution recomputes octants against the children, and keeps
/// splitting when every point lands in the same child.
#[test]
fn test_clustered_points_split_repeatedly() {
  let mut node = root();
  let config = config();
  let points = [Point::splat(1.0), Point::splat(2.0), Point::splat(3.0)];
  for p in points {
    node.insert(p, &config);
  }

  assert_eq!(node.point_count(), 3);
  for p in &points {
    assert_eq!(node.search(p), Some(*p), "{} should still be findable", p);
  }
  let mut deepest = 0;
  node.visit(&mut |n| deepest = deepest.max(n.depth()));
  assert!(deepest >= 2, "Clustered points force more than one split");
  assert_counts_consistent(&node);
}

/// At max depth leaves accept unbounded points instead of splitting.
#[test]
fn test_max_depth_stops_subdivision() {
  let mut node = root();
  let config = config();
  // Points closer together than the smallest cell (1000 / 2^5 = 31.25)
  for i in 0..20 {
    node.insert(Point::splat(1.0 + i as f64 * 0.1), &config);
  }

  assert_eq!(node.point_count(), 20);
  node.visit(&mut |n| {
    assert!(n.depth() <= config.max_depth, "No node deeper than max_depth");
    if n.depth() == config.max_depth && n.point_count() > 0 {
      assert!(n.is_leaf());
      assert_eq!(n.points().len(), 20);
    }
  });
  assert_counts_consistent(&node);
}

// =========================================================================
// Search / delete
// =========================================================================

#[test]
fn test_search_uses_tolerance() {
  let mut node = root();
  node.insert(Point::new(10.0, 10.0, 10.0), &config());
  assert!(node.search(&Point::new(10.0 + 5e-7, 10.0, 10.0)).is_some());
  assert!(node.search(&Point::new(10.0 + 5e-6, 10.0, 10.0)).is_none());
}

/// A point just below a partition plane is not found by a query just above
/// it, even though the two compare equal.
#[test]
fn test_search_does_not_cross_partition_boundary() {
  let mut node = root();
  let config = config();
  let stored = Point::new(-1e-7, 100.0, 100.0);
  node.insert(stored, &config);
  node.insert(Point::splat(-200.0), &config);
  node.insert(Point::splat(200.0), &config);
  assert!(!node.is_leaf());

  let probe = Point::new(1e-7, 100.0, 100.0);
  assert_eq!(probe, stored, "Probe is within tolerance");
  assert!(node.search(&stored).is_some());
  assert!(node.search(&probe).is_none(), "Probe routes to the positive-X child");
}

#[test]
fn test_delete_removes_first_match_only() {
  let mut node = root();
  let config = config();
  let p = Point::splat(42.0);
  node.insert(p, &config);
  node.insert(p, &config);

  assert!(node.delete(&p));
  assert_eq!(node.point_count(), 1);
  assert!(node.search(&p).is_some(), "Duplicate survives a single delete");
  assert!(node.delete(&p));
  assert!(node.search(&p).is_none());
  assert!(!node.delete(&p), "Deleting a missing point reports false");
  assert_eq!(node.point_count(), 0);
}

#[test]
fn test_delete_updates_counts_along_path() {
  let mut node = root();
  let config = config();
  let points = [
    Point::splat(10.0),
    Point::splat(-10.0),
    Point::new(100.0, -100.0, 100.0),
    Point::new(120.0, -120.0, 120.0),
  ];
  for p in points {
    node.insert(p, &config);
  }
  assert!(node.delete(&points[3]));
  assert_eq!(node.point_count(), 3);
  assert_counts_consistent(&node);
  assert!(!node.is_leaf(), "Internal nodes never collapse");
}

// =========================================================================
// Range / nearest / enumeration
// =========================================================================

#[test]
fn test_range_query_inclusive_bounds() {
  let mut node = root();
  let config = config();
  for p in [Point::splat(0.0), Point::splat(25.0), Point::splat(25.000001)] {
    node.insert(p, &config);
  }
  let mut out = Vec::new();
  node.range_query(&Aabb::new(Point::splat(0.0), Point::splat(25.0)), &mut out);
  assert_eq!(out.len(), 2, "Both corners are inclusive");
}

#[test]
fn test_range_query_order_is_octant_ascending() {
  let mut node = root();
  let config = config();
  for p in [Point::splat(100.0), Point::splat(-100.0), Point::new(-100.0, -100.0, 100.0)] {
    node.insert(p, &config);
  }
  let mut out = Vec::new();
  node.range_query(&Aabb::from_center_size(Point::ORIGIN, 1000.0), &mut out);
  assert_eq!(
    out,
    vec![Point::splat(-100.0), Point::new(-100.0, -100.0, 100.0), Point::splat(100.0)]
  );
}

#[test]
fn test_nearest_neighbor_first_wins_ties() {
  let mut node = root();
  let config = config();
  // Equidistant from the origin; octant 0 is visited before octant 7.
  node.insert(Point::splat(10.0), &config);
  node.insert(Point::splat(-10.0), &config);
  node.insert(Point::splat(300.0), &config);

  let mut best = None;
  node.nearest_neighbor(&Point::ORIGIN, &mut best);
  let (point, distance) = best.expect("Non-empty tree");
  assert_eq!(point, Point::splat(-10.0));
  assert!((distance - 300.0_f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_nearest_neighbor_empty() {
  let mut best = None;
  root().nearest_neighbor(&Point::ORIGIN, &mut best);
  assert!(best.is_none());
}

#[test]
fn test_collect_points_enumerates_everything() {
  let mut node = root();
  let config = config();
  let points: Vec<Point> = (0..50).map(|i| Point::new(i as f64 * 7.0 - 170.0, i as f64 * 3.0, -(i as f64))).collect();
  for p in &points {
    node.insert(*p, &config);
  }
  let mut out = Vec::new();
  node.collect_points(&mut out);
  assert_eq!(out.len(), points.len());
  for p in &points {
    assert!(out.contains(p), "{} missing from enumeration", p);
  }
  assert_counts_consistent(&node);
}
