use super::*;

#[test]
fn test_octant_signs_match_octant_bits() {
  for (octant, signs) in OCTANT_SIGNS.iter().enumerate() {
    assert_eq!(signs[0] > 0.0, octant & OCTANT_X_BIT != 0, "Octant {} X sign", octant);
    assert_eq!(signs[1] > 0.0, octant & OCTANT_Y_BIT != 0, "Octant {} Y sign", octant);
    assert_eq!(signs[2] > 0.0, octant & OCTANT_Z_BIT != 0, "Octant {} Z sign", octant);
  }
}

#[test]
fn test_default_limits() {
  assert_eq!(MAX_SIZE, 1000.0);
  assert_eq!(MAX_DEPTH, 5);
  assert_eq!(MAX_POINTS, 2);
  assert_eq!(COLLISION_SIZE, 30.0);
  assert_eq!(STEP, 50.0);
  assert!(EPSILON > 0.0 && EPSILON < 1e-3);
}
