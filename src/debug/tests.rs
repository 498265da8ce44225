//! Debug: anchor nudge key mapping.

use super::{COARSE_STEP, FINE_STEP, anchor_delta};

#[test]
fn test_anchor_delta_directions() {
    let d = anchor_delta(true, false, false, true, false);
    assert_eq!(d.x, -FINE_STEP);
    assert_eq!(d.y, FINE_STEP);
}

#[test]
fn test_anchor_delta_opposite_keys_cancel() {
    assert_eq!(anchor_delta(true, true, true, true, true).length(), 0.0);
}

#[test]
fn test_anchor_delta_coarse() {
    let d = anchor_delta(false, true, true, false, true);
    assert_eq!(d.x, COARSE_STEP);
    assert_eq!(d.y, -COARSE_STEP);
}
