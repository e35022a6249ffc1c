//! Unit tests for grid snapping and neighbor alignment.

use kurbo::{Point, Vec2};
use planboard::path::snap::{align_to_neighbors, nearest_neighbor, snap_value, GridSnap};
use planboard::WallId;

#[test]
fn test_drag_delta_snaps_per_axis() {
    let snap = GridSnap::new(50.0, 15.0);
    assert_eq!(snap.snap_delta(Vec2::new(47.0, 4.0)), Vec2::new(50.0, 0.0));
    // 30 is 20 away from either grid line: rounded, not snapped
    assert_eq!(snap.snap_delta(Vec2::new(30.4, -61.0)), Vec2::new(30.0, -50.0));
}

#[test]
fn test_snap_idempotent_over_grid_sizes() {
    for grid in [10.0, 25.0, 50.0] {
        for i in -200..200 {
            let value = i as f64 * 1.13;
            let once = snap_value(value, grid, 15.0);
            assert_eq!(snap_value(once, grid, 15.0), once, "grid {grid}, value {value}");
        }
    }
}

#[test]
fn test_zero_grid_only_rounds() {
    assert_eq!(snap_value(12.6, 0.0, 15.0), 13.0);
}

#[test]
fn test_alignment_is_deterministic() {
    let neighbors = [
        (WallId(2), Point::new(105.0, 0.0)),
        (WallId(3), Point::new(95.0, 0.0)),
    ];

    // Equidistant neighbors: the first listed wins, every time
    for _ in 0..10 {
        let mut vertices = [Point::new(100.0, 0.0)];
        let applied = align_to_neighbors(&mut vertices, &neighbors, 15.0);
        assert_eq!(vertices[0], Point::new(105.0, 0.0));
        assert_eq!(applied[0].map(|c| c.wall), Some(WallId(2)));
    }
}

#[test]
fn test_threshold_is_strict() {
    let neighbors = [(WallId(2), Point::new(15.0, 0.0))];
    assert_eq!(nearest_neighbor(Point::ORIGIN, &neighbors, 15.0), None);
    assert!(nearest_neighbor(Point::ORIGIN, &neighbors, 15.01).is_some());
}
