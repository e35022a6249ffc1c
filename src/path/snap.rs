//! Grid snapping and neighbor vertex alignment.

use crate::types::WallId;
use kurbo::{Point, Vec2};

/// Snap `value` onto the nearest multiple of `grid` when closer than
/// `threshold`, otherwise round it to an integer. Snapping the result again
/// returns it unchanged.
pub fn snap_value(value: f64, grid: f64, threshold: f64) -> f64 {
    if !(grid > 0.0) {
        return value.round();
    }

    let to_grid = |v: f64| (v / grid).round() * grid;
    let snapped = to_grid(value);
    if (value - snapped).abs() < threshold {
        return snapped;
    }

    let rounded = value.round();
    let snapped = to_grid(rounded);
    if (rounded - snapped).abs() < threshold {
        snapped
    } else {
        rounded
    }
}

/// Grid snapping settings for a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnap {
    pub enabled: bool,
    pub grid_size: f64,
    pub threshold: f64,
}

impl GridSnap {
    pub fn new(grid_size: f64, threshold: f64) -> Self {
        Self {
            enabled: true,
            grid_size,
            threshold,
        }
    }

    /// Snap each axis of a drag delta; disabled snapping passes it through.
    pub fn snap_delta(&self, delta: Vec2) -> Vec2 {
        if !self.enabled {
            return delta;
        }
        Vec2::new(
            snap_value(delta.x, self.grid_size, self.threshold),
            snap_value(delta.y, self.grid_size, self.threshold),
        )
    }
}

/// A candidate target for one vertex and its distance from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub target: Point,
    pub distance: f64,
    /// Wall the target vertex belongs to
    pub wall: WallId,
}

/// Nearest neighbor vertex strictly within `threshold` of `point`. Ties keep
/// the earliest neighbor.
pub fn nearest_neighbor(
    point: Point,
    neighbors: &[(WallId, Point)],
    threshold: f64,
) -> Option<SnapCandidate> {
    neighbors
        .iter()
        .map(|(wall, target)| SnapCandidate {
            target: *target,
            distance: point.distance(*target),
            wall: *wall,
        })
        .filter(|candidate| candidate.distance < threshold)
        .fold(None, |best: Option<SnapCandidate>, candidate| match best {
            Some(b) if b.distance <= candidate.distance => Some(b),
            _ => Some(candidate),
        })
}

/// Move every vertex onto its nearest neighbor vertex within `threshold`.
/// Returns the candidate applied to each vertex.
pub fn align_to_neighbors(
    vertices: &mut [Point],
    neighbors: &[(WallId, Point)],
    threshold: f64,
) -> Vec<Option<SnapCandidate>> {
    vertices
        .iter_mut()
        .map(|vertex| {
            let candidate = nearest_neighbor(*vertex, neighbors, threshold);
            if let Some(c) = candidate {
                *vertex = c.target;
            }
            candidate
        })
        .collect()
}
