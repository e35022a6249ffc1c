//! Wall straightening.
//!
//! Each absolute vertex is pulled onto the grid with a looser tolerance than
//! drag snapping (or rounded to an integer), then a vertex nearly level or
//! nearly plumb with the previous one is made exactly horizontal or vertical.

use super::command::PathCommand;
use super::snap::snap_value;
use super::Path;
use crate::constants::AUTO_FIX_GRID_TOLERANCE;
use kurbo::Point;

/// Straighten `path`. Curves, `Z` and raw commands are kept as they are.
pub fn straighten(path: &Path, grid: f64, threshold: f64) -> Path {
    let tolerance = threshold * AUTO_FIX_GRID_TOLERANCE;
    let snap = |v: f64| snap_value(v, grid, tolerance);

    // Last vertex written, so H/V move the point the next M/L is compared to
    let mut previous: Option<Point> = None;

    let commands = path
        .commands()
        .iter()
        .map(|command| match command {
            PathCommand::MoveTo(points) => {
                PathCommand::MoveTo(points.iter().map(|p| align(&mut previous, *p, snap, threshold)).collect())
            }
            PathCommand::LineTo(points) => {
                PathCommand::LineTo(points.iter().map(|p| align(&mut previous, *p, snap, threshold)).collect())
            }
            PathCommand::Horizontal(xs) => PathCommand::Horizontal(
                xs.iter()
                    .map(|x| {
                        let x = snap(*x);
                        let y = previous.map_or(0.0, |p| p.y);
                        previous = Some(Point::new(x, y));
                        x
                    })
                    .collect(),
            ),
            PathCommand::Vertical(ys) => PathCommand::Vertical(
                ys.iter()
                    .map(|y| {
                        let y = snap(*y);
                        let x = previous.map_or(0.0, |p| p.x);
                        previous = Some(Point::new(x, y));
                        y
                    })
                    .collect(),
            ),
            other => other.clone(),
        })
        .collect();

    Path::new(commands)
}

/// Snap one M/L vertex, then level or plumb it against the previous vertex.
fn align(previous: &mut Option<Point>, p: Point, snap: impl Fn(f64) -> f64, threshold: f64) -> Point {
    let mut fixed = Point::new(snap(p.x), snap(p.y));
    if let Some(prev) = *previous {
        if (fixed.y - prev.y).abs() < threshold {
            fixed.y = prev.y;
        }
        if (fixed.x - prev.x).abs() < threshold {
            fixed.x = prev.x;
        }
    }
    *previous = Some(fixed);
    fixed
}
