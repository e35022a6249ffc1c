//! Wall geometry editor - moves and straightens wall paths.
//!
//! A drag never touches the stored path until it ends: while the pointer
//! moves the host only receives a `translate(dx, dy)` preview. On release the
//! snapped delta is written into the path, the wall's vertices are aligned
//! to neighboring walls and the logical record follows. A release without
//! movement only rewrites the path when a vertex needs aligning.

use crate::host::EditorHost;
use crate::path::auto_fix::straighten;
use crate::path::snap::{align_to_neighbors, nearest_neighbor, GridSnap};
use crate::path::{Path, PathError};
use crate::profile_scope;
use crate::scene::Scene;
use crate::settings::SnapSettings;
use crate::types::WallId;
use kurbo::{Point, Vec2};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Two points closer than this are the same vertex
const VERTEX_EPSILON: f64 = 1e-9;

/// Errors that prevent a wall edit from starting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WallEditError {
    #[error("Unknown wall {0}")]
    UnknownWall(WallId),

    #[error("Wall {wall} has unreadable path data: {source}")]
    Path {
        wall: WallId,
        #[source]
        source: PathError,
    },
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    wall: WallId,
    start: Point,
    original: Path,
    delta: Vec2,
}

pub struct WallGeometryEditor {
    snap: GridSnap,
    active: Option<ActiveDrag>,
}

impl WallGeometryEditor {
    pub fn new(settings: &SnapSettings) -> Self {
        let mut snap = GridSnap::new(settings.grid_size, settings.threshold);
        snap.enabled = settings.enabled;
        Self { snap, active: None }
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap.enabled = enabled;
        info!(enabled, "Wall snapping toggled");
    }

    /// Change grid spacing and snap distance. Both must be positive and finite.
    pub fn set_grid(&mut self, grid_size: f64, threshold: f64) -> bool {
        if !(grid_size > 0.0 && threshold > 0.0 && grid_size.is_finite() && threshold.is_finite()) {
            return false;
        }
        self.snap.grid_size = grid_size;
        self.snap.threshold = threshold;
        debug!(grid_size, threshold, "Snap grid changed");
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged_wall(&self) -> Option<WallId> {
        self.active.as_ref().map(|drag| drag.wall)
    }

    /// Snapped delta of the drag in progress.
    pub fn current_delta(&self) -> Option<Vec2> {
        self.active.as_ref().map(|drag| drag.delta)
    }

    /// Start dragging `wall` from `model_start`. The wall's path is read now
    /// so a malformed path refuses the drag up front.
    pub fn begin_drag(&mut self, scene: &Scene, wall: WallId, model_start: Point) -> Result<(), WallEditError> {
        let original = scene
            .wall(wall)
            .ok_or(WallEditError::UnknownWall(wall))?
            .path()
            .map_err(|source| WallEditError::Path { wall, source })?;

        debug!(%wall, ?model_start, "Wall drag start");
        self.active = Some(ActiveDrag {
            wall,
            start: model_start,
            original,
            delta: Vec2::ZERO,
        });
        Ok(())
    }

    /// Track the pointer. Returns the snapped delta now previewed.
    pub fn update_drag(&mut self, model_current: Point, host: &mut dyn EditorHost) -> Option<Vec2> {
        profile_scope!("wall_update_drag");

        let drag = self.active.as_mut()?;
        let delta = self.snap.snap_delta(model_current - drag.start);
        drag.delta = delta;

        let preview = preview_transform(delta);
        host.set_drag_preview(drag.wall, Some(&preview));
        Some(delta)
    }

    /// Commit the drag. Returns the delta written into the path. A zero delta
    /// still pulls stray vertices onto nearby neighbors; when none would move
    /// the path string and the host hooks are left alone.
    pub fn end_drag(&mut self, scene: &mut Scene, host: &mut dyn EditorHost) -> Option<Vec2> {
        let drag = self.active.take()?;
        host.set_drag_preview(drag.wall, None);

        if drag.delta == Vec2::ZERO && !self.needs_alignment(scene, drag.wall, &drag.original) {
            debug!(wall = %drag.wall, "Wall drag ended without movement");
            return Some(Vec2::ZERO);
        }

        let shifted = drag.original.translated(drag.delta);
        if !self.commit(scene, drag.wall, &drag.original, shifted, drag.delta) {
            warn!(wall = %drag.wall, "Dragged wall disappeared before commit");
            return None;
        }

        info!(wall = %drag.wall, dx = drag.delta.x, dy = drag.delta.y, "Wall moved");
        host.recompute_rooms(scene);
        host.save_history();
        Some(drag.delta)
    }

    /// Abandon the drag; the path was never modified.
    pub fn cancel_drag(&mut self, host: &mut dyn EditorHost) -> bool {
        match self.active.take() {
            Some(drag) => {
                host.set_drag_preview(drag.wall, None);
                debug!(wall = %drag.wall, "Wall drag cancelled");
                true
            }
            None => false,
        }
    }

    /// Straighten a wall onto the grid and align it with its neighbors.
    pub fn auto_fix(&self, scene: &mut Scene, wall: WallId, host: &mut dyn EditorHost) -> Result<(), WallEditError> {
        let original = scene
            .wall(wall)
            .ok_or(WallEditError::UnknownWall(wall))?
            .path()
            .map_err(|source| WallEditError::Path { wall, source })?;

        let straightened = straighten(&original, self.snap.grid_size, self.snap.threshold);
        self.commit(scene, wall, &original, straightened, Vec2::ZERO);

        info!(%wall, "Wall straightened");
        host.recompute_rooms(scene);
        host.save_history();
        Ok(())
    }

    /// Whether some vertex of `path` sits near, but not on, a neighbor vertex.
    fn needs_alignment(&self, scene: &Scene, wall: WallId, path: &Path) -> bool {
        if path.has_raw() {
            return false;
        }
        let neighbors = scene.other_wall_vertices(wall);
        path.vertices().into_iter().any(|vertex| {
            nearest_neighbor(vertex, &neighbors, self.snap.threshold)
                .is_some_and(|c| c.distance >= VERTEX_EPSILON)
        })
    }

    /// Write `rewritten` (derived from `original` moved by `delta`) into the
    /// scene after neighbor alignment, and carry the record along.
    fn commit(&self, scene: &mut Scene, wall: WallId, original: &Path, rewritten: Path, delta: Vec2) -> bool {
        let expected: Vec<Point> = original.vertices().into_iter().map(|v| v + delta).collect();
        let mut vertices = rewritten.vertices();

        // Raw commands hide vertices, so such paths keep their structure
        let path = if rewritten.has_raw() || vertices.is_empty() {
            rewritten
        } else {
            let neighbors = scene.other_wall_vertices(wall);
            let applied = align_to_neighbors(&mut vertices, &neighbors, self.snap.threshold);
            let aligned = applied.iter().filter(|c| c.is_some()).count();
            if aligned > 0 {
                debug!(%wall, aligned, "Aligned vertices to neighbors");
            }
            Path::from_polyline(&vertices, rewritten.is_closed())
        };

        let Some(target) = scene.wall_mut(wall) else {
            return false;
        };
        target.d = path.to_string();

        let record = &mut target.record;
        record.translate(delta);
        for (before, after) in expected.iter().zip(&vertices) {
            if before.distance(*after) < VERTEX_EPSILON {
                continue;
            }
            if record.start.distance(*before) < VERTEX_EPSILON {
                record.start = *after;
            }
            if record.end.distance(*before) < VERTEX_EPSILON {
                record.end = *after;
            }
        }
        true
    }
}

/// `transform` attribute previewing a drag by `delta`.
pub fn preview_transform(delta: Vec2) -> String {
    format!("translate({}, {})", delta.x, delta.y)
}
