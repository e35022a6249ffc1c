//! Capabilities the embedding editor provides.
//!
//! Rendering, persistence, dialogs and the higher-level wall/room rebuild
//! live outside this crate. They are reached through `EditorHost`; every
//! method has a no-op default so a host only implements what it supports.

use crate::dispatch::ContextMenu;
use crate::input::{CompatMouseEvent, ViewBox};
use crate::scene::Scene;
use crate::types::{SceneElement, WallId};

pub trait EditorHost {
    /// Mouse-compatible event for the legacy mouse interaction layer.
    fn mouse_event(&mut self, _event: CompatMouseEvent) {}

    /// Persist the plan after a committed mutation.
    fn save(&mut self) {}

    /// Push an undo snapshot.
    fn save_history(&mut self) {}

    fn update_zoom_display(&mut self, _zoom: f64) {}

    /// Apply a new view box to the canvas.
    fn set_view_box(&mut self, _view_box: ViewBox) {}

    fn request_animation_frame(&mut self) {}

    fn cancel_animation_frame(&mut self) {}

    /// Haptic pulse. Best-effort.
    fn vibrate(&mut self, _duration_ms: u64) {}

    /// Ask the user to confirm a destructive action. Declines by default.
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }

    fn show_context_menu(&mut self, _menu: &ContextMenu) {}

    fn close_context_menu(&mut self) {}

    /// Regenerate wall geometry after walls were added, removed or re-linked.
    fn rebuild_walls(&mut self, _scene: &Scene) {}

    /// Recompute rooms and measurements after wall geometry changed.
    fn recompute_rooms(&mut self, _scene: &Scene) {}

    fn set_wall_highlight(&mut self, _wall: WallId, _highlighted: bool) {}

    /// Temporary `transform` on a dragged wall; `None` clears it.
    fn set_drag_preview(&mut self, _wall: WallId, _transform: Option<&str>) {}

    /// Selection after a tap; `None` when the tap hit nothing.
    fn selection_changed(&mut self, _selection: Option<SceneElement>) {}
}

/// Host with no capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl EditorHost for NoopHost {}
