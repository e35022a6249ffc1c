//! Action dispatcher - maps finished gestures to plan operations.
//!
//! Taps select, double-taps zoom, long-presses open a context menu for the
//! wall or object under the finger, and menu actions mutate the scene. Every
//! committed mutation ends with `save()`.

use crate::constants::{DUPLICATE_OFFSET, ROTATION_STEP_DEG};
use crate::host::EditorHost;
use crate::input::{CoordinateConverter, ViewportTransform};
use crate::scene::Scene;
use crate::settings::{FeedbackSettings, ViewportSettings};
use crate::types::{InteractionMode, ObjectId, SceneElement, WallId, WallKind};
use crate::viewport::ViewportController;
use kurbo::{Point, Vec2};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

const DELETE_ANCHORED_PROMPT: &str = "This wall has objects attached. Delete anyway?";

/// Errors from context-menu actions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Unknown wall {0}")]
    UnknownWall(WallId),

    #[error("Unknown object {0}")]
    UnknownObject(ObjectId),

    /// The user declined a confirmation; nothing was changed
    #[error("Action declined by user")]
    Declined,

    #[error("{action} does not apply to {target}")]
    NotApplicable { action: MenuAction, target: MenuTarget },

    #[error("No context menu is open")]
    NoMenu,
}

/// What a completed action did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    WallSplit { new_wall: WallId },
    WallKindChanged(WallKind),
    WallDeleted { removed_objects: usize },
    ObjectRotated { angle: f64 },
    ObjectDuplicated { copy: ObjectId },
    ObjectDeleted,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MenuAction {
    SplitWall,
    MakeSeparator,
    MakeVisible,
    DeleteWall,
    RotateObject,
    DuplicateObject,
    DeleteObject,
    Cancel,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::SplitWall => "Split Wall",
            Self::MakeSeparator => "Make Separator",
            Self::MakeVisible => "Make Visible",
            Self::DeleteWall => "Delete Wall",
            Self::RotateObject => "Rotate",
            Self::DuplicateObject => "Duplicate",
            Self::DeleteObject => "Delete",
            Self::Cancel => "Cancel",
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Element a context menu was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MenuTarget {
    Wall(WallId),
    Object(ObjectId),
}

impl fmt::Display for MenuTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wall(id) => write!(f, "{}", id),
            Self::Object(id) => write!(f, "{}", id),
        }
    }
}

/// Description of a context menu for the host to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextMenu {
    pub target: MenuTarget,
    /// Where the long-press happened, in screen coordinates
    pub anchor: Point,
    pub items: Vec<MenuAction>,
}

impl ContextMenu {
    pub fn for_wall(wall: WallId, kind: WallKind, anchor: Point) -> Self {
        let toggle = match kind {
            WallKind::Normal => MenuAction::MakeSeparator,
            WallKind::Separator => MenuAction::MakeVisible,
        };
        Self {
            target: MenuTarget::Wall(wall),
            anchor,
            items: vec![MenuAction::SplitWall, toggle, MenuAction::DeleteWall, MenuAction::Cancel],
        }
    }

    pub fn for_object(object: ObjectId, anchor: Point) -> Self {
        Self {
            target: MenuTarget::Object(object),
            anchor,
            items: vec![
                MenuAction::RotateObject,
                MenuAction::DuplicateObject,
                MenuAction::DeleteObject,
                MenuAction::Cancel,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OpenMenu {
    menu: ContextMenu,
    /// Outside taps close the menu only once the debounce has passed
    close_armed: bool,
}

pub struct ActionDispatcher {
    feedback: FeedbackSettings,
    double_tap_zoom_step: f64,
    menu: Option<OpenMenu>,
}

impl ActionDispatcher {
    pub fn new(feedback: &FeedbackSettings, viewport: &ViewportSettings) -> Self {
        Self {
            feedback: feedback.clone(),
            double_tap_zoom_step: viewport.double_tap_zoom_step,
            menu: None,
        }
    }

    pub fn open_menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref().map(|open| &open.menu)
    }

    /// Let the next outside tap close the open menu.
    pub fn arm_menu_close(&mut self) {
        if let Some(open) = self.menu.as_mut() {
            open.close_armed = true;
        }
    }

    pub fn close_menu(&mut self, host: &mut dyn EditorHost) {
        if self.menu.take().is_some() {
            host.close_context_menu();
        }
    }

    /// Select whatever is under `position`. A tap while a menu is open only
    /// closes it (once armed) and selects nothing.
    pub fn tap(&mut self, scene: &Scene, position: Point, host: &mut dyn EditorHost) -> Option<SceneElement> {
        if let Some(close_armed) = self.menu.as_ref().map(|open| open.close_armed) {
            if close_armed {
                self.close_menu(host);
            }
            return None;
        }

        let selection = scene.element_at(position);
        debug!(?selection, "Tap selection");
        host.selection_changed(selection);
        selection
    }

    /// Zoom in one step centered on `position`. Select mode only.
    pub fn double_tap(
        &self,
        mode: InteractionMode,
        position: Point,
        viewport: &mut ViewportController,
        host: &mut dyn EditorHost,
    ) -> bool {
        if mode != InteractionMode::Select {
            return false;
        }
        let zoomed = viewport.zoom_around_point(1.0 / self.double_tap_zoom_step, position, host);
        if zoomed {
            host.vibrate(self.feedback.double_tap_haptic_ms);
        }
        zoomed
    }

    /// Open a context menu for the wall (preferred) or object under
    /// `position`. Select mode only.
    pub fn long_press(
        &mut self,
        mode: InteractionMode,
        scene: &Scene,
        position: Point,
        transform: &ViewportTransform,
        host: &mut dyn EditorHost,
    ) -> Option<&ContextMenu> {
        if mode != InteractionMode::Select {
            return None;
        }

        let anchor = CoordinateConverter::to_screen(position, transform);
        let menu = if let Some(wall) = scene.wall_at(position).and_then(|id| scene.wall(id)) {
            ContextMenu::for_wall(wall.id(), wall.record.kind, anchor)
        } else {
            ContextMenu::for_object(scene.object_at(position)?, anchor)
        };

        self.close_menu(host);
        debug!(menu_target = %menu.target, "Context menu opened");
        host.show_context_menu(&menu);
        host.vibrate(self.feedback.long_press_haptic_ms);

        self.menu = Some(OpenMenu {
            menu,
            close_armed: false,
        });
        self.open_menu()
    }

    /// Run an item of the open menu. The menu closes whether or not the
    /// action succeeded.
    pub fn execute(
        &mut self,
        action: MenuAction,
        scene: &mut Scene,
        host: &mut dyn EditorHost,
    ) -> Result<ActionOutcome, ActionError> {
        let target = self.menu.as_ref().ok_or(ActionError::NoMenu)?.menu.target;
        let result = self.apply(action, target, scene, host);
        self.close_menu(host);
        result
    }

    /// Run `action` against `target` directly.
    pub fn apply(
        &self,
        action: MenuAction,
        target: MenuTarget,
        scene: &mut Scene,
        host: &mut dyn EditorHost,
    ) -> Result<ActionOutcome, ActionError> {
        match (action, target) {
            (MenuAction::Cancel, _) => Ok(ActionOutcome::Cancelled),
            (MenuAction::SplitWall, MenuTarget::Wall(wall)) => split_wall(scene, wall, host),
            (MenuAction::MakeSeparator, MenuTarget::Wall(wall)) => {
                set_wall_kind(scene, wall, WallKind::Separator, host)
            }
            (MenuAction::MakeVisible, MenuTarget::Wall(wall)) => {
                set_wall_kind(scene, wall, WallKind::Normal, host)
            }
            (MenuAction::DeleteWall, MenuTarget::Wall(wall)) => delete_wall(scene, wall, host),
            (MenuAction::RotateObject, MenuTarget::Object(object)) => {
                let angle = scene
                    .rotate_object(object, ROTATION_STEP_DEG)
                    .ok_or(ActionError::UnknownObject(object))?;
                host.save();
                Ok(ActionOutcome::ObjectRotated { angle })
            }
            (MenuAction::DuplicateObject, MenuTarget::Object(object)) => {
                let copy = scene
                    .duplicate_object(object, Vec2::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET))
                    .ok_or(ActionError::UnknownObject(object))?;
                info!(%object, %copy, "Object duplicated");
                host.save();
                Ok(ActionOutcome::ObjectDuplicated { copy })
            }
            (MenuAction::DeleteObject, MenuTarget::Object(object)) => {
                scene
                    .remove_object(object)
                    .ok_or(ActionError::UnknownObject(object))?;
                info!(%object, "Object deleted");
                host.save();
                Ok(ActionOutcome::ObjectDeleted)
            }
            (action, target) => Err(ActionError::NotApplicable { action, target }),
        }
    }
}

fn split_wall(scene: &mut Scene, wall: WallId, host: &mut dyn EditorHost) -> Result<ActionOutcome, ActionError> {
    let new_wall = scene.split_wall(wall).ok_or(ActionError::UnknownWall(wall))?;
    info!(%wall, %new_wall, "Wall split");
    host.rebuild_walls(scene);
    host.save();
    Ok(ActionOutcome::WallSplit { new_wall })
}

fn set_wall_kind(
    scene: &mut Scene,
    wall: WallId,
    kind: WallKind,
    host: &mut dyn EditorHost,
) -> Result<ActionOutcome, ActionError> {
    if !scene.set_wall_kind(wall, kind) {
        return Err(ActionError::UnknownWall(wall));
    }
    info!(%wall, ?kind, "Wall kind changed");
    host.rebuild_walls(scene);
    host.save();
    Ok(ActionOutcome::WallKindChanged(kind))
}

/// Delete a wall together with its anchored objects. Anchored objects need
/// confirmation; declining changes nothing.
fn delete_wall(scene: &mut Scene, wall: WallId, host: &mut dyn EditorHost) -> Result<ActionOutcome, ActionError> {
    if scene.wall(wall).is_none() {
        return Err(ActionError::UnknownWall(wall));
    }

    let anchored = scene.objects_on_wall(wall);
    if !anchored.is_empty() && !host.confirm(DELETE_ANCHORED_PROMPT) {
        debug!(%wall, anchored = anchored.len(), "Wall deletion declined");
        return Err(ActionError::Declined);
    }

    for object in &anchored {
        scene.remove_object(*object);
    }
    scene.remove_wall(wall);

    info!(%wall, removed_objects = anchored.len(), "Wall deleted");
    host.rebuild_walls(scene);
    host.save();
    Ok(ActionOutcome::WallDeleted {
        removed_objects: anchored.len(),
    })
}
