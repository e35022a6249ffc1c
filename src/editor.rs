//! Editor facade - owns the input pipeline and routes gestures to the plan.
//!
//! The host feeds contact events through [`Editor::handle_event`], drives
//! timers with [`Editor::tick`] and animation frames with
//! [`Editor::animation_frame`]. Everything the editor needs from the outside
//! world goes through the [`EditorHost`] it owns.
//!
//! An editor created without a canvas is disabled: every call is a no-op
//! until a canvas is attached.

use crate::constants::{DEFAULT_WALL_THICKNESS, MIN_WALL_LENGTH};
use crate::dispatch::{ActionDispatcher, ActionError, ActionOutcome, ContextMenu, MenuAction};
use crate::host::EditorHost;
use crate::input::{GestureIntent, GestureRecognizer, GestureState, InputEvent, TimerHandle, TimerQueue, ViewportTransform};
use crate::profile_scope;
use crate::scene::Scene;
use crate::settings::Settings;
use crate::types::{InteractionMode, LabelId, ObjectId, PointerKind, SceneElement, WallId};
use crate::viewport::ViewportController;
use crate::wall_editor::WallGeometryEditor;
use kurbo::{Point, Size};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// The canvas element the plan is drawn into, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub size: Size,
    pub offset: Point,
}

impl Canvas {
    pub fn new(size: Size, offset: Point) -> Self {
        Self { size, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum EditorTimer {
    ReleaseWallHighlight(WallId),
    ArmMenuClose,
}

/// What the current drag is moving.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragTarget {
    Wall(WallId),
    Object { id: ObjectId, origin: Point, moved: bool },
    Label { id: LabelId, grab: Point, last: Point },
    DrawWall { start: Point },
}

struct EditorCore {
    settings: Settings,
    recognizer: GestureRecognizer,
    viewport: ViewportController,
    walls: WallGeometryEditor,
    dispatcher: ActionDispatcher,
    timers: TimerQueue<EditorTimer>,
    drag: Option<DragTarget>,
    /// Walls recently straightened, ignored until their highlight ends
    locked_walls: HashSet<WallId>,
    menu_arm: Option<TimerHandle>,
}

pub struct Editor<H: EditorHost> {
    settings: Settings,
    mode: InteractionMode,
    scene: Scene,
    host: H,
    core: Option<EditorCore>,
}

impl<H: EditorHost> Editor<H> {
    /// Build an editor. Invalid settings fall back to the defaults.
    pub fn new(settings: Settings, canvas: Option<Canvas>, scene: Scene, host: H) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                warn!(error = %e, "Invalid editor settings, using defaults");
                Settings::default()
            }
        };

        let mut editor = Self {
            settings,
            mode: InteractionMode::default(),
            scene,
            host,
            core: None,
        };

        match canvas {
            Some(canvas) => editor.enable(canvas),
            None => warn!("No canvas available, editor disabled"),
        }
        editor
    }

    fn enable(&mut self, canvas: Canvas) {
        let viewport = ViewportController::new(&self.settings.viewport, canvas.size, canvas.offset);
        info!(
            width = canvas.size.width,
            height = canvas.size.height,
            zoom = viewport.zoom(),
            walls = self.scene.walls().len(),
            "Editor initialized"
        );

        self.core = Some(EditorCore {
            recognizer: GestureRecognizer::new(self.settings.gesture.clone()),
            viewport,
            walls: WallGeometryEditor::new(&self.settings.snapping),
            dispatcher: ActionDispatcher::new(&self.settings.feedback, &self.settings.viewport),
            timers: TimerQueue::new(),
            drag: None,
            locked_walls: HashSet::new(),
            menu_arm: None,
            settings: self.settings.clone(),
        });
    }

    pub fn is_enabled(&self) -> bool {
        self.core.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn transform(&self) -> Option<&ViewportTransform> {
        self.core.as_ref().map(|core| core.viewport.transform())
    }

    pub fn gesture_state(&self) -> Option<&GestureState> {
        self.core.as_ref().map(|core| core.recognizer.state())
    }

    pub fn open_menu(&self) -> Option<&ContextMenu> {
        self.core.as_ref().and_then(|core| core.dispatcher.open_menu())
    }

    /// Whether a drag is currently moving something.
    pub fn is_dragging(&self) -> bool {
        self.core.as_ref().is_some_and(|core| core.drag.is_some())
    }

    /// Resize or move the canvas. Attaching a canvas enables a disabled editor.
    pub fn set_canvas(&mut self, canvas: Canvas) -> bool {
        match self.core.as_mut() {
            Some(core) => core.viewport.set_canvas(canvas.size, canvas.offset, &mut self.host),
            None => {
                self.enable(canvas);
                true
            }
        }
    }

    /// Switch interaction mode. Abandons any drag and closes the menu.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        if let Some(core) = self.core.as_mut() {
            core.cancel_drag(&mut self.scene, &mut self.host);
            core.close_menu(&mut self.host);
        }
        info!(from = ?self.mode, to = ?mode, "Interaction mode changed");
        self.mode = mode;
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.settings.snapping.enabled = enabled;
        if let Some(core) = self.core.as_mut() {
            core.settings.snapping.enabled = enabled;
            core.walls.set_snap_enabled(enabled);
        }
    }

    /// Change grid spacing and snap distance at runtime. Invalid values are
    /// rejected and leave the current grid in place.
    pub fn set_grid(&mut self, grid_size: f64, threshold: f64) -> bool {
        let Some(core) = self.core.as_mut() else {
            return false;
        };
        if !core.walls.set_grid(grid_size, threshold) {
            warn!(grid_size, threshold, "Rejected snap grid");
            return false;
        }
        for settings in [&mut self.settings.snapping, &mut core.settings.snapping] {
            settings.grid_size = grid_size;
            settings.threshold = threshold;
        }
        true
    }

    /// Whether the host should suppress its native context menu for a
    /// contact of `kind`. Touch uses long-press instead.
    pub fn context_menu_requested(&self, kind: PointerKind) -> bool {
        kind == PointerKind::Touch
    }

    /// Feed one contact event. Returns the intents it produced, after they
    /// have been acted on.
    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<GestureIntent> {
        let Some(core) = self.core.as_mut() else {
            return Vec::new();
        };
        profile_scope!("handle_event");

        let intents = core.recognizer.handle(event, core.viewport.transform());
        for intent in &intents {
            core.route(intent, event.time, self.mode, &mut self.scene, &mut self.host);
        }
        intents
    }

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<GestureIntent> {
        let Some(core) = self.core.as_mut() else {
            return Vec::new();
        };

        // Editor timers first: a highlight release or menu arm due now
        // always precedes a deferred tap delivered in the same tick.
        for timer in core.timers.drain_due(now) {
            match timer {
                EditorTimer::ReleaseWallHighlight(wall) => {
                    core.locked_walls.remove(&wall);
                    self.host.set_wall_highlight(wall, false);
                }
                EditorTimer::ArmMenuClose => {
                    core.menu_arm = None;
                    core.dispatcher.arm_menu_close();
                }
            }
        }

        let intents = core.recognizer.poll(now);
        for intent in &intents {
            core.route(intent, now, self.mode, &mut self.scene, &mut self.host);
        }
        intents
    }

    /// Service a requested animation frame.
    pub fn animation_frame(&mut self) -> bool {
        match self.core.as_mut() {
            Some(core) => core.viewport.on_animation_frame(&mut self.host),
            None => false,
        }
    }

    /// Run an item of the open context menu.
    pub fn execute_menu_action(&mut self, action: MenuAction) -> Result<ActionOutcome, ActionError> {
        let Some(core) = self.core.as_mut() else {
            return Err(ActionError::NoMenu);
        };
        if let Some(handle) = core.menu_arm.take() {
            handle.cancel();
        }
        core.dispatcher.execute(action, &mut self.scene, &mut self.host)
    }

    /// Release every resource and disable the editor.
    pub fn teardown(&mut self) {
        let Some(mut core) = self.core.take() else {
            return;
        };

        core.viewport.teardown(&mut self.host);
        core.recognizer.reset();
        core.cancel_drag(&mut self.scene, &mut self.host);
        core.close_menu(&mut self.host);
        for wall in core.locked_walls.drain() {
            self.host.set_wall_highlight(wall, false);
        }
        core.timers.clear();
        info!("Editor torn down");
    }
}

impl EditorCore {
    fn route(
        &mut self,
        intent: &GestureIntent,
        now: Instant,
        mode: InteractionMode,
        scene: &mut Scene,
        host: &mut dyn EditorHost,
    ) {
        match *intent {
            GestureIntent::Compat(event) => host.mouse_event(event),
            GestureIntent::DragStart { position, .. } => self.drag_start(position, mode, scene),
            GestureIntent::DragMove { position, .. } => self.drag_move(position, scene, host),
            GestureIntent::DragEnd { position, .. } => self.drag_end(position, scene, host),
            GestureIntent::DragCancel { .. } => self.cancel_drag(scene, host),
            GestureIntent::Tap { position, .. } => {
                if mode == InteractionMode::WallFix {
                    self.fix_wall_at(position, now, scene, host);
                } else {
                    self.dispatcher.tap(scene, position, host);
                }
            }
            GestureIntent::DoubleTap { position, .. } => {
                self.dispatcher.double_tap(mode, position, &mut self.viewport, host);
            }
            GestureIntent::LongPress { position, .. } => {
                let transform = *self.viewport.transform();
                if self.dispatcher.long_press(mode, scene, position, &transform, host).is_some() {
                    if let Some(previous) = self.menu_arm.take() {
                        previous.cancel();
                    }
                    let debounce = Duration::from_millis(self.settings.feedback.menu_close_debounce_ms);
                    self.menu_arm = Some(self.timers.schedule(now, debounce, EditorTimer::ArmMenuClose));
                }
            }
            GestureIntent::PinchStart { center } => debug!(?center, "Pinch routed"),
            GestureIntent::PinchZoom { zoom, focal_screen, .. } => {
                self.viewport.request_zoom(zoom, focal_screen, host);
            }
            GestureIntent::PinchPan { delta_screen } => self.viewport.request_pan(delta_screen, host),
            GestureIntent::PinchEnd => {}
        }
    }

    fn drag_start(&mut self, position: Point, mode: InteractionMode, scene: &Scene) {
        self.drag = match mode {
            InteractionMode::WallDraw => Some(DragTarget::DrawWall {
                start: self.snap_to_node(scene, position),
            }),
            InteractionMode::Select => match scene.element_at(position) {
                Some(SceneElement::Wall(wall)) => self.begin_wall_drag(scene, wall, position),
                Some(SceneElement::Object(id)) => scene.object(id).map(|object| DragTarget::Object {
                    id,
                    origin: object.position,
                    moved: false,
                }),
                Some(SceneElement::Label(id)) => Some(DragTarget::Label {
                    id,
                    grab: position,
                    last: position,
                }),
                None => None,
            },
            InteractionMode::WallAdjust => scene
                .wall_at(position)
                .and_then(|wall| self.begin_wall_drag(scene, wall, position)),
            InteractionMode::WallFix => None,
        };
        debug!(drag = ?self.drag, "Drag routed");
    }

    fn begin_wall_drag(&mut self, scene: &Scene, wall: WallId, position: Point) -> Option<DragTarget> {
        if self.locked_walls.contains(&wall) {
            return None;
        }
        match self.walls.begin_drag(scene, wall, position) {
            Ok(()) => Some(DragTarget::Wall(wall)),
            Err(e) => {
                warn!(error = %e, "Wall drag skipped");
                None
            }
        }
    }

    fn drag_move(&mut self, position: Point, scene: &mut Scene, host: &mut dyn EditorHost) {
        match self.drag.as_mut() {
            Some(DragTarget::Wall(_)) => {
                self.walls.update_drag(position, host);
            }
            Some(DragTarget::Object { id, moved, .. }) => {
                *moved |= scene.move_object(*id, position);
            }
            Some(DragTarget::Label { id, last, .. }) => {
                if scene.translate_label(*id, position - *last) {
                    *last = position;
                }
            }
            Some(DragTarget::DrawWall { .. }) | None => {}
        }
    }

    fn drag_end(&mut self, position: Point, scene: &mut Scene, host: &mut dyn EditorHost) {
        let Some(drag) = self.drag.take() else {
            return;
        };

        match drag {
            DragTarget::Wall(_) => {
                self.walls.end_drag(scene, host);
            }
            DragTarget::Object { id, origin, moved } => {
                if moved {
                    info!(object = %id, from = ?origin, to = ?position, "Object moved");
                    host.save();
                }
            }
            DragTarget::Label { id, grab, mut last } => {
                if scene.translate_label(id, position - last) {
                    last = position;
                }
                if last != grab {
                    debug!(label = %id, "Label moved");
                    host.save_history();
                }
            }
            DragTarget::DrawWall { start } => {
                let end = self.snap_to_node(scene, position);
                if start.distance(end) > MIN_WALL_LENGTH {
                    let wall = scene.add_wall(start, end, DEFAULT_WALL_THICKNESS);
                    info!(%wall, ?start, ?end, "Wall drawn");
                    host.rebuild_walls(scene);
                    host.save();
                } else {
                    debug!(?start, ?end, "Wall too short, discarded");
                }
            }
        }
    }

    /// Abandon the drag and put whatever it moved back.
    fn cancel_drag(&mut self, scene: &mut Scene, host: &mut dyn EditorHost) {
        match self.drag.take() {
            Some(DragTarget::Wall(_)) => {
                self.walls.cancel_drag(host);
            }
            Some(DragTarget::Object { id, origin, .. }) => {
                scene.move_object(id, origin);
            }
            Some(DragTarget::Label { id, grab, last }) => {
                scene.translate_label(id, grab - last);
            }
            Some(DragTarget::DrawWall { .. }) | None => {}
        }
    }

    fn close_menu(&mut self, host: &mut dyn EditorHost) {
        if let Some(handle) = self.menu_arm.take() {
            handle.cancel();
        }
        self.dispatcher.close_menu(host);
    }

    /// Straighten the wall under `position` and highlight it for a while.
    fn fix_wall_at(&mut self, position: Point, now: Instant, scene: &mut Scene, host: &mut dyn EditorHost) {
        let Some(wall) = scene.wall_at(position) else {
            return;
        };
        if !self.locked_walls.insert(wall) {
            debug!(%wall, "Wall still locked after fix");
            return;
        }

        if let Err(e) = self.walls.auto_fix(scene, wall, host) {
            warn!(error = %e, "Wall fix skipped");
            self.locked_walls.remove(&wall);
            return;
        }

        host.set_wall_highlight(wall, true);
        let highlight = Duration::from_millis(self.settings.feedback.wall_fix_highlight_ms);
        self.timers.schedule(now, highlight, EditorTimer::ReleaseWallHighlight(wall));
    }

    /// Snap to the nearest wall node. The radius is in screen units.
    fn snap_to_node(&self, scene: &Scene, position: Point) -> Point {
        let radius = self.settings.snapping.node_snap_radius * self.viewport.zoom();
        scene.nearest_wall_node(position, radius).unwrap_or(position)
    }
}
