//! planboard: input layer and wall geometry engine for a 2D floor-plan editor.
//!
//! Contact events from mouse, touch and pen go through one gesture
//! recognizer; the resulting intents drive the viewport, the wall path
//! editor and the context-menu actions. See [`editor::Editor`].

pub mod constants;
pub mod dispatch;
pub mod editor;
pub mod host;
pub mod input;
pub mod path;
pub mod perf;
pub mod scene;
pub mod settings;
pub mod spatial_index;
pub mod telemetry;
pub mod types;
pub mod viewport;
pub mod wall_editor;

pub use dispatch::{ActionDispatcher, ActionError, ActionOutcome, ContextMenu, MenuAction, MenuTarget};
pub use editor::{Canvas, Editor};
pub use host::{EditorHost, NoopHost};
pub use input::{ContactId, GestureIntent, InputEvent, ViewportTransform};
pub use path::{Path, PathCommand, PathError};
pub use scene::Scene;
pub use settings::Settings;
pub use types::{InteractionMode, PointerKind, SceneElement, WallId, WallKind, WallRecord};
pub use viewport::ViewportController;
pub use wall_editor::{WallEditError, WallGeometryEditor};
