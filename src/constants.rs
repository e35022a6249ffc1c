//! Application-wide constants.
//!
//! Centralizes thresholds, timings and defaults so the recognizer, viewport and
//! geometry code never carry magic numbers of their own. `Settings` uses these
//! as its defaults.

// ============================================================================
// Gesture Timing
// ============================================================================

/// A contact shorter than this (ms) can be a tap
pub const TAP_THRESHOLD_MS: u64 = 300;

/// Maximum gap (ms) between two taps for them to form a double-tap
pub const DOUBLE_TAP_DELAY_MS: u64 = 400;

/// Hold duration (ms) before a stationary touch becomes a long-press
pub const LONG_PRESS_DELAY_MS: u64 = 600;

// ============================================================================
// Gesture Distances (screen pixels)
// ============================================================================

/// Movement from the start position that turns a press into a drag
pub const MOVE_THRESHOLD: f64 = 15.0;

/// Minimum change in finger distance before a pinch zooms
pub const PINCH_THRESHOLD: f64 = 10.0;

/// Minimum midpoint travel on either axis before a pinch pans
pub const PINCH_PAN_THRESHOLD: f64 = 3.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom factor (model units per screen pixel)
pub const MIN_ZOOM: f64 = 0.2;

/// Maximum zoom factor (model units per screen pixel)
pub const MAX_ZOOM: f64 = 5.0;

/// Default zoom factor
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Double-tap divides the zoom factor by this step (zooms in)
pub const DOUBLE_TAP_ZOOM_STEP: f64 = 1.5;

// ============================================================================
// Snapping
// ============================================================================

/// Grid spacing in model units
pub const GRID_SIZE: f64 = 50.0;

/// Distance under which a coordinate is pulled onto a grid line or neighbor
pub const SNAP_THRESHOLD: f64 = 15.0;

/// Radius (screen pixels, scaled by zoom) for snapping to existing wall nodes
pub const NODE_SNAP_RADIUS: f64 = 30.0;

/// Auto-fix snaps to the grid within this multiple of the snap threshold
pub const AUTO_FIX_GRID_TOLERANCE: f64 = 2.0;

// ============================================================================
// Feedback
// ============================================================================

/// Haptic pulse (ms) on a successful double-tap zoom
pub const DOUBLE_TAP_HAPTIC_MS: u64 = 20;

/// Haptic pulse (ms) when a long-press opens the context menu
pub const LONG_PRESS_HAPTIC_MS: u64 = 50;

/// How long (ms) a wall stays highlighted after an auto-fix
pub const WALL_FIX_HIGHLIGHT_MS: u64 = 1500;

/// Delay (ms) before an outside tap is allowed to close the context menu
pub const MENU_CLOSE_DEBOUNCE_MS: u64 = 100;

// ============================================================================
// Scene Editing
// ============================================================================

/// Offset applied to a duplicated object on both axes
pub const DUPLICATE_OFFSET: f64 = 50.0;

/// Shortest wall (model units) the wall tool will create
pub const MIN_WALL_LENGTH: f64 = 5.0;

/// Default wall thickness for newly drawn walls
pub const DEFAULT_WALL_THICKNESS: f64 = 20.0;

/// Rotation step for the rotate-object action, in degrees
pub const ROTATION_STEP_DEG: f64 = 90.0;

/// Minimum hit distance (model units) for walls drawn without an outline
pub const MIN_WALL_HIT_AREA: f64 = 8.0;
