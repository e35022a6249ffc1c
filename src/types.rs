//! Core types for the floor-plan scene and the input layer.
//!
//! Walls, objects and labels are identified by small copyable ids; the scene
//! owns the records and everything else refers to them by id.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a wall in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(pub u64);

/// Identifier of a placed object (door, window, furniture, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Identifier of a text label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelId(pub u64);

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wall#{}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "label#{}", self.0)
    }
}

/// Any hit-testable element of the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneElement {
    Wall(WallId),
    Object(ObjectId),
    Label(LabelId),
}

// ============================================================================
// Input
// ============================================================================

/// The device behind a contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Mouse has a native context menu; touch and pen need long-press.
    pub fn arms_long_press(self) -> bool {
        matches!(self, Self::Touch | Self::Pen)
    }
}

/// Editor mode gating which gestures are active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Select, move and inspect existing elements
    #[default]
    Select,
    /// Draw new walls by dragging
    WallDraw,
    /// Drag walls only (objects and labels ignored)
    WallAdjust,
    /// Tap a wall to straighten and align it
    WallFix,
}

// ============================================================================
// Walls
// ============================================================================

/// Visible wall or an invisible room separator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    #[default]
    Normal,
    Separator,
}

/// Logical wall data kept alongside the rendered path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    pub id: WallId,
    pub start: Point,
    pub end: Point,
    /// Wall joined at this wall's start
    pub parent: Option<WallId>,
    /// Wall joined at this wall's end
    pub child: Option<WallId>,
    pub kind: WallKind,
    pub thickness: f64,
}

impl WallRecord {
    pub fn new(id: WallId, start: Point, end: Point, thickness: f64) -> Self {
        Self {
            id,
            start,
            end,
            parent: None,
            child: None,
            kind: WallKind::Normal,
            thickness,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Shift both endpoints by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    /// Distance from `point` to the wall's center line.
    pub fn distance_to(&self, point: Point) -> f64 {
        segment_distance(point, self.start, self.end)
    }
}

/// Distance from `point` to the segment `a`-`b`.
pub fn segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let segment = b - a;
    let len_sq = segment.hypot2();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(segment) / len_sq).clamp(0.0, 1.0);
    point.distance(a + segment * t)
}

// ============================================================================
// Objects & Labels
// ============================================================================

/// An object placed on the plan. `wall` anchors doors and windows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanObject {
    pub id: ObjectId,
    /// Broad family, e.g. "inWall" or "free"
    pub family: String,
    /// Catalog class, e.g. "doorWindow" or "furniture"
    pub class: String,
    /// Concrete type, e.g. "simple" or "sofa"
    pub kind: String,
    pub position: Point,
    /// Rotation in degrees, kept in [0, 360)
    pub angle: f64,
    pub size: Size,
    pub wall: Option<WallId>,
}

impl PlanObject {
    /// Axis-aligned bounds of the rotated footprint.
    pub fn bounding_box(&self) -> Rect {
        let corners = self.corners();
        let mut rect = Rect::from_points(corners[0], corners[0]);
        for corner in &corners[1..] {
            rect = rect.union_pt(*corner);
        }
        rect
    }

    /// Corners of the rotated footprint, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let hw = self.size.width / 2.0;
        let hh = self.size.height / 2.0;
        let rotate = |x: f64, y: f64| {
            self.position + Vec2::new(x * cos - y * sin, x * sin + y * cos)
        };
        [
            rotate(-hw, -hh),
            rotate(hw, -hh),
            rotate(hw, hh),
            rotate(-hw, hh),
        ]
    }

    /// Whether `point` lies inside the rotated footprint.
    pub fn contains(&self, point: Point) -> bool {
        let (sin, cos) = (-self.angle.to_radians()).sin_cos();
        let d = point - self.position;
        let local_x = d.x * cos - d.y * sin;
        let local_y = d.x * sin + d.y * cos;
        local_x.abs() <= self.size.width / 2.0 && local_y.abs() <= self.size.height / 2.0
    }
}

/// A free text label on the plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub id: LabelId,
    pub text: String,
    /// Translation applied to the label group
    pub position: Point,
    pub font_size: f64,
    /// Approximate rendered extent used for hit testing
    pub size: Size,
}

impl TextLabel {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// The `transform` attribute the renderer applies to the label group.
    pub fn transform_attr(&self) -> String {
        format!("translate({},{})", self.position.x, self.position.y)
    }
}
