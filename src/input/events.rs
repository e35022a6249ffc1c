//! Contact events fed into the recognizer and the intents it emits.

use crate::types::PointerKind;
use kurbo::{Point, Vec2};
use std::time::Instant;

/// Stable identifier of a pointer contact (pointer id / touch identifier).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u64);

/// Lifecycle phase of a contact event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One contact lifecycle event from the host, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    pub phase: ContactPhase,
    pub contact: ContactId,
    pub position: Point,
    pub kind: PointerKind,
    pub time: Instant,
}

impl InputEvent {
    pub fn new(phase: ContactPhase, contact: ContactId, position: Point, kind: PointerKind, time: Instant) -> Self {
        Self {
            phase,
            contact,
            position,
            kind,
            time,
        }
    }

    pub fn start(contact: ContactId, position: Point, kind: PointerKind, time: Instant) -> Self {
        Self::new(ContactPhase::Start, contact, position, kind, time)
    }

    pub fn moved(contact: ContactId, position: Point, kind: PointerKind, time: Instant) -> Self {
        Self::new(ContactPhase::Move, contact, position, kind, time)
    }

    pub fn end(contact: ContactId, position: Point, kind: PointerKind, time: Instant) -> Self {
        Self::new(ContactPhase::End, contact, position, kind, time)
    }

    pub fn cancel(contact: ContactId, position: Point, kind: PointerKind, time: Instant) -> Self {
        Self::new(ContactPhase::Cancel, contact, position, kind, time)
    }
}

/// A contact currently on the surface. Owned by the recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerContact {
    pub id: ContactId,
    pub kind: PointerKind,
    pub start: Point,
    pub current: Point,
    pub started_at: Instant,
}

impl PointerContact {
    pub fn new(id: ContactId, kind: PointerKind, position: Point, started_at: Instant) -> Self {
        Self {
            id,
            kind,
            start: position,
            current: position,
            started_at,
        }
    }

    /// Screen distance travelled from the start position.
    pub fn travel(&self) -> f64 {
        self.start.distance(self.current)
    }
}

/// Mouse-compatible event kinds for the legacy mouse interaction layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompatMouseKind {
    MouseDown,
    MouseMove,
    MouseUp,
}

/// Synthesized mouse event in model coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompatMouseEvent {
    pub kind: CompatMouseKind,
    pub position: Point,
}

/// Disambiguated gesture produced by the recognizer. Positions are in model
/// coordinates unless the field name says otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureIntent {
    DragStart { contact: ContactId, position: Point },
    DragMove { contact: ContactId, position: Point },
    DragEnd { contact: ContactId, position: Point },
    DragCancel { contact: ContactId },
    Tap { position: Point, kind: PointerKind },
    DoubleTap { position: Point, kind: PointerKind },
    LongPress { position: Point, kind: PointerKind },
    PinchStart { center: Point },
    /// `zoom` is the unclamped target; the viewport clamps it
    PinchZoom { ratio: f64, zoom: f64, focal_screen: Point },
    /// Midpoint travel in screen pixels since the last emitted pan
    PinchPan { delta_screen: Vec2 },
    PinchEnd,
    Compat(CompatMouseEvent),
}

impl GestureIntent {
    pub fn is_compat(&self) -> bool {
        matches!(self, Self::Compat(_))
    }
}
