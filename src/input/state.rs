//! Gesture state machine - the single source of truth for what the contacts
//! on the canvas currently mean.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> PossibleTap          (mouse contact start)
//! Idle -> LongPressArmed       (touch/pen contact start, long-press timer armed)
//! PossibleTap | LongPressArmed -> Dragging   (travel > move threshold)
//! LongPressArmed -> Idle       (long-press timer fired)
//! Any -> Pinching              (second contact start)
//! Pinching -> Idle             (contact count drops to zero)
//! Any -> Idle                  (contact end / cancel)
//! ```

use super::events::ContactId;
use super::timers::TimerHandle;
use kurbo::Point;
use std::time::Instant;

/// Interpretation of the contacts currently on the surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No contact
    #[default]
    Idle,

    /// Single mouse contact that has not moved past the threshold yet
    PossibleTap {
        contact: ContactId,
        /// Screen position at contact start
        start: Point,
        t0: Instant,
    },

    /// Single touch/pen contact with a pending long-press timer
    LongPressArmed {
        contact: ContactId,
        /// Screen position at contact start
        start: Point,
        t0: Instant,
        timer: TimerHandle,
    },

    /// Single contact dragging
    Dragging {
        contact: ContactId,
        /// Model position where the drag began
        start_model: Point,
        /// Model position of the last reported move
        last_model: Point,
    },

    /// Two-finger pinch
    Pinching {
        /// Finger distance the zoom ratio is measured against
        start_distance: f64,
        /// Midpoint (screen) the next pan delta is measured from
        start_center: Point,
        /// Viewport zoom when the pinch began
        start_zoom: f64,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching { .. })
    }

    /// Returns true while a single contact may still become a tap or long-press
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PossibleTap { .. } | Self::LongPressArmed { .. })
    }

    /// The contact driving a single-contact gesture
    pub fn contact(&self) -> Option<ContactId> {
        match self {
            Self::PossibleTap { contact, .. }
            | Self::LongPressArmed { contact, .. }
            | Self::Dragging { contact, .. } => Some(*contact),
            _ => None,
        }
    }

    /// Start position and time of a pending single contact
    pub fn pending_start(&self) -> Option<(Point, Instant)> {
        match self {
            Self::PossibleTap { start, t0, .. } | Self::LongPressArmed { start, t0, .. } => {
                Some((*start, *t0))
            }
            _ => None,
        }
    }

    /// Model position where the current drag began
    pub fn drag_start(&self) -> Option<Point> {
        match self {
            Self::Dragging { start_model, .. } => Some(*start_model),
            _ => None,
        }
    }

    /// Update the last reported drag position
    pub fn set_drag_current(&mut self, position: Point) {
        if let Self::Dragging { last_model, .. } = self {
            *last_model = position;
        }
    }

    /// Cancel any timer owned by the state
    pub fn cancel_timer(&self) {
        if let Self::LongPressArmed { timer, .. } = self {
            timer.cancel();
        }
    }

    /// Reset to Idle, cancelling any armed timer
    pub fn reset(&mut self) {
        self.cancel_timer();
        *self = Self::Idle;
    }

    pub fn start_dragging(&mut self, contact: ContactId, start_model: Point) {
        self.cancel_timer();
        *self = Self::Dragging {
            contact,
            start_model,
            last_model: start_model,
        };
    }

    pub fn start_pinching(&mut self, start_distance: f64, start_center: Point, start_zoom: f64) {
        self.cancel_timer();
        *self = Self::Pinching {
            start_distance,
            start_center,
            start_zoom,
        };
    }

    /// Move the pan baseline after a pan delta was emitted
    pub fn rebase_pinch_center(&mut self, center: Point) {
        if let Self::Pinching { start_center, .. } = self {
            *start_center = center;
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PossibleTap { .. } => "possible_tap",
            Self::LongPressArmed { .. } => "long_press_armed",
            Self::Dragging { .. } => "dragging",
            Self::Pinching { .. } => "pinching",
        }
    }
}
