//! Pointer, touch and pen input handling for the plan canvas.
//!
//! Raw contact lifecycle events go in, disambiguated gesture intents come out.
//!
//! ## Architecture
//!
//! The recognizer owns an explicit state machine (`GestureState`) instead of
//! a set of independent listeners, so ordering and cancellation between
//! concurrent gestures are decided in one place. Timers are deterministic and
//! polled with the current `Instant`.
//!
//! ## Modules
//!
//! - `coords` - Viewport transform and screen/model coordinate conversion
//! - `events` - Contact events and the gesture intents emitted for them
//! - `state` - Gesture state machine enum and helper methods
//! - `timers` - One-shot timers with cancellation handles
//! - `recognizer` - Contact tracking, tap/drag/long-press/pinch classification

pub mod coords;
pub mod events;
mod recognizer;
mod state;
pub mod timers;

pub use coords::{CoordinateConverter, ViewBox, ViewportTransform};
pub use events::{
    CompatMouseEvent, CompatMouseKind, ContactId, ContactPhase, GestureIntent, InputEvent,
    PointerContact,
};
pub use recognizer::GestureRecognizer;
pub use state::GestureState;
pub use timers::{TimerHandle, TimerQueue};
