//! Gesture recognizer - turns contact lifecycle events into gesture intents.
//!
//! Every event carries its own `Instant` and timers are polled explicitly, so
//! the recognizer never reads the clock. Feeding it the same events at the
//! same times always yields the same intents.

use super::coords::{CoordinateConverter, ViewportTransform};
use super::events::{
    CompatMouseEvent, CompatMouseKind, ContactId, ContactPhase, GestureIntent, InputEvent,
    PointerContact,
};
use super::state::GestureState;
use super::timers::{TimerHandle, TimerQueue};
use crate::profile_scope;
use crate::settings::GestureSettings;
use crate::types::PointerKind;
use kurbo::Point;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RecognizerTimer {
    LongPress {
        contact: ContactId,
        position: Point,
        kind: PointerKind,
    },
    DeferredTap {
        position: Point,
        kind: PointerKind,
    },
}

/// The most recent single tap, still waiting for a possible second tap.
#[derive(Debug)]
struct LastTap {
    time: Instant,
    deferred: TimerHandle,
}

pub struct GestureRecognizer {
    settings: GestureSettings,
    state: GestureState,
    contacts: BTreeMap<ContactId, PointerContact>,
    timers: TimerQueue<RecognizerTimer>,
    last_tap: Option<LastTap>,
    /// Contact currently mirrored to the mouse-compatible layer
    compat_contact: Option<ContactId>,
}

impl GestureRecognizer {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            state: GestureState::Idle,
            contacts: BTreeMap::new(),
            timers: TimerQueue::new(),
            last_tap: None,
            compat_contact: None,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Feed one contact event.
    pub fn handle(&mut self, event: &InputEvent, transform: &ViewportTransform) -> Vec<GestureIntent> {
        match event.phase {
            ContactPhase::Start => self.contact_start(event, transform),
            ContactPhase::Move => self.contact_move(event, transform),
            ContactPhase::End => self.contact_end(event, transform),
            ContactPhase::Cancel => self.contact_cancel(event),
        }
    }

    /// Fire timers due at `now`. Stale timers are dropped silently.
    pub fn poll(&mut self, now: Instant) -> Vec<GestureIntent> {
        let mut intents = Vec::new();

        for timer in self.timers.drain_due(now) {
            match timer {
                RecognizerTimer::LongPress { contact, position, kind } => {
                    let armed = matches!(
                        self.state,
                        GestureState::LongPressArmed { contact: c, .. } if c == contact
                    );
                    if armed {
                        debug!(?contact, "Long-press fired");
                        self.state = GestureState::Idle;
                        intents.push(GestureIntent::LongPress { position, kind });
                    }
                }
                RecognizerTimer::DeferredTap { position, kind } => {
                    if self.last_tap.as_ref().is_some_and(|tap| !tap.deferred.is_live()) {
                        self.last_tap = None;
                    }
                    intents.push(GestureIntent::Tap { position, kind });
                }
            }
        }

        intents
    }

    /// Drop every contact and pending timer without emitting anything.
    pub fn reset(&mut self) {
        self.state.reset();
        self.contacts.clear();
        self.timers.clear();
        self.last_tap = None;
        self.compat_contact = None;
    }

    fn contact_start(&mut self, event: &InputEvent, transform: &ViewportTransform) -> Vec<GestureIntent> {
        let mut intents = Vec::new();

        self.contacts.insert(
            event.contact,
            PointerContact::new(event.contact, event.kind, event.position, event.time),
        );

        match self.contacts.len() {
            1 => {
                let model = CoordinateConverter::to_model(event.position, transform);
                self.state.reset();
                self.state = if event.kind.arms_long_press() {
                    let timer = self.timers.schedule(
                        event.time,
                        self.settings.long_press_delay(),
                        RecognizerTimer::LongPress {
                            contact: event.contact,
                            position: model,
                            kind: event.kind,
                        },
                    );
                    GestureState::LongPressArmed {
                        contact: event.contact,
                        start: event.position,
                        t0: event.time,
                        timer,
                    }
                } else {
                    GestureState::PossibleTap {
                        contact: event.contact,
                        start: event.position,
                        t0: event.time,
                    }
                };
                debug!(contact = ?event.contact, state = self.state.name(), "Contact start");

                self.compat_contact = Some(event.contact);
                intents.push(compat(CompatMouseKind::MouseDown, model));
            }
            // A finger returning to a one-finger pinch takes a fresh baseline
            2 if self.state.is_pinching() => {
                if let Some((distance, center)) = self.pinch_geometry() {
                    self.state.start_pinching(distance, center, transform.zoom);
                }
            }
            _ if !self.state.is_pinching() => {
                if let GestureState::Dragging { contact, .. } = self.state {
                    intents.push(GestureIntent::DragCancel { contact });
                }
                // A tap still waiting for its double-tap window belongs to
                // the gesture the pinch replaces.
                if let Some(tap) = self.last_tap.take() {
                    tap.deferred.cancel();
                }
                self.compat_contact = None;

                let (distance, center) = self.pinch_geometry().unwrap_or((0.0, event.position));
                self.state.start_pinching(distance, center, transform.zoom);
                debug!(distance, ?center, "Pinch start");

                intents.push(GestureIntent::PinchStart {
                    center: CoordinateConverter::to_model(center, transform),
                });
            }
            // Extra fingers during a pinch are tracked but ignored
            _ => {}
        }

        intents
    }

    fn contact_move(&mut self, event: &InputEvent, transform: &ViewportTransform) -> Vec<GestureIntent> {
        profile_scope!("contact_move");

        let Some(contact) = self.contacts.get_mut(&event.contact) else {
            return Vec::new();
        };
        contact.current = event.position;
        let travel = contact.travel();
        let start = contact.start;

        if self.state.is_pinching() {
            return self.pinch_move();
        }

        let mut intents = Vec::new();
        let model = CoordinateConverter::to_model(event.position, transform);

        if self.compat_contact == Some(event.contact) {
            intents.push(compat(CompatMouseKind::MouseMove, model));
        }

        if self.state.contact() != Some(event.contact) {
            return intents;
        }

        if self.state.is_pending() {
            if travel > self.settings.move_threshold {
                let start_model = CoordinateConverter::to_model(start, transform);
                self.state.start_dragging(event.contact, start_model);
                debug!(contact = ?event.contact, travel, "Drag start");
                intents.push(GestureIntent::DragStart {
                    contact: event.contact,
                    position: start_model,
                });
                intents.push(GestureIntent::DragMove {
                    contact: event.contact,
                    position: model,
                });
            }
        } else if self.state.is_dragging() {
            self.state.set_drag_current(model);
            intents.push(GestureIntent::DragMove {
                contact: event.contact,
                position: model,
            });
        }

        intents
    }

    fn pinch_move(&mut self) -> Vec<GestureIntent> {
        let mut intents = Vec::new();

        let GestureState::Pinching {
            start_distance,
            start_center,
            start_zoom,
        } = self.state
        else {
            return intents;
        };
        // One finger lifted: inert until it returns or the other lifts too
        let Some((distance, center)) = self.pinch_geometry() else {
            return intents;
        };

        if start_distance > 0.0 && (distance - start_distance).abs() > self.settings.pinch_threshold {
            let ratio = distance / start_distance;
            intents.push(GestureIntent::PinchZoom {
                ratio,
                zoom: start_zoom * ratio,
                focal_screen: center,
            });
        }

        let delta = center - start_center;
        let pan_threshold = self.settings.pinch_pan_threshold;
        if delta.x.abs() > pan_threshold || delta.y.abs() > pan_threshold {
            intents.push(GestureIntent::PinchPan { delta_screen: delta });
            self.state.rebase_pinch_center(center);
        }

        intents
    }

    fn contact_end(&mut self, event: &InputEvent, transform: &ViewportTransform) -> Vec<GestureIntent> {
        let mut intents = Vec::new();

        if self.contacts.remove(&event.contact).is_none() {
            return intents;
        }

        if self.state.is_pinching() {
            if self.contacts.is_empty() {
                self.state.reset();
                debug!("Pinch end");
                intents.push(GestureIntent::PinchEnd);
            }
            return intents;
        }

        let model = CoordinateConverter::to_model(event.position, transform);
        if self.compat_contact == Some(event.contact) {
            self.compat_contact = None;
            intents.push(compat(CompatMouseKind::MouseUp, model));
        }

        if self.state.contact() != Some(event.contact) {
            return intents;
        }

        if self.state.is_dragging() {
            intents.push(GestureIntent::DragEnd {
                contact: event.contact,
                position: model,
            });
        } else if let Some((start, t0)) = self.state.pending_start() {
            let duration = event.time.saturating_duration_since(t0);
            let moved = start.distance(event.position);
            if duration < self.settings.tap_threshold() && moved < self.settings.move_threshold {
                if let Some(double_tap) = self.register_tap(event.time, model, event.kind) {
                    intents.push(double_tap);
                }
            }
        }

        self.state.reset();
        intents
    }

    fn contact_cancel(&mut self, event: &InputEvent) -> Vec<GestureIntent> {
        let mut intents = Vec::new();

        if self.contacts.remove(&event.contact).is_none() {
            return intents;
        }
        if self.compat_contact == Some(event.contact) {
            self.compat_contact = None;
        }

        if let GestureState::Dragging { contact, .. } = self.state {
            intents.push(GestureIntent::DragCancel { contact });
        }
        debug!(contact = ?event.contact, state = self.state.name(), "Contact cancelled");
        self.state.reset();

        intents
    }

    /// Record a tap. Returns a double-tap if it closes the previous tap's window.
    fn register_tap(&mut self, time: Instant, position: Point, kind: PointerKind) -> Option<GestureIntent> {
        if let Some(previous) = self.last_tap.take() {
            if time.saturating_duration_since(previous.time) < self.settings.double_tap_delay() {
                previous.deferred.cancel();
                debug!(?position, "Double tap");
                return Some(GestureIntent::DoubleTap { position, kind });
            }
        }

        let deferred = self.timers.schedule(
            time,
            self.settings.double_tap_delay(),
            RecognizerTimer::DeferredTap { position, kind },
        );
        self.last_tap = Some(LastTap { time, deferred });
        None
    }

    /// Distance and screen midpoint of the first two contacts.
    fn pinch_geometry(&self) -> Option<(f64, Point)> {
        let mut contacts = self.contacts.values();
        let a = contacts.next()?.current;
        let b = contacts.next()?.current;
        Some((a.distance(b), a.midpoint(b)))
    }
}

fn compat(kind: CompatMouseKind, position: Point) -> GestureIntent {
    GestureIntent::Compat(CompatMouseEvent { kind, position })
}
