//! Viewport controller - owns pan/zoom and publishes the view box.
//!
//! Every mutation is computed on a copy of the transform, validated, and only
//! then stored and pushed to the host, so a rejected update leaves the
//! previous view untouched. Pinch updates are coalesced per animation frame:
//! the latest zoom request wins and pan deltas accumulate.

use crate::host::EditorHost;
use crate::input::{CoordinateConverter, ViewportTransform};
use crate::settings::ViewportSettings;
use kurbo::{Point, Size, Vec2};
use tracing::{debug, warn};

/// Zoom and pan waiting for the next animation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PendingUpdate {
    zoom: Option<(f64, Point)>,
    pan: Vec2,
}

impl PendingUpdate {
    fn is_empty(&self) -> bool {
        self.zoom.is_none() && self.pan == Vec2::ZERO
    }
}

pub struct ViewportController {
    transform: ViewportTransform,
    min_zoom: f64,
    max_zoom: f64,
    pending: PendingUpdate,
    frame_requested: bool,
}

impl ViewportController {
    pub fn new(settings: &ViewportSettings, canvas_size: Size, canvas_offset: Point) -> Self {
        let mut controller = Self {
            transform: ViewportTransform::new(canvas_size, canvas_offset),
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            pending: PendingUpdate::default(),
            frame_requested: false,
        };
        controller.transform.zoom = controller.clamp_zoom(settings.initial_zoom);
        controller
    }

    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    /// Clamp to the zoom bounds without panicking on inverted settings.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Resize or move the canvas element; origin and zoom are kept.
    pub fn set_canvas(&mut self, size: Size, offset: Point, host: &mut dyn EditorHost) -> bool {
        let mut candidate = self.transform;
        candidate.canvas_size = size;
        candidate.canvas_offset = offset;
        self.publish(candidate, host)
    }

    /// Zoom to `new_zoom` (clamped) keeping the model point under
    /// `focal_screen` in place.
    pub fn apply_zoom(&mut self, new_zoom: f64, focal_screen: Point, host: &mut dyn EditorHost) -> bool {
        match self.zoomed(self.transform, new_zoom, focal_screen) {
            Some(candidate) => self.publish(candidate, host),
            None => false,
        }
    }

    /// Pan by a screen delta; the content follows the pointer.
    pub fn apply_pan(&mut self, screen_delta: Vec2, host: &mut dyn EditorHost) -> bool {
        let candidate = Self::panned(self.transform, screen_delta);
        self.publish(candidate, host)
    }

    /// Multiply the zoom by `multiplier` and center the view on `model_point`.
    pub fn zoom_around_point(&mut self, multiplier: f64, model_point: Point, host: &mut dyn EditorHost) -> bool {
        let target = self.transform.zoom * multiplier;
        if !target.is_finite() || target <= 0.0 {
            warn!(multiplier, "Rejected zoom multiplier");
            return false;
        }

        let mut candidate = self.transform;
        candidate.zoom = self.clamp_zoom(target);
        let half_extent = Vec2::new(candidate.canvas_size.width, candidate.canvas_size.height) * (candidate.zoom / 2.0);
        candidate.origin = model_point - half_extent;
        self.publish(candidate, host)
    }

    /// Queue a zoom for the next frame. Replaces any zoom already queued.
    pub fn request_zoom(&mut self, new_zoom: f64, focal_screen: Point, host: &mut dyn EditorHost) {
        self.pending.zoom = Some((new_zoom, focal_screen));
        self.ensure_frame(host);
    }

    /// Queue a pan for the next frame. Accumulates with pans already queued.
    pub fn request_pan(&mut self, screen_delta: Vec2, host: &mut dyn EditorHost) {
        self.pending.pan += screen_delta;
        self.ensure_frame(host);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Apply everything queued since the last frame as one mutation.
    pub fn on_animation_frame(&mut self, host: &mut dyn EditorHost) -> bool {
        self.frame_requested = false;
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return false;
        }

        let mut candidate = self.transform;
        if pending.pan != Vec2::ZERO {
            candidate = Self::panned(candidate, pending.pan);
        }
        if let Some((zoom, focal)) = pending.zoom {
            match self.zoomed(candidate, zoom, focal) {
                Some(zoomed) => candidate = zoomed,
                None => return false,
            }
        }
        self.publish(candidate, host)
    }

    /// Cancel an in-flight frame request and drop queued updates.
    pub fn teardown(&mut self, host: &mut dyn EditorHost) {
        if self.frame_requested {
            host.cancel_animation_frame();
            self.frame_requested = false;
        }
        self.pending = PendingUpdate::default();
    }

    fn ensure_frame(&mut self, host: &mut dyn EditorHost) {
        if !self.frame_requested {
            self.frame_requested = true;
            host.request_animation_frame();
        }
    }

    fn zoomed(&self, from: ViewportTransform, new_zoom: f64, focal_screen: Point) -> Option<ViewportTransform> {
        if !new_zoom.is_finite() || new_zoom <= 0.0 {
            warn!(new_zoom, "Rejected zoom request");
            return None;
        }

        let focal_model = CoordinateConverter::to_model(focal_screen, &from);
        let mut candidate = from;
        candidate.zoom = self.clamp_zoom(new_zoom);
        candidate.origin = focal_model - CoordinateConverter::to_canvas_local(focal_screen, &from) * candidate.zoom;
        Some(candidate)
    }

    fn panned(from: ViewportTransform, screen_delta: Vec2) -> ViewportTransform {
        let mut candidate = from;
        candidate.origin -= CoordinateConverter::delta_to_model(screen_delta, from.zoom);
        candidate
    }

    fn publish(&mut self, candidate: ViewportTransform, host: &mut dyn EditorHost) -> bool {
        if !candidate.is_valid() {
            warn!(?candidate, "Rejected non-finite viewport transform");
            return false;
        }

        self.transform = candidate;
        let view_box = candidate.view_box();
        debug!(%view_box, zoom = candidate.zoom, "Viewport updated");
        host.set_view_box(view_box);
        host.update_zoom_display(candidate.zoom);
        true
    }
}
