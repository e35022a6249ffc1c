//! Coordinate conversion between screen pixels and plan model units.
//!
//! The viewport is a viewBox over the plan: `origin` is the model point shown
//! at the canvas' top-left corner and `zoom` is the number of model units per
//! screen pixel. Every screen/model conversion in the crate goes through
//! `CoordinateConverter` so the formula lives in one place.

use kurbo::{Point, Size, Vec2};
use std::fmt;

/// Current pan/zoom state of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// Model units per screen pixel
    pub zoom: f64,
    /// Model coordinate at the canvas' top-left corner
    pub origin: Point,
    /// Canvas size in screen pixels
    pub canvas_size: Size,
    /// Canvas top-left in screen coordinates
    pub canvas_offset: Point,
}

impl ViewportTransform {
    pub fn new(canvas_size: Size, canvas_offset: Point) -> Self {
        Self {
            zoom: 1.0,
            origin: Point::ORIGIN,
            canvas_size,
            canvas_offset,
        }
    }

    /// No NaN or infinite component and a strictly positive zoom.
    pub fn is_valid(&self) -> bool {
        self.zoom.is_finite()
            && self.zoom > 0.0
            && self.origin.is_finite()
            && self.canvas_size.is_finite()
            && self.canvas_offset.is_finite()
    }

    /// The model rectangle currently visible, as published to the renderer.
    pub fn view_box(&self) -> ViewBox {
        ViewBox {
            x: self.origin.x,
            y: self.origin.y,
            width: self.canvas_size.width * self.zoom,
            height: self.canvas_size.height * self.zoom,
        }
    }

    /// Model point shown at the center of the canvas.
    pub fn center(&self) -> Point {
        self.origin + Vec2::new(self.canvas_size.width, self.canvas_size.height) * (self.zoom / 2.0)
    }
}

/// Visible model rectangle, formatted as an SVG `viewBox` ("x y w h").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert screen position to model position
    #[inline]
    pub fn to_model(screen: Point, transform: &ViewportTransform) -> Point {
        transform.origin + (screen - transform.canvas_offset) * transform.zoom
    }

    /// Convert model position to screen position
    #[inline]
    pub fn to_screen(model: Point, transform: &ViewportTransform) -> Point {
        transform.canvas_offset + (model - transform.origin) / transform.zoom
    }

    /// Screen position relative to the canvas' top-left corner
    #[inline]
    pub fn to_canvas_local(screen: Point, transform: &ViewportTransform) -> Vec2 {
        screen - transform.canvas_offset
    }

    /// Convert a delta from screen to model (for drag operations)
    #[inline]
    pub fn delta_to_model(delta: Vec2, zoom: f64) -> Vec2 {
        delta * zoom
    }

    /// Convert a delta from model to screen
    #[inline]
    pub fn delta_to_screen(delta: Vec2, zoom: f64) -> Vec2 {
        delta / zoom
    }
}
