//! Unit tests for the viewport controller's publication and frame coalescing.

use crate::helpers::{HostCall, RecordingHost};
use kurbo::{Point, Size, Vec2};
use planboard::settings::ViewportSettings;
use planboard::ViewportController;

fn controller() -> ViewportController {
    ViewportController::new(&ViewportSettings::default(), Size::new(800.0, 600.0), Point::ORIGIN)
}

#[test]
fn test_mutation_publishes_view_box_then_zoom() {
    let mut viewport = controller();
    let mut host = RecordingHost::new();

    viewport.apply_zoom(1.5, Point::new(400.0, 300.0), &mut host);

    assert_eq!(
        host.calls,
        vec![
            HostCall::ViewBox("-200 -150 1200 900".into()),
            HostCall::ZoomDisplay(1.5),
        ]
    );
}

#[test]
fn test_rejected_mutation_publishes_nothing() {
    let mut viewport = controller();
    let mut host = RecordingHost::new();

    assert!(!viewport.apply_zoom(f64::NAN, Point::ORIGIN, &mut host));
    assert!(!viewport.apply_pan(Vec2::new(f64::INFINITY, 0.0), &mut host));
    assert!(!viewport.zoom_around_point(0.0, Point::ORIGIN, &mut host));
    assert!(host.calls.is_empty());
    assert_eq!(viewport.zoom(), 1.0);
}

#[test]
fn test_requests_coalesce_into_one_frame() {
    let mut viewport = controller();
    let mut host = RecordingHost::new();
    let focal = Point::new(400.0, 300.0);

    viewport.request_zoom(1.2, focal, &mut host);
    viewport.request_zoom(1.4, focal, &mut host);
    viewport.request_zoom(1.5, focal, &mut host);
    assert_eq!(host.count(&HostCall::RequestFrame), 1);
    assert_eq!(viewport.zoom(), 1.0);

    assert!(viewport.on_animation_frame(&mut host));
    assert_eq!(viewport.zoom(), 1.5);
    assert_eq!(host.calls.iter().filter(|c| matches!(c, HostCall::ViewBox(_))).count(), 1);
    assert!(!viewport.has_pending());
    assert!(!viewport.frame_requested());
}

#[test]
fn test_pans_accumulate() {
    let mut viewport = controller();
    let mut host = RecordingHost::new();

    viewport.request_pan(Vec2::new(10.0, 0.0), &mut host);
    viewport.request_pan(Vec2::new(5.0, -4.0), &mut host);
    viewport.on_animation_frame(&mut host);

    assert_eq!(viewport.transform().origin, Point::new(-15.0, 4.0));
}

#[test]
fn test_empty_frame_is_noop() {
    let mut viewport = controller();
    let mut host = RecordingHost::new();
    assert!(!viewport.on_animation_frame(&mut host));
    assert!(host.calls.is_empty());
}

#[test]
fn test_teardown_cancels_frame() {
    let mut viewport = controller();
    let mut host = RecordingHost::new();

    viewport.request_pan(Vec2::new(3.0, 3.0), &mut host);
    viewport.teardown(&mut host);

    assert!(host.has(&HostCall::CancelFrame));
    assert!(!viewport.has_pending());
    assert!(!viewport.on_animation_frame(&mut host));
    assert_eq!(viewport.transform().origin, Point::ORIGIN);
}

#[test]
fn test_inverted_bounds_do_not_panic() {
    let settings = ViewportSettings {
        min_zoom: 3.0,
        max_zoom: 1.0,
        ..ViewportSettings::default()
    };
    let viewport = ViewportController::new(&settings, Size::new(100.0, 100.0), Point::ORIGIN);
    assert!(viewport.zoom().is_finite());
}
