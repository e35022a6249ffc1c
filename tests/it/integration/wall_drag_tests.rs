//! Wall, object and label dragging; wall drawing and straightening.

use crate::helpers::{down, drag_to, editor, mouse_click, mouse_drag, ms, pt, HostCall, TestSceneBuilder};
use planboard::types::{LabelId, ObjectId};
use planboard::{InputEvent, ContactId, InteractionMode, PointerKind, WallId};
use std::time::Instant;

fn single_wall() -> planboard::Scene {
    TestSceneBuilder::new().with_wall((0.0, 0.0), (100.0, 0.0)).build()
}

// ============================================================================
// Wall drag
// ============================================================================

#[test]
fn test_wall_drag_snaps_and_commits() {
    let mut editor = editor(single_wall());
    mouse_drag(&mut editor, (50.0, 0.0), (97.0, 4.0), Instant::now());

    let wall = editor.scene().wall(WallId(1)).unwrap();
    insta::assert_snapshot!(wall.d, @"M50,0 L150,0");
    assert_eq!(wall.record.start, pt(50.0, 0.0));
    assert_eq!(wall.record.end, pt(150.0, 0.0));

    let host = editor.host();
    assert!(host.has(&HostCall::DragPreview(WallId(1), Some("translate(50, 0)".into()))));
    assert!(host.has(&HostCall::DragPreview(WallId(1), None)));
    assert_eq!(host.count(&HostCall::RecomputeRooms), 1);
    assert_eq!(host.count(&HostCall::SaveHistory), 1);
    assert!(!editor.is_dragging());
}

#[test]
fn test_runtime_grid_change() {
    let mut editor = editor(single_wall());
    assert!(!editor.set_grid(-10.0, 5.0));
    assert!(editor.set_grid(20.0, 5.0));
    assert_eq!(editor.settings().snapping.grid_size, 20.0);

    mouse_drag(&mut editor, (50.0, 0.0), (88.0, 0.0), Instant::now());
    assert_eq!(editor.scene().wall(WallId(1)).unwrap().d, "M40,0 L140,0");
}

#[test]
fn test_path_untouched_until_release() {
    let mut editor = editor(single_wall());
    let t0 = Instant::now();

    editor.handle_event(&down(1, (50.0, 0.0), PointerKind::Mouse, t0));
    editor.handle_event(&drag_to(1, (97.0, 4.0), PointerKind::Mouse, ms(t0, 50)));

    assert!(editor.is_dragging());
    assert_eq!(editor.scene().wall(WallId(1)).unwrap().d, "M0,0 L100,0");
}

#[test]
fn test_wall_drag_aligns_to_neighbor_vertex() {
    let scene = TestSceneBuilder::new()
        .with_wall((0.0, 0.0), (100.0, 0.0))
        .with_wall((160.0, 5.0), (160.0, 100.0))
        .build();
    let mut editor = editor(scene);
    mouse_drag(&mut editor, (50.0, 0.0), (97.0, 4.0), Instant::now());

    let wall = editor.scene().wall(WallId(1)).unwrap();
    insta::assert_snapshot!(wall.d, @"M50,0 L160,5");
    assert_eq!(wall.record.start, pt(50.0, 0.0));
    assert_eq!(wall.record.end, pt(160.0, 5.0));
    assert_eq!(editor.scene().wall(WallId(2)).unwrap().d, "M160,5 L160,100");
}

#[test]
fn test_snap_disabled_uses_raw_delta() {
    let mut editor = editor(single_wall());
    editor.set_snap_enabled(false);
    mouse_drag(&mut editor, (50.0, 0.0), (97.0, 4.0), Instant::now());

    insta::assert_snapshot!(editor.scene().wall(WallId(1)).unwrap().d, @"M47,4 L147,4");
}

#[test]
fn test_snapped_zero_delta_changes_nothing() {
    let mut editor = editor(single_wall());
    // Travels past the move threshold but snaps back onto the grid
    mouse_drag(&mut editor, (50.0, 0.0), (64.0, 6.0), Instant::now());

    assert_eq!(editor.scene().wall(WallId(1)).unwrap().d, "M0,0 L100,0");
    assert_eq!(editor.host().count(&HostCall::RecomputeRooms), 0);
    assert_eq!(editor.host().count(&HostCall::SaveHistory), 0);
}

#[test]
fn test_snapped_zero_delta_still_aligns_to_neighbor() {
    let scene = TestSceneBuilder::new()
        .with_wall((0.0, 0.0), (100.0, 0.0))
        .with_wall((108.0, 6.0), (108.0, 100.0))
        .build();
    let mut editor = editor(scene);
    mouse_drag(&mut editor, (50.0, 0.0), (64.0, 6.0), Instant::now());

    let wall = editor.scene().wall(WallId(1)).unwrap();
    assert_eq!(wall.d, "M0,0 L108,6");
    assert_eq!(wall.record.end, pt(108.0, 6.0));
    assert_eq!(editor.host().count(&HostCall::RecomputeRooms), 1);
    assert_eq!(editor.host().count(&HostCall::SaveHistory), 1);
}

#[test]
fn test_malformed_wall_path_is_skipped() {
    let scene = TestSceneBuilder::new()
        .with_wall_path(pt(0.0, 0.0), pt(100.0, 0.0), "10,10 nonsense")
        .build();
    let mut editor = editor(scene);
    mouse_drag(&mut editor, (50.0, 0.0), (97.0, 4.0), Instant::now());

    assert_eq!(editor.scene().wall(WallId(1)).unwrap().d, "10,10 nonsense");
    assert_eq!(editor.host().count(&HostCall::RecomputeRooms), 0);
}

#[test]
fn test_cancelled_wall_drag_clears_preview() {
    let mut editor = editor(single_wall());
    let t0 = Instant::now();

    editor.handle_event(&down(1, (50.0, 0.0), PointerKind::Touch, t0));
    editor.handle_event(&drag_to(1, (97.0, 4.0), PointerKind::Touch, ms(t0, 50)));
    editor.handle_event(&InputEvent::cancel(ContactId(1), pt(97.0, 4.0), PointerKind::Touch, ms(t0, 80)));

    assert_eq!(editor.scene().wall(WallId(1)).unwrap().d, "M0,0 L100,0");
    assert!(editor.host().has(&HostCall::DragPreview(WallId(1), None)));
    assert!(!editor.is_dragging());
}

// ============================================================================
// Objects & labels
// ============================================================================

fn wall_with_table() -> planboard::Scene {
    TestSceneBuilder::new()
        .with_wall((0.0, 0.0), (200.0, 0.0))
        .with_furniture("table", (100.0, 0.0), (40.0, 40.0))
        .build()
}

#[test]
fn test_select_mode_drags_object_over_wall() {
    let mut editor = editor(wall_with_table());
    mouse_drag(&mut editor, (100.0, 0.0), (150.0, 60.0), Instant::now());

    assert_eq!(editor.scene().object(ObjectId(2)).unwrap().position, pt(150.0, 60.0));
    assert_eq!(editor.scene().wall(WallId(1)).unwrap().d, "M0,0 L200,0");
    assert_eq!(editor.host().count(&HostCall::Save), 1);
}

#[test]
fn test_wall_adjust_mode_ignores_objects() {
    let mut editor = editor(wall_with_table());
    editor.set_mode(InteractionMode::WallAdjust);
    mouse_drag(&mut editor, (100.0, 0.0), (100.0, 48.0), Instant::now());

    assert_eq!(editor.scene().object(ObjectId(2)).unwrap().position, pt(100.0, 0.0));
    insta::assert_snapshot!(editor.scene().wall(WallId(1)).unwrap().d, @"M0,50 L200,50");
}

#[test]
fn test_cancelled_object_drag_restores_position() {
    let mut editor = editor(wall_with_table());
    let t0 = Instant::now();

    editor.handle_event(&down(1, (100.0, 0.0), PointerKind::Touch, t0));
    editor.handle_event(&drag_to(1, (180.0, 90.0), PointerKind::Touch, ms(t0, 50)));
    assert_eq!(editor.scene().object(ObjectId(2)).unwrap().position, pt(180.0, 90.0));

    editor.handle_event(&InputEvent::cancel(ContactId(1), pt(180.0, 90.0), PointerKind::Touch, ms(t0, 60)));
    assert_eq!(editor.scene().object(ObjectId(2)).unwrap().position, pt(100.0, 0.0));
    assert_eq!(editor.host().count(&HostCall::Save), 0);
}

#[test]
fn test_label_drag_translates_and_records_history() {
    let scene = TestSceneBuilder::new().with_label("Living", (0.0, 0.0)).build();
    let mut editor = editor(scene);
    mouse_drag(&mut editor, (10.0, 10.0), (60.0, 40.0), Instant::now());

    let label = editor.scene().label(LabelId(1)).unwrap();
    assert_eq!(label.position, pt(50.0, 30.0));
    assert_eq!(editor.host().count(&HostCall::SaveHistory), 1);
    assert_eq!(editor.host().count(&HostCall::Save), 0);
}

// ============================================================================
// Wall drawing
// ============================================================================

#[test]
fn test_draw_wall_snaps_start_to_node() {
    let mut editor = editor(single_wall());
    editor.set_mode(InteractionMode::WallDraw);
    mouse_drag(&mut editor, (103.0, -4.0), (300.0, 0.0), Instant::now());

    let walls = editor.scene().walls();
    assert_eq!(walls.len(), 2);
    assert_eq!(walls[1].record.start, pt(100.0, 0.0));
    assert_eq!(walls[1].record.end, pt(300.0, 0.0));
    insta::assert_snapshot!(walls[1].d, @"M100,10 L300,10 L300,-10 L100,-10 Z");

    let host = editor.host();
    let rebuild = host.calls.iter().position(|c| *c == HostCall::RebuildWalls).unwrap();
    let save = host.calls.iter().position(|c| *c == HostCall::Save).unwrap();
    assert!(rebuild < save);
}

#[test]
fn test_draw_wall_too_short_is_discarded() {
    let mut editor = editor(single_wall());
    editor.set_mode(InteractionMode::WallDraw);
    // Both ends snap to the same node
    mouse_drag(&mut editor, (98.0, 2.0), (120.0, 10.0), Instant::now());

    assert_eq!(editor.scene().walls().len(), 1);
    assert!(!editor.host().has(&HostCall::Save));
}

// ============================================================================
// Wall fix
// ============================================================================

#[test]
fn test_wall_fix_straightens_and_locks() {
    let scene = TestSceneBuilder::new()
        .with_wall_path(pt(2.0, 3.0), pt(97.0, 4.0), "M2,3 L97,4")
        .build();
    let mut editor = editor(scene);
    editor.set_mode(InteractionMode::WallFix);
    let t0 = Instant::now();

    mouse_click(&mut editor, (50.0, 3.0), t0);
    editor.tick(ms(t0, 500));

    let wall = editor.scene().wall(WallId(1)).unwrap();
    insta::assert_snapshot!(wall.d, @"M0,0 L100,0");
    assert_eq!(wall.record.start, pt(0.0, 0.0));
    assert_eq!(wall.record.end, pt(100.0, 0.0));
    assert!(editor.host().has(&HostCall::Highlight(WallId(1), true)));

    // Locked while highlighted
    mouse_click(&mut editor, (50.0, 3.0), ms(t0, 600));
    editor.tick(ms(t0, 1100));
    assert_eq!(editor.host().count(&HostCall::RecomputeRooms), 1);

    editor.tick(ms(t0, 2100));
    assert!(editor.host().has(&HostCall::Highlight(WallId(1), false)));
}
