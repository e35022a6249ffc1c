//! Unit tests for the scene model: hit testing and structural edits.

use crate::helpers::{pt, TestSceneBuilder};
use kurbo::Vec2;
use planboard::types::{LabelId, ObjectId};
use planboard::{SceneElement, WallId, WallKind};

#[test]
fn test_hit_priority_label_object_wall() {
    let scene = TestSceneBuilder::new()
        .with_wall((0.0, 0.0), (200.0, 0.0))
        .with_furniture("table", (100.0, 0.0), (40.0, 40.0))
        .with_label("Kitchen", (90.0, -5.0))
        .build();

    assert_eq!(scene.element_at(pt(95.0, 0.0)), Some(SceneElement::Label(LabelId(3))));
    assert_eq!(scene.element_at(pt(110.0, 18.0)), Some(SceneElement::Object(ObjectId(2))));
    assert_eq!(scene.element_at(pt(10.0, 3.0)), Some(SceneElement::Wall(WallId(1))));
    assert_eq!(scene.element_at(pt(10.0, 50.0)), None);
}

#[test]
fn test_outline_wall_hit_by_polygon() {
    let mut scene = TestSceneBuilder::new().build();
    let wall = scene.add_wall(pt(0.0, 0.0), pt(100.0, 0.0), 20.0);

    assert_eq!(scene.wall(wall).unwrap().d, "M0,10 L100,10 L100,-10 L0,-10 Z");
    assert_eq!(scene.wall_at(pt(50.0, 9.0)), Some(wall));
    assert_eq!(scene.wall_at(pt(50.0, 11.0)), None);
}

#[test]
fn test_split_wall_relinks_neighbors() {
    let mut scene = TestSceneBuilder::new()
        .with_wall((0.0, 0.0), (100.0, 0.0))
        .with_wall((100.0, 0.0), (100.0, 100.0))
        .build();
    scene.wall_mut(WallId(1)).unwrap().record.child = Some(WallId(2));
    scene.wall_mut(WallId(2)).unwrap().record.parent = Some(WallId(1));

    let second = scene.split_wall(WallId(1)).unwrap();
    assert_eq!(second, WallId(3));

    let order: Vec<WallId> = scene.walls().iter().map(|w| w.id()).collect();
    assert_eq!(order, vec![WallId(1), WallId(3), WallId(2)]);

    let record = &scene.wall(second).unwrap().record;
    insta::assert_snapshot!(
        serde_json::to_string(record).unwrap(),
        @r#"{"id":3,"start":{"x":50.0,"y":0.0},"end":{"x":100.0,"y":0.0},"parent":1,"child":2,"kind":"Normal","thickness":10.0}"#
    );
    assert_eq!(scene.wall(WallId(1)).unwrap().record.child, Some(second));
    assert_eq!(scene.wall(WallId(2)).unwrap().record.parent, Some(second));
}

#[test]
fn test_split_moves_anchored_objects_to_their_half() {
    let mut scene = TestSceneBuilder::new()
        .with_wall((0.0, 0.0), (100.0, 0.0))
        .with_door_on(WallId(1), (20.0, 0.0))
        .with_door_on(WallId(1), (80.0, 0.0))
        .build();

    let second = scene.split_wall(WallId(1)).unwrap();
    assert_eq!(scene.objects_on_wall(WallId(1)), vec![ObjectId(2)]);
    assert_eq!(scene.objects_on_wall(second), vec![ObjectId(3)]);
}

#[test]
fn test_remove_wall_clears_links() {
    let mut scene = TestSceneBuilder::new()
        .with_wall((0.0, 0.0), (100.0, 0.0))
        .with_wall((100.0, 0.0), (100.0, 100.0))
        .build();
    scene.wall_mut(WallId(1)).unwrap().record.child = Some(WallId(2));
    scene.wall_mut(WallId(2)).unwrap().record.parent = Some(WallId(1));

    assert!(scene.remove_wall(WallId(1)).is_some());
    assert_eq!(scene.wall(WallId(2)).unwrap().record.parent, None);
    assert!(scene.remove_wall(WallId(1)).is_none());
}

#[test]
fn test_object_edits() {
    let mut scene = TestSceneBuilder::new()
        .with_furniture("sofa", (100.0, 100.0), (60.0, 30.0))
        .build();
    let sofa = ObjectId(1);

    assert_eq!(scene.rotate_object(sofa, 90.0), Some(90.0));
    scene.rotate_object(sofa, 90.0);
    scene.rotate_object(sofa, 90.0);
    assert_eq!(scene.rotate_object(sofa, 90.0), Some(0.0));

    let copy = scene.duplicate_object(sofa, Vec2::new(50.0, 50.0)).unwrap();
    assert_ne!(copy, sofa);
    assert_eq!(scene.object(copy).unwrap().position, pt(150.0, 150.0));
    assert_eq!(scene.object_at(pt(150.0, 150.0)), Some(copy));

    assert!(scene.remove_object(sofa).is_some());
    assert_eq!(scene.object_at(pt(100.0, 100.0)), None);
}

#[test]
fn test_label_translation_updates_hit_area() {
    let mut scene = TestSceneBuilder::new().with_label("Bath", (0.0, 0.0)).build();
    let label = LabelId(1);

    assert!(scene.translate_label(label, Vec2::new(200.0, 0.0)));
    assert_eq!(scene.label_at(pt(10.0, 10.0)), None);
    assert_eq!(scene.label_at(pt(210.0, 10.0)), Some(label));
    assert_eq!(scene.label(label).unwrap().transform_attr(), "translate(200,0)");
}

#[test]
fn test_nearest_wall_node() {
    let scene = TestSceneBuilder::new()
        .with_wall((0.0, 0.0), (100.0, 0.0))
        .with_wall((100.0, 0.0), (100.0, 100.0))
        .build();

    assert_eq!(scene.nearest_wall_node(pt(95.0, 4.0), 30.0), Some(pt(100.0, 0.0)));
    assert_eq!(scene.nearest_wall_node(pt(50.0, 50.0), 30.0), None);
}

#[test]
fn test_wall_kind_toggle() {
    let mut scene = TestSceneBuilder::new().with_wall((0.0, 0.0), (100.0, 0.0)).build();
    assert!(scene.set_wall_kind(WallId(1), WallKind::Separator));
    assert_eq!(scene.wall(WallId(1)).unwrap().record.kind, WallKind::Separator);
    assert!(!scene.set_wall_kind(WallId(9), WallKind::Normal));
}
