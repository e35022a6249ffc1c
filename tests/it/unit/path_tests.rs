//! Unit tests for path parsing and rewriting.

use kurbo::{Point, Vec2};
use planboard::path::{Path, PathCommand, PathError};

#[test]
fn test_translate_mixed_path() {
    let path: Path = "M10,10 H50 V40 C50,60 30,70 10,60 Z".parse().unwrap();
    let moved = path.translated(Vec2::new(5.0, -10.0));
    insta::assert_snapshot!(moved.to_string(), @"M15,0 H55 V30 C55,50 35,60 15,50 Z");
}

#[test]
fn test_translate_keeps_raw_segments_verbatim() {
    let path = Path::parse("M0,0 l10,10 A5 5 0 0 1 20,20 L30,0").unwrap();
    let moved = path.translated(Vec2::new(1.0, 2.0));
    insta::assert_snapshot!(moved.to_string(), @"M1,2 l10,10 A5 5 0 0 1 20,20 L31,2");
    assert!(moved.has_raw());
}

#[test]
fn test_delta_invariance() {
    // Translating by a then b equals translating by a + b
    let path = Path::parse("M3,4 L10,20 H7 V1").unwrap();
    let (a, b) = (Vec2::new(50.0, 0.0), Vec2::new(-25.0, 100.0));
    assert_eq!(path.translated(a).translated(b), path.translated(a + b));
}

#[test]
fn test_command_kinds_survive_translation() {
    let path = Path::parse("M0,0 L1,1 2,2 H5 V6 C1,1 2,2 3,3 Z").unwrap();
    let moved = path.translated(Vec2::new(7.0, 7.0));
    let letters = |p: &Path| p.commands().iter().map(PathCommand::letter).collect::<Vec<_>>();
    assert_eq!(letters(&moved), letters(&path));
}

#[test]
fn test_vertices_and_bounds() {
    let path = Path::parse("M0,0 H100 V50 L0,50 Z").unwrap();
    assert_eq!(
        path.vertices(),
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(0.0, 50.0),
        ]
    );
    assert!(path.is_closed());
    assert_eq!(path.bounds().map(|r| r.area()), Some(5000.0));
}

#[test]
fn test_from_polyline() {
    let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
    insta::assert_snapshot!(Path::from_polyline(&points, true).to_string(), @"M0,0 L10,0 L10,10 Z");
    assert!(Path::from_polyline(&[], false).is_empty());
}

#[test]
fn test_parse_errors() {
    assert_eq!(Path::parse(""), Err(PathError::Empty));
    assert!(matches!(
        Path::parse("12 M0,0"),
        Err(PathError::LeadingData { offset: 0, .. })
    ));
}

#[test]
fn test_compact_number_syntax() {
    let path = Path::parse("M10-5L.5.5").unwrap();
    assert_eq!(
        path.vertices(),
        vec![Point::new(10.0, -5.0), Point::new(0.5, 0.5)]
    );
}
