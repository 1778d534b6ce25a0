use super::*;
use crate::geom::Size;
use crate::node::NodeTransform;

fn square_at(x: f64, y: f64) -> Rectangle {
    Rectangle::new(x, y, 100.0, 100.0).unwrap()
}

fn overlay_for(r: &Rectangle) -> Overlay {
    Overlay::derive(r.id, Size::new(r.width, r.height), &NodeTransform::from_rect(r))
}

// =============================================================
// contains
// =============================================================

#[test]
fn interior_point_is_inside() {
    // Dead center: the decorative frame draws nothing here.
    assert!(contains(&square_at(0.0, 0.0), Point::new(50.0, 50.0)));
}

#[test]
fn top_edge_gap_is_still_inside() {
    assert!(contains(&square_at(0.0, 0.0), Point::new(50.0, 0.0)));
}

#[test]
fn edges_are_inclusive() {
    let r = square_at(10.0, 10.0);
    assert!(contains(&r, Point::new(10.0, 10.0)));
    assert!(contains(&r, Point::new(110.0, 110.0)));
}

#[test]
fn outside_point_is_outside() {
    let r = square_at(10.0, 10.0);
    assert!(!contains(&r, Point::new(9.0, 50.0)));
    assert!(!contains(&r, Point::new(50.0, 111.0)));
}

#[test]
fn rotation_is_respected() {
    // Turned 90° clockwise about the anchor, the body lies to the left of it.
    let r = square_at(200.0, 100.0).with_rotation(90.0).unwrap();
    assert!(contains(&r, Point::new(150.0, 150.0)));
    assert!(!contains(&r, Point::new(250.0, 150.0)));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_stage_hits_nothing() {
    assert!(hit_test(Point::new(5.0, 5.0), &RectStore::new(), None).is_none());
}

#[test]
fn topmost_shape_wins() {
    let mut store = RectStore::new();
    let below = square_at(0.0, 0.0);
    let above = square_at(50.0, 50.0);
    store.push(below.clone());
    store.push(above.clone());
    let hit = hit_test(Point::new(75.0, 75.0), &store, None).unwrap();
    assert_eq!(hit, Hit { rect_id: above.id, part: HitPart::Body });
    let hit = hit_test(Point::new(10.0, 10.0), &store, None).unwrap();
    assert_eq!(hit.rect_id, below.id);
}

#[test]
fn flip_control_beats_bodies() {
    let mut store = RectStore::new();
    let selected = square_at(270.0, 130.0);
    // Another shape sits right where the flip control is drawn.
    let under = square_at(300.0, 70.0);
    store.push(selected.clone());
    store.push(under);
    let overlay = overlay_for(&selected);
    let hit = hit_test(Point::new(320.0, 90.0), &store, Some(&overlay)).unwrap();
    assert_eq!(hit, Hit { rect_id: selected.id, part: HitPart::FlipControl });
}

#[test]
fn rotate_handle_outside_flip_circle() {
    let mut store = RectStore::new();
    let selected = square_at(270.0, 130.0);
    store.push(selected.clone());
    let overlay = overlay_for(&selected);
    let hit = hit_test(Point::new(324.0, 76.0), &store, Some(&overlay)).unwrap();
    assert_eq!(hit.part, HitPart::RotateHandle);
}

#[test]
fn controls_ignored_without_overlay() {
    let mut store = RectStore::new();
    store.push(square_at(270.0, 130.0));
    assert!(hit_test(Point::new(320.0, 90.0), &store, None).is_none());
}
