#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square(id: ShapeId) -> Shape {
    Shape::new(id, vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)])
}

fn triangle(id: ShapeId) -> Shape {
    Shape::new(id, vec![pt(0.0, 0.0), pt(4.0, 0.0), pt(2.0, 3.0)])
}

// =============================================================
// Shape: defaults and serde
// =============================================================

#[test]
fn shape_new_uses_default_style() {
    let s = square(1);
    assert_eq!(s.color, "#FFFFFF");
    assert_eq!(s.stroke, "#000000");
    assert_eq!(s.stroke_width, 2.0);
    assert!(s.show_vertices);
    assert!(s.show_label);
    assert!(s.label.is_none());
}

#[test]
fn shape_deserialize_fills_missing_fields() {
    let s: Shape = serde_json::from_str(r#"{"id": 7, "points": [{"x": 1, "y": 2}]}"#).unwrap();
    assert_eq!(s.id, 7);
    assert_eq!(s.points, vec![pt(1.0, 2.0)]);
    assert_eq!(s.color, "#FFFFFF");
    assert!(s.show_vertices);
    assert!(s.label.is_none());
}

#[test]
fn shape_deserialize_reads_all_fields() {
    let json = r##"{
        "id": 3,
        "points": [{"x": 0, "y": 0}, {"x": 5, "y": 0}, {"x": 0, "y": 5}],
        "color": "#FF0000",
        "stroke": "blue",
        "stroke_width": 4.5,
        "show_vertices": false,
        "show_label": false,
        "label": "ABC"
    }"##;
    let s: Shape = serde_json::from_str(json).unwrap();
    assert_eq!(s.points.len(), 3);
    assert_eq!(s.color, "#FF0000");
    assert_eq!(s.stroke, "blue");
    assert_eq!(s.stroke_width, 4.5);
    assert!(!s.show_vertices);
    assert!(!s.show_label);
    assert_eq!(s.label.as_deref(), Some("ABC"));
}

#[test]
fn shape_serialize_omits_missing_label() {
    let value = serde_json::to_value(square(1)).unwrap();
    assert!(value.get("label").is_none());
    assert_eq!(value["points"][1]["x"], 10.0);
}

// =============================================================
// Shape: geometry
// =============================================================

#[test]
fn square_label_center_is_five_five() {
    assert_eq!(square(1).label_center(), Some(pt(5.0, 5.0)));
}

#[test]
fn bounds_of_triangle() {
    let b = triangle(1).bounds().unwrap();
    assert_eq!(b.min_x, 0.0);
    assert_eq!(b.max_x, 4.0);
    assert_eq!(b.min_y, 0.0);
    assert_eq!(b.max_y, 3.0);
    assert_eq!(b.width(), 4.0);
    assert_eq!(b.height(), 3.0);
}

#[test]
fn bounds_handles_negative_coordinates() {
    let b = Bounds::from_points(&[pt(-4.0, 2.0), pt(6.0, -8.0)]).unwrap();
    assert_eq!(b.center(), pt(1.0, -3.0));
}

#[test]
fn bounds_of_single_point_is_degenerate() {
    let b = Bounds::from_points(&[pt(3.0, 4.0)]).unwrap();
    assert_eq!(b.center(), pt(3.0, 4.0));
    assert_eq!(b.width(), 0.0);
}

#[test]
fn bounds_of_no_points_is_none() {
    assert!(Bounds::from_points(&[]).is_none());
    assert!(Shape::new(1, vec![]).label_center().is_none());
}

#[test]
fn label_text_prefers_explicit_label() {
    let mut s = square(4);
    s.label = Some("Rect A".to_owned());
    assert_eq!(s.label_text(), "Rect A");
}

#[test]
fn label_text_default_references_id() {
    assert_eq!(square(42).label_text(), "Shape 42");
}

#[test]
fn translate_moves_every_point() {
    let mut s = triangle(1);
    s.translate(pt(1.0, -2.0));
    assert_eq!(s.points, vec![pt(1.0, -2.0), pt(5.0, -2.0), pt(3.0, 1.0)]);
}

#[test]
fn translate_vertex_moves_only_target() {
    let mut s = triangle(1);
    assert_eq!(s.translate_vertex(2, pt(10.0, 10.0)), Some(pt(12.0, 13.0)));
    assert_eq!(s.points, vec![pt(0.0, 0.0), pt(4.0, 0.0), pt(12.0, 13.0)]);
}

#[test]
fn translate_vertex_out_of_range_is_rejected() {
    let mut s = triangle(1);
    assert_eq!(s.translate_vertex(3, pt(1.0, 1.0)), None);
    assert_eq!(s, triangle(1));
}

// =============================================================
// ShapeStore
// =============================================================

#[test]
fn store_new_is_empty() {
    let store = ShapeStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.point_count(), 0);
}

#[test]
fn store_load_keeps_order() {
    let mut store = ShapeStore::new();
    store.load(vec![square(9), triangle(2), square(5)]).unwrap();
    let ids: Vec<ShapeId> = store.shapes().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![9, 2, 5]);
    assert_eq!(store.point_count(), 11);
}

#[test]
fn store_load_replaces_previous_shapes() {
    let mut store = ShapeStore::new();
    store.load(vec![square(1)]).unwrap();
    store.load(vec![triangle(2)]).unwrap();
    assert!(store.get(1).is_none());
    assert!(store.get(2).is_some());
}

#[test]
fn store_load_rejects_empty_shape() {
    let mut store = ShapeStore::new();
    store.load(vec![square(1)]).unwrap();
    let err = store.load(vec![triangle(2), Shape::new(3, vec![])]).unwrap_err();
    assert!(matches!(err, EditorError::EmptyShape { id: 3 }));
    assert!(store.get(1).is_some(), "store untouched on error");
}

#[test]
fn store_load_rejects_duplicate_ids() {
    let mut store = ShapeStore::new();
    let err = store.load(vec![square(1), triangle(1)]).unwrap_err();
    assert!(matches!(err, EditorError::DuplicateId { id: 1 }));
    assert!(store.is_empty());
}

#[test]
fn store_load_json_round_trips_through_to_json() {
    let mut store = ShapeStore::new();
    store
        .load_json(r#"[{"id": 1, "points": [{"x": 1, "y": 1}, {"x": 2, "y": 2}], "label": "L"}]"#)
        .unwrap();
    let json = store.to_json().unwrap();
    let mut again = ShapeStore::new();
    again.load_json(&json).unwrap();
    assert_eq!(again.shapes(), store.shapes());
}

#[test]
fn store_load_json_rejects_malformed_input() {
    let mut store = ShapeStore::new();
    let err = store.load_json(r#"[{"id": 1}]"#).unwrap_err();
    assert!(matches!(err, EditorError::Json(_)));
}

#[test]
fn store_get_mut_mutates_in_place() {
    let mut store = ShapeStore::new();
    store.load(vec![square(1), square(2)]).unwrap();
    store.get_mut(2).unwrap().translate(pt(1.0, 1.0));
    assert_eq!(store.get(2).unwrap().points[0], pt(1.0, 1.0));
    assert_eq!(store.get(1).unwrap().points[0], pt(0.0, 0.0));
}

#[test]
fn store_get_unknown_is_none() {
    let store = ShapeStore::new();
    assert!(store.get(99).is_none());
}

// =============================================================
// Host ids
// =============================================================

#[test]
fn shape_id_from_js_accepts_safe_integers() {
    assert_eq!(shape_id_from_js(0.0), Some(0));
    assert_eq!(shape_id_from_js(42.0), Some(42));
    assert_eq!(shape_id_from_js(4_294_967_297.0), Some(4_294_967_297));
    assert_eq!(shape_id_from_js(9_007_199_254_740_991.0), Some(9_007_199_254_740_991));
}

#[test]
fn shape_id_from_js_rejects_lossy_values() {
    assert_eq!(shape_id_from_js(-1.0), None);
    assert_eq!(shape_id_from_js(1.5), None);
    assert_eq!(shape_id_from_js(9_007_199_254_740_992.0), None);
    assert_eq!(shape_id_from_js(f64::NAN), None);
    assert_eq!(shape_id_from_js(f64::INFINITY), None);
}
