#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn default_is_twenty_by_fourteen_cm() {
    let cfg = EditorConfig::default();
    assert!(approx_eq(cfg.width, 567.0));
    assert!(approx_eq(cfg.height, 396.9));
    assert!(!cfg.show_grid);
}

#[test]
fn from_cm_applies_zoom_to_size_and_grid() {
    let cfg = EditorConfig::from_cm(10.0, 5.0, 2.0);
    assert!(approx_eq(cfg.width, 567.0));
    assert!(approx_eq(cfg.height, 283.5));
    assert!(approx_eq(cfg.grid_spacing, 56.7));
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
}

#[test]
fn from_json_partial_overrides() {
    let cfg = EditorConfig::from_json(r#"{"show_grid": true, "handle_radius": 8}"#).unwrap();
    assert!(cfg.show_grid);
    assert_eq!(cfg.handle_radius, 8.0);
    assert_eq!(cfg.label_font_family, "sans-serif");
}

#[test]
fn from_json_rejects_wrong_types() {
    let err = EditorConfig::from_json(r#"{"width": "wide"}"#).unwrap_err();
    assert!(matches!(err, EditorError::Json(_)));
}
