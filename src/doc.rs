//! Document model: polygon shapes and the ordered in-memory store.
//!
//! Shapes come from the host as JSON and are mutated in place by the drag
//! controller. Collection order is draw order; point order is the polygon
//! winding and is never changed by this crate.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::transform::Point;

/// Unique identifier for a shape within one collection.
pub type ShapeId = u64;

/// Largest integer a JavaScript number holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_JS_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Convert a JavaScript number into a shape id.
///
/// `None` unless `value` is a non-negative integer within the safe-integer
/// range, so a host can never address the wrong shape through rounding or
/// wrap-around.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::float_cmp)]
pub fn shape_id_from_js(value: f64) -> Option<ShapeId> {
    if !(0.0..=MAX_JS_SAFE_INTEGER).contains(&value) || value.fract() != 0.0 {
        return None;
    }
    Some(value as ShapeId)
}

fn default_color() -> String {
    "#FFFFFF".to_owned()
}

fn default_stroke() -> String {
    "#000000".to_owned()
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

/// A polygon shape as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Identifier, unique within the collection.
    pub id: ShapeId,
    /// Polygon vertices in winding order.
    pub points: Vec<Point>,
    /// Fill color as a CSS color string.
    #[serde(default = "default_color")]
    pub color: String,
    /// Outline color as a CSS color string.
    #[serde(default = "default_stroke")]
    pub stroke: String,
    /// Outline width in canvas units.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Whether draggable vertex handles are rendered.
    #[serde(default = "default_true")]
    pub show_vertices: bool,
    /// Whether the center label is rendered.
    #[serde(default = "default_true")]
    pub show_label: bool,
    /// Explicit label text. `None` falls back to [`Shape::label_text`]'s default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Shape {
    /// Shape with default styling.
    #[must_use]
    pub fn new(id: ShapeId, points: Vec<Point>) -> Self {
        Self {
            id,
            points,
            color: default_color(),
            stroke: default_stroke(),
            stroke_width: default_stroke_width(),
            show_vertices: true,
            show_label: true,
            label: None,
        }
    }

    /// Axis-aligned bounding box of the points, or `None` for an empty shape.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Center of the bounding box, where the label is placed.
    #[must_use]
    pub fn label_center(&self) -> Option<Point> {
        self.bounds().map(|b| b.center())
    }

    /// Text shown at the label center.
    #[must_use]
    pub fn label_text(&self) -> String {
        match &self.label {
            Some(text) => text.clone(),
            None => format!("Shape {}", self.id),
        }
    }

    /// Shift every point by `delta`.
    pub fn translate(&mut self, delta: Point) {
        for p in &mut self.points {
            p.translate(delta);
        }
    }

    /// Shift the point at `index` by `delta` and return its new position.
    /// `None` if out of range.
    #[must_use]
    pub fn translate_vertex(&mut self, index: usize, delta: Point) -> Option<Point> {
        let p = self.points.get_mut(index)?;
        p.translate(delta);
        Some(*p)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` if `points` is empty.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        Some(rest.iter().fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Ordered in-memory store of shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Replace all shapes with `shapes`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyShape`] if a shape has no points and
    /// [`EditorError::DuplicateId`] if two shapes share an id. The store is
    /// left unchanged on error.
    pub fn load(&mut self, shapes: Vec<Shape>) -> Result<(), EditorError> {
        let mut seen = HashSet::with_capacity(shapes.len());
        for shape in &shapes {
            if shape.points.is_empty() {
                return Err(EditorError::EmptyShape { id: shape.id });
            }
            if !seen.insert(shape.id) {
                return Err(EditorError::DuplicateId { id: shape.id });
            }
        }
        self.shapes = shapes;
        Ok(())
    }

    /// Decode a JSON array of shapes and [`load`](Self::load) it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`] for malformed input, otherwise the same
    /// errors as [`load`](Self::load).
    pub fn load_json(&mut self, json: &str) -> Result<(), EditorError> {
        let shapes: Vec<Shape> = serde_json::from_str(json)?;
        self.load(shapes)
    }

    /// Serialize the current shapes back to a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`] if serialization fails (non-finite
    /// coordinates are written as `null`, so this is not expected in practice).
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(&self.shapes)?)
    }

    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Total number of points across all shapes.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.shapes.iter().map(|s| s.points.len()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
