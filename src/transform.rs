#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

/// A point in either device (client pixel) or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Point {
        Point { x: self.x - origin.x, y: self.y - origin.y }
    }

    /// Shift this point in place by `delta`.
    pub fn translate(&mut self, delta: Point) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Screen transform of the canvas element, as reported by `getScreenCTM()`.
///
/// Only the scale (`a`, `d`) and offset (`e`, `f`) terms take part in the
/// mapping; the skew terms are carried so a host can pass the matrix through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }
}

impl ScreenTransform {
    /// Transform with uniform-or-not scale and an offset, no skew.
    #[must_use]
    pub fn scale_offset(scale_x: f64, scale_y: f64, offset_x: f64, offset_y: f64) -> Self {
        Self { a: scale_x, d: scale_y, e: offset_x, f: offset_y, ..Self::default() }
    }

    /// Whether the scale terms allow inverting the mapping.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        self.a.is_normal() && self.d.is_normal()
    }

    /// Map a device point into canvas-local coordinates.
    ///
    /// Returns `None` when the transform has a zero or non-finite scale.
    #[must_use]
    pub fn to_canvas(&self, screen: Point) -> Option<Point> {
        if !self.is_invertible() {
            return None;
        }
        Some(Point {
            x: (screen.x - self.e) / self.a,
            y: (screen.y - self.f) / self.d,
        })
    }

    /// Map a canvas-local point back to device coordinates.
    #[must_use]
    pub fn to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.a + self.e,
            y: canvas.y * self.d + self.f,
        }
    }
}
