#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::ShapeId;

/// Which part of a shape received a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The filled polygon body.
    Body,
    /// The vertex handle at this index.
    Vertex(usize),
}

/// A pointer-down target. Hit resolution is done by the browser: each
/// interactive node carries its own target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub shape_id: ShapeId,
    pub part: HitPart,
}

impl Target {
    #[must_use]
    pub fn body(shape_id: ShapeId) -> Self {
        Self { shape_id, part: HitPart::Body }
    }

    #[must_use]
    pub fn vertex(shape_id: ShapeId, index: usize) -> Self {
        Self { shape_id, part: HitPart::Vertex(index) }
    }

    /// Vertex index when this target is a handle.
    #[must_use]
    pub fn vertex_index(&self) -> Option<usize> {
        match self.part {
            HitPart::Body => None,
            HitPart::Vertex(i) => Some(i),
        }
    }
}
