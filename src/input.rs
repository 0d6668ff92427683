//! Drag gesture state machine.
//!
//! `DragState` is the active gesture tracked between pointer-down and
//! pointer-up. Each dragging variant carries the last observed pointer
//! position so every move applies only the increment since the previous one.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ShapeId;
use crate::hit::{HitPart, Target};
use crate::transform::Point;

/// Coarse gesture mode, for hosts and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    DraggingShape,
    DraggingVertex,
}

/// Internal state for the drag controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A whole shape follows the pointer.
    DraggingShape {
        /// Id of the shape being dragged.
        id: ShapeId,
        /// Canvas-space pointer position at the previous event.
        last: Point,
    },
    /// A single vertex follows the pointer.
    DraggingVertex {
        /// Id of the shape owning the vertex.
        id: ShapeId,
        /// Index into the shape's points.
        index: usize,
        /// Canvas-space pointer position at the previous event.
        last: Point,
    },
}

impl DragState {
    /// State entered by a pointer-down on `target` at canvas point `at`.
    #[must_use]
    pub fn begin(target: Target, at: Point) -> Self {
        match target.part {
            HitPart::Body => Self::DraggingShape { id: target.shape_id, last: at },
            HitPart::Vertex(index) => Self::DraggingVertex { id: target.shape_id, index, last: at },
        }
    }

    #[must_use]
    pub fn mode(&self) -> DragMode {
        match self {
            Self::Idle => DragMode::None,
            Self::DraggingShape { .. } => DragMode::DraggingShape,
            Self::DraggingVertex { .. } => DragMode::DraggingVertex,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The target being dragged, if any.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        match *self {
            Self::Idle => None,
            Self::DraggingShape { id, .. } => Some(Target::body(id)),
            Self::DraggingVertex { id, index, .. } => Some(Target::vertex(id, index)),
        }
    }

    /// Advance the anchor to `now`, returning the delta since the previous
    /// position. `None` while idle.
    pub fn advance(&mut self, now: Point) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::DraggingShape { last, .. } | Self::DraggingVertex { last, .. } => {
                let delta = now.delta_from(*last);
                *last = now;
                Some(delta)
            }
        }
    }
}

/// The pointer that owns the active gesture.
///
/// With several pointers down (multi-touch, pen plus mouse) only the one that
/// started the drag may move or end it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerLock(Option<i32>);

impl PointerLock {
    /// Lock held by `pointer`.
    #[must_use]
    pub fn held_by(pointer: i32) -> Self {
        Self(Some(pointer))
    }

    /// Whether `pointer` holds the lock.
    #[must_use]
    pub fn owns(&self, pointer: i32) -> bool {
        self.0 == Some(pointer)
    }

    /// Drop the lock if `pointer` holds it. Returns whether it did.
    pub fn release(&mut self, pointer: i32) -> bool {
        if self.owns(pointer) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn owner(&self) -> Option<i32> {
        self.0
    }
}
