//! Errors raised at the host boundary.
//!
//! The interactive drag path never fails; everything here comes from loading
//! host data or from looking up and mutating the host's DOM.

use wasm_bindgen::JsValue;

use crate::doc::ShapeId;

/// Error returned when the host hands the editor bad data or a bad surface.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Shape or config JSON could not be decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A shape arrived with an empty point list.
    #[error("shape {id} has no points")]
    EmptyShape { id: ShapeId },
    /// A host-supplied id is not an exact non-negative integer.
    #[error("invalid shape id {0}")]
    InvalidId(f64),
    /// Two shapes in the same collection share an identifier.
    #[error("duplicate shape id {id}")]
    DuplicateId { id: ShapeId },
    /// No element with the given DOM id exists.
    #[error("no element with id {id:?}")]
    MissingElement { id: String },
    /// The element exists but is not an `<svg>` root.
    #[error("element {id:?} is not an <svg> element")]
    NotSvg { id: String },
    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for EditorError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<EditorError> for JsValue {
    fn from(err: EditorError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
