//! Rendering: replaces the contents of the host `<svg>` with a [`Scene`].
//!
//! This module is the only place that creates or removes DOM nodes. It reads
//! a finished scene and never touches editor state; pointer-down handling is
//! delegated to listeners produced by the caller.
//!
//! All fallible DOM calls propagate as [`EditorError::Dom`].

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, PointerEvent};

use crate::consts::SVG_NS;
use crate::error::EditorError;
use crate::hit::Target;
use crate::scene::Scene;

/// Discard every child of `svg` and rebuild it from `scene`, in order.
///
/// `listener_for` is called once per interactive node; the returned closures
/// are attached as `pointerdown` handlers and handed back so the caller can
/// keep them alive exactly as long as the nodes.
///
/// # Errors
///
/// Returns `Err` if creating, configuring or appending a node fails.
pub fn draw<F>(
    document: &Document,
    svg: &Element,
    scene: &Scene,
    mut listener_for: F,
) -> Result<Vec<Closure<dyn FnMut(PointerEvent)>>, EditorError>
where
    F: FnMut(Target) -> Closure<dyn FnMut(PointerEvent)>,
{
    svg.set_inner_html("");

    let mut listeners = Vec::new();
    for node in &scene.nodes {
        let el = document.create_element_ns(Some(SVG_NS), node.tag())?;
        for (name, value) in node.attributes() {
            el.set_attribute(name, &value)?;
        }
        if let Some(text) = node.text() {
            el.set_text_content(Some(text));
        }
        if let Some(target) = node.target() {
            let listener = listener_for(target);
            el.add_event_listener_with_callback("pointerdown", listener.as_ref().unchecked_ref())?;
            listeners.push(listener);
        }
        svg.append_child(&el)?;
    }
    Ok(listeners)
}
