//! Direct-manipulation editor for 2D polygons drawn in an SVG canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! drag interaction end to end: mapping pointer events into canvas
//! coordinates, moving whole shapes or single vertices, and redrawing the
//! scene after every change. The host page supplies the shapes as JSON and an
//! `<svg>` element to draw into, and may listen for the edited shapes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shape model and the ordered shape store |
//! | [`transform`] | Points and screen-to-canvas coordinate mapping |
//! | [`input`] | The drag gesture state machine |
//! | [`hit`] | Pointer-down targets (body or vertex handle) |
//! | [`scene`] | Browser-independent scene description and SVG export |
//! | [`render`] | DOM rendering of a scene |
//! | [`config`] | Host-supplied editor configuration |
//! | [`bindings`] | `wasm_bindgen` entry point for JavaScript hosts |
//! | [`error`] | Host-boundary error type |
//! | [`consts`] | Shared constants (units, grid, markup names) |

pub mod bindings;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
pub mod transform;
