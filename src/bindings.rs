//! JavaScript entry point.
//!
//! The host page creates one `GeometryEditor` per `<svg>` element:
//!
//! ```js
//! const editor = new GeometryEditor("geo-canvas", JSON.stringify(SHAPES), null);
//! editor.onChange((json) => sendBack(JSON.parse(json)));
//! ```

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::SvgsvgElement;

use crate::config::EditorConfig;
use crate::doc::{ShapeStore, shape_id_from_js};
use crate::engine::{Engine, EngineCore};
use crate::error::EditorError;
use crate::input::DragMode;
use crate::transform::Point;

/// An editor mounted on one `<svg>` element.
#[wasm_bindgen]
pub struct GeometryEditor {
    engine: Engine,
}

#[wasm_bindgen]
impl GeometryEditor {
    /// Mount on the `<svg>` with DOM id `svg_id`, load `shapes_json` and draw.
    ///
    /// # Errors
    ///
    /// Throws if the element is missing or not an `<svg>`, or if either JSON
    /// argument is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(svg_id: &str, shapes_json: &str, config_json: Option<String>) -> Result<GeometryEditor, JsValue> {
        init_logging();

        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json)?,
            None => EditorConfig::default(),
        };
        let mut core = EngineCore::new(config);
        core.load_shapes_json(shapes_json)?;

        let svg = find_svg(svg_id)?;
        let engine = Engine::new(svg, core)?;
        Ok(Self { engine })
    }

    /// Replace all shapes and redraw.
    ///
    /// # Errors
    ///
    /// Throws on invalid JSON, empty shapes or duplicate ids.
    #[wasm_bindgen(js_name = setShapes)]
    pub fn set_shapes(&self, shapes_json: &str) -> Result<(), JsValue> {
        Ok(self.engine.load_shapes_json(shapes_json)?)
    }

    /// Current shapes as a JSON array.
    ///
    /// # Errors
    ///
    /// Throws if serialization fails.
    #[wasm_bindgen(js_name = shapesJson)]
    pub fn shapes_json(&self) -> Result<String, JsValue> {
        Ok(self.engine.shapes_json()?)
    }

    /// Move shape `id` by `(dx, dy)` canvas units.
    ///
    /// # Errors
    ///
    /// Throws if `id` is not a safe non-negative integer or redrawing fails.
    pub fn nudge(&self, id: f64, dx: f64, dy: f64) -> Result<(), JsValue> {
        let shape_id = shape_id_from_js(id).ok_or(EditorError::InvalidId(id))?;
        Ok(self.engine.nudge(shape_id, Point::new(dx, dy))?)
    }

    /// Call `callback(shapesJson)` after every completed drag or nudge.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.engine.set_on_change(Rc::new(move |store: &ShapeStore| {
            let json = match store.to_json() {
                Ok(json) => json,
                Err(e) => {
                    log::warn!("change callback skipped: {e}");
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("change callback threw: {e:?}");
            }
        }));
    }

    /// Standalone SVG of the current drawing; sized in cm when both
    /// dimensions are given.
    #[wasm_bindgen(js_name = exportSvg)]
    pub fn export_svg(&self, width_cm: Option<f64>, height_cm: Option<f64>) -> String {
        self.engine.export_svg(width_cm.zip(height_cm))
    }

    /// `"none"`, `"shape"` or `"vertex"`.
    #[wasm_bindgen(js_name = dragMode)]
    pub fn drag_mode(&self) -> String {
        match self.engine.mode() {
            DragMode::None => "none",
            DragMode::DraggingShape => "shape",
            DragMode::DraggingVertex => "vertex",
        }
        .to_owned()
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::trace!("console logger already installed");
    }
}

fn find_svg(id: &str) -> Result<SvgsvgElement, EditorError> {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .ok_or_else(|| EditorError::MissingElement { id: id.to_owned() })?;
    element
        .dyn_into::<SvgsvgElement>()
        .map_err(|_| EditorError::NotSvg { id: id.to_owned() })
}
