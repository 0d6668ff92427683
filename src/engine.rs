use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, PointerEvent, SvgMatrix, SvgsvgElement, Window};

use crate::config::EditorConfig;
use crate::doc::{Shape, ShapeId, ShapeStore};
use crate::error::EditorError;
use crate::hit::{HitPart, Target};
use crate::input::{DragMode, DragState, PointerLock};
use crate::render;
use crate::scene::{self, Scene};
use crate::transform::{Point, ScreenTransform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the engine (or a host) to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DragStarted(Target),
    ShapeMoved { id: ShapeId, delta: Point },
    VertexMoved { id: ShapeId, index: usize, position: Point },
    DragEnded(Target),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the DOM.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Every pointer input is already in canvas-local coordinates.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub store: ShapeStore,
    pub config: EditorConfig,
    pub drag: DragState,
    /// Device pointer bound to the active drag.
    pub pointer: PointerLock,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self { store: ShapeStore::new(), config, drag: DragState::Idle, pointer: PointerLock::default() }
    }

    // --- Data inputs ---

    /// Replace the shape collection.
    ///
    /// An in-flight drag is left alone; if its shape is gone, later moves are ignored.
    ///
    /// # Errors
    ///
    /// See [`ShapeStore::load`].
    pub fn load_shapes(&mut self, shapes: Vec<Shape>) -> Result<(), EditorError> {
        self.store.load(shapes)?;
        log::debug!("loaded {} shapes ({} points)", self.store.len(), self.store.point_count());
        Ok(())
    }

    /// Replace the shape collection from a JSON array.
    ///
    /// # Errors
    ///
    /// See [`ShapeStore::load_json`].
    pub fn load_shapes_json(&mut self, json: &str) -> Result<(), EditorError> {
        self.store.load_json(json)?;
        log::debug!("loaded {} shapes ({} points)", self.store.len(), self.store.point_count());
        Ok(())
    }

    // --- Gestures ---

    /// Pointer-down on a body or handle at canvas point `at`.
    ///
    /// Ignored while another gesture is active, for unknown shapes, and for
    /// vertex targets on shapes whose handles are hidden or out of range.
    pub fn on_pointer_down(&mut self, target: Target, at: Point) -> Vec<Action> {
        if !self.drag.is_idle() {
            log::debug!("pointer-down on {target:?} ignored: gesture already active");
            return Vec::new();
        }
        let Some(shape) = self.store.get(target.shape_id) else {
            return Vec::new();
        };
        if let HitPart::Vertex(index) = target.part {
            if !shape.show_vertices || index >= shape.points.len() {
                return Vec::new();
            }
        }

        self.drag = DragState::begin(target, at);
        log::debug!("drag start {target:?} at ({}, {})", at.x, at.y);
        vec![Action::DragStarted(target)]
    }

    /// Pointer-move anywhere, at canvas point `at`.
    pub fn on_pointer_move(&mut self, at: Point) -> Vec<Action> {
        let Some(target) = self.drag.target() else {
            return Vec::new();
        };
        let Some(shape) = self.store.get_mut(target.shape_id) else {
            log::debug!("move ignored: shape {} no longer exists", target.shape_id);
            return Vec::new();
        };
        if let HitPart::Vertex(index) = target.part {
            if index >= shape.points.len() {
                log::debug!("move ignored: shape {} has no vertex {index}", target.shape_id);
                return Vec::new();
            }
        }
        let Some(delta) = self.drag.advance(at) else {
            return Vec::new();
        };

        let moved = match target.part {
            HitPart::Body => {
                shape.translate(delta);
                Action::ShapeMoved { id: shape.id, delta }
            }
            HitPart::Vertex(index) => {
                let Some(position) = shape.translate_vertex(index, delta) else {
                    return Vec::new();
                };
                Action::VertexMoved { id: shape.id, index, position }
            }
        };
        log::trace!("drag {target:?} by ({}, {})", delta.x, delta.y);
        vec![moved, Action::RenderNeeded]
    }

    /// Pointer-up (or cancel) anywhere; ends the active gesture.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let Some(target) = self.drag.target() else {
            return Vec::new();
        };
        self.drag = DragState::Idle;
        self.pointer = PointerLock::default();
        log::debug!("drag end {target:?}");
        vec![Action::DragEnded(target)]
    }

    // --- Gestures by device pointer ---

    /// Pointer-down from device pointer `pointer`; a drag it starts is bound
    /// to that pointer.
    pub fn pointer_down(&mut self, pointer: i32, target: Target, at: Point) -> Vec<Action> {
        let actions = self.on_pointer_down(target, at);
        if !actions.is_empty() {
            self.pointer = PointerLock::held_by(pointer);
        }
        actions
    }

    /// Pointer-move from `pointer`. Moves from any other pointer are ignored.
    pub fn pointer_move(&mut self, pointer: i32, at: Point) -> Vec<Action> {
        if !self.pointer.owns(pointer) {
            return Vec::new();
        }
        self.on_pointer_move(at)
    }

    /// Pointer-up or cancel from `pointer`. Only the owning pointer ends the drag.
    pub fn pointer_up(&mut self, pointer: i32) -> Vec<Action> {
        if !self.pointer.release(pointer) {
            return Vec::new();
        }
        self.on_pointer_up()
    }

    /// Move a whole shape by a fixed offset outside of any gesture.
    pub fn nudge(&mut self, id: ShapeId, delta: Point) -> Vec<Action> {
        let Some(shape) = self.store.get_mut(id) else {
            return Vec::new();
        };
        shape.translate(delta);
        log::debug!("nudge shape {id} by ({}, {})", delta.x, delta.y);
        vec![Action::ShapeMoved { id, delta }, Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> DragMode {
        self.drag.mode()
    }

    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.store.get(id)
    }

    /// Scene for the current shapes.
    #[must_use]
    pub fn scene(&self) -> Scene {
        scene::build(&self.store, &self.config)
    }

    /// Current scene as standalone SVG markup, optionally sized in cm.
    #[must_use]
    pub fn export_svg(&self, physical_cm: Option<(f64, f64)>) -> String {
        let scene = self.scene();
        match physical_cm {
            Some((w, h)) => scene.to_svg_physical(w, h),
            None => scene.to_svg(),
        }
    }

    /// Current shapes as JSON.
    ///
    /// # Errors
    ///
    /// See [`ShapeStore::to_json`].
    pub fn shapes_json(&self) -> Result<String, EditorError> {
        self.store.to_json()
    }
}

/// Callback run with the shapes after a completed drag or a nudge.
pub type ChangeHandler = Rc<dyn Fn(&ShapeStore)>;

/// Holder for the registered change handler.
///
/// No borrow is held while the handler runs, so a handler may replace
/// itself (or register another) from inside the call.
#[derive(Default)]
pub struct ChangeSlot {
    handler: RefCell<Option<ChangeHandler>>,
}

impl ChangeSlot {
    pub fn set(&self, handler: ChangeHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }

    /// Run the current handler, if any, with `store`.
    pub fn fire(&self, store: &ShapeStore) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(store);
        }
    }
}

// =============================================================
// DOM engine
// =============================================================

type PointerListener = Closure<dyn FnMut(PointerEvent)>;

/// The full editor. Wraps `EngineCore` and owns the host `<svg>` element.
pub struct Engine {
    shared: Rc<Shared>,
}

struct Shared {
    core: RefCell<EngineCore>,
    window: Window,
    document: Document,
    svg: SvgsvgElement,
    node_listeners: RefCell<Vec<PointerListener>>,
    window_listeners: RefCell<Vec<(&'static str, PointerListener)>>,
    on_change: ChangeSlot,
}

impl Engine {
    /// Bind `core` to `svg`, install the global pointer listeners and draw.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Dom`] if there is no window/document or a DOM
    /// call fails.
    pub fn new(svg: SvgsvgElement, core: EngineCore) -> Result<Self, EditorError> {
        let window = web_sys::window().ok_or_else(|| EditorError::Dom("no window".to_owned()))?;
        let document = window.document().ok_or_else(|| EditorError::Dom("no document".to_owned()))?;

        let (w, h) = (core.config.width, core.config.height);
        svg.set_attribute("width", &w.to_string())?;
        svg.set_attribute("height", &h.to_string())?;
        svg.set_attribute("viewBox", &format!("0 0 {w} {h}"))?;
        svg.style().set_property("touch-action", "none")?;

        let shared = Rc::new(Shared {
            core: RefCell::new(core),
            window,
            document,
            svg,
            node_listeners: RefCell::new(Vec::new()),
            window_listeners: RefCell::new(Vec::new()),
            on_change: ChangeSlot::default(),
        });
        shared.install_window_listeners()?;
        shared.render()?;
        Ok(Self { shared })
    }

    /// Replace the shapes from JSON and redraw.
    ///
    /// # Errors
    ///
    /// Returns the load error (store unchanged) or a DOM error from redrawing.
    pub fn load_shapes_json(&self, json: &str) -> Result<(), EditorError> {
        self.shared.core.borrow_mut().load_shapes_json(json)?;
        self.shared.render()
    }

    /// Nudge a shape, redraw, and notify the change handler.
    ///
    /// # Errors
    ///
    /// Returns a DOM error from redrawing.
    pub fn nudge(&self, id: ShapeId, delta: Point) -> Result<(), EditorError> {
        let actions = self.shared.core.borrow_mut().nudge(id, delta);
        if actions.is_empty() {
            return Ok(());
        }
        self.shared.render()?;
        self.shared.notify();
        Ok(())
    }

    /// Register the callback run after each completed drag or nudge.
    pub fn set_on_change(&self, handler: ChangeHandler) {
        self.shared.on_change.set(handler);
    }

    /// Redraw the full scene.
    ///
    /// # Errors
    ///
    /// Returns a DOM error if building the nodes fails.
    pub fn render(&self) -> Result<(), EditorError> {
        self.shared.render()
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn mode(&self) -> DragMode {
        self.shared.core.borrow().mode()
    }

    #[must_use]
    pub fn export_svg(&self, physical_cm: Option<(f64, f64)>) -> String {
        self.shared.core.borrow().export_svg(physical_cm)
    }

    /// # Errors
    ///
    /// See [`ShapeStore::to_json`].
    pub fn shapes_json(&self) -> Result<String, EditorError> {
        self.shared.core.borrow().shapes_json()
    }
}

impl Shared {
    fn install_window_listeners(self: &Rc<Self>) -> Result<(), EditorError> {
        let weak = Rc::downgrade(self);
        let on_move = Closure::wrap(Box::new(move |ev: PointerEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_move(&ev);
            }
        }) as Box<dyn FnMut(PointerEvent)>);

        let mut listeners = self.window_listeners.borrow_mut();
        self.window
            .add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref())?;
        listeners.push(("pointermove", on_move));

        for event in ["pointerup", "pointercancel"] {
            let weak = Rc::downgrade(self);
            let on_end = Closure::wrap(Box::new(move |ev: PointerEvent| {
                if let Some(shared) = weak.upgrade() {
                    shared.handle_end(&ev);
                }
            }) as Box<dyn FnMut(PointerEvent)>);
            self.window
                .add_event_listener_with_callback(event, on_end.as_ref().unchecked_ref())?;
            listeners.push((event, on_end));
        }
        Ok(())
    }

    fn node_listener(weak: Weak<Self>, target: Target) -> PointerListener {
        Closure::wrap(Box::new(move |ev: PointerEvent| {
            // Keep the press away from container-level handlers (pan, selection).
            ev.stop_propagation();
            ev.prevent_default();
            if let Some(shared) = weak.upgrade() {
                shared.handle_down(target, &ev);
            }
        }) as Box<dyn FnMut(PointerEvent)>)
    }

    fn handle_down(&self, target: Target, ev: &PointerEvent) {
        let Some(at) = self.canvas_point(ev) else {
            return;
        };
        let actions = self.core.borrow_mut().pointer_down(ev.pointer_id(), target, at);
        self.apply(&actions);
    }

    fn handle_move(self: &Rc<Self>, ev: &PointerEvent) {
        if !self.core.borrow().pointer.owns(ev.pointer_id()) {
            return;
        }
        let Some(at) = self.canvas_point(ev) else {
            return;
        };
        ev.prevent_default();
        let actions = self.core.borrow_mut().pointer_move(ev.pointer_id(), at);
        self.apply_rendering(&actions);
    }

    fn handle_end(self: &Rc<Self>, ev: &PointerEvent) {
        let actions = self.core.borrow_mut().pointer_up(ev.pointer_id());
        self.apply_rendering(&actions);
    }

    fn apply(&self, actions: &[Action]) {
        if actions.iter().any(|a| matches!(a, Action::DragEnded(_))) {
            self.notify();
        }
    }

    fn apply_rendering(self: &Rc<Self>, actions: &[Action]) {
        if actions.contains(&Action::RenderNeeded) {
            if let Err(e) = self.render() {
                log::warn!("render failed: {e}");
            }
        }
        self.apply(actions);
    }

    fn render(self: &Rc<Self>) -> Result<(), EditorError> {
        let scene = self.core.borrow().scene();
        let weak = Rc::downgrade(self);
        let listeners = render::draw(&self.document, &self.svg, &scene, |target| {
            Self::node_listener(weak.clone(), target)
        })?;
        // Old nodes are detached by now; their listeners can go.
        *self.node_listeners.borrow_mut() = listeners;
        Ok(())
    }

    fn notify(&self) {
        let store = self.core.borrow().store.clone();
        self.on_change.fire(&store);
    }

    fn canvas_point(&self, ev: &PointerEvent) -> Option<Point> {
        let Some(matrix) = self.svg.get_screen_ctm() else {
            log::warn!("pointer event dropped: canvas has no screen transform");
            return None;
        };
        let screen = Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()));
        let at = screen_transform(&matrix).to_canvas(screen);
        if at.is_none() {
            log::warn!("pointer event dropped: screen transform is not invertible");
        }
        at
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        // Nodes left in the host page would keep pointing at the freed listeners.
        self.svg.set_inner_html("");
        self.node_listeners.get_mut().clear();
        for (event, listener) in self.window_listeners.get_mut().drain(..) {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove {event} listener: {e:?}");
            }
        }
    }
}

fn screen_transform(m: &SvgMatrix) -> ScreenTransform {
    ScreenTransform {
        a: f64::from(m.a()),
        b: f64::from(m.b()),
        c: f64::from(m.c()),
        d: f64::from(m.d()),
        e: f64::from(m.e()),
        f: f64::from(m.f()),
    }
}
