//! DOM binding for [`Engine`].
//!
//! A [`Mount`] owns the engine behind `Rc<RefCell<_>>` and the listener guards
//! that feed it: pointer and wheel events on the canvas, resize on the window.
//! Dropping the mount detaches every listener.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, PointerEvent, WheelEvent, Window};

use crate::camera::{Point, ViewportTransform};
use crate::engine::{Action, Engine, EngineConfig};
use crate::input::{Button, Tool, WheelDelta};
use crate::store::{KeyValueStore, LocalStorage, MemoryStore};

#[cfg(test)]
#[path = "mount_test.rs"]
mod mount_test;

/// Callback invoked with the new transform whenever the viewport changes.
pub type ViewCallback = Rc<dyn Fn(ViewportTransform)>;

/// A live engine attached to a canvas element.
pub struct Mount {
    engine: Rc<RefCell<Engine>>,
    on_view: ViewCallback,
    _listeners: Vec<EventListener>,
}

impl Mount {
    /// Bind an engine to `canvas`, load persisted shapes and size the canvas
    /// to the window.
    ///
    /// Falls back to an in-memory store when `localStorage` is unavailable.
    /// Malformed persisted state is logged and the board starts empty.
    pub fn attach(canvas: HtmlCanvasElement, window: &Window, config: EngineConfig, on_view: ViewCallback) -> Self {
        let store: Box<dyn KeyValueStore> = match LocalStorage::from_window(window) {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                log::warn!("{err}; shapes will not persist");
                Box::new(MemoryStore::new())
            }
        };

        let mut engine = Engine::new(canvas.clone(), store, config);
        if let Err(err) = engine.load() {
            log::error!("ignoring persisted shapes: {err}");
        }
        let (width, height) = window_size(window);
        engine.set_viewport(width, height);
        on_view(engine.viewport());

        let engine = Rc::new(RefCell::new(engine));
        let listeners = install_listeners(&engine, &canvas, window, &on_view);
        Self { engine, on_view, _listeners: listeners }
    }

    pub fn set_tool(&self, tool: Tool) {
        let actions = self.engine.borrow_mut().set_tool(tool);
        notify(&self.on_view, &actions);
    }

    pub fn zoom_in(&self) {
        let actions = self.engine.borrow_mut().zoom_in();
        notify(&self.on_view, &actions);
    }

    pub fn zoom_out(&self) {
        let actions = self.engine.borrow_mut().zoom_out();
        notify(&self.on_view, &actions);
    }

    pub fn reset_zoom(&self) {
        let actions = self.engine.borrow_mut().reset_zoom();
        notify(&self.on_view, &actions);
    }

    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.engine.borrow().zoom_percent()
    }
}

/// Forward the last viewport change, if any. Runs after the engine borrow is
/// released so the callback may query the mount.
fn notify(on_view: &ViewCallback, actions: &[Action]) {
    let changed = actions.iter().rev().find_map(|action| match action {
        Action::ViewportChanged(viewport) => Some(*viewport),
        _ => None,
    });
    if let Some(viewport) = changed {
        on_view(viewport);
    }
}

/// Canvas-relative pointer position in screen pixels.
fn pointer_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.offset_x()), f64::from(event.offset_y()))
}

fn window_size(window: &Window) -> (f64, f64) {
    let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| match value {
        Ok(value) => value.as_f64().unwrap_or(0.0),
        Err(_) => 0.0,
    };
    (read(window.inner_width()), read(window.inner_height()))
}

fn install_listeners(
    engine: &Rc<RefCell<Engine>>,
    canvas: &HtmlCanvasElement,
    window: &Window,
    on_view: &ViewCallback,
) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let engine_down = Rc::clone(engine);
    let on_view_down = Rc::clone(on_view);
    let canvas_down = canvas.clone();
    listeners.push(EventListener::new(canvas, "pointerdown", move |event: &Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        if let Err(err) = canvas_down.set_pointer_capture(event.pointer_id()) {
            log::debug!("pointer capture refused: {err:?}");
        }
        let actions = engine_down
            .borrow_mut()
            .on_pointer_down(pointer_point(event), Button::from_dom(event.button()));
        notify(&on_view_down, &actions);
    }));

    let engine_move = Rc::clone(engine);
    let on_view_move = Rc::clone(on_view);
    listeners.push(EventListener::new(canvas, "pointermove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let actions = engine_move.borrow_mut().on_pointer_move(pointer_point(event));
        notify(&on_view_move, &actions);
    }));

    let engine_up = Rc::clone(engine);
    let on_view_up = Rc::clone(on_view);
    listeners.push(EventListener::new(canvas, "pointerup", move |event: &Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let actions = engine_up
            .borrow_mut()
            .on_pointer_up(pointer_point(event), Button::from_dom(event.button()));
        notify(&on_view_up, &actions);
    }));

    // An interrupted gesture never sees pointerup. After a normal release the
    // engine is already idle, so the trailing lostpointercapture is a no-op.
    for event_type in ["pointercancel", "lostpointercapture"] {
        let engine_cancel = Rc::clone(engine);
        let on_view_cancel = Rc::clone(on_view);
        listeners.push(EventListener::new(canvas, event_type, move |_event: &Event| {
            let actions = engine_cancel.borrow_mut().on_pointer_cancel();
            notify(&on_view_cancel, &actions);
        }));
    }

    // Non-passive so the page does not scroll or pinch-zoom under the canvas.
    let engine_wheel = Rc::clone(engine);
    let on_view_wheel = Rc::clone(on_view);
    listeners.push(EventListener::new_with_options(
        canvas,
        "wheel",
        EventListenerOptions { phase: EventListenerPhase::Bubble, passive: false },
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            let delta = WheelDelta { dy: event.delta_y() };
            let actions = engine_wheel.borrow_mut().on_wheel(pointer_point(event), delta);
            notify(&on_view_wheel, &actions);
        },
    ));

    let engine_resize = Rc::clone(engine);
    let window_resize = window.clone();
    listeners.push(EventListener::new(window, "resize", move |_event: &Event| {
        let (width, height) = window_size(&window_resize);
        engine_resize.borrow_mut().set_viewport(width, height);
    }));

    listeners
}
