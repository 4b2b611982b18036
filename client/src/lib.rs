//! # scribble-client
//!
//! Leptos + WASM host for the scribble whiteboard. Renders the toolbar and
//! zoom controls and mounts the `canvas` engine on a full-window canvas via
//! the `CanvasHost` bridge component.

pub mod app;
pub mod components;
pub mod state;

use wasm_bindgen::prelude::wasm_bindgen;

/// WASM entry point: install logging and the panic hook, then mount the app.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
