//! Bridge component between Leptos state and the imperative `canvas::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The canvas crate owns input handling, persistence and drawing. This host
//! mounts it once the `<canvas>` node exists, forwards tool changes and zoom
//! commands from `UiState`, and publishes the zoom percentage back.

use std::cell::RefCell;
use std::rc::Rc;

use canvas::camera::ViewportTransform;
use canvas::engine::EngineConfig;
use canvas::mount::{Mount, ViewCallback};
use leptos::prelude::*;

use crate::state::ui::{UiState, ZoomRequest};

fn apply_zoom(mount: &Mount, request: ZoomRequest) {
    match request {
        ZoomRequest::In => mount.zoom_in(),
        ZoomRequest::Out => mount.zoom_out(),
        ZoomRequest::Reset => mount.reset_zoom(),
    }
}

/// Full-window canvas with the drawing engine attached.
#[component]
pub fn CanvasHost() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let mount = Rc::new(RefCell::new(None::<Mount>));
    let last_zoom_request_seq = RwSignal::new(0_u64);
    let active_tool = Memo::new(move |_| ui.get().active_tool);

    {
        let mount = Rc::clone(&mount);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if mount.borrow().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                log::error!("no window; canvas not mounted");
                return;
            };

            let on_view: ViewCallback = Rc::new(move |viewport: ViewportTransform| {
                let percent = viewport.percent();
                ui.update(|u| u.zoom_percent = percent);
            });
            let instance = Mount::attach(canvas, &window, EngineConfig::default(), on_view);
            instance.set_tool(active_tool.get_untracked());
            log::debug!("canvas mounted at {}%", instance.zoom_percent());
            *mount.borrow_mut() = Some(instance);
        });
    }

    {
        let mount = Rc::clone(&mount);
        Effect::new(move || {
            let tool = active_tool.get();
            if let Some(mount) = mount.borrow().as_ref() {
                mount.set_tool(tool);
            }
        });
    }

    {
        let mount = Rc::clone(&mount);
        Effect::new(move || {
            let state = ui.get();
            let Some(request) = state.pending_zoom(last_zoom_request_seq.get_untracked()) else {
                return;
            };
            if let Some(mount) = mount.borrow().as_ref() {
                last_zoom_request_seq.set(state.zoom_request_seq);
                apply_zoom(mount, request);
            }
        });
    }

    view! { <canvas node_ref=canvas_ref class="canvas-host"></canvas> }
}
