//! Zoom out / percentage / zoom in cluster at the bottom-left of the canvas.

use leptos::prelude::*;

use crate::state::ui::{UiState, ZoomRequest};

/// Discrete zoom buttons. The percentage button resets the viewport.
#[component]
pub fn ZoomControls() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let request = move |request: ZoomRequest| ui.update(|u| u.request_zoom(request));

    view! {
        <div class="zoom-controls">
            <button class="btn zoom-controls__step" title="Zoom out" on:click=move |_| request(ZoomRequest::Out)>
                "-"
            </button>
            <button class="btn zoom-controls__percent" title="Reset zoom" on:click=move |_| request(ZoomRequest::Reset)>
                {move || ui.get().zoom_label()}
            </button>
            <button class="btn zoom-controls__step" title="Zoom in" on:click=move |_| request(ZoomRequest::In)>
                "+"
            </button>
        </div>
    }
}
