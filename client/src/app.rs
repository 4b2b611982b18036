//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::{canvas_host::CanvasHost, toolbar::Toolbar, zoom_controls::ZoomControls};
use crate::state::ui::UiState;

/// Root application component.
///
/// Provides the shared UI state and lays the chrome over the canvas.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(RwSignal::new(UiState::default()));

    view! {
        <Title text="Scribble"/>
        <main class="scribble">
            <CanvasHost/>
            <Toolbar/>
            <ZoomControls/>
        </main>
    }
}
