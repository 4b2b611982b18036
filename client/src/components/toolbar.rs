//! Tool picker overlaid on the top-left of the canvas.

use canvas::input::Tool;
use leptos::prelude::*;

use crate::state::ui::UiState;

/// One button per tool; the active one is highlighted.
#[component]
pub fn Toolbar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let buttons = Tool::ALL
        .into_iter()
        .map(|tool| {
            let is_active = move || ui.get().active_tool == tool;
            view! {
                <button
                    class=move || {
                        if is_active() { "btn toolbar__tool toolbar__tool--active" } else { "btn toolbar__tool" }
                    }
                    title=tool.label()
                    on:click=move |_| ui.update(|u| u.active_tool = tool)
                >
                    {tool.label()}
                </button>
            }
        })
        .collect_view();

    view! { <div class="toolbar">{buttons}</div> }
}
