//! Reusable UI component modules.
//!
//! Components read and write the shared [`crate::state::ui::UiState`]
//! signal provided by the app root.

pub mod canvas_host;
pub mod toolbar;
pub mod zoom_controls;
