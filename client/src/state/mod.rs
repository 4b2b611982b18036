//! Client-side reactive state.
//!
//! Each state struct is wrapped in an `RwSignal` and provided via Leptos
//! context by [`crate::app::App`].

pub mod ui;
