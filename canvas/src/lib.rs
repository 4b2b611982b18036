//! Drawing engine for the scribble whiteboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It turns raw
//! pointer and wheel input into shapes on an infinite, zoomable canvas:
//! maintaining the viewport transform, driving the capture state machine,
//! persisting committed shapes, and redrawing the scene after every change.
//! The host UI only picks the active tool and issues zoom commands through
//! [`mount::Mount`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`mount`] | DOM event wiring and listener lifetime |
//! | [`doc`] | Shape types and the ordered shape list |
//! | [`camera`] | Viewport transform and coordinate conversions |
//! | [`input`] | Tools, buttons, and the capture state machine states |
//! | [`render`] | Scene rendering onto any [`render::Surface`] |
//! | [`store`] | Key-value persistence of the shape list |
//! | [`consts`] | Shared constants (zoom limits, colors, storage key) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod input;
pub mod mount;
pub mod render;
pub mod store;
