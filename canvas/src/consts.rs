//! Shared numeric constants for the canvas crate.

use std::f64::consts::PI;

// ── Viewport ────────────────────────────────────────────────────

/// Multiplicative step applied by the zoom-in / zoom-out buttons.
pub const ZOOM_FACTOR: f64 = 1.1;

/// Lower bound for the viewport scale.
pub const MIN_SCALE: f64 = 0.1;

/// Upper bound for the viewport scale.
pub const MAX_SCALE: f64 = 30.0;

/// Exponent per wheel pixel for continuous zoom: `factor = exp(-dy * sensitivity)`.
pub const WHEEL_SENSITIVITY: f64 = 0.001;

// ── Rendering ───────────────────────────────────────────────────

/// Arrowhead stroke length in logical units.
pub const ARROW_SIZE: f64 = 10.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_ANGLE: f64 = PI / 6.0;

/// Canvas background fill.
pub const BACKGROUND_COLOR: &str = "rgba(18,18,18,255)";

/// Stroke color for every shape.
pub const STROKE_COLOR: &str = "white";

/// Stroke width in logical units.
pub const STROKE_WIDTH: f64 = 1.0;

// ── Persistence ─────────────────────────────────────────────────

/// Key under which the shape list is stored.
pub const STORAGE_KEY: &str = "shapes";
