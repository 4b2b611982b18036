//! Viewport transform: the mapping between screen pixels and logical space.
//!
//! Every operation here is pure. Mutating handlers in [`crate::engine`]
//! replace the engine's transform with the returned value and then request a
//! render pass.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_FACTOR};

/// A point in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scale and translation applied to logical space when drawing.
///
/// `scale` maps one logical unit to `scale` screen pixels and
/// `(origin_x, origin_y)` is the screen position of logical `(0, 0)`.
/// `min_scale <= scale <= max_scale` holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    /// Step used by the discrete zoom-in / zoom-out controls.
    pub zoom_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
            zoom_factor: ZOOM_FACTOR,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl ViewportTransform {
    /// Identity transform with custom zoom step and limits.
    #[must_use]
    pub fn with_limits(zoom_factor: f64, min_scale: f64, max_scale: f64) -> Self {
        Self { zoom_factor, min_scale, max_scale, ..Self::default() }
    }

    /// Screen position of logical `(0, 0)`.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// Convert a screen-space point to logical coordinates.
    #[must_use]
    pub fn screen_to_logical(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.origin_x) / self.scale,
            y: (screen.y - self.origin_y) / self.scale,
        }
    }

    /// Multiply the scale by `factor` while keeping the logical point under
    /// `anchor` fixed on screen. The resulting scale is clamped to the limits.
    #[must_use]
    pub fn zoom_at_point(&self, anchor: Point, factor: f64) -> Self {
        let next_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        let ratio = next_scale / self.scale;
        Self {
            scale: next_scale,
            origin_x: anchor.x - (anchor.x - self.origin_x) * ratio,
            origin_y: anchor.y - (anchor.y - self.origin_y) * ratio,
            ..*self
        }
    }

    /// Continuous zoom for a wheel event at `anchor`.
    #[must_use]
    pub fn zoom_wheel(&self, anchor: Point, delta_y: f64, sensitivity: f64) -> Self {
        self.zoom_at_point(anchor, wheel_factor(delta_y, sensitivity))
    }

    /// One discrete zoom step in, anchored at `anchor` (usually the canvas center).
    #[must_use]
    pub fn zoom_in(&self, anchor: Point) -> Self {
        self.zoom_at_point(anchor, self.zoom_factor)
    }

    /// One discrete zoom step out, anchored at `anchor`.
    #[must_use]
    pub fn zoom_out(&self, anchor: Point) -> Self {
        self.zoom_at_point(anchor, 1.0 / self.zoom_factor)
    }

    /// Back to scale 1 and origin `(0, 0)`. Step and limits are kept.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self { scale: 1.0, origin_x: 0.0, origin_y: 0.0, ..*self }
    }

    /// Translate the origin by `delta`, measured from the start of the pan
    /// gesture rather than from the previous event.
    #[must_use]
    pub fn pan(&self, delta: Point, origin_at_pan_start: Point) -> Self {
        Self {
            origin_x: origin_at_pan_start.x + delta.x,
            origin_y: origin_at_pan_start.y + delta.y,
            ..*self
        }
    }

    /// Zoom level as a rounded percentage for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

/// Zoom factor for a wheel delta: negative `delta_y` (scroll up) zooms in.
#[must_use]
pub fn wheel_factor(delta_y: f64, sensitivity: f64) -> f64 {
    (-delta_y * sensitivity).exp()
}
