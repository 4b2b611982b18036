//! Rendering: draws the full canvas scene to a 2D surface.
//!
//! This module is the only place that issues drawing commands. It receives
//! read-only views of the shape list, the draft, and the viewport transform
//! and produces pixels; it does not mutate any application state. Every pass
//! repaints everything, so drawing the same state twice yields the same frame.
//!
//! Drawing goes through the [`Surface`] trait. The browser implementation is
//! [`web_sys::CanvasRenderingContext2d`], whose fallible calls propagate
//! `JsValue` errors to the caller ([`crate::engine::Engine::render`]).

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Point, ViewportTransform};
use crate::consts::{ARROW_ANGLE, ARROW_SIZE, BACKGROUND_COLOR, STROKE_COLOR, STROKE_WIDTH};
use crate::doc::{Shape, ShapeList};

/// The subset of the 2D canvas API the renderer uses.
pub trait Surface {
    type Error;

    /// Replace the current transform with the matrix `[a c e; b d f]`.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the matrix is rejected.
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), Self::Error>;
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_style(&mut self, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a full axis-aligned ellipse to the current path.
    ///
    /// # Errors
    ///
    /// Returns the backend error if a radius is rejected.
    fn ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64) -> Result<(), Self::Error>;
    fn stroke(&mut self);
}

/// Draw the full scene: background, committed shapes in order, then the draft.
///
/// `width` and `height` are the backing buffer size in pixels.
///
/// # Errors
///
/// Returns `Err` if any surface call fails (e.g. invalid context state).
pub fn draw<S: Surface + ?Sized>(
    surface: &mut S,
    shapes: &ShapeList,
    draft: Option<&Shape>,
    viewport: &ViewportTransform,
    width: f64,
    height: f64,
) -> Result<(), S::Error> {
    // Layer 1: clear in screen space.
    surface.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    surface.clear_rect(0.0, 0.0, width, height);
    surface.set_fill_style(BACKGROUND_COLOR);
    surface.fill_rect(0.0, 0.0, width, height);

    // Layer 2: everything below is issued in logical coordinates.
    surface.set_transform(viewport.scale, 0.0, 0.0, viewport.scale, viewport.origin_x, viewport.origin_y)?;
    surface.set_stroke_style(STROKE_COLOR);
    surface.set_line_width(STROKE_WIDTH);

    for shape in shapes.iter().chain(draft) {
        draw_shape(surface, shape)?;
    }
    Ok(())
}

// =============================================================
// Shape dispatch
// =============================================================

fn draw_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape) -> Result<(), S::Error> {
    match shape {
        Shape::Rectangle { origin, width, height } => {
            // Signed extents flip the box; stroke_rect handles them.
            surface.stroke_rect(origin.x, origin.y, *width, *height);
            Ok(())
        }
        Shape::Ellipse { origin, width, height } => {
            let (center, radius_x, radius_y) = ellipse_geometry(*origin, *width, *height);
            surface.begin_path();
            surface.ellipse(center, radius_x, radius_y)?;
            surface.stroke();
            Ok(())
        }
        Shape::Line { origin, end } => {
            stroke_segment(surface, *origin, *end);
            Ok(())
        }
        Shape::Arrow { origin, end } => {
            stroke_segment(surface, *origin, *end);
            let [left, right] = arrowhead(*origin, *end);
            surface.begin_path();
            surface.move_to(end.x, end.y);
            surface.line_to(left.x, left.y);
            surface.move_to(end.x, end.y);
            surface.line_to(right.x, right.y);
            surface.stroke();
            Ok(())
        }
        Shape::Pencil { points } => {
            draw_polyline(surface, points);
            Ok(())
        }
    }
}

fn stroke_segment<S: Surface + ?Sized>(surface: &mut S, from: Point, to: Point) {
    surface.begin_path();
    surface.move_to(from.x, from.y);
    surface.line_to(to.x, to.y);
    surface.stroke();
}

fn draw_polyline<S: Surface + ?Sized>(surface: &mut S, points: &[Point]) {
    let [first, rest @ ..] = points else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    surface.begin_path();
    surface.move_to(first.x, first.y);
    for p in rest {
        surface.line_to(p.x, p.y);
    }
    surface.stroke();
}

// =============================================================
// Geometry
// =============================================================

/// Center and radii of the ellipse inscribed in the signed box at `origin`.
#[must_use]
pub fn ellipse_geometry(origin: Point, width: f64, height: f64) -> (Point, f64, f64) {
    let center = Point::new(origin.x + width / 2.0, origin.y + height / 2.0);
    (center, width.abs() / 2.0, height.abs() / 2.0)
}

/// Far ends of the two arrowhead strokes drawn back from `end`, at ±30° from
/// the shaft and [`ARROW_SIZE`] long.
#[must_use]
pub fn arrowhead(origin: Point, end: Point) -> [Point; 2] {
    let theta = (end.y - origin.y).atan2(end.x - origin.x);
    let wing = |angle: f64| Point::new(end.x - ARROW_SIZE * angle.cos(), end.y - ARROW_SIZE * angle.sin());
    [wing(theta - ARROW_ANGLE), wing(theta + ARROW_ANGLE)]
}

// =============================================================
// Browser surface
// =============================================================

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    #[allow(clippy::many_single_char_names)]
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::set_transform(self, a, b, c, d, e, f)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, width, height);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::ellipse(self, center.x, center.y, radius_x, radius_y, 0.0, 0.0, TAU)
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }
}
