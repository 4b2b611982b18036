//! Input model: tools, mouse buttons, wheel deltas, and the capture state machine.
//!
//! `Tool` is the user's selection from the host toolbar. `CaptureState` is the
//! gesture being tracked between pointer-down and pointer-up. Transitions live
//! in [`crate::engine::EngineCore`]; this module only holds the data each state
//! carries.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::Shape;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Drag to move the viewport.
    Pan,
    /// Draw a rectangle.
    #[default]
    Rectangle,
    /// Draw an ellipse.
    Ellipse,
    /// Draw a straight line segment.
    Line,
    /// Draw a line with an open arrowhead.
    Arrow,
    /// Freehand stroke.
    Pencil,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Self; 6] = [Self::Pan, Self::Rectangle, Self::Ellipse, Self::Arrow, Self::Line, Self::Pencil];

    /// Human-readable label for toolbars and tooltips.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pan => "Panning",
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Circle",
            Self::Line => "Line",
            Self::Arrow => "Arrow",
            Self::Pencil => "Pencil",
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button, pen contact, or single-finger touch.
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// State of the capture state machine.
///
/// At most one of `Capturing` and `Panning` is active, and only `Capturing`
/// owns a draft shape.
#[derive(Debug, Clone, Default)]
pub enum CaptureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A drawing tool is accumulating a new shape.
    Capturing {
        /// Tool read at pointer-down; fixed for the whole capture.
        tool: Tool,
        /// Logical position of the pointer-down.
        start: Point,
        /// Accumulated pencil points, starting with `start`. Empty for other tools.
        points: Vec<Point>,
        /// Shape rendered on top of the committed list and appended on release.
        draft: Option<Shape>,
    },
    /// The pan tool is dragging the viewport.
    Panning {
        /// Screen-space pointer position at pointer-down.
        pan_start: Point,
        /// Viewport origin at pointer-down; pan deltas apply to this, not to the live origin.
        origin_at_pan_start: Point,
    },
}

impl CaptureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The in-progress shape, if a capture has one.
    #[must_use]
    pub fn draft(&self) -> Option<&Shape> {
        match self {
            Self::Capturing { draft, .. } => draft.as_ref(),
            _ => None,
        }
    }
}

/// Draft for `tool` spanning from `start` to the logical pointer position `at`.
///
/// Box shapes keep signed extents; they are never normalized. Returns `None`
/// for tools that do not derive their draft from two points (pan, pencil).
#[must_use]
pub fn draft_between(tool: Tool, start: Point, at: Point) -> Option<Shape> {
    match tool {
        Tool::Rectangle => Some(Shape::Rectangle { origin: start, width: at.x - start.x, height: at.y - start.y }),
        Tool::Ellipse => Some(Shape::Ellipse { origin: start, width: at.x - start.x, height: at.y - start.y }),
        Tool::Line => Some(Shape::Line { origin: start, end: at }),
        Tool::Arrow => Some(Shape::Arrow { origin: start, end: at }),
        Tool::Pan | Tool::Pencil => None,
    }
}
