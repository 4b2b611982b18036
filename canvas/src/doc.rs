//! Document model: the shapes on the canvas and the ordered list that owns them.
//!
//! `Shape` is a closed tagged variant; each kind carries exactly the fields it
//! needs, so the renderer never checks for missing endpoints or points.
//! `ShapeList` is append-only and its order is paint order. Both serialize to
//! the JSON stored by [`crate::store`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// A committed or in-progress shape, in logical coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned box. Negative extents flip it left/up from `origin`.
    Rectangle { origin: Point, width: f64, height: f64 },
    /// Ellipse inscribed in the signed box at `origin`.
    Ellipse { origin: Point, width: f64, height: f64 },
    /// Straight segment.
    Line { origin: Point, end: Point },
    /// Segment with an open arrowhead at `end`.
    Arrow { origin: Point, end: Point },
    /// Freehand polyline, points in capture order.
    Pencil { points: Vec<Point> },
}

/// Discriminant of a [`Shape`], for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Pencil,
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Ellipse { .. } => ShapeKind::Ellipse,
            Self::Line { .. } => ShapeKind::Line,
            Self::Arrow { .. } => ShapeKind::Arrow,
            Self::Pencil { .. } => ShapeKind::Pencil,
        }
    }

    /// Anchor point of the shape. For a pencil stroke this is its first point,
    /// or `None` when the stroke is empty.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        match self {
            Self::Rectangle { origin, .. }
            | Self::Ellipse { origin, .. }
            | Self::Line { origin, .. }
            | Self::Arrow { origin, .. } => Some(*origin),
            Self::Pencil { points } => points.first().copied(),
        }
    }

    /// Signed width; zero for kinds that are not box-shaped.
    #[must_use]
    pub fn width(&self) -> f64 {
        match self {
            Self::Rectangle { width, .. } | Self::Ellipse { width, .. } => *width,
            _ => 0.0,
        }
    }

    /// Signed height; zero for kinds that are not box-shaped.
    #[must_use]
    pub fn height(&self) -> f64 {
        match self {
            Self::Rectangle { height, .. } | Self::Ellipse { height, .. } => *height,
            _ => 0.0,
        }
    }
}

/// Committed shapes in insertion order. Later shapes paint on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeList {
    shapes: Vec<Shape>,
}

impl ShapeList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape at the top of the paint order.
    pub fn append(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Shapes in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    /// Number of committed shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl From<Vec<Shape>> for ShapeList {
    fn from(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }
}

impl<'a> IntoIterator for &'a ShapeList {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}
