//! Axis-aligned rectangles derived from detection quads, and the overlap
//! tests used to decide alignment.

use crate::utils::{Quad, bounds};

/// Axis-aligned bounding rectangle of a detection.
///
/// Derived once per detection and discarded after grouping. Image
/// coordinates: `top <= bottom`, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl TextRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            center_x: (left + right) / 2.0,
            center_y: (top + bottom) / 2.0,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Bounding rectangle of the four corners, whatever their order.
    pub fn from_quad(quad: &Quad) -> Self {
        // Four points always yield bounds.
        let (left, top, right, bottom) = bounds(quad.iter().copied()).unwrap_or_default();
        Self::new(left, top, right, bottom)
    }

    /// Returns the length of the shared extent along the y axis, 0 if none.
    pub fn voverlap(&self, other: &TextRect) -> f64 {
        (self.bottom.min(other.bottom) - self.top.max(other.top)).max(0.0)
    }

    /// Returns the length of the shared extent along the x axis, 0 if none.
    pub fn hoverlap(&self, other: &TextRect) -> f64 {
        (self.right.min(other.right) - self.left.max(other.left)).max(0.0)
    }

    /// Returns true if both rectangles sit on roughly the same text row.
    ///
    /// ```text
    ///   +------+ - - - - - - - -
    ///   | self |    +-------+   -
    ///   |      |    | other |   | voverlap > tolerance * min(height)
    ///   +------+ -  |       |   -
    ///               +-------+
    /// ```
    pub fn is_horizontally_aligned(&self, other: &TextRect, tolerance: f64) -> bool {
        self.voverlap(other) > tolerance * self.height.min(other.height)
    }

    /// Returns true if both rectangles sit in roughly the same text column.
    ///
    /// ```text
    ///   +------+
    ///   | self |
    ///   +------+
    ///     +-------+
    ///     | other |
    ///     +-------+
    ///     |<-->|  hoverlap > tolerance * min(width)
    /// ```
    pub fn is_vertically_aligned(&self, other: &TextRect, tolerance: f64) -> bool {
        self.hoverlap(other) > tolerance * self.width.min(other.width)
    }

    /// Euclidean distance between the two centers.
    pub fn center_distance(&self, other: &TextRect) -> f64 {
        (self.center_x - other.center_x).hypot(self.center_y - other.center_y)
    }
}
