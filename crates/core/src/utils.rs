//! Geometric primitives shared by the layout and model modules.

/// A 2D point (x, y) in image coordinates, y growing downwards.
pub type Point = (f64, f64);

/// A quadrilateral given by four corner points.
///
/// Corner order and winding are not constrained; OCR engines emit rotated
/// and skewed boxes in whatever order their detector produces.
pub type Quad = [Point; 4];

/// Axis-aligned bounds (left, top, right, bottom) of a set of points.
///
/// Returns `None` for an empty iterator.
pub fn bounds<I>(points: I) -> Option<(f64, f64, f64, f64)>
where
    I: IntoIterator<Item = Point>,
{
    let mut iter = points.into_iter();
    let (x, y) = iter.next()?;
    let init = (x, y, x, y);
    Some(iter.fold(init, |(l, t, r, b), (x, y)| {
        (l.min(x), t.min(y), r.max(x), b.max(y))
    }))
}

/// Expresses axis-aligned bounds as four corners: top-left, top-right,
/// bottom-right, bottom-left.
pub fn corners(left: f64, top: f64, right: f64, bottom: f64) -> Quad {
    [(left, top), (right, top), (right, bottom), (left, bottom)]
}
