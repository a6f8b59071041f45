//! Reading order for comic pages: top to bottom, right to left.

use std::cmp::Ordering;

use super::geometry::TextRect;

/// Compares two rectangles in reading order.
///
/// Ascending `center_y`, then descending `center_x`. Equal keys compare
/// equal, so a stable sort keeps their input order.
pub fn reading_order_cmp(a: &TextRect, b: &TextRect) -> Ordering {
    let row = cmp_coord(a.center_y, b.center_y);
    let column = cmp_coord(b.center_x, a.center_x);
    row.then(column)
}

fn cmp_coord(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sorts indices into `rects` by reading order.
///
/// Uses a stable sort; ties keep the order they had in `indices`.
pub fn sort_reading_order(indices: &mut [usize], rects: &[TextRect]) {
    indices.sort_by(|&a, &b| reading_order_cmp(&rects[a], &rects[b]));
}

/// Returns the indices of `rects` in reading order.
pub fn reading_order(rects: &[TextRect]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    sort_reading_order(&mut order, rects);
    order
}
