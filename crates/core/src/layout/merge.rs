//! Pairwise merge decision between two detections.

use super::geometry::TextRect;
use super::params::GroupingParams;

/// Center distance between two rectangles divided by their average size.
///
/// The average size is the mean of the average width and the average height.
/// Returns infinity when both rectangles have zero size, so two degenerate
/// boxes never merge, even if they coincide.
pub fn relative_distance(r1: &TextRect, r2: &TextRect) -> f64 {
    let avg_width = (r1.width + r2.width) / 2.0;
    let avg_height = (r1.height + r2.height) / 2.0;
    let avg_size = (avg_width + avg_height) / 2.0;

    if avg_size > 0.0 {
        r1.center_distance(r2) / avg_size
    } else {
        f64::INFINITY
    }
}

/// Decides whether two detections belong to the same paragraph.
///
/// Rules, first match wins:
/// - further than `max_distance_factor`: no merge
/// - closer than `aligned_merge_distance` and aligned on either axis: merge
/// - closer than `close_merge_distance`: merge
/// - otherwise: no merge
pub fn should_merge(r1: &TextRect, r2: &TextRect, params: &GroupingParams) -> bool {
    let distance = relative_distance(r1, r2);

    if distance > params.max_distance_factor {
        return false;
    }

    let aligned = r1.is_horizontally_aligned(r2, params.alignment_tolerance)
        || r1.is_vertically_aligned(r2, params.alignment_tolerance);
    if distance < params.aligned_merge_distance && aligned {
        return true;
    }

    distance < params.close_merge_distance
}
