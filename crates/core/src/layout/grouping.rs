//! Detection-to-paragraph grouping.
//!
//! Contains group_paragraphs(), which clusters OCR line detections into
//! speech-bubble paragraphs and emits them in reading order.

use tracing::debug;

use crate::error::{ReadError, Result};
use crate::model::{Detection, Paragraph};

use super::geometry::TextRect;
use super::merge::should_merge;
use super::order::{reading_order, sort_reading_order};
use super::paragraph::aggregate_paragraph;
use super::params::GroupingParams;

/// A closed cluster: indices into the detection list, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub seed: usize,
    pub members: Vec<usize>,
    /// Number of full scans it took to reach the fixed point.
    pub passes: usize,
}

/// Groups detections into paragraphs.
///
/// # Algorithm
/// - Derive a rectangle per detection and sort all of them in reading order.
/// - Walk the sorted list; every detection not yet assigned seeds a cluster.
/// - Grow the cluster to a fixed point: scan all unassigned detections in
///   reading order and add any that merges with *any* current member. Repeat
///   the scan until a full pass adds nothing. Membership is transitive, so a
///   cluster can chain across the page through its later members.
/// - Sort the closed cluster in reading order and reduce it to a paragraph.
///
/// Paragraphs come out in the reading order of their seeds.
///
/// Detections with a non-finite corner or score are rejected with
/// [`ReadError::InvalidBBox`] or [`ReadError::InvalidScore`] before any
/// geometry is derived.
///
/// # Complexity
/// Each pass costs O(n * cluster size) merge checks and a cluster may need
/// up to O(n) passes, so a page costs O(n^2) to O(n^3) checks in the worst
/// case. Pages carry tens of detections, so no spatial index is used.
pub fn group_paragraphs(
    detections: &[Detection],
    params: &GroupingParams,
) -> Result<Vec<Paragraph>> {
    params.validate()?;
    if detections.is_empty() {
        return Ok(Vec::new());
    }
    for (index, det) in detections.iter().enumerate() {
        det.check_finite(index)?;
    }

    let rects: Vec<TextRect> = detections
        .iter()
        .map(|d| TextRect::from_quad(&d.bbox))
        .collect();
    let clusters = build_clusters(&rects, params);
    check_partition(&clusters, detections.len())?;

    let paragraphs = clusters
        .into_iter()
        .map(|cluster| {
            let mut members = cluster.members;
            sort_reading_order(&mut members, &rects);
            let items: Vec<&Detection> = members.iter().map(|&i| &detections[i]).collect();
            aggregate_paragraph(&items)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        lines = detections.len(),
        paragraphs = paragraphs.len(),
        "grouped detections"
    );
    Ok(paragraphs)
}

/// Partitions rectangles into clusters, ordered by seed reading order.
///
/// Cluster members are left in insertion order.
pub fn build_clusters(rects: &[TextRect], params: &GroupingParams) -> Vec<Cluster> {
    let order = reading_order(rects);
    let mut visited = vec![false; rects.len()];
    let mut clusters = Vec::new();

    for &seed in &order {
        if visited[seed] {
            continue;
        }
        let cluster = grow_cluster(seed, &order, rects, &mut visited, params);
        debug!(
            seed = cluster.seed,
            members = cluster.members.len(),
            passes = cluster.passes,
            "closed cluster"
        );
        clusters.push(cluster);
    }

    clusters
}

fn grow_cluster(
    seed: usize,
    order: &[usize],
    rects: &[TextRect],
    visited: &mut [bool],
    params: &GroupingParams,
) -> Cluster {
    visited[seed] = true;
    let mut members = vec![seed];
    let mut passes = 0;

    loop {
        passes += 1;
        let mut expanded = false;

        for &candidate in order {
            if visited[candidate] {
                continue;
            }
            let joins = members
                .iter()
                .any(|&m| should_merge(&rects[m], &rects[candidate], params));
            if joins {
                visited[candidate] = true;
                members.push(candidate);
                expanded = true;
            }
        }

        if !expanded {
            break;
        }
    }

    Cluster {
        seed,
        members,
        passes,
    }
}

/// Every index in `0..len` must belong to exactly one cluster.
fn check_partition(clusters: &[Cluster], len: usize) -> Result<()> {
    let mut seen = vec![false; len];
    for cluster in clusters {
        if cluster.members.is_empty() {
            return Err(ReadError::InvariantViolation(format!(
                "cluster seeded at {} is empty",
                cluster.seed
            )));
        }
        for &i in &cluster.members {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(ReadError::InvariantViolation(format!(
                        "detection {} assigned to more than one cluster",
                        i
                    )));
                }
                None => {
                    return Err(ReadError::InvariantViolation(format!(
                        "cluster member {} out of range for {} detections",
                        i, len
                    )));
                }
            }
        }
    }

    match seen.iter().position(|&s| !s) {
        Some(i) => Err(ReadError::InvariantViolation(format!(
            "detection {} not assigned to any cluster",
            i
        ))),
        None => Ok(()),
    }
}
