//! Reduction of a closed cluster into a paragraph record.

use crate::error::{ReadError, Result};
use crate::model::{Detection, Paragraph};
use crate::utils::{bounds, corners};

/// Builds the paragraph for an ordered, non-empty cluster.
///
/// `members` must already be in reading order; their texts are joined in
/// that order. An empty cluster cannot come out of the builder, so it is
/// reported as an invariant violation.
pub fn aggregate_paragraph(members: &[&Detection]) -> Result<Paragraph> {
    let Some((left, top, right, bottom)) = bounds(members.iter().flat_map(|d| d.bbox)) else {
        let msg = "empty cluster reached aggregation";
        return Err(ReadError::InvariantViolation(msg.into()));
    };

    let text = members
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let score = members.iter().map(|d| d.score).sum::<f64>() / members.len() as f64;

    Ok(Paragraph {
        text,
        bbox: corners(left, top, right, bottom),
        score,
        item_count: members.len(),
        individual_items: members.iter().map(|&d| d.clone()).collect(),
    })
}
