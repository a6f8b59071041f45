//! High-level reading API.
//!
//! Provides the stateless steps shared by the session and the CLI:
//! - `prepare_detections()` - Validate raw detections and mend glued words
//! - `read_detections()` - Prepare, group and wrap everything in a response

use std::time::Instant;

use crate::error::Result;
use crate::layout::{GroupingParams, group_paragraphs};
use crate::model::{Detection, RawDetection, validate_detections};
use crate::segment::{WordSegmenter, apply_segmentation};

use super::response::ReadTextResponse;

/// Validates raw detections and, if a segmenter is given, rewrites the text
/// of every detection that contains no space.
pub fn prepare_detections(
    raw: Vec<RawDetection>,
    segmenter: Option<&dyn WordSegmenter>,
) -> Result<Vec<Detection>> {
    let mut detections = validate_detections(raw)?;
    if let Some(segmenter) = segmenter {
        for det in &mut detections {
            det.text = apply_segmentation(&det.text, segmenter);
        }
    }
    Ok(detections)
}

/// Runs the segmentation pre-pass and the grouping pipeline over detections
/// that were already recognized.
pub fn read_detections(
    raw: Vec<RawDetection>,
    segmenter: Option<&dyn WordSegmenter>,
    params: &GroupingParams,
) -> Result<ReadTextResponse> {
    let start = Instant::now();
    let results = prepare_detections(raw, segmenter)?;
    let paragraphs = group_paragraphs(&results, params)?;
    Ok(ReadTextResponse::new(results, paragraphs, start.elapsed()))
}
