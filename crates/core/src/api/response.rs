//! Response records returned by a read.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::model::{Detection, Paragraph};

pub const NO_TEXT_MESSAGE: &str = "No text detected in image";

/// Everything a read produces: the (segmented) line detections, the grouped
/// paragraphs and run statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadTextResponse {
    pub status: &'static str,
    pub results: Vec<Detection>,
    pub paragraphs: Vec<Paragraph>,
    pub stats: ReadStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadStats {
    pub total_lines: usize,
    pub total_paragraphs: usize,
    #[serde(serialize_with = "serialize_seconds")]
    pub processing_time: Duration,
    /// Size in bytes of the image the detections came from, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<usize>,
}

impl ReadTextResponse {
    pub fn new(results: Vec<Detection>, paragraphs: Vec<Paragraph>, elapsed: Duration) -> Self {
        let message = results.is_empty().then(|| NO_TEXT_MESSAGE.to_string());
        let stats = ReadStats {
            total_lines: results.len(),
            total_paragraphs: paragraphs.len(),
            processing_time: elapsed,
            image_size: None,
        };
        Self {
            status: "success",
            results,
            paragraphs,
            stats,
            message,
        }
    }

    pub fn with_image_size(mut self, size: usize) -> Self {
        self.stats.image_size = Some(size);
        self
    }

    pub fn with_processing_time(mut self, elapsed: Duration) -> Self {
        self.stats.processing_time = elapsed;
        self
    }
}

/// Formats a duration as seconds with millisecond precision, e.g. "0.004s".
pub fn format_seconds(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

fn serialize_seconds<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_seconds(*elapsed))
}
