//! Record types flowing in and out of the grouping pipeline.
//!
//! This module contains:
//! - `detection` - OCR line detections, raw (as received) and validated
//! - `paragraph` - Grouped paragraph records produced by the pipeline

pub mod detection;
pub mod paragraph;

// Re-export main types for convenience
pub use detection::{Detection, RawDetection, parse_detections, validate_detections};
pub use paragraph::Paragraph;
