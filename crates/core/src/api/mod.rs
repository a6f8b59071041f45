//! High-level API module for reading text.
//!
//! # Example
//!
//! ```ignore
//! use fukidashi_core::api::read_detections;
//! use fukidashi_core::layout::GroupingParams;
//!
//! let raw = fukidashi_core::model::parse_detections(&json)?;
//! let response = read_detections(raw, None, &GroupingParams::default())?;
//! ```

pub mod high_level;
pub mod response;
pub mod session;

// Re-export for convenience
pub use high_level::{prepare_detections, read_detections};
pub use response::{NO_TEXT_MESSAGE, ReadStats, ReadTextResponse, format_seconds};
pub use session::{ReaderSession, Recognizer, SessionBuilder};
