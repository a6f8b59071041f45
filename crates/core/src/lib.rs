//! fukidashi - speech-bubble paragraph grouping for OCR output.
//!
//! Takes line-level detections from a recognition engine and reassembles
//! them into reading-ordered paragraphs for comic pages, where text runs
//! right to left and top to bottom and one bubble may be split over
//! several detected lines.

pub mod api;
pub mod error;
pub mod layout;
pub mod model;
pub mod segment;
pub mod utils;

pub use api::{ReadTextResponse, ReaderSession, Recognizer, read_detections};
pub use error::{ReadError, Result};
pub use layout::{GroupingParams, group_paragraphs};
pub use model::{Detection, Paragraph, RawDetection};
pub use segment::{DictionarySegmenter, WordSegmenter};
