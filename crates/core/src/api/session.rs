//! Reader session: the recognition collaborators plus grouping parameters,
//! opened once by the service entry point and handed to request handlers.
//!
//! # Example
//! ```ignore
//! use fukidashi_core::api::ReaderSession;
//!
//! let mut session = ReaderSession::builder(my_recognizer)
//!     .segmenter(DictionarySegmenter::from_path("words.txt")?)
//!     .open()?;
//! let response = session.read_text(&image_bytes)?;
//! session.close();
//! ```

use std::time::Instant;

use tracing::info;

use crate::error::{ReadError, Result};
use crate::layout::GroupingParams;
use crate::model::RawDetection;
use crate::segment::WordSegmenter;

use super::high_level::read_detections;
use super::response::{ReadTextResponse, format_seconds};

/// Turns an encoded image into line detections.
///
/// Decoding the image and running inference are both the recognizer's
/// business; the session only sees bytes in and detections out.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &[u8]) -> Result<Vec<RawDetection>>;
}

impl<F> Recognizer for F
where
    F: Fn(&[u8]) -> Result<Vec<RawDetection>> + Send + Sync,
{
    fn recognize(&self, image: &[u8]) -> Result<Vec<RawDetection>> {
        self(image)
    }
}

struct Engine {
    recognizer: Box<dyn Recognizer>,
    segmenter: Option<Box<dyn WordSegmenter>>,
}

/// A builder for configuring and opening a [`ReaderSession`].
pub struct SessionBuilder {
    recognizer: Box<dyn Recognizer>,
    segmenter: Option<Box<dyn WordSegmenter>>,
    params: GroupingParams,
}

impl SessionBuilder {
    /// Sets the word segmenter applied to detections without spaces.
    pub fn segmenter(mut self, segmenter: impl WordSegmenter + 'static) -> Self {
        self.segmenter = Some(Box::new(segmenter));
        self
    }

    /// Sets the grouping parameters (defaults otherwise).
    pub fn params(mut self, params: GroupingParams) -> Self {
        self.params = params;
        self
    }

    /// Validates the configuration and opens the session.
    pub fn open(self) -> Result<ReaderSession> {
        self.params.validate()?;
        info!(
            segmenter = self.segmenter.is_some(),
            "opened reader session"
        );
        Ok(ReaderSession {
            engine: Some(Engine {
                recognizer: self.recognizer,
                segmenter: self.segmenter,
            }),
            params: self.params,
        })
    }
}

/// Owns the recognizer and segmenter for the lifetime of a service.
///
/// Reads take `&self` and hold no per-request state, so a session can be
/// shared between concurrent handlers. `close` releases the collaborators;
/// reads after that fail with [`ReadError::SessionClosed`].
pub struct ReaderSession {
    engine: Option<Engine>,
    params: GroupingParams,
}

impl ReaderSession {
    pub fn builder(recognizer: impl Recognizer + 'static) -> SessionBuilder {
        SessionBuilder {
            recognizer: Box::new(recognizer),
            segmenter: None,
            params: GroupingParams::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    pub fn params(&self) -> &GroupingParams {
        &self.params
    }

    /// Recognizes, segments and groups the text of one encoded image.
    pub fn read_text(&self, image: &[u8]) -> Result<ReadTextResponse> {
        let engine = self.engine.as_ref().ok_or(ReadError::SessionClosed)?;
        let start = Instant::now();

        let raw = engine.recognizer.recognize(image)?;
        let response = read_detections(raw, engine.segmenter.as_deref(), &self.params)?
            .with_image_size(image.len())
            .with_processing_time(start.elapsed());

        info!(
            image_size = image.len(),
            lines = response.stats.total_lines,
            paragraphs = response.stats.total_paragraphs,
            elapsed = %format_seconds(response.stats.processing_time),
            "read text"
        );
        Ok(response)
    }

    /// Releases the collaborators. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.engine.take().is_some() {
            info!("closed reader session");
        }
    }
}
