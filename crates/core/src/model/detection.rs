//! OCR line detections.
//!
//! Recognition engines hand back `(box, text, confidence)` triples. They are
//! accepted here as [`RawDetection`] (whatever shape arrived over the wire)
//! and turned into [`Detection`] (exactly four finite corner points) before
//! any geometry is derived from them.

use serde::{Deserialize, Serialize};

use crate::error::{ReadError, Result};
use crate::utils::Quad;

/// A validated line-level text detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub bbox: Quad,
    pub text: String,
    pub score: f64,
}

impl Detection {
    pub fn new(bbox: Quad, text: impl Into<String>, score: f64) -> Self {
        Self {
            bbox,
            text: text.into(),
            score,
        }
    }

    /// Checks that every corner and the score are finite.
    ///
    /// `index` is the position of the detection in its input list and is
    /// reported in the error.
    pub fn check_finite(&self, index: usize) -> Result<()> {
        if let Some(i) = self
            .bbox
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ReadError::InvalidBBox {
                index,
                reason: format!("point {} has a non-finite coordinate", i),
            });
        }
        if !self.score.is_finite() {
            return Err(ReadError::InvalidScore {
                index,
                score: self.score,
            });
        }
        Ok(())
    }
}

/// A detection as received from the recognizer, before validation.
///
/// Deserializes from either the object form
/// `{"bbox": [[x, y], ...], "text": "...", "score": 0.9}` or the engine's
/// native triple form `[[[x, y], ...], "...", 0.9]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDetection {
    Record {
        bbox: Vec<Vec<f64>>,
        text: String,
        score: f64,
    },
    Triple(Vec<Vec<f64>>, String, f64),
}

impl RawDetection {
    pub fn new(bbox: Vec<Vec<f64>>, text: impl Into<String>, score: f64) -> Self {
        RawDetection::Record {
            bbox,
            text: text.into(),
            score,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            RawDetection::Record { text, .. } | RawDetection::Triple(_, text, _) => text,
        }
    }

    /// Validates the detection found at `index` of its input list.
    ///
    /// The bbox must hold exactly four points of two finite coordinates each,
    /// and the score must be finite.
    pub fn validate(self, index: usize) -> Result<Detection> {
        let (bbox, text, score) = match self {
            RawDetection::Record { bbox, text, score } => (bbox, text, score),
            RawDetection::Triple(bbox, text, score) => (bbox, text, score),
        };

        if bbox.len() != 4 {
            return Err(ReadError::InvalidBBox {
                index,
                reason: format!("expected 4 points, got {}", bbox.len()),
            });
        }

        let mut quad: Quad = [(0.0, 0.0); 4];
        for (i, coords) in bbox.iter().enumerate() {
            quad[i] = match coords.as_slice() {
                [x, y] => (*x, *y),
                other => {
                    return Err(ReadError::InvalidBBox {
                        index,
                        reason: format!("point {} has {} coordinates, expected 2", i, other.len()),
                    });
                }
            };
        }

        let det = Detection {
            bbox: quad,
            text,
            score,
        };
        det.check_finite(index)?;
        Ok(det)
    }
}

impl From<Detection> for RawDetection {
    fn from(det: Detection) -> Self {
        let bbox = det.bbox.iter().map(|&(x, y)| vec![x, y]).collect();
        RawDetection::Record {
            bbox,
            text: det.text,
            score: det.score,
        }
    }
}

/// Validates every raw detection, failing on the first malformed one.
pub fn validate_detections(raw: Vec<RawDetection>) -> Result<Vec<Detection>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, det)| det.validate(index))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionsDocument {
    List(Vec<RawDetection>),
    Wrapped {
        #[serde(alias = "results")]
        detections: Vec<RawDetection>,
    },
}

/// Parses a JSON document holding detections.
///
/// Accepts a bare array, or an object with a `detections` (or `results`)
/// array, which is what a previous response looks like.
pub fn parse_detections(json: &str) -> Result<Vec<RawDetection>> {
    let doc: DetectionsDocument = serde_json::from_str(json)?;
    Ok(match doc {
        DetectionsDocument::List(list) => list,
        DetectionsDocument::Wrapped { detections } => detections,
    })
}
