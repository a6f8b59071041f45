//! Paragraph records.

use serde::Serialize;

use super::detection::Detection;
use crate::utils::Quad;

/// A group of detections judged to belong to the same speech bubble.
///
/// `individual_items` are in reading order, `text` joins their texts with
/// single spaces in that order, `bbox` is the union rectangle of every member
/// corner (top-left, top-right, bottom-right, bottom-left) and `score` is the
/// mean member score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub text: String,
    pub bbox: Quad,
    pub score: f64,
    pub item_count: usize,
    pub individual_items: Vec<Detection>,
}
