//! Layout analysis module for grouping OCR detections.
//!
//! This module contains:
//! - Rectangle derivation and alignment tests (TextRect)
//! - Grouping parameters (GroupingParams)
//! - The pairwise merge decision and reading-order sort
//! - Cluster growth and paragraph aggregation

pub mod geometry;
pub mod grouping;
pub mod merge;
pub mod order;
pub mod paragraph;
pub mod params;

pub use geometry::TextRect;
pub use grouping::{Cluster, build_clusters, group_paragraphs};
pub use merge::{relative_distance, should_merge};
pub use order::{reading_order, reading_order_cmp, sort_reading_order};
pub use paragraph::aggregate_paragraph;
pub use params::GroupingParams;
