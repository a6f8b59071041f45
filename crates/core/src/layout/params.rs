//! Grouping parameters.
//!
//! Contains GroupingParams for controlling how detections merge into paragraphs.

use serde::{Deserialize, Serialize};

use crate::error::{ReadError, Result};

/// Parameters for paragraph grouping.
///
/// All distances are relative: they are divided by the average size of the
/// two boxes being compared, so the same values work across image resolutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingParams {
    /// Two boxes are aligned on an axis if their overlap along it is more
    /// than this fraction of the smaller box's extent on that axis.
    pub alignment_tolerance: f64,

    /// Boxes further apart than this never merge.
    pub max_distance_factor: f64,

    /// Aligned boxes closer than this merge.
    pub aligned_merge_distance: f64,

    /// Boxes closer than this merge regardless of alignment.
    pub close_merge_distance: f64,
}

impl Default for GroupingParams {
    fn default() -> Self {
        Self {
            alignment_tolerance: 0.3,
            max_distance_factor: 2.0,
            aligned_merge_distance: 1.5,
            close_merge_distance: 0.8,
        }
    }
}

impl GroupingParams {
    /// Returns the default parameters with a different distance cutoff.
    pub fn with_max_distance_factor(max_distance_factor: f64) -> Self {
        Self {
            max_distance_factor,
            ..Self::default()
        }
    }

    /// Checks that every threshold is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("alignment_tolerance", self.alignment_tolerance),
            ("max_distance_factor", self.max_distance_factor),
            ("aligned_merge_distance", self.aligned_merge_distance),
            ("close_merge_distance", self.close_merge_distance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ReadError::InvalidParams(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
