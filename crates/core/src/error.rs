//! Error types for fukidashi.

use thiserror::Error;

/// Primary error type for detection validation, grouping and reading.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("invalid bbox for detection {index}: {reason}")]
    InvalidBBox { index: usize, reason: String },

    #[error("invalid score for detection {index}: {score}")]
    InvalidScore { index: usize, score: f64 },

    #[error("invalid grouping parameters: {0}")]
    InvalidParams(String),

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("reader session is closed")]
    SessionClosed,

    #[error("recognition failed: {0}")]
    Recognition(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReadError {
    /// Returns true for errors caused by malformed input data.
    ///
    /// Malformed JSON counts as input too. Callers mapping errors onto a
    /// response use this to tell client errors from server errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReadError::InvalidBBox { .. } | ReadError::InvalidScore { .. } | ReadError::Json(_)
        )
    }

    /// Returns true if the error indicates a defect in the grouping logic.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ReadError::InvariantViolation(_))
    }
}

/// Convenience Result type alias for ReadError.
pub type Result<T> = std::result::Result<T, ReadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_validation_errors() {
        let err = ReadError::InvalidBBox {
            index: 3,
            reason: "expected 4 points, got 3".to_string(),
        };
        assert!(err.is_validation());
        assert!(!err.is_invariant_violation());
        assert_eq!(
            err.to_string(),
            "invalid bbox for detection 3: expected 4 points, got 3"
        );
    }

    #[test]
    fn classifies_invariant_violations() {
        let err = ReadError::InvariantViolation("empty cluster".to_string());
        assert!(err.is_invariant_violation());
        assert!(!err.is_validation());
        assert!(!ReadError::SessionClosed.is_validation());
    }
}
