//! Error types for motion scoring operations.
//!
//! Per-frame problems (a degenerate live pose, a stale alignment) never
//! escape a scoring session; the errors here surface from constructors and
//! from the standalone metric functions.

use thiserror::Error;

/// Main error type for motion scoring operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Pose cannot be normalized (no keypoints or zero radius).
    #[error("Degenerate pose: {context}")]
    DegeneratePose { context: String },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Interval bounds are not finite or not ordered.
    #[error("Invalid interval: start {start} must be less than end {end}")]
    InvalidInterval { start: f64, end: f64 },

    /// Reference timestamps are not ascending.
    #[error("Reference timestamps must be ascending at index {index}")]
    UnsortedReference { index: usize },

    /// Two keypoints in one pose share a name.
    #[error("Duplicate keypoint name in pose: {name}")]
    DuplicateKeypoint { name: String },
}

/// Result type alias for motion scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    /// Create a degenerate pose error.
    #[must_use]
    pub fn degenerate_pose(context: impl Into<String>) -> Self {
        Self::DegeneratePose {
            context: context.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid interval error.
    #[must_use]
    pub const fn invalid_interval(start: f64, end: f64) -> Self {
        Self::InvalidInterval { start, end }
    }

    /// Create an unsorted reference error.
    #[must_use]
    pub const fn unsorted_reference(index: usize) -> Self {
        Self::UnsortedReference { index }
    }

    /// Create a duplicate keypoint error.
    #[must_use]
    pub fn duplicate_keypoint(name: impl Into<String>) -> Self {
        Self::DuplicateKeypoint { name: name.into() }
    }

    /// Whether the error describes a single unusable pose rather than bad setup.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegeneratePose { .. })
    }
}
