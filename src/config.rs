//! Configuration for a scoring session.
//!
//! # Example
//!
//! ```
//! use motion_scoring::ScoringConfig;
//!
//! let config = ScoringConfig::default().with_window_size_ms(3000.0);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Result, ScoringError};

/// Default running-average horizon in milliseconds.
pub const DEFAULT_WINDOW_SIZE_MS: f64 = 5000.0;

/// Default keypoint confidence threshold.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// Configuration for a [`SessionScorer`](crate::SessionScorer).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringConfig {
    /// Trailing span (ms) over which per-frame scores are averaged.
    pub window_size_ms: f64,

    /// Keypoints below this confidence are dropped from both the live and
    /// the reference pose before comparison. `0.0` keeps every keypoint.
    pub min_confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            window_size_ms: DEFAULT_WINDOW_SIZE_MS,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl ScoringConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is not a positive finite span or the
    /// confidence threshold lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.window_size_ms.is_finite() || self.window_size_ms <= 0.0 {
            return Err(ScoringError::invalid_config(format!(
                "window_size_ms must be positive, got {}",
                self.window_size_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ScoringError::invalid_config(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }

    /// Set the running-average window.
    #[must_use]
    pub const fn with_window_size_ms(mut self, window_size_ms: f64) -> Self {
        self.window_size_ms = window_size_ms;
        self
    }

    /// Set the keypoint confidence threshold.
    #[must_use]
    pub const fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }
}
