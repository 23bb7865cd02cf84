//! Pose data structures.
//!
//! Keypoints arrive from an external pose detector; this module only holds
//! them. A [`Pose`] is a set of named keypoints (at most one per name) and a
//! [`TimestampedPose`] is one detector frame.

use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

/// A named, confidence-scored 2-D body-joint estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    /// Joint identifier, e.g. `"left_elbow"`.
    pub name: String,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
}

impl Keypoint {
    /// Create a keypoint.
    #[must_use]
    pub fn new(name: impl Into<String>, x: f64, y: f64, confidence: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            confidence,
        }
    }

    /// Coordinates as a vector.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Copy of this keypoint moved to `position`.
    #[must_use]
    pub fn with_position(&self, position: Vector2<f64>) -> Self {
        Self {
            name: self.name.clone(),
            x: position.x,
            y: position.y,
            confidence: self.confidence,
        }
    }
}

/// All keypoints of one subject at one instant.
///
/// Keypoint names are unique within a pose; construction enforces it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Keypoint>", into = "Vec<Keypoint>")
)]
pub struct Pose {
    keypoints: Vec<Keypoint>,
}

impl Pose {
    /// Build a pose from keypoints.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::DuplicateKeypoint`] if two keypoints share a name.
    pub fn new(keypoints: Vec<Keypoint>) -> Result<Self> {
        for (i, kp) in keypoints.iter().enumerate() {
            if keypoints[..i].iter().any(|other| other.name == kp.name) {
                return Err(ScoringError::duplicate_keypoint(kp.name.clone()));
            }
        }
        Ok(Self { keypoints })
    }

    /// Keypoints in detector order.
    #[must_use]
    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    /// Look up a keypoint by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.name == name)
    }

    /// Number of keypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    /// Whether the pose has no keypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Copy keeping only keypoints with `confidence >= threshold`.
    #[must_use]
    pub fn confident(&self, threshold: f64) -> Self {
        Self {
            keypoints: self
                .keypoints
                .iter()
                .filter(|kp| kp.confidence >= threshold)
                .cloned()
                .collect(),
        }
    }

    /// Copy with every keypoint transformed by `f`, names unchanged.
    #[must_use]
    pub fn map_positions(&self, f: impl Fn(Vector2<f64>) -> Vector2<f64>) -> Self {
        Self {
            keypoints: self
                .keypoints
                .iter()
                .map(|kp| kp.with_position(f(kp.position())))
                .collect(),
        }
    }
}

impl TryFrom<Vec<Keypoint>> for Pose {
    type Error = ScoringError;

    fn try_from(keypoints: Vec<Keypoint>) -> Result<Self> {
        Self::new(keypoints)
    }
}

impl From<Pose> for Vec<Keypoint> {
    fn from(pose: Pose) -> Self {
        pose.keypoints
    }
}

/// One detector frame: a timestamp (ms) and the poses found in it.
///
/// Scoring assumes a single subject and only looks at the first pose.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimestampedPose {
    /// Capture time in milliseconds.
    pub timestamp: f64,
    /// Detected poses; may be empty when nobody was found.
    pub poses: Vec<Pose>,
}

impl TimestampedPose {
    /// Create a frame.
    #[must_use]
    pub const fn new(timestamp: f64, poses: Vec<Pose>) -> Self {
        Self { timestamp, poses }
    }

    /// Frame holding exactly one pose.
    #[must_use]
    pub fn single(timestamp: f64, pose: Pose) -> Self {
        Self {
            timestamp,
            poses: vec![pose],
        }
    }

    /// The pose that gets scored.
    #[must_use]
    pub fn primary(&self) -> Option<&Pose> {
        self.poses.first()
    }
}

/// One scored live frame, stamped with the reference time it aligned to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredSample {
    /// Reference timestamp in milliseconds.
    pub timestamp: f64,
    /// Positional distance score (lower is better).
    pub score: f64,
}

impl ScoredSample {
    /// Create a sample.
    #[must_use]
    pub const fn new(timestamp: f64, score: f64) -> Self {
        Self { timestamp, score }
    }
}

/// A closed span `[start_ms, end_ms]` of reference time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(f64, f64)", into = "(f64, f64)"))]
pub struct Interval {
    start_ms: f64,
    end_ms: f64,
}

impl Interval {
    /// Create an interval.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidInterval`] unless both bounds are finite
    /// and `start_ms < end_ms`.
    pub fn new(start_ms: f64, end_ms: f64) -> Result<Self> {
        if !start_ms.is_finite() || !end_ms.is_finite() || start_ms >= end_ms {
            return Err(ScoringError::invalid_interval(start_ms, end_ms));
        }
        Ok(Self { start_ms, end_ms })
    }

    /// Inclusive start.
    #[must_use]
    pub const fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Inclusive end.
    #[must_use]
    pub const fn end_ms(&self) -> f64 {
        self.end_ms
    }

    /// Whether `timestamp` falls inside the interval, bounds included.
    #[must_use]
    pub fn contains(&self, timestamp: f64) -> bool {
        (self.start_ms..=self.end_ms).contains(&timestamp)
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = ScoringError;

    fn try_from((start_ms, end_ms): (f64, f64)) -> Result<Self> {
        Self::new(start_ms, end_ms)
    }
}

impl From<Interval> for (f64, f64) {
    fn from(interval: Interval) -> Self {
        (interval.start_ms, interval.end_ms)
    }
}
