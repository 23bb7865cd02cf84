//! Reference pose track and timestamp alignment.
//!
//! A [`ReferenceSequence`] is the pre-recorded performance a live stream is
//! scored against. It is sorted by timestamp once, at construction, so every
//! lookup is a binary search.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::pose::TimestampedPose;

/// Timestamp-ordered reference frames, immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<TimestampedPose>", into = "Vec<TimestampedPose>")
)]
pub struct ReferenceSequence {
    frames: Vec<TimestampedPose>,
}

impl ReferenceSequence {
    /// Build from frames already in ascending timestamp order.
    ///
    /// Equal neighbouring timestamps are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::UnsortedReference`] at the first frame whose
    /// timestamp is lower than its predecessor's or not a number.
    pub fn new(frames: Vec<TimestampedPose>) -> Result<Self> {
        if let Some(first) = frames.first() {
            if !first.timestamp.is_finite() {
                return Err(ScoringError::unsorted_reference(0));
            }
        }
        for (i, pair) in frames.windows(2).enumerate() {
            let ordered = pair[0].timestamp <= pair[1].timestamp;
            if !ordered || !pair[1].timestamp.is_finite() {
                return Err(ScoringError::unsorted_reference(i + 1));
            }
        }
        Ok(Self { frames })
    }

    /// Build from frames in any order, sorting them by timestamp.
    ///
    /// # Errors
    ///
    /// Fails if any timestamp is not finite.
    pub fn from_unsorted(mut frames: Vec<TimestampedPose>) -> Result<Self> {
        frames.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Self::new(frames)
    }

    /// An empty reference; every lookup misses.
    #[must_use]
    pub const fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in timestamp order.
    #[must_use]
    pub fn frames(&self) -> &[TimestampedPose] {
        &self.frames
    }

    /// Span between the first and last frame, in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0.0,
        }
    }

    /// Index of the frame whose timestamp is closest to `timestamp`.
    ///
    /// An exact match wins; a query exactly halfway between two frames
    /// resolves to the earlier one. Runs in `O(log n)`. Returns `None` for an
    /// empty sequence or a NaN query.
    #[must_use]
    pub fn nearest_index(&self, timestamp: f64) -> Option<usize> {
        if self.frames.is_empty() || timestamp.is_nan() {
            return None;
        }

        // First frame at or after the query.
        let idx = self.frames.partition_point(|f| f.timestamp < timestamp);
        if idx == 0 {
            return Some(0);
        }
        if idx == self.frames.len() {
            return Some(idx - 1);
        }

        let earlier = self.frames[idx - 1].timestamp;
        let before = timestamp - earlier;
        let after = self.frames[idx].timestamp - timestamp;
        if after < before {
            return Some(idx);
        }

        // Step back to the first frame of a run of equal timestamps.
        Some(self.frames.partition_point(|f| f.timestamp < earlier))
    }

    /// The frame closest in time to `timestamp`.
    ///
    /// # Example
    ///
    /// ```
    /// use motion_scoring::{ReferenceSequence, TimestampedPose};
    ///
    /// let reference = ReferenceSequence::new(vec![
    ///     TimestampedPose::new(0.0, Vec::new()),
    ///     TimestampedPose::new(100.0, Vec::new()),
    ///     TimestampedPose::new(250.0, Vec::new()),
    /// ])?;
    /// assert_eq!(reference.nearest(90.0).map(|f| f.timestamp), Some(100.0));
    /// assert_eq!(reference.nearest(260.0).map(|f| f.timestamp), Some(250.0));
    /// # Ok::<(), motion_scoring::ScoringError>(())
    /// ```
    #[must_use]
    pub fn nearest(&self, timestamp: f64) -> Option<&TimestampedPose> {
        self.nearest_index(timestamp).map(|i| &self.frames[i])
    }
}

impl TryFrom<Vec<TimestampedPose>> for ReferenceSequence {
    type Error = ScoringError;

    fn try_from(frames: Vec<TimestampedPose>) -> Result<Self> {
        Self::new(frames)
    }
}

impl From<ReferenceSequence> for Vec<TimestampedPose> {
    fn from(reference: ReferenceSequence) -> Self {
        reference.frames
    }
}
