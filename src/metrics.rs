//! Pose similarity metrics.
//!
//! Two independent, stateless scores:
//!
//! - [`compare_poses`]: positional distance between normalized poses
//!   (lower is better, `0.0` is a perfect match).
//! - [`compare_by_angles`]: per-joint angle agreement on raw coordinates
//!   (higher is better, `100.0` per matching joint).

use std::collections::BTreeMap;

use crate::error::Result;
use crate::math::angles::ANGLE_CATALOG;
use crate::math::normalize::normalize_pair;
use crate::pose::Pose;

/// Key of the summed entry in [`AngleScores::to_map`].
pub const TOTAL_KEY: &str = "total";

/// Per-angle score for a perfectly matching joint.
pub const MAX_ANGLE_SCORE: f64 = 100.0;

/// Compute the positional distance between two poses.
///
/// Both poses are normalized (translation and scale removed). For every
/// keypoint name present in both, the squared Euclidean distance is summed;
/// the result is the square root of that sum. Keypoints present in only one
/// pose contribute nothing.
///
/// # Errors
///
/// Returns [`ScoringError::DegeneratePose`](crate::ScoringError::DegeneratePose)
/// if either pose cannot be normalized.
///
/// # Example
///
/// ```
/// use motion_scoring::{compare_poses, Keypoint, Pose};
///
/// let pose = Pose::new(vec![
///     Keypoint::new("left_wrist", 0.0, 0.0, 1.0),
///     Keypoint::new("right_wrist", 2.0, 1.0, 1.0),
/// ])?;
/// assert_eq!(compare_poses(&pose, &pose)?, 0.0);
/// # Ok::<(), motion_scoring::ScoringError>(())
/// ```
pub fn compare_poses(a: &Pose, b: &Pose) -> Result<f64> {
    let (a, b) = normalize_pair(a, b)?;

    let sum_sq: f64 = a
        .keypoints()
        .iter()
        .filter_map(|ka| {
            b.get(&ka.name)
                .map(|kb| (ka.position() - kb.position()).norm_squared())
        })
        .sum();

    Ok(sum_sq.sqrt())
}

/// Positional scores for aligned pose pairs.
///
/// Pairs `live[i]` with `reference[i]` up to the shorter length; a pair that
/// cannot be normalized yields `None`.
#[must_use]
pub fn compare_pose_sequences(live: &[Pose], reference: &[Pose]) -> Vec<Option<f64>> {
    live.iter()
        .zip(reference)
        .map(|(a, b)| compare_poses(a, b).ok())
        .collect()
}

/// Per-joint angle scores produced by [`compare_by_angles`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AngleScores {
    per_joint: Vec<(&'static str, f64)>,
    total: f64,
}

impl AngleScores {
    /// Score for a vertex joint, or for [`TOTAL_KEY`].
    ///
    /// Returns `None` for joints whose triple was not resolvable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        if key == TOTAL_KEY {
            return Some(self.total);
        }
        self.per_joint
            .iter()
            .find(|(joint, _)| *joint == key)
            .map(|&(_, score)| score)
    }

    /// Sum of all per-joint scores.
    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Number of angle triples that were scored.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.per_joint.len()
    }

    /// Scored joints in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.per_joint.iter().copied()
    }

    /// Mapping from joint name to score, plus a `"total"` entry.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map: BTreeMap<String, f64> = self
            .per_joint
            .iter()
            .map(|&(joint, score)| (joint.to_string(), score))
            .collect();
        map.insert(TOTAL_KEY.to_string(), self.total);
        map
    }
}

/// Compare the joint angles of two poses.
///
/// For each triple in [`ANGLE_CATALOG`] the signed angle at the middle joint
/// is measured on raw coordinates in both poses; the joint scores
/// `100 - |Δangle| / π`. A triple with any joint missing on either side is
/// skipped entirely.
///
/// # Example
///
/// ```
/// use motion_scoring::{compare_by_angles, Keypoint, Pose};
///
/// let arm = Pose::new(vec![
///     Keypoint::new("left_shoulder", 0.0, 0.0, 1.0),
///     Keypoint::new("left_elbow", 1.0, 0.0, 1.0),
///     Keypoint::new("left_wrist", 1.0, 1.0, 1.0),
/// ])?;
/// let scores = compare_by_angles(&arm, &arm);
/// assert_eq!(scores.get("left_elbow"), Some(100.0));
/// assert_eq!(scores.get("total"), Some(100.0));
/// # Ok::<(), motion_scoring::ScoringError>(())
/// ```
#[must_use]
pub fn compare_by_angles(a: &Pose, b: &Pose) -> AngleScores {
    let per_joint: Vec<(&'static str, f64)> = ANGLE_CATALOG
        .iter()
        .filter_map(|triple| {
            let angle_a = triple.measure(a)?;
            let angle_b = triple.measure(b)?;
            let delta = (angle_a - angle_b).abs();
            Some((triple.vertex, MAX_ANGLE_SCORE - delta / std::f64::consts::PI))
        })
        .collect();

    let total = per_joint.iter().map(|&(_, score)| score).sum();

    AngleScores { per_joint, total }
}
