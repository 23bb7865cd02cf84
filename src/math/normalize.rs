//! Pose normalization.
//!
//! Removes translation and scale so two poses can be compared regardless of
//! where the subject stands or how far away the camera is. Orientation is
//! left untouched: a rotated pose is a different pose.

use nalgebra::Vector2;

use crate::error::{Result, ScoringError};
use crate::pose::Pose;

/// Mean keypoint position, or `None` for an empty pose.
#[must_use]
pub fn centroid(pose: &Pose) -> Option<Vector2<f64>> {
    if pose.is_empty() {
        return None;
    }
    let sum = pose
        .keypoints()
        .iter()
        .fold(Vector2::<f64>::zeros(), |acc, kp| acc + kp.position());
    Some(sum / pose.len() as f64)
}

/// Root-mean-square distance of the keypoints from `center`.
///
/// Returns `0.0` for an empty pose.
#[must_use]
pub fn rms_radius(pose: &Pose, center: &Vector2<f64>) -> f64 {
    if pose.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = pose
        .keypoints()
        .iter()
        .map(|kp| (kp.position() - center).norm_squared())
        .sum();
    (sum_sq / pose.len() as f64).sqrt()
}

/// Translate a pose to its centroid and scale it to unit RMS radius.
///
/// # Errors
///
/// Returns [`ScoringError::DegeneratePose`] if the pose has no keypoints or
/// all keypoints coincide (zero radius).
///
/// # Example
///
/// ```
/// use motion_scoring::{normalize_pose, Keypoint, Pose};
///
/// let pose = Pose::new(vec![
///     Keypoint::new("left_hip", 10.0, 0.0, 1.0),
///     Keypoint::new("right_hip", 14.0, 0.0, 1.0),
/// ])?;
/// let normalized = normalize_pose(&pose)?;
/// assert_eq!(normalized.get("left_hip").map(|k| k.x), Some(-1.0));
/// # Ok::<(), motion_scoring::ScoringError>(())
/// ```
pub fn normalize_pose(pose: &Pose) -> Result<Pose> {
    let center =
        centroid(pose).ok_or_else(|| ScoringError::degenerate_pose("pose has no keypoints"))?;

    let radius = rms_radius(pose, &center);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ScoringError::degenerate_pose(format!(
            "normalization radius is {radius}"
        )));
    }

    Ok(pose.map_positions(|p| (p - center) / radius))
}

/// Normalize two poses for comparison.
///
/// # Errors
///
/// Fails if either pose is degenerate.
pub fn normalize_pair(a: &Pose, b: &Pose) -> Result<(Pose, Pose)> {
    Ok((normalize_pose(a)?, normalize_pose(b)?))
}
