//! Joint-angle catalog.
//!
//! Each entry names three keypoints `(a, b, c)`; the angle is measured at the
//! middle joint `b`, between the rays `b→a` and `b→c`.

use nalgebra::Vector2;

use crate::pose::Pose;

/// Three keypoint names whose middle joint carries the angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleTriple {
    /// First outer joint.
    pub first: &'static str,
    /// Vertex joint; also the angle's identifier.
    pub vertex: &'static str,
    /// Second outer joint.
    pub last: &'static str,
}

impl AngleTriple {
    const fn new(first: &'static str, vertex: &'static str, last: &'static str) -> Self {
        Self {
            first,
            vertex,
            last,
        }
    }

    /// Signed angle of this triple in `pose`, or `None` if a joint is missing.
    #[must_use]
    pub fn measure(&self, pose: &Pose) -> Option<f64> {
        let a = pose.get(self.first)?.position();
        let b = pose.get(self.vertex)?.position();
        let c = pose.get(self.last)?.position();
        Some(signed_angle(&a, &b, &c))
    }
}

/// Angles compared by [`compare_by_angles`](crate::compare_by_angles), in order.
pub const ANGLE_CATALOG: [AngleTriple; 8] = [
    AngleTriple::new("left_shoulder", "left_elbow", "left_wrist"),
    AngleTriple::new("right_shoulder", "right_elbow", "right_wrist"),
    AngleTriple::new("left_hip", "left_shoulder", "right_shoulder"),
    AngleTriple::new("right_hip", "right_shoulder", "left_shoulder"),
    AngleTriple::new("left_shoulder", "left_hip", "left_knee"),
    AngleTriple::new("right_shoulder", "right_hip", "right_knee"),
    AngleTriple::new("left_hip", "left_knee", "left_ankle"),
    AngleTriple::new("right_hip", "right_knee", "right_ankle"),
];

/// Signed angle at `b` from ray `b→a` to ray `b→c`, in radians.
///
/// Computed as a difference of `atan2` headings, so the result lies in
/// `(-2π, 2π)` and is not wrapped.
#[must_use]
pub fn signed_angle(a: &Vector2<f64>, b: &Vector2<f64>, c: &Vector2<f64>) -> f64 {
    let ba = a - b;
    let bc = c - b;
    bc.y.atan2(bc.x) - ba.y.atan2(ba.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Keypoint;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_right_angle() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 0.0);
        let c = Vector2::new(0.0, 1.0);
        assert_relative_eq!(signed_angle(&a, &b, &c), FRAC_PI_2);
        assert_relative_eq!(signed_angle(&c, &b, &a), -FRAC_PI_2);
    }

    #[test]
    fn test_straight_limb() {
        let a = Vector2::new(-2.0, 0.0);
        let b = Vector2::new(0.0, 0.0);
        let c = Vector2::new(3.0, 0.0);
        assert_relative_eq!(signed_angle(&a, &b, &c).abs(), PI);
    }

    #[test]
    fn test_catalog_vertices_unique() {
        for (i, t) in ANGLE_CATALOG.iter().enumerate() {
            assert!(ANGLE_CATALOG[..i].iter().all(|o| o.vertex != t.vertex));
        }
    }

    #[test]
    fn test_measure_requires_all_joints() {
        let arm = Pose::new(vec![
            Keypoint::new("left_shoulder", 0.0, 0.0, 1.0),
            Keypoint::new("left_elbow", 1.0, 0.0, 1.0),
            Keypoint::new("left_wrist", 1.0, 1.0, 1.0),
        ])
        .unwrap();

        let elbow = ANGLE_CATALOG[0];
        assert_relative_eq!(elbow.measure(&arm).unwrap().abs(), FRAC_PI_2);

        let knee = ANGLE_CATALOG[6];
        assert!(knee.measure(&arm).is_none());
    }
}
