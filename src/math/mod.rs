//! Geometric utilities for pose comparison.
//!
//! This module provides:
//! - [`normalize`]: translation and scale removal
//! - [`angles`]: joint-angle catalog and signed angles

pub mod angles;
pub mod normalize;

pub use angles::{signed_angle, AngleTriple, ANGLE_CATALOG};
pub use normalize::{centroid, normalize_pair, normalize_pose, rms_radius};
