//! Motion Scoring Library
//!
//! Live-versus-reference pose comparison for dance and exercise games.
//!
//! A performer's live keypoints (from any external 2-D pose detector) are
//! matched in time against a pre-recorded reference performance and scored
//! frame by frame. The per-frame scores are smoothed into a running average
//! and can be summarized per interval of the reference track.
//!
//! # Features
//!
//! - **Normalized positional metric**: translation- and scale-free RMSD
//! - **Joint-angle metric**: per-joint agreement over a fixed anatomical catalog
//! - **O(log n) alignment**: nearest reference frame by binary search
//! - **Monotonic scoring**: each reference frame is scored at most once, in order
//! - **Streaming**: lazy iterator over scored samples
//!
//! # Quick Start
//!
//! ```
//! use motion_scoring::{
//!     Interval, Keypoint, Pose, ReferenceSequence, ScoringConfig, SessionScorer,
//!     TimestampedPose,
//! };
//!
//! let pose = |lift: f64| {
//!     Pose::new(vec![
//!         Keypoint::new("left_shoulder", -1.0, 0.0, 0.9),
//!         Keypoint::new("right_shoulder", 1.0, 0.0, 0.9),
//!         Keypoint::new("left_wrist", -2.0, lift, 0.9),
//!         Keypoint::new("right_wrist", 2.0, lift, 0.9),
//!     ])
//! };
//!
//! let reference = ReferenceSequence::new(vec![
//!     TimestampedPose::single(100.0, pose(0.0)?),
//!     TimestampedPose::single(200.0, pose(-1.0)?),
//! ])?;
//! let intervals = vec![Interval::new(0.0, 300.0)?];
//!
//! let mut scorer = SessionScorer::new(reference, intervals, ScoringConfig::default())?;
//! scorer.consume(&TimestampedPose::single(98.0, pose(0.1)?));
//! let running = scorer.consume(&TimestampedPose::single(205.0, pose(-0.9)?));
//!
//! assert!(running > 0.0);
//! assert_eq!(scorer.compute_interval_scores().len(), 1);
//! # Ok::<(), motion_scoring::ScoringError>(())
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod math;
pub mod metrics;
pub mod pose;
pub mod reference;
pub mod session;
pub mod summary;

// Re-exports for convenient access
pub use config::ScoringConfig;
pub use error::{Result, ScoringError};
pub use math::{normalize_pose, AngleTriple, ANGLE_CATALOG};
pub use metrics::{compare_by_angles, compare_pose_sequences, compare_poses, AngleScores};
pub use pose::{Interval, Keypoint, Pose, ScoredSample, TimestampedPose};
pub use reference::ReferenceSequence;
pub use session::{ConsumeOutcome, ScoredStream, SessionScorer};
pub use summary::SessionSummary;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
