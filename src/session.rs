//! Live scoring session.
//!
//! This module provides [`SessionScorer`], which aligns each incoming live
//! frame to the reference track, scores it, and keeps a trailing-window
//! running average, plus [`ScoredStream`] for pulling scored samples out of a
//! frame iterator.

use tracing::{debug, trace};

use crate::aggregate::{interval_averages, window_average};
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::metrics::compare_poses;
use crate::pose::{Interval, ScoredSample, TimestampedPose};
use crate::reference::ReferenceSequence;

/// What happened to one frame passed to [`SessionScorer::consume_detailed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsumeOutcome {
    /// The frame was scored.
    Scored {
        /// The recorded sample.
        sample: ScoredSample,
        /// Running average after recording it.
        average: f64,
    },
    /// The reference track is empty.
    NoReference {
        /// Unchanged running average.
        average: f64,
    },
    /// The aligned reference frame was already scored or lies behind it.
    Stale {
        /// Reference timestamp the frame aligned to.
        aligned: f64,
        /// Highest reference timestamp scored so far.
        watermark: f64,
        /// Unchanged running average.
        average: f64,
    },
    /// The frame carries nothing scorable (no pose, no keypoints, bad timestamp).
    NoPose {
        /// Unchanged running average.
        average: f64,
    },
    /// The live or reference pose could not be normalized.
    Degenerate {
        /// Reference timestamp the frame aligned to.
        aligned: f64,
        /// Unchanged running average.
        average: f64,
    },
}

impl ConsumeOutcome {
    /// Running average after this frame.
    #[must_use]
    pub const fn average(&self) -> f64 {
        match *self {
            Self::Scored { average, .. }
            | Self::NoReference { average }
            | Self::Stale { average, .. }
            | Self::NoPose { average }
            | Self::Degenerate { average, .. } => average,
        }
    }

    /// The sample recorded for this frame, if it was scored.
    #[must_use]
    pub const fn sample(&self) -> Option<ScoredSample> {
        match *self {
            Self::Scored { sample, .. } => Some(sample),
            _ => None,
        }
    }

    /// Whether the frame was scored.
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        matches!(self, Self::Scored { .. })
    }
}

/// Stateful scorer for one performance of one level.
///
/// Frames are fed in arrival order through [`consume`](Self::consume). Each
/// is aligned to the nearest reference frame; it is scored only if that
/// reference frame lies strictly after every reference frame scored before
/// (the watermark), so scoring advances monotonically through the reference
/// track however the live frame rate jitters.
///
/// # Example
///
/// ```
/// use motion_scoring::{
///     Keypoint, Pose, ReferenceSequence, ScoringConfig, SessionScorer, TimestampedPose,
/// };
///
/// let pose = Pose::new(vec![
///     Keypoint::new("left_wrist", 0.0, 0.0, 1.0),
///     Keypoint::new("right_wrist", 4.0, 0.0, 1.0),
/// ])?;
/// let reference = ReferenceSequence::new(vec![
///     TimestampedPose::single(100.0, pose.clone()),
///     TimestampedPose::single(200.0, pose.clone()),
/// ])?;
///
/// let mut scorer = SessionScorer::new(reference, Vec::new(), ScoringConfig::default())?;
/// let average = scorer.consume(&TimestampedPose::single(105.0, pose));
/// assert_eq!(average, 0.0);
/// assert_eq!(scorer.scored_samples().len(), 1);
/// # Ok::<(), motion_scoring::ScoringError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SessionScorer {
    /// Reference track, fixed for the session.
    reference: ReferenceSequence,

    /// Spans reported by [`compute_interval_scores`](Self::compute_interval_scores).
    intervals: Vec<Interval>,

    /// Window size and confidence threshold.
    config: ScoringConfig,

    /// Highest reference timestamp scored so far.
    last_scored_timestamp: f64,

    /// Scores in reference-timestamp order.
    samples: Vec<ScoredSample>,

    /// Average over the trailing window at the last scored frame.
    current_average: f64,
}

impl SessionScorer {
    /// Create a scorer.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidConfig`](crate::ScoringError::InvalidConfig)
    /// if `config` does not validate.
    pub fn new(
        reference: ReferenceSequence,
        intervals: Vec<Interval>,
        config: ScoringConfig,
    ) -> Result<Self> {
        config.validate()?;
        debug!(
            reference_frames = reference.len(),
            intervals = intervals.len(),
            window_size_ms = config.window_size_ms,
            "scoring session created"
        );
        Ok(Self {
            samples: Vec::with_capacity(reference.len()),
            reference,
            intervals,
            config,
            last_scored_timestamp: 0.0,
            current_average: 0.0,
        })
    }

    /// Score one live frame and return the running average.
    ///
    /// Frames that cannot be scored leave the average unchanged.
    pub fn consume(&mut self, frame: &TimestampedPose) -> f64 {
        self.consume_detailed(frame).average()
    }

    /// Score one live frame and report what happened to it.
    pub fn consume_detailed(&mut self, frame: &TimestampedPose) -> ConsumeOutcome {
        let average = self.current_average;

        if self.reference.is_empty() {
            return ConsumeOutcome::NoReference { average };
        }

        let live = match frame.primary() {
            Some(pose) if !pose.is_empty() && frame.timestamp.is_finite() => pose,
            _ => {
                debug!(timestamp = frame.timestamp, "frame has no scorable pose");
                return ConsumeOutcome::NoPose { average };
            }
        };

        let Some(target) = self.reference.nearest(frame.timestamp) else {
            return ConsumeOutcome::NoReference { average };
        };
        let aligned = target.timestamp;

        if aligned <= self.last_scored_timestamp {
            debug!(
                timestamp = frame.timestamp,
                aligned,
                watermark = self.last_scored_timestamp,
                "stale alignment skipped"
            );
            return ConsumeOutcome::Stale {
                aligned,
                watermark: self.last_scored_timestamp,
                average,
            };
        }

        let Some(expected) = target.primary() else {
            debug!(aligned, "reference frame has no pose");
            return ConsumeOutcome::Degenerate { aligned, average };
        };

        let threshold = self.config.min_confidence;
        let live = live.confident(threshold);
        let expected = expected.confident(threshold);
        let score = match compare_poses(&live, &expected) {
            Ok(score) => score,
            Err(err) => {
                debug!(aligned, %err, "frame skipped");
                return ConsumeOutcome::Degenerate { aligned, average };
            }
        };

        let sample = ScoredSample::new(aligned, score);
        self.samples.push(sample);
        self.last_scored_timestamp = aligned;
        self.current_average = window_average(
            &self.samples,
            aligned - self.config.window_size_ms,
            aligned,
        );
        trace!(
            timestamp = frame.timestamp,
            aligned,
            score,
            average = self.current_average,
            "frame scored"
        );

        ConsumeOutcome::Scored {
            sample,
            average: self.current_average,
        }
    }

    /// Lazily score `frames`, yielding each recorded sample.
    ///
    /// Frames are consumed only as the returned iterator is advanced; skipped
    /// frames yield nothing.
    pub fn score_stream<I>(&mut self, frames: I) -> ScoredStream<'_, I::IntoIter>
    where
        I: IntoIterator<Item = TimestampedPose>,
    {
        ScoredStream {
            scorer: self,
            frames: frames.into_iter(),
        }
    }

    /// Average score inside each configured interval, in interval order.
    ///
    /// Intervals with no samples report `0.0`.
    #[must_use]
    pub fn compute_interval_scores(&self) -> Vec<f64> {
        interval_averages(&self.samples, &self.intervals)
    }

    /// Running average as of the last scored frame.
    #[must_use]
    pub const fn current_average(&self) -> f64 {
        self.current_average
    }

    /// Highest reference timestamp scored so far (`0.0` before any).
    #[must_use]
    pub const fn last_scored_timestamp(&self) -> f64 {
        self.last_scored_timestamp
    }

    /// All recorded samples in timestamp order.
    #[must_use]
    pub fn scored_samples(&self) -> &[ScoredSample] {
        &self.samples
    }

    /// The reference track.
    #[must_use]
    pub const fn reference(&self) -> &ReferenceSequence {
        &self.reference
    }

    /// The configured intervals.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Get reference to configuration.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Forget all scores so the same level can be performed again.
    pub fn reset(&mut self) {
        debug!(samples = self.samples.len(), "scoring session reset");
        self.samples.clear();
        self.last_scored_timestamp = 0.0;
        self.current_average = 0.0;
    }
}

/// Iterator returned by [`SessionScorer::score_stream`].
///
/// In-order and single-pass: once a frame has been pulled from the source it
/// has been consumed by the scorer.
#[derive(Debug)]
pub struct ScoredStream<'a, I> {
    scorer: &'a mut SessionScorer,
    frames: I,
}

impl<I> Iterator for ScoredStream<'_, I>
where
    I: Iterator<Item = TimestampedPose>,
{
    type Item = ScoredSample;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames
            .by_ref()
            .find_map(|frame| self.scorer.consume_detailed(&frame).sample())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.frames.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Keypoint, Pose};
    use approx::assert_relative_eq;

    fn pose(spread: f64) -> Pose {
        Pose::new(vec![
            Keypoint::new("left_shoulder", -1.0, 0.0, 0.9),
            Keypoint::new("right_shoulder", 1.0, 0.0, 0.9),
            Keypoint::new("left_wrist", -1.0 - spread, 1.0, 0.9),
            Keypoint::new("right_wrist", 1.0 + spread, 1.0, 0.9),
        ])
        .unwrap()
    }

    fn reference(timestamps: &[f64]) -> ReferenceSequence {
        ReferenceSequence::new(
            timestamps
                .iter()
                .map(|&t| TimestampedPose::single(t, pose(0.0)))
                .collect(),
        )
        .unwrap()
    }

    fn scorer(timestamps: &[f64]) -> SessionScorer {
        SessionScorer::new(reference(timestamps), Vec::new(), ScoringConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        let config = ScoringConfig::default().with_window_size_ms(0.0);
        assert!(SessionScorer::new(reference(&[100.0]), Vec::new(), config).is_err());
    }

    #[test]
    fn test_empty_reference_is_noop() {
        let mut scorer =
            SessionScorer::new(ReferenceSequence::empty(), Vec::new(), ScoringConfig::default())
                .unwrap();

        for t in [0.0, 100.0, 50.0, 1e9] {
            let outcome = scorer.consume_detailed(&TimestampedPose::single(t, pose(1.0)));
            assert_eq!(outcome, ConsumeOutcome::NoReference { average: 0.0 });
        }
        assert!(scorer.scored_samples().is_empty());
    }

    #[test]
    fn test_monotonic_gating() {
        let mut scorer = scorer(&[50.0, 100.0, 200.0]);

        let outcomes: Vec<ConsumeOutcome> = [100.0, 101.0, 50.0, 200.0]
            .iter()
            .map(|&t| scorer.consume_detailed(&TimestampedPose::single(t, pose(0.5))))
            .collect();

        assert!(outcomes[0].is_scored());
        assert!(matches!(
            outcomes[1],
            ConsumeOutcome::Stale { aligned, watermark, .. }
                if aligned == 100.0 && watermark == 100.0
        ));
        assert!(matches!(outcomes[2], ConsumeOutcome::Stale { aligned, .. } if aligned == 50.0));
        assert!(outcomes[3].is_scored());

        let timestamps: Vec<f64> = scorer.scored_samples().iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![100.0, 200.0]);
        assert_eq!(scorer.last_scored_timestamp(), 200.0);
    }

    #[test]
    fn test_reference_at_zero_never_scored() {
        // The watermark starts at 0, so a reference frame at t=0 is stale.
        let mut scorer = scorer(&[0.0, 100.0]);
        let outcome = scorer.consume_detailed(&TimestampedPose::single(10.0, pose(0.0)));
        assert!(matches!(outcome, ConsumeOutcome::Stale { aligned, .. } if aligned == 0.0));
    }

    #[test]
    fn test_duplicate_reference_timestamps_score_first_pose() {
        let reference = ReferenceSequence::new(vec![
            TimestampedPose::single(100.0, pose(0.0)),
            TimestampedPose::single(100.0, pose(2.0)),
            TimestampedPose::single(300.0, pose(0.0)),
        ])
        .unwrap();
        let mut scorer =
            SessionScorer::new(reference, Vec::new(), ScoringConfig::default()).unwrap();

        // Approaching the run from above must still compare against its first pose.
        let average = scorer.consume(&TimestampedPose::single(180.0, pose(0.0)));
        assert_relative_eq!(average, 0.0, epsilon = 1e-12);
        assert_eq!(scorer.last_scored_timestamp(), 100.0);
    }

    #[test]
    fn test_running_average() {
        let mut scorer = scorer(&[100.0, 200.0]);

        let first = scorer.consume(&TimestampedPose::single(100.0, pose(0.0)));
        assert_relative_eq!(first, 0.0, epsilon = 1e-12);

        let second = scorer.consume(&TimestampedPose::single(200.0, pose(1.0)));
        let expected = scorer.scored_samples()[1].score / 2.0;
        assert!(second > 0.0);
        assert_relative_eq!(second, expected, epsilon = 1e-12);
        assert_relative_eq!(scorer.current_average(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_unscorable_frames_leave_state_unchanged() {
        let mut scorer = scorer(&[100.0, 200.0]);
        scorer.consume(&TimestampedPose::single(100.0, pose(1.0)));
        let average = scorer.current_average();

        let no_pose = TimestampedPose::new(200.0, Vec::new());
        assert_eq!(scorer.consume_detailed(&no_pose), ConsumeOutcome::NoPose { average });

        let empty_pose = TimestampedPose::single(200.0, Pose::default());
        assert_eq!(scorer.consume_detailed(&empty_pose), ConsumeOutcome::NoPose { average });

        let nan = TimestampedPose::single(f64::NAN, pose(0.0));
        assert_eq!(scorer.consume_detailed(&nan), ConsumeOutcome::NoPose { average });

        let collapsed = Pose::new(vec![
            Keypoint::new("left_shoulder", 3.0, 3.0, 0.9),
            Keypoint::new("right_shoulder", 3.0, 3.0, 0.9),
        ])
        .unwrap();
        let outcome = scorer.consume_detailed(&TimestampedPose::single(200.0, collapsed));
        assert_eq!(outcome, ConsumeOutcome::Degenerate { aligned: 200.0, average });

        assert_eq!(scorer.scored_samples().len(), 1);
        assert_eq!(scorer.last_scored_timestamp(), 100.0);

        // The skipped reference frame is still available.
        assert!(scorer
            .consume_detailed(&TimestampedPose::single(200.0, pose(0.0)))
            .is_scored());
    }

    #[test]
    fn test_low_confidence_keypoints_ignored() {
        let mut scorer = scorer(&[100.0]);
        let mut keypoints: Vec<Keypoint> = pose(0.0).into();
        keypoints.push(Keypoint::new("nose", 40.0, -90.0, 0.1));
        let live = Pose::new(keypoints).unwrap();

        let average = scorer.consume(&TimestampedPose::single(100.0, live));
        assert_relative_eq!(average, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interval_scores() {
        let intervals = vec![
            Interval::new(0.0, 150.0).unwrap(),
            Interval::new(150.0, 400.0).unwrap(),
            Interval::new(500.0, 600.0).unwrap(),
        ];
        let reference = reference(&[100.0, 200.0, 300.0]);
        let mut scorer =
            SessionScorer::new(reference, intervals, ScoringConfig::default()).unwrap();

        for (t, spread) in [(100.0, 0.0), (200.0, 1.0), (300.0, 2.0)] {
            scorer.consume(&TimestampedPose::single(t, pose(spread)));
        }

        let samples = scorer.scored_samples();
        let scores = scorer.compute_interval_scores();
        assert_eq!(scores.len(), 3);
        assert_relative_eq!(scores[0], samples[0].score, epsilon = 1e-12);
        assert_relative_eq!(
            scores[1],
            (samples[1].score + samples[2].score) / 2.0,
            epsilon = 1e-12
        );
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_score_stream_is_lazy() {
        let mut scorer = scorer(&[100.0, 200.0, 300.0]);
        let frames = vec![
            TimestampedPose::single(100.0, pose(0.0)),
            TimestampedPose::single(110.0, pose(0.0)),
            TimestampedPose::new(150.0, Vec::new()),
            TimestampedPose::single(200.0, pose(1.0)),
            TimestampedPose::single(300.0, pose(2.0)),
        ];

        let mut stream = scorer.score_stream(frames);
        let first = stream.next().unwrap();
        assert_eq!(first.timestamp, 100.0);
        let second = stream.next().unwrap();
        assert_eq!(second.timestamp, 200.0);
        drop(stream);

        // The 300 ms frame was never pulled.
        assert_eq!(scorer.scored_samples().len(), 2);
        assert_eq!(scorer.last_scored_timestamp(), 200.0);
    }

    #[test]
    fn test_reset() {
        let mut scorer = scorer(&[100.0, 200.0]);
        let collected: Vec<ScoredSample> = scorer
            .score_stream(vec![
                TimestampedPose::single(100.0, pose(1.0)),
                TimestampedPose::single(200.0, pose(1.0)),
            ])
            .collect();
        assert_eq!(collected.len(), 2);

        scorer.reset();
        assert!(scorer.scored_samples().is_empty());
        assert_eq!(scorer.current_average(), 0.0);
        assert_eq!(scorer.last_scored_timestamp(), 0.0);
        assert_eq!(scorer.reference().len(), 2);
        assert!(scorer.consume_detailed(&TimestampedPose::single(100.0, pose(0.0))).is_scored());
    }
}
