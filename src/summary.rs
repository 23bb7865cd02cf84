//! End-of-session statistics.

use crate::aggregate::mean_score;
use crate::pose::ScoredSample;
use crate::session::SessionScorer;

/// Aggregate view of a finished (or in-progress) session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Number of scored frames.
    pub samples: usize,

    /// Mean score over every scored frame.
    pub mean_score: f64,

    /// Lowest-distance sample (closest match).
    pub best: ScoredSample,

    /// Highest-distance sample.
    pub worst: ScoredSample,

    /// Fraction of reference frames that were scored, in `[0, 1]`.
    pub coverage: f64,

    /// Average per configured interval, in interval order.
    pub interval_scores: Vec<f64>,
}

impl SessionSummary {
    /// Summarize a scorer's state.
    ///
    /// Returns `None` until at least one frame has been scored.
    #[must_use]
    pub fn from_scorer(scorer: &SessionScorer) -> Option<Self> {
        let samples = scorer.scored_samples();
        let first = *samples.first()?;

        let (best, worst) = samples.iter().fold((first, first), |(best, worst), &s| {
            (
                if s.score < best.score { s } else { best },
                if s.score > worst.score { s } else { worst },
            )
        });

        let reference_len = scorer.reference().len();
        let coverage = if reference_len == 0 {
            0.0
        } else {
            samples.len() as f64 / reference_len as f64
        };

        Some(Self {
            samples: samples.len(),
            mean_score: mean_score(samples),
            best,
            worst,
            coverage,
            interval_scores: scorer.compute_interval_scores(),
        })
    }
}
