//! Score aggregation over time.
//!
//! Scored samples are append-only and ordered by timestamp, so a trailing
//! window is located with two binary searches. Interval queries run rarely
//! and use a plain filter.

use std::ops::Range;

use crate::pose::{Interval, ScoredSample};

/// Index range of samples with `start <= timestamp <= end`.
///
/// `samples` must be ordered by timestamp.
#[must_use]
pub fn window_range(samples: &[ScoredSample], start: f64, end: f64) -> Range<usize> {
    let lo = samples.partition_point(|s| s.timestamp < start);
    let hi = samples.partition_point(|s| s.timestamp <= end);
    lo..hi.max(lo)
}

/// Mean score of samples inside `[start, end]`, or `0.0` if there are none.
///
/// `samples` must be ordered by timestamp.
///
/// # Example
///
/// ```
/// use motion_scoring::{aggregate::window_average, ScoredSample};
///
/// let samples = [
///     ScoredSample::new(0.0, 10.0),
///     ScoredSample::new(2000.0, 20.0),
///     ScoredSample::new(6000.0, 30.0),
/// ];
/// assert_eq!(window_average(&samples, 1000.0, 6000.0), 25.0);
/// ```
#[must_use]
pub fn window_average(samples: &[ScoredSample], start: f64, end: f64) -> f64 {
    mean_score(&samples[window_range(samples, start, end)])
}

/// Mean score of samples inside `interval`, bounds included, or `0.0`.
///
/// Does not rely on sample order.
#[must_use]
pub fn interval_average(samples: &[ScoredSample], interval: &Interval) -> f64 {
    let (sum, count) = samples
        .iter()
        .filter(|s| interval.contains(s.timestamp))
        .fold((0.0, 0usize), |(sum, count), s| (sum + s.score, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// [`interval_average`] for each interval, in order.
#[must_use]
pub fn interval_averages(samples: &[ScoredSample], intervals: &[Interval]) -> Vec<f64> {
    intervals
        .iter()
        .map(|interval| interval_average(samples, interval))
        .collect()
}

/// Mean score of a slice, `0.0` when empty.
#[must_use]
pub fn mean_score(samples: &[ScoredSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.score).sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples(pairs: &[(f64, f64)]) -> Vec<ScoredSample> {
        pairs
            .iter()
            .map(|&(t, s)| ScoredSample::new(t, s))
            .collect()
    }

    #[test]
    fn test_window_excludes_old_samples() {
        let s = samples(&[(0.0, 10.0), (2000.0, 20.0), (6000.0, 30.0)]);
        assert_eq!(window_range(&s, 1000.0, 6000.0), 1..3);
        assert_relative_eq!(window_average(&s, 1000.0, 6000.0), 25.0);
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let s = samples(&[(1000.0, 10.0), (2000.0, 20.0), (3000.0, 60.0)]);
        assert_relative_eq!(window_average(&s, 1000.0, 3000.0), 30.0);
        assert_relative_eq!(window_average(&s, 1000.0, 2999.0), 15.0);
    }

    #[test]
    fn test_empty_window() {
        let s = samples(&[(0.0, 10.0), (9000.0, 20.0)]);
        assert_eq!(window_range(&s, 1000.0, 5000.0), 1..1);
        assert_eq!(window_average(&s, 1000.0, 5000.0), 0.0);
        assert_eq!(window_average(&[], 0.0, 5000.0), 0.0);

        // Inverted bounds select nothing.
        assert!(window_range(&s, 5000.0, 1000.0).is_empty());
    }

    #[test]
    fn test_interval_average() {
        let s = samples(&[(0.0, 10.0), (2000.0, 20.0), (4000.0, 40.0)]);
        let interval = Interval::new(0.0, 3000.0).unwrap();
        assert_relative_eq!(interval_average(&s, &interval), 15.0);

        let late = Interval::new(5000.0, 8000.0).unwrap();
        assert_eq!(interval_average(&s, &late), 0.0);
    }

    #[test]
    fn test_interval_averages_in_order() {
        let s = samples(&[(0.0, 10.0), (2000.0, 20.0), (4000.0, 40.0)]);
        let intervals = vec![
            Interval::new(3000.0, 5000.0).unwrap(),
            Interval::new(0.0, 4000.0).unwrap(),
        ];
        let averages = interval_averages(&s, &intervals);
        assert_relative_eq!(averages[0], 40.0);
        assert_relative_eq!(averages[1], 70.0 / 3.0);
    }
}
