//! Box-plot summaries (quartiles, IQR fences, outliers)

use serde::{Deserialize, Serialize};
use txwatch_core::Observation;

/// Default whisker length in IQRs (Tukey fences)
pub const DEFAULT_FENCE_MULTIPLIER: f64 = 1.5;

// ============================================================================
// STRATEGY PATTERN: Quantile Estimation
// ============================================================================

/// Strategy trait for picking a quantile out of sorted values
pub trait QuantileEstimator: Send + Sync {
    /// `sorted` is ascending and non-empty; `p` is in `[0, 1]`.
    fn quantile(&self, sorted: &[f64], p: f64) -> f64;
}

/// Nearest-rank quantile: the element at `floor(n * p)`, never interpolated.
///
/// This is the box-plot convention used across the dashboard. For
/// `[1..=10]` it yields `q1 = 3` and `q3 = 8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestRank;

impl QuantileEstimator for NearestRank {
    fn quantile(&self, sorted: &[f64], p: f64) -> f64 {
        let n = sorted.len();
        let idx = ((n as f64 * p).floor() as usize).min(n - 1);
        sorted[idx]
    }
}

/// Linearly interpolated quantile over rank `p * (n - 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolation;

impl QuantileEstimator for LinearInterpolation {
    fn quantile(&self, sorted: &[f64], p: f64) -> f64 {
        let n = sorted.len();
        if n == 1 {
            return sorted[0];
        }

        let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (lower + 1).min(n - 1);
        let frac = rank - lower as f64;

        lerp(sorted[lower], sorted[upper], frac)
    }
}

/// Point `t` of the way from `a` to `b` (`a <= b`), finite for any finite
/// inputs and `t` in `[0, 1]`. The result stays inside `[a, b]`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let point = if (a < 0.0) == (b < 0.0) {
        // Same sign: the difference cannot overflow
        a + (b - a) * t
    } else {
        a * (1.0 - t) + b * t
    };
    point.max(a).min(b)
}

/// Mean of ascending `sorted`; survives sums beyond `f64::MAX`
fn mean_of(sorted: &[f64]) -> f64 {
    let n = sorted.len() as f64;
    let sum: f64 = sorted.iter().sum();
    let mean = if sum.is_finite() {
        sum / n
    } else {
        sorted.iter().map(|v| v / n).sum()
    };
    mean.max(sorted[0]).min(sorted[sorted.len() - 1])
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Box-plot-ready summary of a set of observations.
///
/// `min` and `max` are the whisker ends: the extremes of the values inside
/// the fences. `mean` covers every observation, outliers included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub outliers: Vec<Observation>,
    pub sample_size: usize,
}

impl SummaryStats {
    pub fn is_empty(&self) -> bool {
        self.sample_size == 0
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whisker span (non-outlier range)
    pub fn whisker_range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Full value range including outliers
    pub fn full_range(&self) -> (f64, f64) {
        self.outliers
            .iter()
            .fold((self.min, self.max), |(lo, hi), o| (lo.min(o.value), hi.max(o.value)))
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }
}

/// Summary engine configuration.
///
/// The default (nearest-rank quartiles, 1.5 IQR fences) is what
/// [`compute_summary`] uses.
#[derive(Debug, Clone)]
pub struct SummaryStatsEngine<Q: QuantileEstimator = NearestRank> {
    pub fence_multiplier: f64,
    pub estimator: Q,
}

impl Default for SummaryStatsEngine<NearestRank> {
    fn default() -> Self {
        Self {
            fence_multiplier: DEFAULT_FENCE_MULTIPLIER,
            estimator: NearestRank,
        }
    }
}

impl SummaryStatsEngine<NearestRank> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Q: QuantileEstimator> SummaryStatsEngine<Q> {
    pub fn fence_multiplier(mut self, multiplier: f64) -> Self {
        self.fence_multiplier = multiplier;
        self
    }

    /// Swap the quantile strategy
    pub fn estimator<R: QuantileEstimator>(self, estimator: R) -> SummaryStatsEngine<R> {
        SummaryStatsEngine {
            fence_multiplier: self.fence_multiplier,
            estimator,
        }
    }

    /// Summarize observations. The input is never reordered; values are
    /// sorted in a private copy. Empty input yields an all-zero summary.
    pub fn compute_summary(&self, observations: &[Observation]) -> SummaryStats {
        debug_assert!(
            observations.iter().all(Observation::is_finite),
            "summary input must be finite; sanitize before summarizing"
        );

        let n = observations.len();
        if n == 0 {
            return SummaryStats::default();
        }

        let mut sorted: Vec<f64> = observations.iter().map(|o| o.value).collect();
        sorted.sort_by(f64::total_cmp);

        let median = if n % 2 == 0 {
            lerp(sorted[n / 2 - 1], sorted[n / 2], 0.5)
        } else {
            sorted[n / 2]
        };

        let q1 = self.estimator.quantile(&sorted, 0.25);
        let q3 = self.estimator.quantile(&sorted, 0.75);

        let iqr = q3 - q1;
        let lower_fence = q1 - self.fence_multiplier * iqr;
        let upper_fence = q3 + self.fence_multiplier * iqr;

        let outliers: Vec<Observation> = observations
            .iter()
            .filter(|o| o.value < lower_fence || o.value > upper_fence)
            .cloned()
            .collect();

        // Sorted, so the first/last in-fence values are the whisker ends
        let min = sorted
            .iter()
            .copied()
            .find(|&v| v >= lower_fence)
            .unwrap_or(sorted[0]);
        let max = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= upper_fence)
            .unwrap_or(sorted[n - 1]);

        let mean = mean_of(&sorted);

        tracing::debug!(
            sample_size = n,
            outliers = outliers.len(),
            q1,
            median,
            q3,
            "computed summary"
        );

        SummaryStats {
            min,
            q1,
            median,
            q3,
            max,
            mean,
            lower_fence,
            upper_fence,
            outliers,
            sample_size: n,
        }
    }
}

/// Summarize with nearest-rank quartiles and 1.5 IQR fences
pub fn compute_summary(observations: &[Observation]) -> SummaryStats {
    SummaryStatsEngine::<NearestRank>::default().compute_summary(observations)
}

/// Summarize bare values
pub fn compute_summary_values(values: &[f64]) -> SummaryStats {
    compute_summary(&txwatch_core::observations_from_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use txwatch_core::{
        observations_from_values, MockConfig, MockProvider, ObservationProvider, ObservationQuery,
        TransactionMetric,
    };

    fn assert_ordered(stats: &SummaryStats) {
        assert!(stats.min <= stats.q1, "min {} > q1 {}", stats.min, stats.q1);
        assert!(stats.q1 <= stats.median, "q1 {} > median {}", stats.q1, stats.median);
        assert!(stats.median <= stats.q3, "median {} > q3 {}", stats.median, stats.q3);
        assert!(stats.q3 <= stats.max, "q3 {} > max {}", stats.q3, stats.max);
    }

    #[test]
    fn test_nearest_rank_quartiles() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let stats = compute_summary_values(&values);

        assert_eq!(stats.q1, 3.0);
        assert_eq!(stats.q3, 8.0);
        assert_eq!(stats.median, 5.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert_eq!(stats.mean, 5.5);
        assert_eq!(stats.sample_size, 10);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_odd_length_median() {
        let stats = compute_summary_values(&[9.0, 1.0, 5.0]);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.q1, 1.0);
        assert_eq!(stats.q3, 9.0);
    }

    #[test]
    fn test_outlier_detection() {
        let stats = compute_summary_values(&[10.0, 12.0, 11.0, 13.0, 12.0, 11.0, 100.0]);

        assert_eq!(stats.q1, 11.0);
        assert_eq!(stats.q3, 13.0);
        assert_eq!(stats.lower_fence, 8.0);
        assert_eq!(stats.upper_fence, 16.0);
        assert_eq!(stats.outliers.len(), 1);
        assert_eq!(stats.outliers[0].value, 100.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 13.0);
        assert_eq!(stats.full_range(), (10.0, 100.0));
        assert!(stats.is_outlier(100.0));
        // Mean still counts the outlier
        assert!((stats.mean - 169.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_outliers_keep_metadata_and_input_order() {
        let obs = vec![
            Observation::new(-50.0).with_id("low"),
            Observation::new(1.0),
            Observation::new(2.0),
            Observation::new(2.0),
            Observation::new(3.0),
            Observation::new(80.0).with_id("high"),
        ];
        let stats = compute_summary(&obs);

        let ids: Vec<Option<&str>> = stats.outliers.iter().map(|o| o.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("low"), Some("high")]);
    }

    #[test]
    fn test_empty_input() {
        let stats = compute_summary(&[]);
        assert_eq!(stats.sample_size, 0);
        assert!(stats.is_empty());
        assert!(stats.outliers.is_empty());
        assert_eq!(stats, SummaryStats::default());
    }

    #[test]
    fn test_single_value() {
        let stats = compute_summary_values(&[4.2]);
        assert_eq!(stats.min, 4.2);
        assert_eq!(stats.q1, 4.2);
        assert_eq!(stats.median, 4.2);
        assert_eq!(stats.q3, 4.2);
        assert_eq!(stats.max, 4.2);
        assert_eq!(stats.iqr(), 0.0);
    }

    #[test]
    fn test_input_not_mutated_and_idempotent() {
        let obs = observations_from_values(&[5.0, 3.0, 9.0, 1.0, 7.0]);
        let snapshot = obs.clone();

        let first = compute_summary(&obs);
        let second = compute_summary(&obs);

        assert_eq!(obs, snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ordering_invariant_holds() {
        let fixtures: Vec<Vec<f64>> = vec![
            vec![1.0],
            vec![2.0, 1.0],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![-3.0, 0.0, 0.5, 9.0, 12.0, -40.0, 7.0],
            vec![0.1, 0.2, 0.2, 0.3, 50.0, 51.0, 52.0, 53.0],
            (0..101).map(|i| ((i * 37) % 101) as f64).collect(),
        ];

        for values in fixtures {
            assert_ordered(&compute_summary_values(&values));
        }

        let provider = MockProvider::new(MockConfig::default().transaction_count(300));
        for metric in TransactionMetric::all() {
            let obs = provider
                .fetch_observations(&ObservationQuery::new(*metric))
                .unwrap();
            assert_ordered(&compute_summary(&obs));
        }
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let stats = compute_summary_values(&[f64::MAX, f64::MAX]);
        assert_eq!(stats.median, f64::MAX);
        assert_eq!(stats.mean, f64::MAX);
        assert_ordered(&stats);

        let stats = compute_summary_values(&[-f64::MAX, f64::MAX]);
        assert_eq!(stats.median, 0.0);
        assert_eq!(stats.mean, 0.0);
        assert_ordered(&stats);

        let stats = compute_summary_values(&[f64::MAX, f64::MAX, f64::MAX, 1.0]);
        assert!(stats.mean.is_finite());
        assert_ordered(&stats);

        let engine = SummaryStatsEngine::new().estimator(LinearInterpolation);
        let stats = engine.compute_summary(&observations_from_values(&[-f64::MAX, f64::MAX]));
        assert!(stats.q1.is_finite() && stats.q3.is_finite());
        assert_ordered(&stats);
    }

    #[test]
    fn test_linear_interpolation_strategy() {
        let engine = SummaryStatsEngine::new().estimator(LinearInterpolation);
        let stats = engine.compute_summary(&observations_from_values(&[7.0, 15.0, 36.0, 39.0, 40.0, 41.0]));

        assert_eq!(stats.q1, 20.25);
        assert_eq!(stats.median, 37.5);
        assert_eq!(stats.q3, 39.75);
    }

    #[test]
    fn test_custom_fence_multiplier() {
        let values = [10.0, 11.0, 11.0, 12.0, 12.0, 13.0, 20.0];
        assert_eq!(compute_summary_values(&values).outliers.len(), 1);

        let wide = SummaryStatsEngine::new().fence_multiplier(5.0);
        let stats = wide.compute_summary(&observations_from_values(&values));
        assert!(stats.outliers.is_empty());
        assert_eq!(stats.max, 20.0);
    }
}
