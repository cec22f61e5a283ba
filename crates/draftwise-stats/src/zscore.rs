use crate::descriptive::DescriptiveStats;

/// Standard deviations below this are treated as zero spread.
pub const STD_DEV_EPSILON: f64 = 1e-9;

/// Converts raw values into z-scores relative to a reference population.
///
/// A population with zero spread (or no values at all) maps every value to
/// `0.0`, so a metric that does not vary inside a group never contributes
/// to downstream composites.
///
/// # Examples
///
/// ```
/// use draftwise_stats::zscore::ZScorer;
///
/// let scorer = ZScorer::from_values([1.0, 2.0, 3.0]);
/// assert_eq!(scorer.score(2.0), 0.0);
/// assert!(scorer.score(3.0) > 0.0);
///
/// let flat = ZScorer::from_values([4.0, 4.0]);
/// assert_eq!(flat.score(100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScorer {
    mean: f64,
    std_dev: f64,
}

impl ZScorer {
    /// A scorer that maps everything to zero.
    pub const NEUTRAL: Self = Self {
        mean: 0.0,
        std_dev: 0.0,
    };

    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        DescriptiveStats::new(values).map_or(Self::NEUTRAL, |stats| Self::from_stats(&stats))
    }

    #[must_use]
    pub fn from_stats(stats: &DescriptiveStats) -> Self {
        Self {
            mean: stats.mean,
            std_dev: stats.std_dev,
        }
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Returns the z-score of `value`, or `0.0` when the population has no spread
    /// or `value` is not finite.
    #[must_use]
    pub fn score(&self, value: f64) -> f64 {
        if self.std_dev < STD_DEV_EPSILON || !value.is_finite() {
            return 0.0;
        }
        (value - self.mean) / self.std_dev
    }
}
