use serde::{Deserialize, Serialize};

/// Streaming mean and variance (Welford's algorithm).
///
/// Accumulators are folded row by row during aggregation, so the values are
/// never materialized. Variance is the population variance.
///
/// # Examples
///
/// ```
/// use draftwise_stats::moments::RunningMoments;
///
/// let mut m = RunningMoments::default();
/// for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     m.push(v);
/// }
/// assert_eq!(m.count(), 8);
/// assert!((m.mean() - 5.0).abs() < 1e-12);
/// assert!((m.variance() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningMoments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    /// Adds a value. Non-finite values are ignored.
    #[expect(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean of the pushed values, `0.0` when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance, `0.0` with fewer than two values.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / self.count as f64).max(0.0)
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Mean as an `Option`, `None` when nothing was pushed.
    #[must_use]
    pub fn mean_if_any(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.mean)
    }
}
