/// Smallest prior mean accepted by [`BetaBinomialPrior`].
///
/// Prior means are clamped into `[PRIOR_MEAN_EPSILON, 1 - PRIOR_MEAN_EPSILON]`
/// so the posterior mean can never reach exactly 0 or 1.
pub const PRIOR_MEAN_EPSILON: f64 = 1e-3;

/// Beta-Binomial prior used to shrink an observed success rate toward a
/// reference average.
///
/// The prior behaves like `strength` pseudo-observations at rate `mean`:
///
/// ```text
/// posterior = (successes + strength · mean) / (trials + strength)
/// ```
///
/// With no trials the posterior equals the (clamped) prior mean; as trials grow
/// the posterior converges to the observed rate.
///
/// # Examples
///
/// ```
/// use draftwise_stats::smoothing::BetaBinomialPrior;
///
/// let prior = BetaBinomialPrior::new(0.5, 16.0);
/// assert_eq!(prior.posterior_mean(0, 0), 0.5);
/// // 4/4 wins is pulled strongly toward 0.5
/// assert_eq!(prior.posterior_mean(4, 4), 0.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaBinomialPrior {
    mean: f64,
    strength: f64,
}

impl BetaBinomialPrior {
    /// Creates a prior centered at `mean` with `strength` pseudo-observations.
    ///
    /// `mean` is clamped into the open unit interval; a non-positive or
    /// non-finite `strength` is replaced by the smallest positive strength.
    #[must_use]
    pub fn new(mean: f64, strength: f64) -> Self {
        let mean = if mean.is_finite() { mean } else { 0.5 };
        let strength = if strength.is_finite() && strength > 0.0 {
            strength
        } else {
            f64::MIN_POSITIVE
        };
        Self {
            mean: mean.clamp(PRIOR_MEAN_EPSILON, 1.0 - PRIOR_MEAN_EPSILON),
            strength,
        }
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Posterior mean after observing `successes` out of `trials`.
    ///
    /// `successes` above `trials` are capped at `trials`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn posterior_mean(&self, successes: u64, trials: u64) -> f64 {
        let successes = successes.min(trials) as f64;
        let trials = trials as f64;
        (successes + self.strength * self.mean) / (trials + self.strength)
    }

    /// Relative weight of the observed data in the posterior, `n / (n + strength)`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sample_weight(&self, trials: u64) -> f64 {
        let trials = trials as f64;
        trials / (trials + self.strength)
    }
}
