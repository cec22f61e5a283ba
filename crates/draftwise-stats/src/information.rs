//! Co-occurrence measures based on pointwise mutual information.

/// Probabilities are clipped to at least this value before taking logarithms.
pub const PROBABILITY_FLOOR: f64 = 1e-12;

/// Joint and marginal counts of two events observed over the same samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoOccurrence {
    /// Number of samples.
    pub samples: u64,
    /// Samples containing the first event.
    pub first: u64,
    /// Samples containing the second event.
    pub second: u64,
    /// Samples containing both events.
    pub both: u64,
}

impl CoOccurrence {
    /// Normalized pointwise mutual information in `[-1, 1]`.
    ///
    /// ```text
    /// pmi  = ln(p(a,b) / (p(a) · p(b)))
    /// npmi = pmi / -ln(p(a,b))
    /// ```
    ///
    /// `-1` means the events never co-occur, `0` independence, `1` that they
    /// always occur together. Returns `None` when there are no samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use draftwise_stats::information::CoOccurrence;
    ///
    /// let always = CoOccurrence { samples: 10, first: 5, second: 5, both: 5 };
    /// assert!((always.npmi().unwrap() - 1.0).abs() < 1e-9);
    ///
    /// let never = CoOccurrence { samples: 10, first: 5, second: 5, both: 0 };
    /// assert_eq!(never.npmi(), Some(-1.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn npmi(&self) -> Option<f64> {
        if self.samples == 0 {
            return None;
        }
        if self.both == 0 {
            return Some(-1.0);
        }
        let n = self.samples as f64;
        let p_a = (self.first as f64 / n).clamp(PROBABILITY_FLOOR, 1.0);
        let p_b = (self.second as f64 / n).clamp(PROBABILITY_FLOOR, 1.0);
        let p_ab = (self.both as f64 / n).clamp(PROBABILITY_FLOOR, 1.0);

        let self_information = -p_ab.ln();
        if self_information <= PROBABILITY_FLOOR {
            // Both events are present in every sample.
            return Some(1.0);
        }
        let pmi = (p_ab / (p_a * p_b)).ln();
        Some((pmi / self_information).clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_samples() {
        let c = CoOccurrence {
            samples: 0,
            first: 0,
            second: 0,
            both: 0,
        };
        assert_eq!(c.npmi(), None);
    }

    #[test]
    fn test_independent_events() {
        // p(a) = p(b) = 0.5, p(ab) = 0.25
        let c = CoOccurrence {
            samples: 100,
            first: 50,
            second: 50,
            both: 25,
        };
        assert!(c.npmi().unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_present_in_every_sample() {
        let c = CoOccurrence {
            samples: 7,
            first: 7,
            second: 7,
            both: 7,
        };
        assert_eq!(c.npmi(), Some(1.0));
    }

    #[test]
    fn test_order_independent() {
        let ab = CoOccurrence {
            samples: 200,
            first: 40,
            second: 70,
            both: 25,
        };
        let ba = CoOccurrence {
            first: 70,
            second: 40,
            ..ab
        };
        assert_eq!(ab.npmi(), ba.npmi());
    }
}
