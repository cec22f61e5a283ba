//! Per-bucket rate metrics and their z-scored composites.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::{Checkpoint, Objective};

/// A rate computed for every champion-role bucket and z-scored within its role.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[display("winrate_adjusted")]
    WinrateAdjusted,
    #[display("lane_10")]
    Lane10,
    #[display("lane_15")]
    Lane15,
    #[display("lane_20")]
    Lane20,
    #[display("lane_25")]
    Lane25,
    /// Standard deviation of the per-game mean lane composite.
    #[display("lane_volatility")]
    LaneVolatility,
    #[display("herald_delta")]
    HeraldDelta,
    #[display("herald_rate")]
    HeraldRate,
    #[display("grubs_delta")]
    GrubsDelta,
    #[display("grubs_rate")]
    GrubsRate,
    #[display("dragon_delta")]
    DragonDelta,
    #[display("dragon_rate")]
    DragonRate,
    #[display("baron_delta")]
    BaronDelta,
    #[display("baron_rate")]
    BaronRate,
    #[display("atakhan_delta")]
    AtakhanDelta,
    #[display("atakhan_rate")]
    AtakhanRate,
    #[display("plates_per_game")]
    PlatesPerGame,
    #[display("first_tower_rate")]
    FirstTowerRate,
    #[display("first_mid_tower_rate")]
    FirstMidTowerRate,
    #[display("damage_per_minute")]
    DamagePerMinute,
    #[display("mitigated_per_minute")]
    MitigatedPerMinute,
    #[display("taken_per_minute")]
    TakenPerMinute,
    #[display("vision_per_minute")]
    VisionPerMinute,
    #[display("kill_participation")]
    KillParticipation,
}

impl Metric {
    pub const ALL: [Self; 24] = [
        Self::WinrateAdjusted,
        Self::Lane10,
        Self::Lane15,
        Self::Lane20,
        Self::Lane25,
        Self::LaneVolatility,
        Self::HeraldDelta,
        Self::HeraldRate,
        Self::GrubsDelta,
        Self::GrubsRate,
        Self::DragonDelta,
        Self::DragonRate,
        Self::BaronDelta,
        Self::BaronRate,
        Self::AtakhanDelta,
        Self::AtakhanRate,
        Self::PlatesPerGame,
        Self::FirstTowerRate,
        Self::FirstMidTowerRate,
        Self::DamagePerMinute,
        Self::MitigatedPerMinute,
        Self::TakenPerMinute,
        Self::VisionPerMinute,
        Self::KillParticipation,
    ];

    #[must_use]
    pub const fn lane(checkpoint: Checkpoint) -> Self {
        match checkpoint {
            Checkpoint::At10 => Self::Lane10,
            Checkpoint::At15 => Self::Lane15,
            Checkpoint::At20 => Self::Lane20,
            Checkpoint::At25 => Self::Lane25,
        }
    }

    #[must_use]
    pub const fn objective_delta(objective: Objective) -> Self {
        match objective {
            Objective::Herald => Self::HeraldDelta,
            Objective::Grubs => Self::GrubsDelta,
            Objective::Dragon => Self::DragonDelta,
            Objective::Baron => Self::BaronDelta,
            Objective::Atakhan => Self::AtakhanDelta,
        }
    }

    #[must_use]
    pub const fn objective_rate(objective: Objective) -> Self {
        match objective {
            Objective::Herald => Self::HeraldRate,
            Objective::Grubs => Self::GrubsRate,
            Objective::Dragon => Self::DragonRate,
            Objective::Baron => Self::BaronRate,
            Objective::Atakhan => Self::AtakhanRate,
        }
    }
}

/// Values keyed by [`Metric`]. Metrics a bucket has no data for are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricVector(BTreeMap<Metric, f64>);

impl MetricVector {
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(&metric).copied()
    }

    /// Stores `value` when it is finite; non-finite values leave the metric absent.
    pub fn set(&mut self, metric: Metric, value: f64) {
        if value.is_finite() {
            self.0.insert(metric, value);
        } else {
            self.0.remove(&metric);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }

    /// Weighted sum over `weights`; absent metrics count as zero.
    #[must_use]
    pub fn blend(&self, weights: &MetricBlend) -> f64 {
        weights
            .iter()
            .map(|(metric, weight)| weight * self.get(*metric).unwrap_or(0.0))
            .sum()
    }
}

impl FromIterator<(Metric, f64)> for MetricVector {
    fn from_iter<T: IntoIterator<Item = (Metric, f64)>>(iter: T) -> Self {
        let mut vector = Self::default();
        for (metric, value) in iter {
            vector.set(metric, value);
        }
        vector
    }
}

/// A linear combination of metrics.
pub type MetricBlend = BTreeMap<Metric, f64>;

/// Z-scored composite components of one champion-role bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub priority: f64,
    pub teamfight: f64,
    pub scaling: f64,
    pub frontline: f64,
    pub lane_10: f64,
    pub lane_15: f64,
    pub lane_20: f64,
    pub lane_25: f64,
    pub lane_volatility: f64,
}

impl Components {
    /// Mean of the four lane checkpoints.
    #[must_use]
    pub fn lane_mean(&self) -> f64 {
        (self.lane_10 + self.lane_15 + self.lane_20 + self.lane_25) / 4.0
    }

    pub(crate) fn is_finite(&self) -> bool {
        [
            self.priority,
            self.teamfight,
            self.scaling,
            self.frontline,
            self.lane_10,
            self.lane_15,
            self.lane_20,
            self.lane_25,
            self.lane_volatility,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_vector_skips_non_finite() {
        let mut vector = MetricVector::default();
        vector.set(Metric::Lane10, 1.5);
        vector.set(Metric::Lane15, f64::NAN);
        assert_eq!(vector.get(Metric::Lane10), Some(1.5));
        assert_eq!(vector.get(Metric::Lane15), None);

        vector.set(Metric::Lane10, f64::INFINITY);
        assert_eq!(vector.get(Metric::Lane10), None);
    }

    #[test]
    fn test_blend_treats_absent_as_zero() {
        let vector =
            MetricVector::from_iter([(Metric::Lane10, 2.0), (Metric::DamagePerMinute, -1.0)]);
        let blend = MetricBlend::from([
            (Metric::Lane10, 0.5),
            (Metric::DamagePerMinute, 0.25),
            (Metric::VisionPerMinute, 10.0),
        ]);
        assert!((vector.blend(&blend) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_serializes_as_object() {
        let vector = MetricVector::from_iter([(Metric::FirstTowerRate, 0.25)]);
        let json = serde_json::to_string(&vector).unwrap();
        assert_eq!(json, r#"{"first_tower_rate":0.25}"#);
    }
}
