//! Aggregation parameters.
//!
//! Everything the aggregator treats as a tuning knob lives in
//! [`AggregationConfig`]; it is serialized into the metrics bundle so that a
//! bundle always records how it was produced.

use draftwise_engine::{Role, RoleMap};
use serde::{Deserialize, Serialize};

use crate::{
    metric::{Components, Metric, MetricBlend},
    record::LaneDiff,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid configuration: `{field}` {reason}")]
pub struct ConfigError {
    pub field: String,
    pub reason: &'static str,
}

impl ConfigError {
    #[must_use]
    pub fn new(field: impl Into<String>, reason: &'static str) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

/// # Errors
///
/// Fails when `value` is NaN or infinite.
pub fn check_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::new(field, "must be finite"))
    }
}

/// # Errors
///
/// Fails unless `value` is finite and strictly positive.
pub fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(field, "must be positive"))
    }
}

/// Weights of the lane composite: `gold·g + xp·x + cs·c + kills·k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneWeights {
    pub gold: f64,
    pub xp: f64,
    pub cs: f64,
    pub kills: f64,
}

impl Default for LaneWeights {
    fn default() -> Self {
        Self {
            gold: 1.0,
            xp: 0.7,
            cs: 0.5,
            kills: 0.3,
        }
    }
}

impl LaneWeights {
    #[must_use]
    pub fn composite(&self, diff: &LaneDiff) -> f64 {
        self.gold * diff.gold + self.xp * diff.xp + self.cs * diff.cs + self.kills * diff.kills
    }
}

/// Metric blends behind the composite components of one role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleComposites {
    pub priority: MetricBlend,
    pub teamfight: MetricBlend,
    pub scaling: MetricBlend,
    pub frontline: MetricBlend,
}

/// Per-role composite definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeightTable(pub RoleMap<RoleComposites>);

fn blend<const N: usize>(pairs: [(Metric, f64); N]) -> MetricBlend {
    MetricBlend::from(pairs)
}

impl Default for CompositeWeightTable {
    fn default() -> Self {
        use Metric::{
            AtakhanDelta, BaronDelta, DamagePerMinute, DragonDelta, FirstMidTowerRate,
            FirstTowerRate, GrubsDelta, HeraldDelta, KillParticipation, Lane10, Lane15, Lane25,
            MitigatedPerMinute, PlatesPerGame, TakenPerMinute, VisionPerMinute,
        };

        let frontline = blend([(MitigatedPerMinute, 0.6), (TakenPerMinute, 0.4)]);
        Self(RoleMap::from_fn(|role| match role {
            Role::Top => RoleComposites {
                priority: blend([
                    (Lane10, 0.3),
                    (PlatesPerGame, 0.25),
                    (FirstTowerRate, 0.2),
                    (HeraldDelta, 0.15),
                    (GrubsDelta, 0.1),
                ]),
                teamfight: blend([
                    (DamagePerMinute, 0.4),
                    (KillParticipation, 0.3),
                    (DragonDelta, 0.15),
                    (BaronDelta, 0.15),
                ]),
                scaling: blend([
                    (Lane25, 0.4),
                    (Lane10, -0.2),
                    (BaronDelta, 0.25),
                    (AtakhanDelta, 0.15),
                ]),
                frontline: frontline.clone(),
            },
            Role::Jungle => RoleComposites {
                priority: blend([
                    (HeraldDelta, 0.3),
                    (GrubsDelta, 0.25),
                    (DragonDelta, 0.2),
                    (Lane15, 0.15),
                    (FirstTowerRate, 0.1),
                ]),
                teamfight: blend([
                    (KillParticipation, 0.4),
                    (DamagePerMinute, 0.3),
                    (DragonDelta, 0.15),
                    (BaronDelta, 0.15),
                ]),
                scaling: blend([
                    (Lane25, 0.3),
                    (Lane10, -0.2),
                    (BaronDelta, 0.3),
                    (AtakhanDelta, 0.2),
                ]),
                frontline: frontline.clone(),
            },
            Role::Middle => RoleComposites {
                priority: blend([
                    (Lane10, 0.3),
                    (FirstMidTowerRate, 0.25),
                    (PlatesPerGame, 0.15),
                    (KillParticipation, 0.15),
                    (DragonDelta, 0.15),
                ]),
                teamfight: blend([
                    (DamagePerMinute, 0.45),
                    (KillParticipation, 0.35),
                    (DragonDelta, 0.2),
                ]),
                scaling: blend([
                    (Lane25, 0.4),
                    (Lane10, -0.2),
                    (BaronDelta, 0.25),
                    (DamagePerMinute, 0.15),
                ]),
                frontline: frontline.clone(),
            },
            Role::Bottom => RoleComposites {
                priority: blend([
                    (Lane10, 0.35),
                    (PlatesPerGame, 0.2),
                    (FirstTowerRate, 0.2),
                    (DragonDelta, 0.25),
                ]),
                teamfight: blend([
                    (DamagePerMinute, 0.5),
                    (KillParticipation, 0.3),
                    (DragonDelta, 0.2),
                ]),
                scaling: blend([
                    (Lane25, 0.45),
                    (Lane10, -0.15),
                    (BaronDelta, 0.2),
                    (DamagePerMinute, 0.2),
                ]),
                frontline: frontline.clone(),
            },
            Role::Support => RoleComposites {
                priority: blend([
                    (VisionPerMinute, 0.4),
                    (KillParticipation, 0.2),
                    (Lane10, 0.2),
                    (DragonDelta, 0.2),
                ]),
                teamfight: blend([
                    (KillParticipation, 0.45),
                    (VisionPerMinute, 0.2),
                    (MitigatedPerMinute, 0.15),
                    (DragonDelta, 0.2),
                ]),
                scaling: blend([
                    (Lane25, 0.3),
                    (Lane10, -0.1),
                    (VisionPerMinute, 0.3),
                    (BaronDelta, 0.3),
                ]),
                frontline: frontline.clone(),
            },
        }))
    }
}

/// Weights of the `intrinsic` strength estimate over z-scored inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicWeights {
    pub winrate: f64,
    pub priority: f64,
    pub teamfight: f64,
    pub scaling: f64,
    pub frontline: f64,
    pub lane: f64,
}

impl Default for IntrinsicWeights {
    fn default() -> Self {
        Self {
            winrate: 0.45,
            priority: 0.15,
            teamfight: 0.15,
            scaling: 0.1,
            frontline: 0.05,
            lane: 0.1,
        }
    }
}

impl IntrinsicWeights {
    #[must_use]
    pub fn apply(&self, winrate_z: f64, components: &Components) -> f64 {
        self.winrate * winrate_z
            + self.priority * components.priority
            + self.teamfight * components.teamfight
            + self.scaling * components.scaling
            + self.frontline * components.frontline
            + self.lane * components.lane_mean()
    }
}

/// Weights of the `blind` safety estimate. Lane volatility is a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlindWeights {
    pub winrate: f64,
    pub lane: f64,
    pub volatility_penalty: f64,
}

impl Default for BlindWeights {
    fn default() -> Self {
        Self {
            winrate: 0.5,
            lane: 0.3,
            volatility_penalty: 0.2,
        }
    }
}

impl BlindWeights {
    #[must_use]
    pub fn apply(&self, winrate_z: f64, components: &Components) -> f64 {
        self.winrate * winrate_z + self.lane * components.lane_mean()
            - self.volatility_penalty * components.lane_volatility
    }
}

/// How co-pick association and pair win rate combine into a synergy score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynergyWeights {
    pub npmi: f64,
    pub winrate_delta: f64,
    /// Pairs seen together fewer times than this are not emitted.
    pub min_pair_games: u64,
}

impl Default for SynergyWeights {
    fn default() -> Self {
        Self {
            npmi: 0.05,
            winrate_delta: 1.0,
            min_pair_games: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Beta-Binomial prior strength (pseudo-games) used for every smoothed rate.
    pub prior_strength: f64,
    /// Champion-role buckets with fewer games are not emitted.
    pub min_games: u64,
    pub lane_weights: LaneWeights,
    pub composites: CompositeWeightTable,
    pub intrinsic: IntrinsicWeights,
    pub blind: BlindWeights,
    pub synergy: SynergyWeights,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            prior_strength: 16.0,
            min_games: 1,
            lane_weights: LaneWeights::default(),
            composites: CompositeWeightTable::default(),
            intrinsic: IntrinsicWeights::default(),
            blind: BlindWeights::default(),
            synergy: SynergyWeights::default(),
        }
    }
}

impl AggregationConfig {
    /// # Errors
    ///
    /// Returns the first field that holds an unusable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("prior_strength", self.prior_strength)?;
        if self.min_games == 0 {
            return Err(ConfigError::new("min_games", "must be at least 1"));
        }
        let LaneWeights {
            gold,
            xp,
            cs,
            kills,
        } = self.lane_weights;
        for (field, value) in [
            ("lane_weights.gold", gold),
            ("lane_weights.xp", xp),
            ("lane_weights.cs", cs),
            ("lane_weights.kills", kills),
        ] {
            check_finite(field, value)?;
        }
        for (role, composites) in self.composites.0.iter() {
            for (name, blend) in [
                ("priority", &composites.priority),
                ("teamfight", &composites.teamfight),
                ("scaling", &composites.scaling),
                ("frontline", &composites.frontline),
            ] {
                for (metric, weight) in blend {
                    check_finite(&format!("composites.{role}.{name}.{metric}"), *weight)?;
                }
            }
        }
        let i = &self.intrinsic;
        for (field, value) in [
            ("intrinsic.winrate", i.winrate),
            ("intrinsic.priority", i.priority),
            ("intrinsic.teamfight", i.teamfight),
            ("intrinsic.scaling", i.scaling),
            ("intrinsic.frontline", i.frontline),
            ("intrinsic.lane", i.lane),
            ("blind.winrate", self.blind.winrate),
            ("blind.lane", self.blind.lane),
            ("blind.volatility_penalty", self.blind.volatility_penalty),
            ("synergy.npmi", self.synergy.npmi),
            ("synergy.winrate_delta", self.synergy.winrate_delta),
        ] {
            check_finite(field, value)?;
        }
        if self.synergy.min_pair_games == 0 {
            return Err(ConfigError::new("synergy.min_pair_games", "must be at least 1"));
        }
        Ok(())
    }
}
