//! Engine parameters: per-slot component weights, search bounds, gating and
//! composition rules.
//!
//! None of these numbers are derived; they are starting points meant to be
//! tuned. Every field has a default and can be overridden from JSON.

use draftwise_analysis::config::{ConfigError, check_finite, check_positive};
use draftwise_engine::DRAFT_LENGTH;
use serde::{Deserialize, Serialize};

use crate::context::HoverPolicy;

/// Weights of the candidate score components.
///
/// `exposure` is subtracted, every other component is added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub intrinsic: f64,
    pub reliability: f64,
    pub blind: f64,
    pub flex: f64,
    pub synergy: f64,
    pub counter: f64,
    pub deny: f64,
    pub exposure: f64,
}

impl ComponentWeights {
    fn fields(&self) -> [(&'static str, f64); 8] {
        [
            ("intrinsic", self.intrinsic),
            ("reliability", self.reliability),
            ("blind", self.blind),
            ("flex", self.flex),
            ("synergy", self.synergy),
            ("counter", self.counter),
            ("deny", self.deny),
            ("exposure", self.exposure),
        ]
    }
}

#[expect(clippy::too_many_arguments)]
const fn row(
    intrinsic: f64,
    reliability: f64,
    blind: f64,
    flex: f64,
    synergy: f64,
    counter: f64,
    deny: f64,
    exposure: f64,
) -> ComponentWeights {
    ComponentWeights {
        intrinsic,
        reliability,
        blind,
        flex,
        synergy,
        counter,
        deny,
        exposure,
    }
}

/// Component weights per pick-sequence position.
///
/// Early picks lean on blind safety, reliability and flexibility; late picks
/// on synergy with the locked team and counters against the enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotWeightTable(pub [ComponentWeights; DRAFT_LENGTH]);

impl Default for SlotWeightTable {
    fn default() -> Self {
        Self([
            row(1.0, 0.30, 0.60, 0.30, 0.20, 0.10, 0.30, 0.60),
            row(1.0, 0.25, 0.50, 0.25, 0.30, 0.30, 0.30, 0.50),
            row(1.0, 0.25, 0.45, 0.25, 0.35, 0.35, 0.25, 0.45),
            row(1.0, 0.25, 0.40, 0.20, 0.45, 0.45, 0.25, 0.40),
            row(1.0, 0.20, 0.35, 0.20, 0.50, 0.50, 0.20, 0.35),
            row(1.0, 0.20, 0.30, 0.15, 0.55, 0.55, 0.20, 0.30),
            row(1.0, 0.20, 0.25, 0.15, 0.60, 0.60, 0.15, 0.25),
            row(1.0, 0.15, 0.20, 0.10, 0.70, 0.70, 0.15, 0.20),
            row(1.0, 0.15, 0.15, 0.10, 0.75, 0.80, 0.10, 0.15),
            row(1.0, 0.10, 0.05, 0.05, 0.80, 1.00, 0.00, 0.05),
        ])
    }
}

impl SlotWeightTable {
    /// The row for `position`, clamped to the last row.
    #[must_use]
    pub fn at(&self, position: usize) -> &ComponentWeights {
        &self.0[position.min(DRAFT_LENGTH - 1)]
    }

    /// The row used to evaluate a finished draft.
    #[must_use]
    pub fn last(&self) -> &ComponentWeights {
        &self.0[DRAFT_LENGTH - 1]
    }
}

/// Bounds of the recommendation search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// States kept per beam layer.
    pub beam_width: usize,
    /// Extra picks projected after the candidate.
    pub lookahead_depth: usize,
    /// Candidates expanded per open role and beam state.
    pub expansion_per_role: usize,
    /// Candidates listed per open role.
    pub top_k: usize,
    /// Candidates per role crossed into pick pairs.
    pub combo_candidates: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: 6,
            lookahead_depth: 2,
            expansion_per_role: 3,
            top_k: 8,
            combo_candidates: 4,
        }
    }
}

/// Team-level adjustments applied by draft evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionConfig {
    /// A pick counts as frontline when its frontline component reaches this.
    pub frontline_threshold: f64,
    /// Applied once at least `frontline_min_picks` are in without a frontline pick.
    pub missing_frontline_penalty: f64,
    pub frontline_min_picks: usize,
    /// Applied when the mean teamfight component reaches `teamfight_threshold`.
    pub teamfight_bonus: f64,
    pub teamfight_threshold: f64,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            frontline_threshold: 0.5,
            missing_frontline_penalty: 0.1,
            frontline_min_picks: 3,
            teamfight_bonus: 0.05,
            teamfight_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub slot_weights: SlotWeightTable,
    pub search: SearchConfig,
    pub composition: CompositionConfig,
    pub hover_policy: HoverPolicy,
    /// Counter weight of enemies outside the candidate's lane.
    pub off_lane_counter_weight: f64,
    /// Lane-composite sigma at which reliability is halved.
    pub sigma_scale: f64,
    pub blind_flex_weight: f64,
    pub blind_exposure_weight: f64,
    /// Suggestions below this pick rate are gated while their lane opponent is unknown.
    pub blind_pick_rate_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_weights: SlotWeightTable::default(),
            search: SearchConfig::default(),
            composition: CompositionConfig::default(),
            hover_policy: HoverPolicy::default(),
            off_lane_counter_weight: 0.25,
            sigma_scale: 1500.0,
            blind_flex_weight: 0.3,
            blind_exposure_weight: 0.5,
            blind_pick_rate_threshold: 0.01,
        }
    }
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns the first field that holds an unusable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (position, weights) in self.slot_weights.0.iter().enumerate() {
            for (name, value) in weights.fields() {
                check_finite(&format!("slot_weights[{position}].{name}"), value)?;
            }
        }
        let search = &self.search;
        for (field, value) in [
            ("search.beam_width", search.beam_width),
            ("search.expansion_per_role", search.expansion_per_role),
            ("search.top_k", search.top_k),
            ("search.combo_candidates", search.combo_candidates),
        ] {
            if value == 0 {
                return Err(ConfigError::new(field, "must be at least 1"));
            }
        }
        let composition = &self.composition;
        for (field, value) in [
            ("composition.frontline_threshold", composition.frontline_threshold),
            (
                "composition.missing_frontline_penalty",
                composition.missing_frontline_penalty,
            ),
            ("composition.teamfight_bonus", composition.teamfight_bonus),
            ("composition.teamfight_threshold", composition.teamfight_threshold),
            ("off_lane_counter_weight", self.off_lane_counter_weight),
            ("blind_flex_weight", self.blind_flex_weight),
            ("blind_exposure_weight", self.blind_exposure_weight),
            ("blind_pick_rate_threshold", self.blind_pick_rate_threshold),
        ] {
            check_finite(field, value)?;
        }
        check_positive("sigma_scale", self.sigma_scale)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_slot_rows_shift_toward_synergy() {
        let table = SlotWeightTable::default();
        let first = table.at(0);
        let last = table.last();
        assert!(first.blind > last.blind);
        assert!(first.reliability > last.reliability);
        assert!(first.synergy < last.synergy);
        assert!(first.counter < last.counter);
        assert_eq!(table.at(42), last);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.search.beam_width = 0;
        assert_eq!(config.validate().unwrap_err().field, "search.beam_width");

        let mut config = EngineConfig::default();
        config.slot_weights.0[3].deny = f64::INFINITY;
        assert_eq!(config.validate().unwrap_err().field, "slot_weights[3].deny");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "search": { "beam_width": 2, "lookahead_depth": 1,
                "expansion_per_role": 2, "top_k": 5, "combo_candidates": 3 } }"#)
                .unwrap();
        assert_eq!(config.search.beam_width, 2);
        assert_eq!(config.slot_weights, SlotWeightTable::default());
    }
}
