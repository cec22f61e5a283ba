//! Candidate scoring: how good is `champion` in `role` for this draft?
//!
//! # Components
//!
//! | component | meaning |
//! |---|---|
//! | `intrinsic` | role-normalized strength from the metrics bundle |
//! | `reliability` | `r - 1`, `r = sample_weight / (1 + sigma / sigma_scale)`, roster-blended |
//! | `flex` | role-spread entropy, only for champions played in several roles |
//! | `exposure` | expected counter score of the likely lane opponents; zero once locked |
//! | `blind` | blind-pick safety, plus flex, minus exposure |
//! | `synergy` | summed pair synergy with the allied picks |
//! | `counter` | summed matchup score against the enemy picks, lane opponent at full weight |
//! | `deny` | how much the enemy's best option drops if this champion is taken |
//!
//! The draft score is the weighted sum of the components with `exposure`
//! subtracted, using the [`SlotWeightTable`](crate::config::SlotWeightTable)
//! row of the sequence position being decided.
//!
//! A candidate without a champion-role entry is still scored: it falls back
//! to the role average (all bundle-derived components zero, no reliability)
//! and is flagged [`ScoreBasis::RolePrior`].

use std::sync::Arc;

use draftwise_analysis::{
    config::ConfigError,
    index::{IndexBuildError, MetricsIndex},
    metrics::{ChampionRoleMetrics, PrecomputedDraftMetrics},
};
use draftwise_engine::{ChampionKey, DraftSession, Role, RoleMap, Side};
use serde::{Deserialize, Serialize};

use crate::{
    config::{ComponentWeights, EngineConfig},
    context::{DraftContext, OpponentOption},
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EngineError {
    #[display("cannot index metrics: {_0}")]
    Index(IndexBuildError),
    #[display("{_0}")]
    Config(ConfigError),
}

/// Where a candidate's numbers come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    /// The champion has an entry in this role.
    Observed,
    /// No entry; the role average stands in.
    RolePrior,
}

/// The scored components of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftCandidateScore {
    pub champion: ChampionKey,
    pub role: Role,
    pub basis: ScoreBasis,
    /// Tie-breaker between equal draft scores.
    pub winrate_adjusted: f64,
    pub intrinsic: f64,
    pub reliability: f64,
    pub blind: f64,
    pub flex: f64,
    pub synergy: f64,
    pub counter: f64,
    pub deny: f64,
    pub exposure: f64,
    pub draft_score: f64,
}

impl DraftCandidateScore {
    /// Reliability factor `r` in `[0, 1]`.
    #[must_use]
    pub fn reliability_factor(&self) -> f64 {
        self.reliability + 1.0
    }

    /// Weighted sum of the components.
    #[must_use]
    pub fn weighted(&self, weights: &ComponentWeights) -> f64 {
        weights.intrinsic * self.intrinsic
            + weights.reliability * self.reliability
            + weights.blind * self.blind
            + weights.flex * self.flex
            + weights.synergy * self.synergy
            + weights.counter * self.counter
            + weights.deny * self.deny
            - weights.exposure * self.exposure
    }

    /// Orders by draft score (best first), then adjusted win rate, then key.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .draft_score
            .total_cmp(&self.draft_score)
            .then_with(|| other.winrate_adjusted.total_cmp(&self.winrate_adjusted))
            .then_with(|| self.champion.cmp(&other.champion))
            .then_with(|| self.role.cmp(&other.role))
    }
}

/// The scoring engine: an indexed metrics bundle plus its configuration.
///
/// Immutable after construction; share it behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct DraftEngine {
    index: MetricsIndex,
    config: EngineConfig,
}

impl DraftEngine {
    /// Builds an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Fails when `metrics` violates the bundle's structural invariants.
    pub fn new(metrics: &PrecomputedDraftMetrics) -> Result<Self, IndexBuildError> {
        Ok(Self {
            index: MetricsIndex::new(metrics)?,
            config: EngineConfig::default(),
        })
    }

    /// # Errors
    ///
    /// Fails when `config` does not validate or `metrics` cannot be indexed.
    pub fn with_config(
        metrics: &PrecomputedDraftMetrics,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            index: MetricsIndex::new(metrics)?,
            config,
        })
    }

    /// Convenience for sharing the engine.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    #[must_use]
    pub fn index(&self) -> &MetricsIndex {
        &self.index
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshots `session` for `side` using the configured hover policy.
    #[must_use]
    pub fn context(&self, session: &DraftSession, side: Side) -> DraftContext {
        DraftContext::from_session(session, side, self.config.hover_policy, &self.index)
    }

    /// Scores `champion` in `role` with the weights of the context's position.
    #[must_use]
    pub fn score_candidate(
        &self,
        ctx: &DraftContext,
        champion: &ChampionKey,
        role: Role,
    ) -> DraftCandidateScore {
        let weights = self.config.slot_weights.at(ctx.position());
        self.score_with_weights(ctx, champion, role, weights)
    }

    /// Scores with explicit weights. `deny` is only computed when weighted.
    #[must_use]
    pub fn score_with_weights(
        &self,
        ctx: &DraftContext,
        champion: &ChampionKey,
        role: Role,
        weights: &ComponentWeights,
    ) -> DraftCandidateScore {
        let entry = self.index.champion_role(champion.as_str(), role);
        let basis = if entry.is_some() {
            ScoreBasis::Observed
        } else {
            ScoreBasis::RolePrior
        };

        let flex = self.flex(champion);
        let exposure = entry.map_or(0.0, |entry| self.exposure(ctx, entry));
        let (intrinsic, blind_base, winrate_adjusted) = entry.map_or(
            (0.0, 0.0, self.index.role_win_rate(role)),
            |entry| (entry.intrinsic, entry.blind, entry.winrate_adjusted),
        );
        let blind = blind_base + self.config.blind_flex_weight * flex
            - self.config.blind_exposure_weight * exposure;
        let deny = if weights.deny == 0.0 {
            0.0
        } else {
            self.deny(ctx, champion)
        };

        let mut score = DraftCandidateScore {
            champion: champion.clone(),
            role,
            basis,
            winrate_adjusted,
            intrinsic,
            reliability: self.reliability_factor(ctx, champion, role, entry) - 1.0,
            blind,
            flex,
            synergy: self.synergy(ctx, champion, role),
            counter: self.counter(ctx, champion, role),
            deny,
            exposure,
            draft_score: 0.0,
        };
        score.draft_score = score.weighted(weights);
        score
    }

    fn flex(&self, champion: &ChampionKey) -> f64 {
        self.index
            .flex(champion.as_str())
            .filter(|flex| flex.role_count() > 1)
            .map_or(0.0, |flex| flex.flex_score)
    }

    fn reliability_factor(
        &self,
        ctx: &DraftContext,
        champion: &ChampionKey,
        role: Role,
        entry: Option<&ChampionRoleMetrics>,
    ) -> f64 {
        let scale = self.config.sigma_scale;
        let discount =
            |weight: f64, sigma: f64| (weight / (1.0 + sigma.max(0.0) / scale)).clamp(0.0, 1.0);
        let bucket = entry.map_or(0.0, |e| {
            discount(e.reliability.sample_weight, e.reliability.sigma)
        });
        let player = ctx
            .roster_player(role)
            .and_then(|player| self.index.player_reliability(player, champion.as_str(), role));
        match player {
            Some(player) => {
                let own = discount(player.weight, player.sigma);
                (1.0 - player.weight) * bucket + player.weight * own
            }
            None => bucket,
        }
    }

    /// Σ P(opponent) · max(0, opponent's counter score against the candidate).
    fn exposure(&self, ctx: &DraftContext, entry: &ChampionRoleMetrics) -> f64 {
        if ctx.is_enemy_role_locked(entry.role) {
            return 0.0;
        }
        entry
            .opponents
            .iter()
            .filter(|share| ctx.is_available(&share.champion))
            .filter_map(|share| {
                let counter = self.index.counter(
                    entry.role,
                    share.champion.as_str(),
                    entry.champion.as_str(),
                )?;
                Some(share.probability * counter.score.max(0.0))
            })
            .sum()
    }

    fn synergy(&self, ctx: &DraftContext, champion: &ChampionKey, role: Role) -> f64 {
        ctx.ally()
            .picks()
            .filter(|(r, c)| *r != role && *c != champion)
            .map(|(_, ally)| self.index.synergy_score(champion.as_str(), ally.as_str()))
            .sum()
    }

    fn counter(&self, ctx: &DraftContext, champion: &ChampionKey, role: Role) -> f64 {
        ctx.enemy()
            .picks()
            .filter_map(|(enemy_role, enemy)| {
                let entry = self
                    .index
                    .counter(role, champion.as_str(), enemy.as_str())?;
                let weight = if enemy_role == role {
                    1.0
                } else {
                    self.config.off_lane_counter_weight
                };
                Some(weight * entry.score)
            })
            .sum()
    }

    /// Value of `champion` in `role` for the enemy team.
    fn opponent_value(&self, ctx: &DraftContext, entry: &ChampionRoleMetrics) -> f64 {
        let synergy: f64 = ctx
            .enemy()
            .picks()
            .map(|(_, enemy)| {
                self.index
                    .synergy_score(entry.champion.as_str(), enemy.as_str())
            })
            .sum();
        let lane = ctx.ally().get(entry.role).and_then(|ally| {
            self.index
                .counter(entry.role, entry.champion.as_str(), ally.as_str())
        });
        entry.intrinsic + synergy + lane.map_or(0.0, |counter| counter.score)
    }

    fn opponent_options(&self, ctx: &DraftContext) -> RoleMap<Option<OpponentOption>> {
        RoleMap::from_fn(|role| {
            if ctx.enemy().get(role).is_some() {
                return None;
            }
            let mut values = self
                .index
                .champions_in_role(role)
                .iter()
                .filter(|champion| ctx.is_available(champion))
                .filter_map(|champion| {
                    let entry = self.index.champion_role(champion.as_str(), role)?;
                    Some((champion, self.opponent_value(ctx, entry)))
                })
                .collect::<Vec<_>>();
            values.sort_by(|(ca, a), (cb, b)| b.total_cmp(a).then_with(|| ca.cmp(cb)));
            let mut values = values.into_iter();
            let (best, best_value) = values.next()?;
            Some(OpponentOption {
                best: best.clone(),
                best_value,
                runner_up: values.next().map(|(_, value)| value),
            })
        })
    }

    fn deny(&self, ctx: &DraftContext, champion: &ChampionKey) -> f64 {
        let options = ctx
            .opponent_options
            .get_or_init(|| self.opponent_options(ctx));
        options
            .values()
            .flatten()
            .filter(|option| option.best == *champion)
            .map(|option| {
                let drop = match option.runner_up {
                    Some(runner_up) => option.best_value - runner_up,
                    None => option.best_value,
                };
                drop.max(0.0)
            })
            .fold(0.0, f64::max)
    }
}
