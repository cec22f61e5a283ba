//! Ranked pick suggestions with blind-pick gating.
//!
//! A suggestion is *gated* when the champion's pick rate in the role is below
//! [`EngineConfig::blind_pick_rate_threshold`](crate::config::EngineConfig)
//! and the enemy has not locked that role yet. Enemy hovers do not lift the
//! gate. Gated suggestions stay in the list but rank after every ungated one;
//! combos follow the same rule.

use draftwise_analysis::dataset::Dataset;
use draftwise_engine::{ChampionKey, Role};
use serde::{Deserialize, Serialize};

use crate::{
    context::DraftContext,
    scoring::{DraftCandidateScore, DraftEngine},
    search::{Combo, PickLine},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub score: DraftCandidateScore,
    /// Projected evaluation after this pick minus the current evaluation.
    pub lookahead_delta: f64,
    /// Follow-up picks of the projection.
    pub continuation: PickLine,
    pub pick_rate: f64,
    pub gated: bool,
}

impl Suggestion {
    /// Ungated first, then by lookahead delta, then by immediate score.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.gated
            .cmp(&other.gated)
            .then_with(|| other.lookahead_delta.total_cmp(&self.lookahead_delta))
            .then_with(|| self.score.rank_cmp(&other.score))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboSuggestion {
    pub combo: Combo,
    /// Set when either pick is gated.
    pub gated: bool,
}

impl DraftEngine {
    /// Whether `champion` in `role` lacks the precedent to be picked blind.
    #[must_use]
    pub fn is_gated(
        &self,
        ctx: &DraftContext,
        dataset: &Dataset,
        champion: &ChampionKey,
        role: Role,
    ) -> bool {
        !ctx.is_enemy_role_locked(role)
            && dataset.pick_rate(champion.as_str(), role) < self.config().blind_pick_rate_threshold
    }

    /// The top candidates of every open role, each projected with the beam
    /// search, gated against `dataset` and ranked.
    #[must_use]
    pub fn get_suggestions(&self, ctx: &DraftContext, dataset: &Dataset) -> Vec<Suggestion> {
        self.warn_on_foreign_dataset(dataset);
        let top_k = self.config().search.top_k;
        let baseline = self.evaluate_draft(ctx, ctx.ally()).total_score;

        let mut suggestions = ctx
            .open_roles()
            .flat_map(|role| self.generate_role_candidates(ctx, role, top_k))
            .map(|score| {
                let next = ctx.with_ally_pick(score.role, score.champion.clone());
                let beam = self.compute_beam_continuation(&next);
                Suggestion {
                    lookahead_delta: beam.projected - baseline,
                    continuation: beam.line,
                    pick_rate: dataset.pick_rate(score.champion.as_str(), score.role),
                    gated: self.is_gated(ctx, dataset, &score.champion, score.role),
                    score,
                }
            })
            .collect::<Vec<_>>();
        suggestions.sort_by(Suggestion::rank_cmp);

        tracing::debug!(
            side = %ctx.side(),
            position = ctx.position(),
            suggestions = suggestions.len(),
            gated = suggestions.iter().filter(|s| s.gated).count(),
            "suggestions ranked"
        );
        suggestions
    }

    /// [`generate_combos`](Self::generate_combos) with gating applied.
    #[must_use]
    pub fn get_combo_suggestions(
        &self,
        ctx: &DraftContext,
        dataset: &Dataset,
    ) -> Vec<ComboSuggestion> {
        self.warn_on_foreign_dataset(dataset);
        let mut combos = self
            .generate_combos(ctx)
            .into_iter()
            .map(|combo| {
                let gated = [&combo.first, &combo.second]
                    .into_iter()
                    .any(|pick| self.is_gated(ctx, dataset, &pick.champion, pick.role));
                ComboSuggestion { combo, gated }
            })
            .collect::<Vec<_>>();
        // Stable: keeps the combo ranking inside each group.
        combos.sort_by_key(|combo| combo.gated);
        combos
    }

    fn warn_on_foreign_dataset(&self, dataset: &Dataset) {
        if dataset.dataset_id != *self.index().dataset_id() {
            tracing::warn!(
                engine = %self.index().dataset_id(),
                dataset = %dataset.dataset_id,
                "pick rates come from a different dataset than the metrics"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use draftwise_analysis::{dataset::DatasetEntry, metrics::DatasetId};
    use draftwise_engine::{DraftSession, Side};

    use crate::{
        config::EngineConfig,
        context::{Composition, HoverPolicy},
        scoring::tests::{bundle, engine},
    };

    use super::*;

    /// Every bundle entry at a 5% pick rate except Gragas top (0.1%) and
    /// Ezreal, which is missing.
    fn dataset() -> Dataset {
        let mut champions = BTreeMap::<ChampionKey, BTreeMap<Role, DatasetEntry>>::new();
        for entry in bundle().champion_roles {
            if entry.champion.as_str() == "Ezreal" {
                continue;
            }
            let pick_rate = if entry.champion.as_str() == "Gragas" && entry.role == Role::Top {
                0.001
            } else {
                0.05
            };
            champions.entry(entry.champion).or_default().insert(
                entry.role,
                DatasetEntry {
                    games: entry.games,
                    wins: entry.wins,
                    pick_rate,
                    role_share: 1.0,
                },
            );
        }
        Dataset {
            dataset_id: DatasetId::new("fixture"),
            total_games: 200,
            champions,
        }
    }

    fn find<'a>(suggestions: &'a [Suggestion], champion: &str, role: Role) -> &'a Suggestion {
        suggestions
            .iter()
            .find(|s| s.score.champion.as_str() == champion && s.score.role == role)
            .unwrap()
    }

    #[test]
    fn test_rare_blind_pick_is_gated_not_excluded() {
        let engine = engine();
        let ctx = DraftContext::new(Side::Ally, 0, Composition::new(), Composition::new());
        let suggestions = engine.get_suggestions(&ctx, &dataset());

        let gragas = find(&suggestions, "Gragas", Role::Top);
        assert!(gragas.gated);
        assert!((gragas.pick_rate - 0.001).abs() < 1e-12);
        assert!(find(&suggestions, "Ezreal", Role::Bottom).gated);
        assert!(!find(&suggestions, "Gragas", Role::Jungle).gated);

        let first_gated = suggestions.iter().position(|s| s.gated).unwrap();
        assert!(suggestions[first_gated..].iter().all(|s| s.gated));
        for pair in suggestions.windows(2) {
            assert!(pair[0].rank_cmp(&pair[1]).is_le());
        }
    }

    #[test]
    fn test_gate_lifts_once_lane_is_revealed() {
        let engine = engine();
        let ctx = DraftContext::new(
            Side::Ally,
            3,
            Composition::new(),
            Composition::from_picks([(Role::Top, "Garen".into())]),
        );
        let suggestions = engine.get_suggestions(&ctx, &dataset());
        assert!(!find(&suggestions, "Gragas", Role::Top).gated);
        assert!(find(&suggestions, "Ezreal", Role::Bottom).gated);
    }

    #[test]
    fn test_enemy_hover_keeps_gate() {
        let config = EngineConfig {
            hover_policy: HoverPolicy::IncludeHovers,
            ..EngineConfig::default()
        };
        let engine = DraftEngine::with_config(&bundle(), config).unwrap();
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, Some("Ahri".into()), Some(Role::Middle));
        session.hover_champion(Side::Opponent, 0, Some("Garen".into()), Some(Role::Top));

        let ctx = engine.context(&session, Side::Ally);
        assert!(ctx.enemy().get(Role::Top).is_some());
        let suggestions = engine.get_suggestions(&ctx, &dataset());
        assert!(find(&suggestions, "Gragas", Role::Top).gated);

        session.pick_champion(Side::Opponent, 0, Some("Garen".into()), Some(Role::Top));
        let ctx = engine.context(&session, Side::Ally);
        let suggestions = engine.get_suggestions(&ctx, &dataset());
        assert!(!find(&suggestions, "Gragas", Role::Top).gated);
    }

    #[test]
    fn test_suggestions_cover_open_roles_only() {
        let engine = engine();
        let ctx = DraftContext::new(
            Side::Ally,
            3,
            Composition::from_picks([(Role::Top, "Aatrox".into())]),
            Composition::from_picks([(Role::Middle, "Syndra".into())]),
        )
        .with_bans(["Vi".into()]);
        let suggestions = engine.get_suggestions(&ctx, &dataset());
        assert!(suggestions.iter().all(|s| s.score.role != Role::Top));
        for role in [Role::Jungle, Role::Middle, Role::Bottom, Role::Support] {
            assert!(suggestions.iter().any(|s| s.score.role == role));
        }
        for suggestion in &suggestions {
            assert!(ctx.is_available(&suggestion.score.champion));
            assert!(suggestion.lookahead_delta.is_finite());
            assert!(suggestion.continuation.len() <= engine.config().search.lookahead_depth);
        }
    }

    #[test]
    fn test_gated_combos_rank_last() {
        let engine = engine();
        let ctx = DraftContext::new(Side::Ally, 3, Composition::new(), Composition::new());
        let combos = engine.get_combo_suggestions(&ctx, &dataset());
        let first_gated = combos.iter().position(|c| c.gated).unwrap();
        assert!(combos[first_gated..].iter().all(|c| c.gated));
        assert!(
            combos
                .iter()
                .filter(|c| c.combo.champions().iter().any(|k| k.as_str() == "Ezreal"))
                .all(|c| c.gated)
        );
    }
}
