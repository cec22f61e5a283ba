//! Recommendation search: per-role shortlists, beam continuation and pick pairs.
//!
//! The beam only projects the side's own picks. Enemy responses are not
//! simulated, so the projection is an optimistic, incomplete estimate: states
//! are pruned greedily to [`SearchConfig::beam_width`](crate::config::SearchConfig)
//! at every depth and the globally best line may be cut early.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use draftwise_engine::{ChampionKey, Role, TEAM_SIZE};
use serde::{Deserialize, Serialize};

use crate::{
    config::ComponentWeights,
    context::DraftContext,
    scoring::{DraftCandidateScore, DraftEngine},
};

/// Picks projected by a beam continuation, in the order they were added.
pub type PickLine = ArrayVec<(Role, ChampionKey), TEAM_SIZE>;

/// Result of [`DraftEngine::compute_beam_continuation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamContinuation {
    /// Evaluation of the starting team.
    pub baseline: f64,
    /// Best evaluation seen at any depth, including the starting team.
    pub projected: f64,
    /// The picks leading to `projected`; empty when no extension beat the start.
    pub line: PickLine,
}

impl BeamContinuation {
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.projected - self.baseline
    }
}

/// Two picks committed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub first: DraftCandidateScore,
    pub second: DraftCandidateScore,
    /// Evaluation change from committing both picks.
    pub combined_delta: f64,
    /// Sum of the evaluation changes of each pick alone.
    pub individual_delta: f64,
    /// `combined_delta - individual_delta`: what the pairing itself adds.
    pub pair_gain: f64,
}

impl Combo {
    pub fn champions(&self) -> [&ChampionKey; 2] {
        [&self.first.champion, &self.second.champion]
    }

    /// Orders by pair gain (best first), then combined delta, then keys.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .pair_gain
            .total_cmp(&self.pair_gain)
            .then_with(|| other.combined_delta.total_cmp(&self.combined_delta))
            .then_with(|| self.champions().cmp(&other.champions()))
    }
}

#[derive(Debug, Clone)]
struct BeamState {
    ctx: DraftContext,
    line: PickLine,
    score: f64,
}

impl DraftEngine {
    /// The `k` best available champions for `role`, scored at the context's
    /// position.
    ///
    /// Banned and already picked champions are filtered separately. A role
    /// the side has already filled has no candidates.
    #[must_use]
    pub fn generate_role_candidates(
        &self,
        ctx: &DraftContext,
        role: Role,
        k: usize,
    ) -> Vec<DraftCandidateScore> {
        let weights = self.config().slot_weights.at(ctx.position());
        self.ranked_candidates(ctx, role, k, weights)
    }

    fn ranked_candidates(
        &self,
        ctx: &DraftContext,
        role: Role,
        k: usize,
        weights: &ComponentWeights,
    ) -> Vec<DraftCandidateScore> {
        if ctx.ally().get(role).is_some() {
            return vec![];
        }
        let mut candidates = self
            .index()
            .champions_in_role(role)
            .iter()
            .filter(|champion| !ctx.is_banned(champion))
            .filter(|champion| !ctx.is_picked(champion))
            .map(|champion| self.score_with_weights(ctx, champion, role, weights))
            .collect::<Vec<_>>();
        candidates.sort_by(DraftCandidateScore::rank_cmp);
        candidates.truncate(k);
        candidates
    }

    /// Projects the best reachable team evaluation from `ctx`.
    ///
    /// Every depth expands each kept state with the top candidates of each of
    /// its open roles, then keeps the best `beam_width` distinct teams. The
    /// projection never falls below the starting evaluation.
    #[must_use]
    pub fn compute_beam_continuation(&self, ctx: &DraftContext) -> BeamContinuation {
        let search = self.config().search;
        let baseline = self.evaluate_draft(ctx, ctx.ally()).total_score;
        let mut best = BeamState {
            ctx: ctx.clone(),
            line: PickLine::new(),
            score: baseline,
        };

        let mut beam = vec![best.clone()];
        for _ in 0..search.lookahead_depth {
            let mut next = vec![];
            for state in &beam {
                // Deny is skipped while expanding; it needs a scan of every enemy option.
                let weights = ComponentWeights {
                    deny: 0.0,
                    ..*self.config().slot_weights.at(state.ctx.position())
                };
                for role in state.ctx.open_roles() {
                    let candidates = self.ranked_candidates(
                        &state.ctx,
                        role,
                        search.expansion_per_role,
                        &weights,
                    );
                    for candidate in candidates {
                        let mut line = state.line.clone();
                        if line.try_push((role, candidate.champion.clone())).is_err() {
                            continue;
                        }
                        let child = state.ctx.with_ally_pick(role, candidate.champion);
                        let score = self.evaluate_draft(&child, child.ally()).total_score;
                        next.push(BeamState {
                            ctx: child,
                            line,
                            score,
                        });
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            next.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.line.cmp(&b.line)));
            let mut seen = HashSet::new();
            next.retain(|state| seen.insert(state.ctx.ally().clone()));
            next.truncate(search.beam_width);

            if next[0].score > best.score {
                best = next[0].clone();
            }
            beam = next;
        }

        BeamContinuation {
            baseline,
            projected: best.score,
            line: best.line,
        }
    }

    /// Pairs of picks for two different open roles, ranked by what the
    /// pairing adds over the two picks taken alone.
    ///
    /// Crosses the top `combo_candidates` of every unordered pair of open
    /// roles, so the cost stays bounded by N² per role pair.
    #[must_use]
    pub fn generate_combos(&self, ctx: &DraftContext) -> Vec<Combo> {
        let n = self.config().search.combo_candidates;
        let baseline = self.evaluate_draft(ctx, ctx.ally()).total_score;
        let shortlists = ctx
            .open_roles()
            .map(|role| {
                self.generate_role_candidates(ctx, role, n)
                    .into_iter()
                    .map(|score| {
                        let team = ctx.ally().with(role, score.champion.clone());
                        let delta = self.evaluate_draft(ctx, &team).total_score - baseline;
                        (score, delta)
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mut combos = vec![];
        for (i, firsts) in shortlists.iter().enumerate() {
            for seconds in &shortlists[i + 1..] {
                for (first, first_delta) in firsts {
                    for (second, second_delta) in seconds {
                        if first.champion == second.champion {
                            continue;
                        }
                        let team = ctx
                            .ally()
                            .with(first.role, first.champion.clone())
                            .with(second.role, second.champion.clone());
                        let combined_delta = self.evaluate_draft(ctx, &team).total_score - baseline;
                        let individual_delta = first_delta + second_delta;
                        combos.push(Combo {
                            first: first.clone(),
                            second: second.clone(),
                            combined_delta,
                            individual_delta,
                            pair_gain: combined_delta - individual_delta,
                        });
                    }
                }
            }
        }
        combos.sort_by(Combo::rank_cmp);
        combos
    }
}

#[cfg(test)]
mod tests {
    use draftwise_engine::Side;

    use crate::{context::Composition, scoring::tests::engine};

    use super::*;

    fn empty_ctx() -> DraftContext {
        DraftContext::new(Side::Ally, 0, Composition::new(), Composition::new())
    }

    #[test]
    fn test_role_candidates_skip_bans_and_picks() {
        let engine = engine();
        let ctx = DraftContext::new(
            Side::Ally,
            3,
            Composition::new(),
            Composition::from_picks([(Role::Top, "Aatrox".into())]),
        )
        .with_bans(["Darius".into()]);
        let candidates = engine.generate_role_candidates(&ctx, Role::Top, 8);
        let mut names = candidates
            .iter()
            .map(|c| c.champion.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        assert_eq!(names, vec!["Garen", "Gragas"]);
    }

    #[test]
    fn test_role_candidates_are_ranked_and_truncated() {
        let engine = engine();
        let candidates = engine.generate_role_candidates(&empty_ctx(), Role::Middle, 2);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].rank_cmp(&candidates[1]).is_le());
        assert!(candidates[0].draft_score >= candidates[1].draft_score);
        assert!(candidates.iter().all(|c| c.role == Role::Middle));
    }

    #[test]
    fn test_filled_role_has_no_candidates() {
        let engine = engine();
        let ctx = DraftContext::new(
            Side::Ally,
            3,
            Composition::from_picks([(Role::Top, "Aatrox".into())]),
            Composition::new(),
        );
        assert!(engine.generate_role_candidates(&ctx, Role::Top, 8).is_empty());
    }

    #[test]
    fn test_beam_never_below_zero_ply() {
        let engine = engine();
        let full = Composition::from_picks([
            (Role::Top, "Aatrox".into()),
            (Role::Jungle, "Vi".into()),
            (Role::Middle, "Ahri".into()),
            (Role::Bottom, "Jinx".into()),
            (Role::Support, "Thresh".into()),
        ]);
        let contexts = [
            empty_ctx(),
            empty_ctx().with_ally_pick(Role::Middle, "Orianna".into()),
            DraftContext::new(
                Side::Ally,
                7,
                Composition::from_picks([(Role::Top, "Garen".into())]),
                Composition::from_picks([
                    (Role::Top, "Darius".into()),
                    (Role::Jungle, "Vi".into()),
                ]),
            )
            .with_bans(["Ahri".into(), "Syndra".into()]),
            DraftContext::new(Side::Ally, 9, full, Composition::new()),
        ];
        for ctx in &contexts {
            let zero_ply = engine.evaluate_draft(ctx, ctx.ally()).total_score;
            let beam = engine.compute_beam_continuation(ctx);
            assert_eq!(beam.baseline, zero_ply);
            assert!(beam.projected >= zero_ply);
            assert!(beam.gain() >= 0.0);
        }
        let beam = engine.compute_beam_continuation(&contexts[3]);
        assert!(beam.line.is_empty());
    }

    #[test]
    fn test_beam_line_uses_open_roles_and_available_champions() {
        let engine = engine();
        let ctx = DraftContext::new(
            Side::Ally,
            3,
            Composition::from_picks([(Role::Top, "Aatrox".into())]),
            Composition::from_picks([(Role::Jungle, "LeeSin".into())]),
        )
        .with_bans(["Syndra".into()]);
        let beam = engine.compute_beam_continuation(&ctx);
        assert!(beam.line.len() <= engine.config().search.lookahead_depth);
        let mut roles = HashSet::new();
        for (role, champion) in &beam.line {
            assert!(roles.insert(*role));
            assert_ne!(*role, Role::Top);
            assert!(ctx.is_available(champion));
        }
    }

    #[test]
    fn test_combos_isolate_pair_synergy() {
        let engine = engine();
        let combos = engine.generate_combos(&empty_ctx());
        assert!(!combos.is_empty());
        for combo in &combos {
            assert_ne!(combo.first.champion, combo.second.champion);
            assert_ne!(combo.first.role, combo.second.role);
            let gain = combo.combined_delta - combo.individual_delta;
            assert!((combo.pair_gain - gain).abs() < 1e-12);
        }
        for pair in combos.windows(2) {
            assert!(pair[0].rank_cmp(&pair[1]).is_le());
        }

        // Ahri and Vi share the largest synergy of the bundle.
        let best = &combos[0];
        let mut names = best.champions().map(ChampionKey::as_str);
        names.sort_unstable();
        assert_eq!(names, ["Ahri", "Vi"]);
        let weights = engine.config().slot_weights.last();
        assert!((best.pair_gain - weights.synergy * 0.1).abs() < 1e-9);
    }
}
