//! Whole-draft evaluation.
//!
//! Each locked pick is scored against the rest of its team with the weights
//! of the last sequence position. Pair synergy is left out of the per-pick
//! contributions and added once per pair at team level, so a pair is never
//! counted twice.
//!
//! ```text
//! total = Σ pick contributions + w_synergy · Σ pair synergy + bonuses - penalties
//! ```

use draftwise_engine::{ChampionKey, DraftSession, Role, RoleMap, Side};
use draftwise_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{
    context::{Composition, DraftContext},
    scoring::{DraftCandidateScore, DraftEngine},
};

/// One locked pick's share of the evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickBreakdown {
    pub role: Role,
    pub champion: ChampionKey,
    pub score: DraftCandidateScore,
    /// Weighted score without the synergy term.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftEvaluation {
    pub picks: Vec<PickBreakdown>,
    /// Σ synergy over allied pairs, each pair once.
    pub synergy: f64,
    /// Σ counter over the picks.
    pub counter: f64,
    /// Mean `1 - r` over the picks; zero for an empty team.
    pub risk: f64,
    /// Σ exposure over the picks.
    pub exposure: f64,
    pub bonuses: f64,
    pub penalties: f64,
    pub total_score: f64,
}

impl DraftEvaluation {
    /// Contribution of every role; empty roles contribute zero.
    #[must_use]
    pub fn contributions(&self) -> RoleMap<f64> {
        let mut contributions = RoleMap::default();
        for pick in &self.picks {
            contributions[pick.role] = pick.contribution;
        }
        contributions
    }
}

impl DraftEngine {
    /// Evaluates `team` against the enemy of `ctx`, which also supplies bans and roster.
    #[must_use]
    pub fn evaluate_draft(&self, ctx: &DraftContext, team: &Composition) -> DraftEvaluation {
        let weights = self.config().slot_weights.last();
        let picks = team
            .picks()
            .map(|(role, champion)| {
                let rest = ctx.with_ally(team.without(role), usize::MAX);
                let score = self.score_with_weights(&rest, champion, role, weights);
                let contribution = score.draft_score - weights.synergy * score.synergy;
                PickBreakdown {
                    role,
                    champion: champion.clone(),
                    score,
                    contribution,
                }
            })
            .collect::<Vec<_>>();

        let members = team.picks().collect::<Vec<_>>();
        let synergy = members
            .iter()
            .enumerate()
            .flat_map(|(i, (_, a))| members[i + 1..].iter().map(move |(_, b)| (*a, *b)))
            .map(|(a, b)| self.index().synergy_score(a.as_str(), b.as_str()))
            .sum::<f64>();
        let counter = picks.iter().map(|p| p.score.counter).sum();
        let exposure = picks.iter().map(|p| p.score.exposure).sum();
        let risk = DescriptiveStats::new(picks.iter().map(|p| 1.0 - p.score.reliability_factor()))
            .map_or(0.0, |stats| stats.mean);
        let (bonuses, penalties) = self.composition_adjustments(&picks);

        let total_score = picks.iter().map(|p| p.contribution).sum::<f64>()
            + weights.synergy * synergy
            + bonuses
            - penalties;
        DraftEvaluation {
            picks,
            synergy,
            counter,
            risk,
            exposure,
            bonuses,
            penalties,
            total_score,
        }
    }

    /// Evaluates `side`'s team of `session`.
    #[must_use]
    pub fn evaluate_session(&self, session: &DraftSession, side: Side) -> DraftEvaluation {
        let ctx = self.context(session, side);
        self.evaluate_draft(&ctx, ctx.ally())
    }

    fn composition_adjustments(&self, picks: &[PickBreakdown]) -> (f64, f64) {
        let rules = &self.config().composition;
        let components = picks
            .iter()
            .filter_map(|p| {
                self.index()
                    .champion_role(p.champion.as_str(), p.role)
                    .map(|entry| entry.components)
            })
            .collect::<Vec<_>>();

        let mut penalties = 0.0;
        let has_frontline = components
            .iter()
            .any(|c| c.frontline >= rules.frontline_threshold);
        if picks.len() >= rules.frontline_min_picks && !has_frontline {
            penalties += rules.missing_frontline_penalty;
        }

        let mut bonuses = 0.0;
        let teamfight = DescriptiveStats::new(components.iter().map(|c| c.teamfight));
        if teamfight.is_some_and(|stats| stats.mean >= rules.teamfight_threshold) {
            bonuses += rules.teamfight_bonus;
        }
        (bonuses, penalties)
    }
}

#[cfg(test)]
mod tests {
    use draftwise_engine::Turn;

    use crate::scoring::tests::engine;

    use super::*;

    fn ctx() -> DraftContext {
        DraftContext::new(Side::Ally, 0, Composition::new(), Composition::new())
    }

    #[test]
    fn test_empty_team_scores_zero() {
        let engine = engine();
        let evaluation = engine.evaluate_draft(&ctx(), &Composition::new());
        assert!(evaluation.picks.is_empty());
        assert_eq!(evaluation.total_score, 0.0);
        assert_eq!(evaluation.risk, 0.0);
    }

    #[test]
    fn test_single_pick_scenario() {
        let engine = engine();
        let mut session = DraftSession::new();
        assert_eq!(session.current_turn(), Some(Turn::new(Side::Ally, 0)));
        let outcome = session.pick_champion(Side::Ally, 3, Some("Aatrox".into()), Some(Role::Top));
        assert!(outcome.is_applied());
        assert_eq!(session.current_turn(), Some(Turn::new(Side::Opponent, 0)));

        let evaluation = engine.evaluate_session(&session, Side::Ally);
        let non_zero = evaluation
            .contributions()
            .values()
            .filter(|c| **c != 0.0)
            .count();
        assert_eq!(non_zero, 1);
        assert_eq!(evaluation.picks[0].champion.as_str(), "Aatrox");
    }

    #[test]
    fn test_pair_synergy_counted_once() {
        let engine = engine();
        let team =
            Composition::from_picks([(Role::Jungle, "Vi".into()), (Role::Middle, "Ahri".into())]);
        let evaluation = engine.evaluate_draft(&ctx(), &team);
        assert!((evaluation.synergy - 0.1).abs() < 1e-12);
        for pick in &evaluation.picks {
            assert!((pick.score.synergy - 0.1).abs() < 1e-12);
        }
        let weights = engine.config().slot_weights.last();
        let expected = evaluation.picks.iter().map(|p| p.contribution).sum::<f64>()
            + weights.synergy * 0.1
            + evaluation.bonuses
            - evaluation.penalties;
        assert!((evaluation.total_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_missing_frontline_penalty() {
        let engine = engine();
        let team = Composition::from_picks([
            (Role::Top, "Aatrox".into()),
            (Role::Jungle, "Vi".into()),
            (Role::Middle, "Ahri".into()),
        ]);
        let evaluation = engine.evaluate_draft(&ctx(), &team);
        assert_eq!(
            evaluation.penalties,
            engine.config().composition.missing_frontline_penalty
        );
        assert!(evaluation.risk > 0.0 && evaluation.risk < 1.0);
    }
}
