//! Row-by-row accumulators folded by the aggregator.

use draftwise_stats::moments::RunningMoments;

use crate::{
    config::LaneWeights,
    metric::{Metric, MetricVector},
    record::{Checkpoint, Objective, PlayerGameRow},
};

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Mean lane composite over the checkpoints the game reached.
#[must_use]
pub fn game_lane_composite(row: &PlayerGameRow, weights: &LaneWeights) -> Option<f64> {
    let mut moments = RunningMoments::default();
    for checkpoint in Checkpoint::ALL {
        if let Some(diff) = row.lane.get(checkpoint) {
            moments.push(weights.composite(diff));
        }
    }
    moments.mean_if_any()
}

/// Wins over games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinCounter {
    pub games: u64,
    pub wins: u64,
}

impl WinCounter {
    pub fn push(&mut self, win: bool) {
        self.games += 1;
        self.wins += u64::from(win);
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        (self.games > 0).then(|| self.wins as f64 / self.games as f64)
    }
}

/// Sums and counts of one champion-role bucket.
#[derive(Debug, Clone, Default)]
pub struct BucketAccumulator {
    pub record: WinCounter,
    pub minutes: f64,
    pub lane: [RunningMoments; 4],
    pub lane_per_game: RunningMoments,
    pub objective_taken: [f64; 5],
    pub objective_delta: [f64; 5],
    pub plates: f64,
    pub first_towers: u64,
    pub first_mid_towers: u64,
    pub damage_dealt: f64,
    pub damage_mitigated: f64,
    pub damage_taken: f64,
    pub vision: f64,
    pub kill_participation: RunningMoments,
}

impl BucketAccumulator {
    pub fn push(&mut self, row: &PlayerGameRow, lane_weights: &LaneWeights) {
        self.record.push(row.win);
        self.minutes += row.game_minutes;
        for checkpoint in Checkpoint::ALL {
            if let Some(diff) = row.lane.get(checkpoint) {
                self.lane[checkpoint.index()].push(lane_weights.composite(diff));
            }
        }
        if let Some(lane) = game_lane_composite(row, lane_weights) {
            self.lane_per_game.push(lane);
        }
        for objective in Objective::ALL {
            let tally = row.objectives.get(objective);
            let (taken, conceded) = (finite_or_zero(tally.taken), finite_or_zero(tally.conceded));
            self.objective_taken[objective.index()] += taken;
            self.objective_delta[objective.index()] += taken - conceded;
        }
        self.plates += finite_or_zero(row.turret_plates);
        self.first_towers += u64::from(row.first_tower);
        self.first_mid_towers += u64::from(row.first_mid_tower);
        self.damage_dealt += finite_or_zero(row.damage_dealt);
        self.damage_mitigated += finite_or_zero(row.damage_mitigated);
        self.damage_taken += finite_or_zero(row.damage_taken);
        self.vision += finite_or_zero(row.vision_score);
        if let Some(kp) = row.kill_participation {
            self.kill_participation.push(kp);
        }
    }

    /// Per-game and per-minute rates of the bucket.
    ///
    /// Lane volatility needs at least two games with lane data.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn rates(&self, winrate_adjusted: f64) -> MetricVector {
        let games = self.record.games as f64;
        let mut rates = MetricVector::default();
        if self.record.games == 0 {
            return rates;
        }
        rates.set(Metric::WinrateAdjusted, winrate_adjusted);
        for checkpoint in Checkpoint::ALL {
            if let Some(mean) = self.lane[checkpoint.index()].mean_if_any() {
                rates.set(Metric::lane(checkpoint), mean);
            }
        }
        if self.lane_per_game.count() >= 2 {
            rates.set(Metric::LaneVolatility, self.lane_per_game.std_dev());
        }
        for objective in Objective::ALL {
            rates.set(
                Metric::objective_delta(objective),
                self.objective_delta[objective.index()] / games,
            );
            rates.set(
                Metric::objective_rate(objective),
                self.objective_taken[objective.index()] / games,
            );
        }
        rates.set(Metric::PlatesPerGame, self.plates / games);
        rates.set(Metric::FirstTowerRate, self.first_towers as f64 / games);
        rates.set(Metric::FirstMidTowerRate, self.first_mid_towers as f64 / games);
        if self.minutes > 0.0 {
            rates.set(Metric::DamagePerMinute, self.damage_dealt / self.minutes);
            rates.set(Metric::MitigatedPerMinute, self.damage_mitigated / self.minutes);
            rates.set(Metric::TakenPerMinute, self.damage_taken / self.minutes);
            rates.set(Metric::VisionPerMinute, self.vision / self.minutes);
        }
        if let Some(kp) = self.kill_participation.mean_if_any() {
            rates.set(Metric::KillParticipation, kp);
        }
        rates
    }
}

/// One directed lane matchup.
#[derive(Debug, Clone, Default)]
pub struct CounterAccumulator {
    pub record: WinCounter,
    pub lane: RunningMoments,
    pub early_kill_participation: RunningMoments,
}

impl CounterAccumulator {
    pub fn push(&mut self, row: &PlayerGameRow, lane_weights: &LaneWeights) {
        self.record.push(row.win);
        if let Some(lane) = game_lane_composite(row, lane_weights) {
            self.lane.push(lane);
        }
        if let Some(kp) = row.early_kill_participation.or(row.kill_participation) {
            self.early_kill_participation.push(kp);
        }
    }
}

/// One player on one champion in one role.
#[derive(Debug, Clone, Default)]
pub struct PlayerAccumulator {
    pub record: WinCounter,
    pub lane: RunningMoments,
}

impl PlayerAccumulator {
    pub fn push(&mut self, row: &PlayerGameRow, lane_weights: &LaneWeights) {
        self.record.push(row.win);
        if let Some(lane) = game_lane_composite(row, lane_weights) {
            self.lane.push(lane);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{Checkpoints, LaneDiff, ObjectiveTally, Objectives};

    use super::*;

    fn row(win: bool, gold_at_10: f64) -> PlayerGameRow {
        PlayerGameRow {
            win,
            game_minutes: 20.0,
            lane: Checkpoints {
                at_10: Some(LaneDiff {
                    gold: gold_at_10,
                    ..LaneDiff::default()
                }),
                ..Checkpoints::default()
            },
            objectives: Objectives {
                dragons: ObjectiveTally {
                    taken: 3.0,
                    conceded: 1.0,
                },
                ..Objectives::default()
            },
            damage_dealt: 20_000.0,
            first_tower: win,
            ..PlayerGameRow::default()
        }
    }

    #[test]
    fn test_bucket_rates() {
        let weights = LaneWeights::default();
        let mut bucket = BucketAccumulator::default();
        bucket.push(&row(true, 100.0), &weights);
        bucket.push(&row(false, -300.0), &weights);

        let rates = bucket.rates(0.5);
        assert_eq!(rates.get(Metric::Lane10), Some(-100.0));
        assert_eq!(rates.get(Metric::Lane25), None);
        assert_eq!(rates.get(Metric::LaneVolatility), Some(200.0));
        assert_eq!(rates.get(Metric::DragonDelta), Some(2.0));
        assert_eq!(rates.get(Metric::DragonRate), Some(3.0));
        assert_eq!(rates.get(Metric::FirstTowerRate), Some(0.5));
        assert_eq!(rates.get(Metric::DamagePerMinute), Some(1000.0));
        assert_eq!(rates.get(Metric::KillParticipation), None);
    }

    #[test]
    fn test_single_game_has_no_volatility() {
        let mut bucket = BucketAccumulator::default();
        bucket.push(&row(true, 100.0), &LaneWeights::default());
        assert_eq!(bucket.rates(0.5).get(Metric::LaneVolatility), None);
    }

    #[test]
    fn test_game_lane_composite_averages_checkpoints() {
        let mut r = row(true, 100.0);
        r.lane.at_15 = Some(LaneDiff {
            gold: 300.0,
            ..LaneDiff::default()
        });
        assert_eq!(
            game_lane_composite(&r, &LaneWeights::default()),
            Some(200.0)
        );
        r.lane = Checkpoints::default();
        assert_eq!(game_lane_composite(&r, &LaneWeights::default()), None);
    }
}
