//! The statistics aggregator: raw rows to [`PrecomputedDraftMetrics`].
//!
//! # Pipeline
//!
//! 1. Validate every [`PlayerGameRow`]; skipped rows are counted per
//!    [`SkipReason`] in the [`AggregationReport`].
//! 2. Fold accepted rows into per champion-role, per lane matchup and per
//!    player accumulators.
//! 3. Shrink win rates toward the role average (Beta-Binomial, strength `n0`).
//! 4. Z-score every rate within its role and blend the z-scores into the
//!    composite components, `intrinsic` and `blind`.
//! 5. Derive synergy (NPMI + pair win rate) from [`TeamPickRow`]s, rebuilding
//!    them from the player rows when none are given.
//!
//! Aggregation never fails on bad data; only the configuration is validated.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use draftwise_engine::{ChampionKey, Role, RoleMap};
use draftwise_stats::{information::CoOccurrence, smoothing::BetaBinomialPrior, zscore::ZScorer};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::{
    accumulator::{BucketAccumulator, CounterAccumulator, PlayerAccumulator, WinCounter},
    config::{AggregationConfig, ConfigError},
    dataset::{Dataset, DatasetEntry},
    metric::{Components, Metric, MetricVector},
    metrics::{
        ChampionRoleMetrics, CounterEntry, DatasetId, FlexMetrics, OpponentShare,
        PlayerChampionReliability, PrecomputedDraftMetrics, Reliability, RoleSummary, SynergyEntry,
    },
    record::{PlayerGameRow, SkipReason, TeamPickRow, ValidRow},
    schema::SCHEMA_VERSION,
};

/// What the aggregator accepted and skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub player_rows: usize,
    pub accepted_rows: usize,
    pub skipped_rows: BTreeMap<SkipReason, usize>,
    pub team_rows: usize,
    pub accepted_team_rows: usize,
    pub skipped_team_rows: BTreeMap<SkipReason, usize>,
    /// Team rows were rebuilt from player rows.
    pub team_rows_derived: bool,
    pub games: u64,
    pub champion_roles: usize,
    /// Champion-role buckets left out by `min_games`.
    pub below_min_games: usize,
}

impl AggregationReport {
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped_rows.values().sum()
    }
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub metrics: PrecomputedDraftMetrics,
    pub dataset: Dataset,
    pub report: AggregationReport,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    config: AggregationConfig,
    /// Canonical JSON of `config`, part of every dataset id.
    config_json: Vec<u8>,
}

type BucketKey = (ChampionKey, Role);
type CounterKey = (Role, ChampionKey, ChampionKey);
type PlayerKey = (String, ChampionKey, Role);

#[derive(Default)]
struct Accumulated<'a> {
    games: BTreeSet<&'a str>,
    roles: RoleMap<WinCounter>,
    buckets: BTreeMap<BucketKey, BucketAccumulator>,
    champion_games: BTreeMap<ChampionKey, u64>,
    counters: BTreeMap<CounterKey, CounterAccumulator>,
    players: BTreeMap<PlayerKey, PlayerAccumulator>,
    lineups: BTreeMap<(&'a str, Role), [Option<ValidRow<'a>>; 2]>,
}

#[expect(clippy::cast_precision_loss)]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Aggregator {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `config` does not validate.
    pub fn new(config: AggregationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config_json = serde_json::to_vec(&config)
            .map_err(|_| ConfigError::new("config", "must serialize to JSON"))?;
        Ok(Self {
            config,
            config_json,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Aggregates `players` (and `teams`, or team rows rebuilt from `players`
    /// when `teams` is empty).
    #[must_use]
    pub fn aggregate(&self, players: &[PlayerGameRow], teams: &[TeamPickRow]) -> Aggregation {
        let mut report = AggregationReport {
            player_rows: players.len(),
            ..AggregationReport::default()
        };
        let acc = self.accumulate(players, &mut report);
        report.games = acc.games.len() as u64;

        let roles = acc.roles.map(|_, record| RoleSummary {
            games: record.games,
            wins: record.wins,
            win_rate: record.rate().unwrap_or(0.5),
        });

        let derived;
        let teams = if teams.is_empty() {
            derived = TeamPickRow::from_player_rows(players);
            report.team_rows_derived = true;
            &derived[..]
        } else {
            teams
        };
        let synergy = self.synergy(teams, &mut report);
        let counters = self.counters(&acc.counters);
        let champion_roles = self.champion_roles(&acc, &roles, &mut report);
        let flex = flex_metrics(&acc.buckets);
        let player_reliability = self.player_reliability(&acc.players);

        let dataset_id = self.fingerprint(&acc.games, &report);
        let dataset = dataset(&dataset_id, &acc);
        let metrics = PrecomputedDraftMetrics {
            schema_version: SCHEMA_VERSION,
            dataset_id,
            generated_at: Utc::now(),
            config: self.config.clone(),
            total_games: report.games,
            roles: roles.iter().map(|(role, summary)| (role, *summary)).collect(),
            champion_roles,
            flex,
            synergy,
            counters,
            player_reliability,
        };

        tracing::info!(
            dataset_id = %metrics.dataset_id,
            rows = report.player_rows,
            accepted = report.accepted_rows,
            skipped = report.skipped(),
            games = report.games,
            champion_roles = report.champion_roles,
            synergy_pairs = metrics.synergy.len(),
            counters = metrics.counters.len(),
            "aggregation finished"
        );
        Aggregation {
            metrics,
            dataset,
            report,
        }
    }

    fn accumulate<'a>(
        &self,
        players: &'a [PlayerGameRow],
        report: &mut AggregationReport,
    ) -> Accumulated<'a> {
        let lane_weights = &self.config.lane_weights;
        let mut acc = Accumulated::default();
        for (i, row) in players.iter().enumerate() {
            let valid = match row.validate() {
                Ok(valid) => valid,
                Err(reason) => {
                    tracing::debug!(row = i, %reason, "skipping player row");
                    *report.skipped_rows.entry(reason).or_default() += 1;
                    continue;
                }
            };
            report.accepted_rows += 1;
            let champion = ChampionKey::from(valid.champion);

            acc.games.insert(valid.game_id);
            acc.roles[valid.role].push(row.win);
            acc.buckets
                .entry((champion.clone(), valid.role))
                .or_default()
                .push(row, lane_weights);
            *acc.champion_games.entry(champion.clone()).or_default() += 1;
            if let Some(player) = row.player_name() {
                acc.players
                    .entry((player.to_owned(), champion, valid.role))
                    .or_default()
                    .push(row, lane_weights);
            }
            if let Some(side) = row.side {
                let lineup = acc.lineups.entry((valid.game_id, valid.role)).or_default();
                // The first row of a (game, role, side) wins.
                lineup[side.index()].get_or_insert(valid);
            }
        }

        for [blue, red] in acc.lineups.values() {
            let (Some(blue), Some(red)) = (blue, red) else {
                continue;
            };
            for (me, them) in [(blue, red), (red, blue)] {
                let key = (me.role, me.champion.into(), them.champion.into());
                acc.counters
                    .entry(key)
                    .or_default()
                    .push(me.row, lane_weights);
            }
        }
        acc
    }

    fn champion_roles(
        &self,
        acc: &Accumulated<'_>,
        roles: &RoleMap<RoleSummary>,
        report: &mut AggregationReport,
    ) -> Vec<ChampionRoleMetrics> {
        let n0 = self.config.prior_strength;
        let priors = roles.map(|_, summary| BetaBinomialPrior::new(summary.win_rate, n0));

        let emitted = acc
            .buckets
            .iter()
            .filter(|(_, bucket)| bucket.record.games >= self.config.min_games)
            .map(|((champion, role), bucket)| {
                let record = bucket.record;
                let adjusted = priors[*role].posterior_mean(record.wins, record.games);
                ((champion, *role), bucket, bucket.rates(adjusted))
            })
            .collect::<Vec<_>>();
        report.below_min_games = acc.buckets.len() - emitted.len();
        report.champion_roles = emitted.len();

        let scorers = RoleMap::from_fn(|role| {
            Metric::ALL
                .into_iter()
                .map(|metric| {
                    let values = emitted
                        .iter()
                        .filter(|((_, r), _, _)| *r == role)
                        .filter_map(|(_, _, rates)| rates.get(metric));
                    (metric, ZScorer::from_values(values))
                })
                .collect::<BTreeMap<_, _>>()
        });

        let opponents = opponent_shares(&acc.counters);
        emitted
            .into_iter()
            .map(|((champion, role), bucket, rates)| {
                let z = rates
                    .iter()
                    .map(|(metric, value)| {
                        let scorer = scorers[role].get(&metric).unwrap_or(&ZScorer::NEUTRAL);
                        (metric, scorer.score(value))
                    })
                    .collect::<MetricVector>();
                let composites = &self.config.composites.0[role];
                let z_of = |metric| z.get(metric).unwrap_or(0.0);
                let components = Components {
                    priority: z.blend(&composites.priority),
                    teamfight: z.blend(&composites.teamfight),
                    scaling: z.blend(&composites.scaling),
                    frontline: z.blend(&composites.frontline),
                    lane_10: z_of(Metric::Lane10),
                    lane_15: z_of(Metric::Lane15),
                    lane_20: z_of(Metric::Lane20),
                    lane_25: z_of(Metric::Lane25),
                    lane_volatility: z_of(Metric::LaneVolatility),
                };
                let winrate_z = z_of(Metric::WinrateAdjusted);
                let record = bucket.record;
                let champion_games = acc.champion_games.get(champion).copied().unwrap_or(0);
                ChampionRoleMetrics {
                    champion: champion.clone(),
                    role,
                    games: record.games,
                    wins: record.wins,
                    minutes: bucket.minutes,
                    winrate_raw: record.rate().unwrap_or(0.0),
                    winrate_adjusted: rates.get(Metric::WinrateAdjusted).unwrap_or(0.5),
                    intrinsic: self.config.intrinsic.apply(winrate_z, &components),
                    blind: self.config.blind.apply(winrate_z, &components),
                    components,
                    reliability: Reliability {
                        sample_weight: priors[role].sample_weight(record.games),
                        lane_variance: bucket.lane_per_game.variance(),
                        sigma: bucket.lane_per_game.std_dev(),
                    },
                    flex_prior: ratio(record.games, champion_games),
                    opponents: opponents
                        .get(&(role, champion.clone()))
                        .cloned()
                        .unwrap_or_default(),
                    rates,
                }
            })
            .collect()
    }

    fn counters(&self, counters: &BTreeMap<CounterKey, CounterAccumulator>) -> Vec<CounterEntry> {
        let prior = BetaBinomialPrior::new(0.5, self.config.prior_strength);
        let lane_scorers = RoleMap::from_fn(|role| {
            ZScorer::from_values(
                counters
                    .iter()
                    .filter(|((r, _, _), _)| *r == role)
                    .filter_map(|(_, counter)| counter.lane.mean_if_any()),
            )
        });
        counters
            .iter()
            .map(|((role, champion, opponent), counter)| {
                let record = counter.record;
                let winrate_smoothed = prior.posterior_mean(record.wins, record.games);
                CounterEntry {
                    role: *role,
                    champion: champion.clone(),
                    opponent: opponent.clone(),
                    games: record.games,
                    wins: record.wins,
                    winrate_smoothed,
                    lane_delta_z: counter
                        .lane
                        .mean_if_any()
                        .map_or(0.0, |lane| lane_scorers[*role].score(lane)),
                    early_kill_participation: counter.early_kill_participation.mean(),
                    score: winrate_smoothed - 0.5,
                }
            })
            .collect()
    }

    fn synergy(&self, teams: &[TeamPickRow], report: &mut AggregationReport) -> Vec<SynergyEntry> {
        report.team_rows = teams.len();
        let mut solo = BTreeMap::<ChampionKey, WinCounter>::new();
        let mut pairs = BTreeMap::<(ChampionKey, ChampionKey), WinCounter>::new();
        for (i, team) in teams.iter().enumerate() {
            let champions = match team.validate() {
                Ok(champions) => champions,
                Err(reason) => {
                    tracing::debug!(row = i, %reason, "skipping team row");
                    *report.skipped_team_rows.entry(reason).or_default() += 1;
                    continue;
                }
            };
            report.accepted_team_rows += 1;
            for (j, a) in champions.iter().enumerate() {
                solo.entry(a.clone()).or_default().push(team.win);
                for b in &champions[j + 1..] {
                    pairs.entry((a.clone(), b.clone())).or_default().push(team.win);
                }
            }
        }

        let weights = &self.config.synergy;
        let prior = BetaBinomialPrior::new(0.5, self.config.prior_strength);
        let samples = report.accepted_team_rows as u64;
        let solo_rate = |champion: &ChampionKey| {
            let record = solo.get(champion).copied().unwrap_or_default();
            (record, prior.posterior_mean(record.wins, record.games))
        };
        pairs
            .into_iter()
            .filter(|(_, record)| record.games >= weights.min_pair_games)
            .map(|((first, second), record)| {
                let (first_record, first_rate) = solo_rate(&first);
                let (second_record, second_rate) = solo_rate(&second);
                let npmi = CoOccurrence {
                    samples,
                    first: first_record.games,
                    second: second_record.games,
                    both: record.games,
                }
                .npmi()
                .unwrap_or(0.0);
                let pair_rate = prior.posterior_mean(record.wins, record.games);
                let winrate_delta = pair_rate - (first_rate + second_rate) / 2.0;
                let score = (weights.npmi * npmi + weights.winrate_delta * winrate_delta)
                    * prior.sample_weight(record.games);
                SynergyEntry {
                    first,
                    second,
                    games: record.games,
                    wins: record.wins,
                    npmi,
                    winrate_delta,
                    score,
                }
            })
            .collect()
    }

    fn player_reliability(
        &self,
        players: &BTreeMap<PlayerKey, PlayerAccumulator>,
    ) -> Vec<PlayerChampionReliability> {
        let prior = BetaBinomialPrior::new(0.5, self.config.prior_strength);
        players
            .iter()
            .map(|((player, champion, role), acc)| PlayerChampionReliability {
                player: player.clone(),
                champion: champion.clone(),
                role: *role,
                games: acc.record.games,
                wins: acc.record.wins,
                lane_variance: acc.lane.variance(),
                sigma: acc.lane.std_dev(),
                weight: prior.sample_weight(acc.record.games),
            })
            .collect()
    }

    /// XXH3 over the game ids, the accepted row counts and the config, so the
    /// id is the same on every platform and toolchain.
    fn fingerprint(&self, games: &BTreeSet<&str>, report: &AggregationReport) -> DatasetId {
        let mut hasher = Xxh3::new();
        for game in games {
            hasher.update(game.as_bytes());
            hasher.update(&[0]);
        }
        hasher.update(&(report.accepted_rows as u64).to_le_bytes());
        hasher.update(&(report.accepted_team_rows as u64).to_le_bytes());
        hasher.update(&self.config_json);
        DatasetId::from_hash(hasher.digest())
    }
}

fn opponent_shares(
    counters: &BTreeMap<CounterKey, CounterAccumulator>,
) -> BTreeMap<(Role, ChampionKey), Vec<OpponentShare>> {
    let mut grouped = BTreeMap::<(Role, ChampionKey), Vec<(ChampionKey, u64)>>::new();
    for ((role, champion, opponent), counter) in counters {
        grouped
            .entry((*role, champion.clone()))
            .or_default()
            .push((opponent.clone(), counter.record.games));
    }
    grouped
        .into_iter()
        .map(|(key, opponents)| {
            let total: u64 = opponents.iter().map(|(_, games)| games).sum();
            let mut shares = opponents
                .into_iter()
                .map(|(champion, games)| OpponentShare {
                    champion,
                    probability: ratio(games, total),
                })
                .collect::<Vec<_>>();
            shares.sort_by(|a, b| {
                b.probability
                    .total_cmp(&a.probability)
                    .then_with(|| a.champion.cmp(&b.champion))
            });
            (key, shares)
        })
        .collect()
}

fn flex_metrics(buckets: &BTreeMap<BucketKey, BucketAccumulator>) -> Vec<FlexMetrics> {
    let mut per_champion = BTreeMap::<&ChampionKey, BTreeMap<Role, u64>>::new();
    for ((champion, role), bucket) in buckets {
        per_champion
            .entry(champion)
            .or_default()
            .insert(*role, bucket.record.games);
    }
    #[expect(clippy::cast_precision_loss)]
    let max_entropy = (Role::LEN as f64).ln();
    per_champion
        .into_iter()
        .map(|(champion, roles)| {
            let games: u64 = roles.values().sum();
            let role_shares = roles
                .into_iter()
                .map(|(role, role_games)| (role, ratio(role_games, games)))
                .collect::<BTreeMap<_, _>>();
            let entropy: f64 = role_shares
                .values()
                .filter(|p| **p > 0.0)
                .map(|p| -p * p.ln())
                .sum();
            FlexMetrics {
                champion: champion.clone(),
                games,
                role_shares,
                flex_score: (entropy / max_entropy).clamp(0.0, 1.0),
            }
        })
        .collect()
}

fn dataset(dataset_id: &DatasetId, acc: &Accumulated<'_>) -> Dataset {
    let total_games = acc.games.len() as u64;
    let mut champions = BTreeMap::<ChampionKey, BTreeMap<Role, DatasetEntry>>::new();
    for ((champion, role), bucket) in &acc.buckets {
        let record = bucket.record;
        let champion_games = acc.champion_games.get(champion).copied().unwrap_or(0);
        champions.entry(champion.clone()).or_default().insert(
            *role,
            DatasetEntry {
                games: record.games,
                wins: record.wins,
                pick_rate: ratio(record.games, total_games),
                role_share: ratio(record.games, champion_games),
            },
        );
    }
    Dataset {
        dataset_id: dataset_id.clone(),
        total_games,
        champions,
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{Checkpoints, LaneDiff, MatchSide};

    use super::*;

    const BLUE: [(&str, &str); 5] = [
        ("Aatrox", "top"),
        ("Vi", "jungle"),
        ("Ahri", "mid"),
        ("Jinx", "adc"),
        ("Thresh", "support"),
    ];
    const RED: [(&str, &str); 5] = [
        ("Garen", "top"),
        ("LeeSin", "jungle"),
        ("Syndra", "mid"),
        ("Kaisa", "adc"),
        ("Lux", "support"),
    ];

    fn game_rows(game: usize, blue_wins: bool, blue_gold: f64) -> Vec<PlayerGameRow> {
        let mut rows = vec![];
        for (side, lineup, win, gold) in [
            (MatchSide::Blue, BLUE, blue_wins, blue_gold),
            (MatchSide::Red, RED, !blue_wins, -blue_gold),
        ] {
            for (champion, role) in lineup {
                rows.push(PlayerGameRow {
                    game_id: Some(format!("g{game}")),
                    player: Some(format!("{side}-{role}")),
                    champion: Some(champion.into()),
                    role: Some(role.into()),
                    side: Some(side),
                    win,
                    game_minutes: 30.0,
                    lane: Checkpoints {
                        at_10: Some(LaneDiff {
                            gold,
                            ..LaneDiff::default()
                        }),
                        ..Checkpoints::default()
                    },
                    damage_dealt: 15_000.0,
                    ..PlayerGameRow::default()
                });
            }
        }
        rows
    }

    fn sample_rows() -> Vec<PlayerGameRow> {
        let mut rows = vec![];
        for game in 0..12 {
            let blue_wins = game % 3 != 0;
            #[expect(clippy::cast_precision_loss)]
            let gold = if blue_wins { 200.0 + game as f64 } else { -150.0 };
            rows.extend(game_rows(game, blue_wins, gold));
        }
        rows
    }

    fn aggregate(rows: &[PlayerGameRow]) -> Aggregation {
        Aggregator::new(AggregationConfig::default())
            .unwrap()
            .aggregate(rows, &[])
    }

    #[test]
    fn test_adjusted_winrate_is_bounded_and_shrunk() {
        let aggregation = aggregate(&sample_rows());
        let metrics = &aggregation.metrics;
        assert_eq!(metrics.total_games, 12);
        assert_eq!(metrics.champion_roles.len(), 10);
        for entry in &metrics.champion_roles {
            assert!(entry.winrate_adjusted > 0.0 && entry.winrate_adjusted < 1.0);
            let role_rate = metrics.roles[&entry.role].win_rate;
            let (lo, hi) = if entry.winrate_raw < role_rate {
                (entry.winrate_raw, role_rate)
            } else {
                (role_rate, entry.winrate_raw)
            };
            assert!(entry.winrate_adjusted >= lo - 1e-12 && entry.winrate_adjusted <= hi + 1e-12);
        }
    }

    #[test]
    fn test_skipped_rows_are_counted() {
        let mut rows = sample_rows();
        rows.push(PlayerGameRow {
            game_id: None,
            ..rows[0].clone()
        });
        rows.push(PlayerGameRow {
            role: Some("roamer".into()),
            ..rows[0].clone()
        });
        rows.push(PlayerGameRow {
            game_minutes: -1.0,
            ..rows[0].clone()
        });
        let report = aggregate(&rows).report;
        assert_eq!(report.accepted_rows, 120);
        assert_eq!(report.skipped(), 3);
        assert_eq!(report.skipped_rows[&SkipReason::MissingGameId], 1);
        assert_eq!(report.skipped_rows[&SkipReason::UnrecognizedRole], 1);
        assert_eq!(report.skipped_rows[&SkipReason::NonPositiveGameLength], 1);
        assert!(report.team_rows_derived);
        assert_eq!(report.accepted_team_rows, 24);
    }

    #[test]
    fn test_counters_are_directed() {
        let metrics = aggregate(&sample_rows()).metrics;
        let find = |champion: &str, opponent: &str| {
            metrics
                .counters
                .iter()
                .find(|c| c.champion.as_str() == champion && c.opponent.as_str() == opponent)
                .unwrap()
        };
        let aatrox = find("Aatrox", "Garen");
        let garen = find("Garen", "Aatrox");
        assert_eq!(aatrox.role, Role::Top);
        assert_eq!(aatrox.games, 12);
        assert_eq!(aatrox.wins, 8);
        assert_eq!(garen.wins, 4);
        assert!(aatrox.score > 0.0 && garen.score < 0.0);
        assert!((aatrox.score + garen.score).abs() < 1e-12);
        assert!(aatrox.lane_delta_z > garen.lane_delta_z);
    }

    #[test]
    fn test_synergy_pairs() {
        let metrics = aggregate(&sample_rows()).metrics;
        // Ten champions per side pair into C(5, 2) pairs per team.
        assert_eq!(metrics.synergy.len(), 20);
        for entry in &metrics.synergy {
            assert!(entry.first < entry.second);
            assert!(entry.npmi > 0.0);
        }
    }

    #[test]
    fn test_flex_and_opponents() {
        let mut rows = sample_rows();
        // Aatrox also played once in the middle lane.
        rows.push(PlayerGameRow {
            game_id: Some("solo".into()),
            role: Some("mid".into()),
            side: None,
            ..rows[0].clone()
        });
        let metrics = aggregate(&rows).metrics;
        let aatrox = metrics
            .flex
            .iter()
            .find(|f| f.champion.as_str() == "Aatrox")
            .unwrap();
        assert_eq!(aatrox.role_count(), 2);
        assert!(aatrox.flex_score > 0.0 && aatrox.flex_score < 1.0);

        let vi = metrics.flex.iter().find(|f| f.champion.as_str() == "Vi").unwrap();
        assert_eq!(vi.flex_score, 0.0);

        let top = metrics
            .champion_roles
            .iter()
            .find(|m| m.champion.as_str() == "Aatrox" && m.role == Role::Top)
            .unwrap();
        assert_eq!(top.opponents.len(), 1);
        assert_eq!(top.opponents[0].champion.as_str(), "Garen");
        assert!((top.opponents[0].probability - 1.0).abs() < 1e-12);
        assert!((top.flex_prior - 12.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_games_filters_buckets() {
        let config = AggregationConfig {
            min_games: 13,
            ..AggregationConfig::default()
        };
        let aggregation = Aggregator::new(config).unwrap().aggregate(&sample_rows(), &[]);
        assert!(aggregation.metrics.champion_roles.is_empty());
        assert_eq!(aggregation.report.below_min_games, 10);
        // The pick-rate table keeps every bucket.
        assert_eq!(aggregation.dataset.pick_rate("Aatrox", Role::Top), 1.0);
    }

    #[test]
    fn test_player_reliability() {
        let metrics = aggregate(&sample_rows()).metrics;
        assert_eq!(metrics.player_reliability.len(), 10);
        let entry = &metrics.player_reliability[0];
        assert_eq!(entry.games, 12);
        assert!((entry.weight - 12.0 / 28.0).abs() < 1e-12);
        assert!(entry.sigma > 0.0);
    }

    #[test]
    fn test_dataset_id_depends_on_data() {
        let rows = sample_rows();
        let a = aggregate(&rows).metrics.dataset_id;
        let b = aggregate(&rows).metrics.dataset_id;
        let c = aggregate(&rows[..60]).metrics.dataset_id;
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_dataset_id_is_fixed_for_fixed_input() {
        let config = AggregationConfig::default();
        let aggregator = Aggregator::new(config.clone()).unwrap();
        let games = BTreeSet::from(["g1", "g2"]);
        let report = AggregationReport {
            accepted_rows: 20,
            ..AggregationReport::default()
        };

        let mut hasher = Xxh3::new();
        hasher.update(b"g1\0g2\0");
        hasher.update(&20_u64.to_le_bytes());
        hasher.update(&0_u64.to_le_bytes());
        hasher.update(&serde_json::to_vec(&config).unwrap());
        let expected = DatasetId::from_hash(hasher.digest());
        assert_eq!(aggregator.fingerprint(&games, &report), expected);
        assert_eq!(expected.as_str().len(), 16);

        let other = Aggregator::new(AggregationConfig {
            prior_strength: config.prior_strength * 2.0,
            ..config
        })
        .unwrap();
        assert_ne!(other.fingerprint(&games, &report), expected);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AggregationConfig {
            prior_strength: f64::NAN,
            ..AggregationConfig::default()
        };
        assert!(Aggregator::new(config).is_err());
    }
}
