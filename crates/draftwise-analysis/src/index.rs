//! O(1) lookups over a [`PrecomputedDraftMetrics`] bundle.
//!
//! The index validates the bundle once while building. Every lookup afterwards
//! is infallible: a missing key is `None`, never an error.

use std::collections::HashMap;

use draftwise_engine::{ChampionKey, Role, RoleMap};

use crate::{
    metrics::{
        ChampionRoleMetrics, CounterEntry, DatasetId, FlexMetrics, PlayerChampionReliability,
        PrecomputedDraftMetrics, RoleSummary, SynergyEntry,
    },
    schema::SCHEMA_VERSION,
};

/// A structural violation found while indexing a bundle.
///
/// These indicate a corrupt or hand-edited bundle; a bundle produced by the
/// aggregator never triggers them.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IndexBuildError {
    #[display("unsupported schema version {found}")]
    UnsupportedSchema { found: u32 },
    #[display("{what}: wins ({wins}) exceed games ({games})")]
    WinsExceedGames { what: String, wins: u64, games: u64 },
    #[display("{what}: entry has no games")]
    NoGames { what: String },
    #[display("{what}: `{field}` is not finite")]
    NonFinite { what: String, field: &'static str },
    #[display("{what}: duplicate entry")]
    Duplicate { what: String },
    #[display("{what}: a champion cannot pair with itself")]
    SelfPair { what: String },
}

fn check_record(what: impl Fn() -> String, games: u64, wins: u64) -> Result<(), IndexBuildError> {
    if games == 0 {
        return Err(IndexBuildError::NoGames { what: what() });
    }
    if wins > games {
        return Err(IndexBuildError::WinsExceedGames {
            what: what(),
            wins,
            games,
        });
    }
    Ok(())
}

fn check_finite<const N: usize>(
    what: impl Fn() -> String,
    values: [(&'static str, f64); N],
) -> Result<(), IndexBuildError> {
    match values.into_iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(IndexBuildError::NonFinite {
            what: what(),
            field,
        }),
        None => Ok(()),
    }
}

type PerRole<T> = RoleMap<Option<T>>;

#[derive(Debug, Clone)]
pub struct MetricsIndex {
    dataset_id: DatasetId,
    total_games: u64,
    roles: RoleMap<RoleSummary>,
    champion_roles: HashMap<ChampionKey, PerRole<ChampionRoleMetrics>>,
    by_role: RoleMap<Vec<ChampionKey>>,
    flex: HashMap<ChampionKey, FlexMetrics>,
    synergy: HashMap<ChampionKey, HashMap<ChampionKey, SynergyEntry>>,
    counters: RoleMap<HashMap<ChampionKey, HashMap<ChampionKey, CounterEntry>>>,
    players: HashMap<String, HashMap<ChampionKey, PerRole<PlayerChampionReliability>>>,
}

impl MetricsIndex {
    /// Validates `metrics` and builds the lookup tables.
    ///
    /// # Errors
    ///
    /// Fails on an unsupported schema version, a zero-game entry, wins above
    /// games, a non-finite value or a duplicate key.
    pub fn new(metrics: &PrecomputedDraftMetrics) -> Result<Self, IndexBuildError> {
        if metrics.schema_version != SCHEMA_VERSION {
            return Err(IndexBuildError::UnsupportedSchema {
                found: metrics.schema_version,
            });
        }

        let mut roles = RoleMap::<RoleSummary>::default();
        for (role, summary) in &metrics.roles {
            check_finite(|| format!("role {role}"), [("win_rate", summary.win_rate)])?;
            roles[*role] = *summary;
        }

        let mut champion_roles = HashMap::<ChampionKey, PerRole<ChampionRoleMetrics>>::new();
        let mut by_role = RoleMap::<Vec<ChampionKey>>::default();
        for entry in &metrics.champion_roles {
            let what = || format!("champion {} in {}", entry.champion, entry.role);
            check_record(what, entry.games, entry.wins)?;
            check_finite(
                what,
                [
                    ("minutes", entry.minutes),
                    ("winrate_raw", entry.winrate_raw),
                    ("winrate_adjusted", entry.winrate_adjusted),
                    ("intrinsic", entry.intrinsic),
                    ("blind", entry.blind),
                    ("flex_prior", entry.flex_prior),
                    ("reliability.sample_weight", entry.reliability.sample_weight),
                    ("reliability.lane_variance", entry.reliability.lane_variance),
                    ("reliability.sigma", entry.reliability.sigma),
                ],
            )?;
            if !entry.components.is_finite() {
                return Err(IndexBuildError::NonFinite {
                    what: what(),
                    field: "components",
                });
            }
            let slot = &mut champion_roles.entry(entry.champion.clone()).or_default()[entry.role];
            if slot.is_some() {
                return Err(IndexBuildError::Duplicate { what: what() });
            }
            *slot = Some(entry.clone());
            by_role[entry.role].push(entry.champion.clone());
        }
        for champions in by_role.iter_mut().map(|(_, champions)| champions) {
            champions.sort();
        }

        let mut flex = HashMap::new();
        for entry in &metrics.flex {
            let what = || format!("flex {}", entry.champion);
            check_finite(what, [("flex_score", entry.flex_score)])?;
            if flex.insert(entry.champion.clone(), entry.clone()).is_some() {
                return Err(IndexBuildError::Duplicate { what: what() });
            }
        }

        let mut synergy = HashMap::<ChampionKey, HashMap<ChampionKey, SynergyEntry>>::new();
        for entry in &metrics.synergy {
            let what = || format!("synergy {} + {}", entry.first, entry.second);
            check_record(what, entry.games, entry.wins)?;
            check_finite(
                what,
                [
                    ("npmi", entry.npmi),
                    ("winrate_delta", entry.winrate_delta),
                    ("score", entry.score),
                ],
            )?;
            if entry.first == entry.second {
                return Err(IndexBuildError::SelfPair { what: what() });
            }
            for (a, b) in [(&entry.first, &entry.second), (&entry.second, &entry.first)] {
                let previous = synergy
                    .entry(a.clone())
                    .or_default()
                    .insert(b.clone(), entry.clone());
                if previous.is_some() {
                    return Err(IndexBuildError::Duplicate { what: what() });
                }
            }
        }

        let mut counters =
            RoleMap::<HashMap<ChampionKey, HashMap<ChampionKey, CounterEntry>>>::default();
        for entry in &metrics.counters {
            let what = || {
                format!(
                    "counter {} vs {} in {}",
                    entry.champion, entry.opponent, entry.role
                )
            };
            check_record(what, entry.games, entry.wins)?;
            check_finite(
                what,
                [
                    ("winrate_smoothed", entry.winrate_smoothed),
                    ("lane_delta_z", entry.lane_delta_z),
                    ("early_kill_participation", entry.early_kill_participation),
                    ("score", entry.score),
                ],
            )?;
            let previous = counters[entry.role]
                .entry(entry.champion.clone())
                .or_default()
                .insert(entry.opponent.clone(), entry.clone());
            if previous.is_some() {
                return Err(IndexBuildError::Duplicate { what: what() });
            }
        }

        let mut players =
            HashMap::<String, HashMap<ChampionKey, PerRole<PlayerChampionReliability>>>::new();
        for entry in &metrics.player_reliability {
            let what = || {
                format!(
                    "player {} on {} in {}",
                    entry.player, entry.champion, entry.role
                )
            };
            check_record(what, entry.games, entry.wins)?;
            check_finite(
                what,
                [
                    ("lane_variance", entry.lane_variance),
                    ("sigma", entry.sigma),
                    ("weight", entry.weight),
                ],
            )?;
            let slot = &mut players
                .entry(entry.player.clone())
                .or_default()
                .entry(entry.champion.clone())
                .or_default()[entry.role];
            if slot.is_some() {
                return Err(IndexBuildError::Duplicate { what: what() });
            }
            *slot = Some(entry.clone());
        }

        tracing::info!(
            dataset_id = %metrics.dataset_id,
            champion_roles = metrics.champion_roles.len(),
            synergy_pairs = metrics.synergy.len(),
            counters = metrics.counters.len(),
            players = players.len(),
            "metrics index built"
        );
        Ok(Self {
            dataset_id: metrics.dataset_id.clone(),
            total_games: metrics.total_games,
            roles,
            champion_roles,
            by_role,
            flex,
            synergy,
            counters,
            players,
        })
    }

    #[must_use]
    pub fn dataset_id(&self) -> &DatasetId {
        &self.dataset_id
    }

    #[must_use]
    pub fn total_games(&self) -> u64 {
        self.total_games
    }

    /// Role-wide win rate; `0.5` for a role without games.
    #[must_use]
    pub fn role_win_rate(&self, role: Role) -> f64 {
        let summary = &self.roles[role];
        if summary.games == 0 { 0.5 } else { summary.win_rate }
    }

    #[must_use]
    pub fn champion_role(&self, champion: &str, role: Role) -> Option<&ChampionRoleMetrics> {
        self.champion_roles.get(champion)?[role].as_ref()
    }

    /// Every role the champion has an entry for.
    pub fn roles_of(&self, champion: &str) -> impl Iterator<Item = &ChampionRoleMetrics> + '_ {
        self.champion_roles
            .get(champion)
            .into_iter()
            .flat_map(|roles| roles.values().flatten())
    }

    /// Champions with an entry in `role`, sorted by key.
    #[must_use]
    pub fn champions_in_role(&self, role: Role) -> &[ChampionKey] {
        &self.by_role[role]
    }

    #[must_use]
    pub fn flex(&self, champion: &str) -> Option<&FlexMetrics> {
        self.flex.get(champion)
    }

    /// Synergy of an unordered pair; `synergy(a, b)` and `synergy(b, a)` are the same entry.
    #[must_use]
    pub fn synergy(&self, a: &str, b: &str) -> Option<&SynergyEntry> {
        self.synergy.get(a)?.get(b)
    }

    /// Synergy score of a pair, `0.0` when the pair was never seen.
    #[must_use]
    pub fn synergy_score(&self, a: &str, b: &str) -> f64 {
        self.synergy(a, b).map_or(0.0, |entry| entry.score)
    }

    /// Matchup of `champion` against `opponent` in `role`.
    #[must_use]
    pub fn counter(&self, role: Role, champion: &str, opponent: &str) -> Option<&CounterEntry> {
        self.counters[role].get(champion)?.get(opponent)
    }

    #[must_use]
    pub fn player_reliability(
        &self,
        player: &str,
        champion: &str,
        role: Role,
    ) -> Option<&PlayerChampionReliability> {
        self.players.get(player)?.get(champion)?[role].as_ref()
    }
}
