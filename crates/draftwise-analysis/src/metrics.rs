//! The precomputed metrics bundle produced by the aggregator.
//!
//! [`PrecomputedDraftMetrics`] is the only input of the scoring engine. It is a
//! plain, immutable data structure; [`MetricsIndex`](crate::index::MetricsIndex)
//! turns it into O(1) lookups.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use draftwise_engine::{ChampionKey, Role};
use serde::{Deserialize, Serialize};

use crate::{
    config::AggregationConfig,
    metric::{Components, MetricVector},
};

/// Fingerprint of the data a bundle was built from.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct DatasetId(String);

impl DatasetId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn from_hash(hash: u64) -> Self {
        Self(format!("{hash:016x}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How much a bucket's statistics can be trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reliability {
    /// `n / (n + n0)`.
    pub sample_weight: f64,
    /// Population variance of the per-game mean lane composite.
    pub lane_variance: f64,
    pub sigma: f64,
}

/// Probability that an opponent champion is the lane opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentShare {
    pub champion: ChampionKey,
    pub probability: f64,
}

/// Profile of one champion in one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionRoleMetrics {
    pub champion: ChampionKey,
    pub role: Role,
    pub games: u64,
    pub wins: u64,
    pub minutes: f64,
    pub winrate_raw: f64,
    /// Win rate shrunk toward the role average.
    pub winrate_adjusted: f64,
    pub components: Components,
    pub intrinsic: f64,
    pub blind: f64,
    pub reliability: Reliability,
    /// Share of the champion's games played in this role.
    pub flex_prior: f64,
    /// Lane opponents, most frequent first.
    pub opponents: Vec<OpponentShare>,
    /// Raw rates the components were z-scored from.
    pub rates: MetricVector,
}

/// Role spread of one champion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexMetrics {
    pub champion: ChampionKey,
    pub games: u64,
    pub role_shares: BTreeMap<Role, f64>,
    /// Normalized Shannon entropy of `role_shares`, in `[0, 1]`.
    pub flex_score: f64,
}

impl FlexMetrics {
    /// Number of roles the champion has been played in.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.role_shares.values().filter(|share| **share > 0.0).count()
    }
}

/// Co-pick statistics of an unordered champion pair.
///
/// Entries are stored with `first < second`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyEntry {
    pub first: ChampionKey,
    pub second: ChampionKey,
    pub games: u64,
    pub wins: u64,
    pub npmi: f64,
    /// Smoothed pair win rate minus the mean of the two smoothed solo win rates.
    pub winrate_delta: f64,
    pub score: f64,
}

/// Lane matchup statistics of `champion` against `opponent` in `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterEntry {
    pub role: Role,
    pub champion: ChampionKey,
    pub opponent: ChampionKey,
    pub games: u64,
    pub wins: u64,
    pub winrate_smoothed: f64,
    /// Mean lane composite against this opponent, z-scored within the role.
    pub lane_delta_z: f64,
    pub early_kill_participation: f64,
    /// `winrate_smoothed - 0.5`.
    pub score: f64,
}

/// One player's record on one champion in one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerChampionReliability {
    pub player: String,
    pub champion: ChampionKey,
    pub role: Role,
    pub games: u64,
    pub wins: u64,
    pub lane_variance: f64,
    pub sigma: f64,
    /// `n / (n + n0)`.
    pub weight: f64,
}

/// Win rate and volume of one role across the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub games: u64,
    pub wins: u64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecomputedDraftMetrics {
    pub schema_version: u32,
    pub dataset_id: DatasetId,
    pub generated_at: DateTime<Utc>,
    pub config: AggregationConfig,
    /// Distinct games with at least one accepted row.
    pub total_games: u64,
    pub roles: BTreeMap<Role, RoleSummary>,
    pub champion_roles: Vec<ChampionRoleMetrics>,
    pub flex: Vec<FlexMetrics>,
    pub synergy: Vec<SynergyEntry>,
    pub counters: Vec<CounterEntry>,
    #[serde(default)]
    pub player_reliability: Vec<PlayerChampionReliability>,
}
