//! Pick-rate table used for display and blind-pick gating.

use std::collections::BTreeMap;

use draftwise_engine::{ChampionKey, Role};
use serde::{Deserialize, Serialize};

use crate::metrics::DatasetId;

/// Raw volume of one champion in one role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub games: u64,
    pub wins: u64,
    /// Share of all games in which the champion was played in this role.
    pub pick_rate: f64,
    /// Share of the champion's own games played in this role.
    pub role_share: f64,
}

/// Unsmoothed pick-rate table built alongside the metrics bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub dataset_id: DatasetId,
    pub total_games: u64,
    pub champions: BTreeMap<ChampionKey, BTreeMap<Role, DatasetEntry>>,
}

impl Dataset {
    #[must_use]
    pub fn entry(&self, champion: &str, role: Role) -> Option<&DatasetEntry> {
        self.champions.get(champion)?.get(&role)
    }

    /// Pick rate of `champion` in `role`; unseen pairs have a pick rate of zero.
    #[must_use]
    pub fn pick_rate(&self, champion: &str, role: Role) -> f64 {
        self.entry(champion, role).map_or(0.0, |e| e.pick_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        let entry = |games, pick_rate| DatasetEntry {
            games,
            wins: 0,
            pick_rate,
            role_share: 0.0,
        };
        let dataset = Dataset {
            dataset_id: DatasetId::new("test"),
            total_games: 100,
            champions: BTreeMap::from([(
                ChampionKey::from("Gragas"),
                BTreeMap::from([(Role::Top, entry(3, 0.03)), (Role::Jungle, entry(9, 0.09))]),
            )]),
        };
        assert_eq!(dataset.pick_rate("Gragas", Role::Jungle), 0.09);
        assert_eq!(dataset.pick_rate("Gragas", Role::Support), 0.0);
        assert_eq!(dataset.pick_rate("Zed", Role::Middle), 0.0);
    }
}
