//! Raw match records consumed by the aggregator.
//!
//! Records are exported one row per player per game ([`PlayerGameRow`]) plus,
//! optionally, one row per team per game ([`TeamPickRow`]). Every field is
//! optional or defaulted on input so that partially filled exports still parse;
//! [`PlayerGameRow::validate`] decides which rows are usable.
//!
//! ```json
//! {
//!   "game_id": "EUW1-6620",
//!   "player": "caps",
//!   "champion": "Ahri",
//!   "role": "mid",
//!   "side": "blue",
//!   "win": true,
//!   "game_minutes": 31.5,
//!   "lane": { "at_10": { "gold": 250, "xp": 120, "cs": 6, "kills": 1 } },
//!   "objectives": { "dragons": { "taken": 3, "conceded": 1 } },
//!   "damage_dealt": 24000,
//!   "kill_participation": 0.64
//! }
//! ```

use std::collections::BTreeSet;

use draftwise_engine::{ChampionKey, Role, TEAM_SIZE};
use serde::{Deserialize, Serialize};

/// The map side a team played on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchSide {
    #[display("blue")]
    Blue,
    #[display("red")]
    Red,
}

impl MatchSide {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Blue => 0,
            Self::Red => 1,
        }
    }
}

/// Lane-phase checkpoint minute.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Checkpoint {
    #[display("10")]
    At10,
    #[display("15")]
    At15,
    #[display("20")]
    At20,
    #[display("25")]
    At25,
}

impl Checkpoint {
    pub const ALL: [Self; 4] = [Self::At10, Self::At15, Self::At20, Self::At25];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::At10 => 0,
            Self::At15 => 1,
            Self::At20 => 2,
            Self::At25 => 3,
        }
    }
}

/// Differences against the lane opponent at one checkpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneDiff {
    pub gold: f64,
    pub xp: f64,
    pub cs: f64,
    pub kills: f64,
}

impl LaneDiff {
    fn is_finite(&self) -> bool {
        [self.gold, self.xp, self.cs, self.kills]
            .iter()
            .all(|value| value.is_finite())
    }
}

/// Lane differences at each checkpoint. Games that ended before a checkpoint
/// leave it empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checkpoints {
    pub at_10: Option<LaneDiff>,
    pub at_15: Option<LaneDiff>,
    pub at_20: Option<LaneDiff>,
    pub at_25: Option<LaneDiff>,
}

impl Checkpoints {
    /// Returns the diff at `checkpoint`, ignoring entries with non-finite values.
    #[must_use]
    pub fn get(&self, checkpoint: Checkpoint) -> Option<&LaneDiff> {
        let diff = match checkpoint {
            Checkpoint::At10 => self.at_10.as_ref(),
            Checkpoint::At15 => self.at_15.as_ref(),
            Checkpoint::At20 => self.at_20.as_ref(),
            Checkpoint::At25 => self.at_25.as_ref(),
        };
        diff.filter(|d| d.is_finite())
    }
}

/// Neutral objective kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    #[display("herald")]
    Herald,
    #[display("grubs")]
    Grubs,
    #[display("dragon")]
    Dragon,
    #[display("baron")]
    Baron,
    #[display("atakhan")]
    Atakhan,
}

impl Objective {
    pub const ALL: [Self; 5] = [
        Self::Herald,
        Self::Grubs,
        Self::Dragon,
        Self::Baron,
        Self::Atakhan,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Herald => 0,
            Self::Grubs => 1,
            Self::Dragon => 2,
            Self::Baron => 3,
            Self::Atakhan => 4,
        }
    }
}

/// Objectives taken by the player's team and by the enemy team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveTally {
    pub taken: f64,
    pub conceded: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Objectives {
    pub heralds: ObjectiveTally,
    pub grubs: ObjectiveTally,
    pub dragons: ObjectiveTally,
    pub barons: ObjectiveTally,
    pub atakhans: ObjectiveTally,
}

impl Objectives {
    #[must_use]
    pub fn get(&self, objective: Objective) -> &ObjectiveTally {
        match objective {
            Objective::Herald => &self.heralds,
            Objective::Grubs => &self.grubs,
            Objective::Dragon => &self.dragons,
            Objective::Baron => &self.barons,
            Objective::Atakhan => &self.atakhans,
        }
    }
}

/// One player's line of one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerGameRow {
    pub game_id: Option<String>,
    pub player: Option<String>,
    pub champion: Option<String>,
    /// Raw role token as exported (`"mid"`, `"ADC"`, `"utility"`, ...).
    pub role: Option<String>,
    pub side: Option<MatchSide>,
    pub win: bool,
    pub game_minutes: f64,
    pub lane: Checkpoints,
    pub objectives: Objectives,
    pub turret_plates: f64,
    pub first_tower: bool,
    pub first_mid_tower: bool,
    pub damage_dealt: f64,
    pub damage_mitigated: f64,
    pub damage_taken: f64,
    pub vision_score: f64,
    pub kill_participation: Option<f64>,
    /// Kill participation up to the 15 minute checkpoint.
    pub early_kill_participation: Option<f64>,
}

/// Why a row was left out of the aggregation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    #[display("missing game id")]
    MissingGameId,
    #[display("missing champion")]
    MissingChampion,
    #[display("non-positive game length")]
    NonPositiveGameLength,
    #[display("unrecognized role")]
    UnrecognizedRole,
    #[display("team row without five distinct champions")]
    IncompleteTeam,
}

/// A [`PlayerGameRow`] that passed validation, with its keys resolved.
#[derive(Debug, Clone, Copy)]
pub struct ValidRow<'a> {
    pub game_id: &'a str,
    pub champion: &'a str,
    pub role: Role,
    pub row: &'a PlayerGameRow,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl PlayerGameRow {
    /// Checks the row and resolves its role token.
    ///
    /// # Errors
    ///
    /// Returns the first [`SkipReason`] that applies.
    pub fn validate(&self) -> Result<ValidRow<'_>, SkipReason> {
        let game_id = non_empty(self.game_id.as_ref()).ok_or(SkipReason::MissingGameId)?;
        let champion = non_empty(self.champion.as_ref()).ok_or(SkipReason::MissingChampion)?;
        if !(self.game_minutes.is_finite() && self.game_minutes > 0.0) {
            return Err(SkipReason::NonPositiveGameLength);
        }
        let role = self
            .role
            .as_deref()
            .and_then(Role::from_token)
            .ok_or(SkipReason::UnrecognizedRole)?;
        Ok(ValidRow {
            game_id,
            champion,
            role,
            row: self,
        })
    }

    /// The player's name, if present and non-blank.
    #[must_use]
    pub fn player_name(&self) -> Option<&str> {
        non_empty(self.player.as_ref())
    }
}

/// The five champions one team drafted in one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamPickRow {
    pub game_id: Option<String>,
    pub side: Option<MatchSide>,
    pub win: bool,
    pub champions: Vec<String>,
}

impl TeamPickRow {
    /// Returns the row's champions, deduplicated and sorted.
    ///
    /// # Errors
    ///
    /// Fails when the game id is missing or the row does not hold exactly
    /// five distinct non-blank champions.
    pub fn validate(&self) -> Result<Vec<ChampionKey>, SkipReason> {
        non_empty(self.game_id.as_ref()).ok_or(SkipReason::MissingGameId)?;
        let champions = self
            .champions
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>();
        if champions.len() != TEAM_SIZE || self.champions.len() != TEAM_SIZE {
            return Err(SkipReason::IncompleteTeam);
        }
        Ok(champions.into_iter().map(ChampionKey::from).collect())
    }

    /// Rebuilds team rows from player rows, grouping valid rows by game and side.
    ///
    /// Groups without a side, or without five distinct champions, are dropped
    /// later by [`TeamPickRow::validate`].
    #[must_use]
    pub fn from_player_rows(rows: &[PlayerGameRow]) -> Vec<Self> {
        let mut teams = std::collections::BTreeMap::<(&str, MatchSide), Self>::new();
        for row in rows {
            let (Ok(valid), Some(side)) = (row.validate(), row.side) else {
                continue;
            };
            let team = teams
                .entry((valid.game_id, side))
                .or_insert_with(|| Self {
                    game_id: Some(valid.game_id.to_owned()),
                    side: Some(side),
                    win: row.win,
                    champions: vec![],
                });
            team.champions.push(valid.champion.to_owned());
        }
        teams.into_values().collect()
    }
}
