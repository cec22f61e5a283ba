//! The draft state as seen by the scoring engine.
//!
//! A [`DraftContext`] is a snapshot taken from a
//! [`DraftSession`](draftwise_engine::DraftSession) for one side: both teams
//! as role-resolved [`Composition`]s, the ban list, the sequence position whose
//! weights apply and the side's roster. The search extends contexts with
//! simulated picks without touching the session.

use std::{cell::OnceCell, collections::HashSet};

use draftwise_analysis::index::MetricsIndex;
use draftwise_engine::{
    ChampionKey, DRAFT_LENGTH, DraftSession, PICK_SEQUENCE, Role, RoleMap, Side, TeamPick,
    upcoming_positions,
};
use serde::{Deserialize, Serialize};

/// Whether hovered (not yet locked) champions count as part of a team.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum HoverPolicy {
    #[default]
    LockedOnly,
    IncludeHovers,
}

/// One team's champions keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Composition(RoleMap<Option<ChampionKey>>);

impl Composition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a composition from explicit role assignments. Later entries
    /// replace earlier ones in the same role.
    pub fn from_picks<I>(picks: I) -> Self
    where
        I: IntoIterator<Item = (Role, ChampionKey)>,
    {
        let mut composition = Self::new();
        for (role, champion) in picks {
            composition.0[role] = Some(champion);
        }
        composition
    }

    /// Resolves a session team into roles.
    ///
    /// Picks with a role keep it; picks without one (or whose role is already
    /// taken) go to their most played open role according to `index`, else to
    /// the first open role. Locked picks are placed before hovers.
    #[must_use]
    pub fn from_team(team: &[TeamPick], policy: HoverPolicy, index: &MetricsIndex) -> Self {
        let locked = team
            .iter()
            .filter_map(|pick| Some((pick.champion()?, pick.role())));
        let hovered = team
            .iter()
            .filter(|_| policy.is_include_hovers())
            .filter(|pick| !pick.is_locked())
            .filter_map(|pick| Some((pick.hover()?, pick.role())));
        let entries = locked.chain(hovered).collect::<Vec<_>>();

        let mut composition = Self::new();
        let mut roleless = vec![];
        for (champion, role) in entries.iter().copied() {
            match role {
                Some(role) if composition.0[role].is_none() => {
                    composition.0[role] = Some(champion.clone());
                }
                _ => roleless.push(champion),
            }
        }
        for champion in roleless {
            if composition.contains(champion) {
                continue;
            }
            let preferred = index
                .roles_of(champion.as_str())
                .map(|entry| (entry.games, entry.role))
                .filter(|(_, role)| composition.0[*role].is_none())
                .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
                .map(|(_, role)| role);
            if let Some(role) = preferred.or_else(|| composition.open_roles().next()) {
                composition.0[role] = Some(champion.clone());
            }
        }
        composition
    }

    #[must_use]
    pub fn get(&self, role: Role) -> Option<&ChampionKey> {
        self.0[role].as_ref()
    }

    /// A copy with `champion` in `role`.
    #[must_use]
    pub fn with(&self, role: Role, champion: ChampionKey) -> Self {
        let mut next = self.clone();
        next.0[role] = Some(champion);
        next
    }

    /// A copy with `role` emptied.
    #[must_use]
    pub fn without(&self, role: Role) -> Self {
        let mut next = self.clone();
        next.0[role] = None;
        next
    }

    pub fn picks(&self) -> impl Iterator<Item = (Role, &ChampionKey)> + '_ {
        self.0
            .iter()
            .filter_map(|(role, champion)| Some((role, champion.as_ref()?)))
    }

    pub fn open_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.0
            .iter()
            .filter(|(_, champion)| champion.is_none())
            .map(|(role, _)| role)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.picks().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, champion: &ChampionKey) -> bool {
        self.picks().any(|(_, c)| c == champion)
    }
}

/// Best and second-best option of the enemy in one role.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OpponentOption {
    pub(crate) best: ChampionKey,
    pub(crate) best_value: f64,
    pub(crate) runner_up: Option<f64>,
}

/// Everything a candidate is scored against.
#[derive(Debug, Clone)]
pub struct DraftContext {
    side: Side,
    position: usize,
    ally: Composition,
    enemy: Composition,
    /// Roles the enemy has committed with a locked pick.
    enemy_locked_roles: RoleMap<bool>,
    bans: HashSet<ChampionKey>,
    roster: RoleMap<Option<String>>,
    pub(crate) opponent_options: OnceCell<RoleMap<Option<OpponentOption>>>,
}

/// The sequence position whose weights apply to `side`'s next pick.
///
/// That is the current position when `side` is on turn, else the side's next
/// slot; a finished draft (or a side without slots left) uses the last row.
#[must_use]
pub fn weights_position(session: &DraftSession, side: Side) -> usize {
    match session.current_position() {
        None => DRAFT_LENGTH - 1,
        Some(position) if PICK_SEQUENCE[position].side == side => position,
        Some(position) => upcoming_positions(side, position)
            .next()
            .unwrap_or(DRAFT_LENGTH - 1),
    }
}

impl DraftContext {
    /// A context where every enemy pick counts as locked in its role.
    #[must_use]
    pub fn new(side: Side, position: usize, ally: Composition, enemy: Composition) -> Self {
        let enemy_locked_roles = RoleMap::from_fn(|role| enemy.get(role).is_some());
        Self {
            side,
            position: position.min(DRAFT_LENGTH - 1),
            ally,
            enemy,
            enemy_locked_roles,
            bans: HashSet::new(),
            roster: RoleMap::default(),
            opponent_options: OnceCell::new(),
        }
    }

    /// Snapshots `session` from `side`'s point of view.
    ///
    /// Only enemy slots that are locked with an explicit role commit that
    /// role; hovers and role-inferred picks do not.
    #[must_use]
    pub fn from_session(
        session: &DraftSession,
        side: Side,
        policy: HoverPolicy,
        index: &MetricsIndex,
    ) -> Self {
        let enemy_team = session.team(side.opposite());
        let ally = Composition::from_team(session.team(side), policy, index);
        let enemy = Composition::from_team(enemy_team, policy, index);
        let mut ctx = Self::new(side, weights_position(session, side), ally, enemy)
            .with_bans(session.bans().iter().cloned());
        ctx.enemy_locked_roles = RoleMap::from_fn(|role| {
            enemy_team
                .iter()
                .any(|pick| pick.is_locked() && pick.role() == Some(role))
        });
        ctx
    }

    #[must_use]
    pub fn with_bans<I>(mut self, bans: I) -> Self
    where
        I: IntoIterator<Item = ChampionKey>,
    {
        self.bans.extend(bans);
        self.opponent_options = OnceCell::new();
        self
    }

    /// Players assigned to the side's roles, used for player reliability.
    #[must_use]
    pub fn with_roster(mut self, roster: RoleMap<Option<String>>) -> Self {
        self.roster = roster;
        self
    }

    /// A context where the side has also picked `champion` into `role`; the
    /// position moves to the side's next slot.
    #[must_use]
    pub fn with_ally_pick(&self, role: Role, champion: ChampionKey) -> Self {
        let position = upcoming_positions(self.side, self.position)
            .next()
            .unwrap_or(DRAFT_LENGTH - 1);
        Self {
            side: self.side,
            position,
            ally: self.ally.with(role, champion),
            enemy: self.enemy.clone(),
            enemy_locked_roles: self.enemy_locked_roles,
            bans: self.bans.clone(),
            roster: self.roster.clone(),
            opponent_options: OnceCell::new(),
        }
    }

    /// The same context with `ally` replaced, weighted at `position`.
    #[must_use]
    pub(crate) fn with_ally(&self, ally: Composition, position: usize) -> Self {
        Self {
            side: self.side,
            position: position.min(DRAFT_LENGTH - 1),
            ally,
            enemy: self.enemy.clone(),
            enemy_locked_roles: self.enemy_locked_roles,
            bans: self.bans.clone(),
            roster: self.roster.clone(),
            opponent_options: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn ally(&self) -> &Composition {
        &self.ally
    }

    #[must_use]
    pub fn enemy(&self) -> &Composition {
        &self.enemy
    }

    /// Whether the enemy has locked a pick in `role`.
    #[must_use]
    pub fn is_enemy_role_locked(&self, role: Role) -> bool {
        self.enemy_locked_roles[role]
    }

    #[must_use]
    pub fn roster_player(&self, role: Role) -> Option<&str> {
        self.roster[role].as_deref()
    }

    #[must_use]
    pub fn is_banned(&self, champion: &ChampionKey) -> bool {
        self.bans.contains(champion)
    }

    /// Whether either team already has `champion`.
    #[must_use]
    pub fn is_picked(&self, champion: &ChampionKey) -> bool {
        self.ally.contains(champion) || self.enemy.contains(champion)
    }

    /// Bans and picks are checked separately; a champion must pass both.
    #[must_use]
    pub fn is_available(&self, champion: &ChampionKey) -> bool {
        !self.is_banned(champion) && !self.is_picked(champion)
    }

    pub fn open_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.ally.open_roles()
    }
}
