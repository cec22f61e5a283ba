use arrayvec::ArrayVec;
use serde::Serialize;

use crate::core::{ChampionKey, Role, Side};

use super::{
    sequence::{DRAFT_LENGTH, PICK_SEQUENCE, TEAM_SIZE, Turn},
    team_pick::TeamPick,
};

/// Maximum number of entries in the ban list.
pub const MAX_BANS: usize = 50;

/// Why a mutation left the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IgnoreReason {
    #[display("all ten slots are locked")]
    DraftFinished,
    #[display("slot index out of range")]
    SlotOutOfRange,
    #[display("champion is banned")]
    ChampionBanned,
    #[display("champion is locked in another slot")]
    ChampionLocked,
    #[display("ban list is full")]
    BanListFull,
    #[display("champion is already banned")]
    AlreadyBanned,
    #[display("champion is not banned")]
    NotBanned,
}

/// Side effects of an applied transition.
///
/// For a hover the displaced slots are reported as a preview of the pick; the
/// locked ones among them are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    /// Slot written by the operation, if any.
    pub target: Option<Turn>,
    /// Slots cleared because they held the same champion.
    pub displaced_champions: ArrayVec<Turn, DRAFT_LENGTH>,
    /// Slots that lost their role to the target.
    pub displaced_roles: ArrayVec<Turn, TEAM_SIZE>,
}

impl Changes {
    fn at(target: Turn) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }
}

/// Result of a session mutation.
///
/// Mutations never fail: illegal requests are ignored and reported as such.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Outcome {
    Applied(Changes),
    Ignored(IgnoreReason),
}

/// In-memory state of one draft: ten pick slots and the ban list.
///
/// All clash resolution of an operation is applied inside a single `&mut self`
/// call, so observers only ever see the state before or after the whole
/// transition. Each applied transition increments [`revision`](Self::revision).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftSession {
    teams: [[TeamPick; TEAM_SIZE]; 2],
    bans: ArrayVec<ChampionKey, MAX_BANS>,
    revision: u64,
}

impl DraftSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter bumped by every applied transition.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn team(&self, side: Side) -> &[TeamPick; TEAM_SIZE] {
        &self.teams[side.index()]
    }

    #[must_use]
    pub fn slot(&self, turn: Turn) -> Option<&TeamPick> {
        self.teams[turn.side.index()].get(turn.index)
    }

    #[must_use]
    pub fn bans(&self) -> &[ChampionKey] {
        &self.bans
    }

    #[must_use]
    pub fn is_banned(&self, champion: &ChampionKey) -> bool {
        self.bans.contains(champion)
    }

    /// The first slot of the pick sequence without a locked champion.
    #[must_use]
    pub fn current_turn(&self) -> Option<Turn> {
        self.current_position().map(|p| PICK_SEQUENCE[p])
    }

    /// Position of [`current_turn`](Self::current_turn) in the pick sequence.
    #[must_use]
    pub fn current_position(&self) -> Option<usize> {
        PICK_SEQUENCE
            .iter()
            .position(|turn| !self.teams[turn.side.index()][turn.index].is_locked())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_turn().is_none()
    }

    /// All slots with their coordinates, ally side first.
    pub fn slots(&self) -> impl Iterator<Item = (Turn, &TeamPick)> + '_ {
        Side::ALL.into_iter().flat_map(move |side| {
            self.teams[side.index()]
                .iter()
                .enumerate()
                .map(move |(index, pick)| (Turn::new(side, index), pick))
        })
    }

    /// Locked champions of both sides.
    pub fn locked_champions(&self) -> impl Iterator<Item = &ChampionKey> + '_ {
        self.slots().filter_map(|(_, pick)| pick.champion())
    }

    #[must_use]
    pub fn is_locked(&self, champion: &ChampionKey) -> bool {
        self.locked_champions().any(|c| c == champion)
    }

    /// Whether `champion` can still be picked by either side.
    #[must_use]
    pub fn is_available(&self, champion: &ChampionKey) -> bool {
        !self.is_banned(champion) && !self.is_locked(champion)
    }

    /// Locks `champion` into the current turn, or clears the given slot.
    ///
    /// With `Some(champion)` the pick always goes to the current turn and the
    /// passed `side`/`index` are ignored; once the draft is finished the call
    /// is a no-op. Any other slot holding the champion (either side) is cleared,
    /// and any other slot of the picking side holding the role loses it. The
    /// role is `role`, else the one the slot already carries.
    ///
    /// With `None` the slot at `side`/`index` is cleared directly (its role is
    /// replaced by `role`).
    pub fn pick_champion(
        &mut self,
        side: Side,
        index: usize,
        champion: Option<ChampionKey>,
        role: Option<Role>,
    ) -> Outcome {
        let Some(champion) = champion else {
            return self.clear_pick(Turn::new(side, index), role);
        };
        let Some(turn) = self.current_turn() else {
            tracing::debug!(%champion, "pick ignored: draft finished");
            return Outcome::Ignored(IgnoreReason::DraftFinished);
        };
        if self.is_banned(&champion) {
            return Outcome::Ignored(IgnoreReason::ChampionBanned);
        }

        let role = role.or(self.teams[turn.side.index()][turn.index].role());
        let changes = self.clashes(turn, &champion, role);
        for other in &changes.displaced_champions {
            self.teams[other.side.index()][other.index].clear();
        }
        for other in &changes.displaced_roles {
            self.teams[other.side.index()][other.index].set_role(None);
        }
        self.clear_hovers_of(&champion);
        self.teams[turn.side.index()][turn.index].lock(champion, role);
        self.commit(changes)
    }

    /// Previews `champion` in the current turn without locking it.
    ///
    /// Follows the same redirection and clash resolution as
    /// [`pick_champion`](Self::pick_champion) and reports the same
    /// [`Changes`], but a preview never touches a locked slot: locked slots in
    /// the report keep their champion and role until the pick is made. Other
    /// hovers of the champion are dropped and open slots lose the role. A
    /// banned champion cannot be hovered. With `None` the hover of the given
    /// slot is cleared.
    pub fn hover_champion(
        &mut self,
        side: Side,
        index: usize,
        champion: Option<ChampionKey>,
        role: Option<Role>,
    ) -> Outcome {
        let Some(champion) = champion else {
            let turn = Turn::new(side, index);
            let Some(pick) = self.slot_mut(turn) else {
                return Outcome::Ignored(IgnoreReason::SlotOutOfRange);
            };
            pick.clear_hover();
            return self.commit(Changes::at(turn));
        };
        let Some(turn) = self.current_turn() else {
            return Outcome::Ignored(IgnoreReason::DraftFinished);
        };
        if self.is_banned(&champion) {
            return Outcome::Ignored(IgnoreReason::ChampionBanned);
        }

        let changes = self.clashes(turn, &champion, role);
        for other in &changes.displaced_roles {
            let pick = &mut self.teams[other.side.index()][other.index];
            if !pick.is_locked() {
                pick.set_role(None);
            }
        }
        self.clear_hovers_of(&champion);
        self.teams[turn.side.index()][turn.index].set_hover(champion, role);
        self.commit(changes)
    }

    /// Sets or clears the role of a slot, independent of turn order.
    ///
    /// Any other slot of the same side holding `role` loses its role.
    pub fn assign_role(&mut self, side: Side, index: usize, role: Option<Role>) -> Outcome {
        let turn = Turn::new(side, index);
        if self.slot(turn).is_none() {
            return Outcome::Ignored(IgnoreReason::SlotOutOfRange);
        }
        let mut changes = Changes::at(turn);
        if let Some(role) = role {
            self.release_role(turn, role, &mut changes);
        }
        self.teams[side.index()][index].set_role(role);
        self.commit(changes)
    }

    /// Adds `champion` to the ban list.
    ///
    /// A champion locked by either side cannot be banned: the ban is refused
    /// rather than unlocking the pick. Hovers of the champion are dropped.
    pub fn ban(&mut self, champion: ChampionKey) -> Outcome {
        if self.is_banned(&champion) {
            return Outcome::Ignored(IgnoreReason::AlreadyBanned);
        }
        if self.is_locked(&champion) {
            return Outcome::Ignored(IgnoreReason::ChampionLocked);
        }
        if self.bans.is_full() {
            return Outcome::Ignored(IgnoreReason::BanListFull);
        }
        self.clear_hovers_of(&champion);
        self.bans.push(champion);
        self.commit(Changes::default())
    }

    pub fn unban(&mut self, champion: &ChampionKey) -> Outcome {
        let Some(position) = self.bans.iter().position(|c| c == champion) else {
            return Outcome::Ignored(IgnoreReason::NotBanned);
        };
        self.bans.remove(position);
        self.commit(Changes::default())
    }

    /// Clears all five slots of `side`.
    pub fn reset_team(&mut self, side: Side) {
        for pick in &mut self.teams[side.index()] {
            pick.clear();
        }
        self.revision += 1;
    }

    /// Clears every slot of both sides. Bans are kept.
    pub fn reset_all(&mut self) {
        for side in Side::ALL {
            self.reset_team(side);
        }
    }

    fn clear_pick(&mut self, turn: Turn, role: Option<Role>) -> Outcome {
        if self.slot(turn).is_none() {
            return Outcome::Ignored(IgnoreReason::SlotOutOfRange);
        }
        let mut changes = Changes::at(turn);
        if let Some(role) = role {
            self.release_role(turn, role, &mut changes);
        }
        let pick = &mut self.teams[turn.side.index()][turn.index];
        pick.clear();
        pick.set_role(role);
        self.commit(changes)
    }

    /// Slots a lock of `champion` in `role` at `target` displaces, without
    /// touching them.
    ///
    /// A slot that loses its champion is not listed again for its role.
    fn clashes(&self, target: Turn, champion: &ChampionKey, role: Option<Role>) -> Changes {
        let mut changes = Changes::at(target);
        for (other, pick) in self.slots() {
            if other != target && pick.champion() == Some(champion) {
                changes.displaced_champions.push(other);
            }
        }
        let Some(role) = role else {
            return changes;
        };
        for (index, pick) in self.teams[target.side.index()].iter().enumerate() {
            let other = Turn::new(target.side, index);
            if other != target
                && pick.role() == Some(role)
                && !changes.displaced_champions.contains(&other)
            {
                changes.displaced_roles.push(other);
            }
        }
        changes
    }

    fn clear_hovers_of(&mut self, champion: &ChampionKey) {
        for (_, pick) in self.slots_mut() {
            if pick.hover() == Some(champion) {
                pick.clear_hover();
            }
        }
    }

    /// Removes `role` from every slot of `target`'s side other than `target`.
    fn release_role(&mut self, target: Turn, role: Role, changes: &mut Changes) {
        for (index, pick) in self.teams[target.side.index()].iter_mut().enumerate() {
            if index != target.index && pick.role() == Some(role) {
                pick.set_role(None);
                changes.displaced_roles.push(Turn::new(target.side, index));
            }
        }
    }

    fn slot_mut(&mut self, turn: Turn) -> Option<&mut TeamPick> {
        self.teams[turn.side.index()].get_mut(turn.index)
    }

    fn slots_mut(&mut self) -> impl Iterator<Item = (Turn, &mut TeamPick)> + '_ {
        self.teams
            .iter_mut()
            .zip(Side::ALL)
            .flat_map(|(team, side)| {
                team.iter_mut()
                    .enumerate()
                    .map(move |(index, pick)| (Turn::new(side, index), pick))
            })
    }

    fn commit(&mut self, changes: Changes) -> Outcome {
        self.revision += 1;
        Outcome::Applied(changes)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn key(name: &str) -> Option<ChampionKey> {
        Some(ChampionKey::from(name))
    }

    fn assert_invariants(session: &DraftSession) {
        let locked: Vec<_> = session.locked_champions().collect();
        for (i, a) in locked.iter().enumerate() {
            assert!(!locked[i + 1..].contains(a), "{a} locked twice");
            assert!(!session.is_banned(a), "{a} locked and banned");
        }
        for side in Side::ALL {
            let roles: Vec<_> = session
                .team(side)
                .iter()
                .filter(|p| p.is_locked())
                .filter_map(TeamPick::role)
                .collect();
            for (i, r) in roles.iter().enumerate() {
                assert!(!roles[i + 1..].contains(r), "{r} locked twice on {side}");
            }
        }
        if let Some(turn) = session.current_turn() {
            assert!(!session.slot(turn).unwrap().is_locked());
            let position = turn.sequence_position().unwrap();
            for earlier in &PICK_SEQUENCE[..position] {
                assert!(session.slot(*earlier).unwrap().is_locked());
            }
        } else {
            assert_eq!(session.locked_champions().count(), DRAFT_LENGTH);
        }
    }

    #[test]
    fn test_empty_session_starts_with_ally() {
        let session = DraftSession::new();
        assert_eq!(session.current_turn(), Some(Turn::new(Side::Ally, 0)));
        assert_eq!(session.current_position(), Some(0));
        assert!(!session.is_finished());
    }

    #[test]
    fn test_pick_advances_turn() {
        let mut session = DraftSession::new();
        let outcome = session.pick_champion(Side::Ally, 3, key("Aatrox"), Some(Role::Top));
        assert_eq!(
            outcome,
            Outcome::Applied(Changes::at(Turn::new(Side::Ally, 0)))
        );
        assert_eq!(session.current_turn(), Some(Turn::new(Side::Opponent, 0)));
        let slot = session.slot(Turn::new(Side::Ally, 0)).unwrap();
        assert_eq!(slot.champion().map(ChampionKey::as_str), Some("Aatrox"));
        assert_eq!(slot.role(), Some(Role::Top));
    }

    #[test]
    fn test_pick_is_redirected_to_current_turn() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Opponent, 4, key("Ahri"), Some(Role::Middle));
        assert!(session.slot(Turn::new(Side::Ally, 0)).unwrap().is_locked());
        assert!(!session.slot(Turn::new(Side::Opponent, 4)).unwrap().is_locked());
    }

    #[test]
    fn test_duplicate_champion_is_moved() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Ahri"), Some(Role::Middle));
        let outcome = session.pick_champion(Side::Opponent, 0, key("Ahri"), Some(Role::Middle));
        let Outcome::Applied(changes) = outcome else {
            panic!("pick should apply");
        };
        assert_eq!(changes.target, Some(Turn::new(Side::Opponent, 0)));
        assert_eq!(
            changes.displaced_champions.as_slice(),
            &[Turn::new(Side::Ally, 0)]
        );
        assert_eq!(session.locked_champions().count(), 1);
        // the cleared ally slot is the first open slot again
        assert_eq!(session.current_turn(), Some(Turn::new(Side::Ally, 0)));
    }

    #[test]
    fn test_role_clash_on_same_side() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        session.pick_champion(Side::Opponent, 0, key("Ahri"), Some(Role::Middle));
        session.pick_champion(Side::Opponent, 1, key("Garen"), Some(Role::Top));
        // opponent taking top does not affect the ally
        assert_eq!(
            session.slot(Turn::new(Side::Ally, 0)).unwrap().role(),
            Some(Role::Top)
        );
        let outcome = session.pick_champion(Side::Ally, 1, key("Darius"), Some(Role::Top));
        let Outcome::Applied(changes) = outcome else {
            panic!("pick should apply");
        };
        assert_eq!(
            changes.displaced_roles.as_slice(),
            &[Turn::new(Side::Ally, 0)]
        );
        assert_eq!(session.slot(Turn::new(Side::Ally, 0)).unwrap().role(), None);
        assert!(session.slot(Turn::new(Side::Ally, 0)).unwrap().is_locked());
    }

    #[test]
    fn test_pick_after_finish_is_noop() {
        let mut session = DraftSession::new();
        for (i, role) in Role::ALL.iter().chain(Role::ALL.iter()).enumerate() {
            let champion = format!("Champion{i}");
            session.pick_champion(Side::Ally, 0, key(&champion), Some(*role));
        }
        assert!(session.is_finished());
        let before = session.clone();
        let outcome = session.pick_champion(Side::Ally, 0, key("Teemo"), Some(Role::Top));
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::DraftFinished));
        assert_eq!(session, before);
    }

    #[test]
    fn test_clear_pick_targets_given_slot() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        session.pick_champion(Side::Opponent, 0, key("Ahri"), Some(Role::Middle));
        let outcome = session.pick_champion(Side::Ally, 0, None, None);
        assert!(outcome.is_applied());
        assert!(!session.slot(Turn::new(Side::Ally, 0)).unwrap().is_locked());
        assert!(session.slot(Turn::new(Side::Opponent, 0)).unwrap().is_locked());
        assert_eq!(session.current_turn(), Some(Turn::new(Side::Ally, 0)));
        assert_eq!(
            session.pick_champion(Side::Ally, 7, None, None),
            Outcome::Ignored(IgnoreReason::SlotOutOfRange)
        );
    }

    #[test]
    fn test_hover_does_not_consume_turn() {
        let mut session = DraftSession::new();
        let outcome = session.hover_champion(Side::Ally, 0, key("Ahri"), Some(Role::Middle));
        assert!(outcome.is_applied());
        assert_eq!(session.current_turn(), Some(Turn::new(Side::Ally, 0)));
        let slot = session.slot(Turn::new(Side::Ally, 0)).unwrap();
        assert!(slot.state().is_hovering());

        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        // the hover preview is replaced by the lock
        assert_eq!(
            session.slot(Turn::new(Side::Ally, 0)).unwrap().hover(),
            None
        );
    }

    #[test]
    fn test_hover_clash_moves_preview() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        session.hover_champion(Side::Opponent, 0, key("Ahri"), None);
        // reopening the first slot moves the cursor back to the ally side
        session.pick_champion(Side::Ally, 0, None, None);
        session.hover_champion(Side::Ally, 0, key("Ahri"), None);
        let hovers: Vec<_> = session
            .slots()
            .filter_map(|(turn, p)| p.hover().map(|h| (turn, h.clone())))
            .collect();
        assert_eq!(
            hovers,
            vec![(Turn::new(Side::Ally, 0), ChampionKey::from("Ahri"))]
        );
    }

    #[test]
    fn test_hover_reports_pick_displacement() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        session.pick_champion(Side::Opponent, 0, key("Ahri"), Some(Role::Middle));
        session.pick_champion(Side::Opponent, 1, key("Lux"), Some(Role::Support));
        let before = session.clone();

        let mut picked = before.clone();
        let pick = picked.pick_champion(Side::Ally, 1, key("Ahri"), Some(Role::Top));
        let hover = session.hover_champion(Side::Ally, 1, key("Ahri"), Some(Role::Top));
        assert_eq!(hover, pick);
        let Outcome::Applied(changes) = hover else {
            panic!("hover should apply");
        };
        assert_eq!(changes.target, Some(Turn::new(Side::Ally, 1)));
        assert_eq!(
            changes.displaced_champions.as_slice(),
            &[Turn::new(Side::Opponent, 0)]
        );
        assert_eq!(
            changes.displaced_roles.as_slice(),
            &[Turn::new(Side::Ally, 0)]
        );

        // the pick resolves the clash
        assert!(!picked.slot(Turn::new(Side::Opponent, 0)).unwrap().is_locked());
        assert_eq!(picked.slot(Turn::new(Side::Ally, 0)).unwrap().role(), None);

        // the preview leaves locked slots alone
        for turn in [Turn::new(Side::Ally, 0), Turn::new(Side::Opponent, 0)] {
            assert_eq!(session.slot(turn), before.slot(turn));
        }
        let slot = session.slot(Turn::new(Side::Ally, 1)).unwrap();
        assert_eq!(slot.hover().map(ChampionKey::as_str), Some("Ahri"));
        assert_eq!(slot.role(), Some(Role::Top));
        assert_invariants(&session);
    }

    #[test]
    fn test_locking_a_hover_resolves_its_role() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        session.pick_champion(Side::Opponent, 0, key("Ahri"), Some(Role::Middle));
        session.pick_champion(Side::Opponent, 1, key("Lux"), Some(Role::Support));
        session.hover_champion(Side::Ally, 1, key("Garen"), Some(Role::Top));

        let outcome = session.pick_champion(Side::Ally, 1, key("Garen"), None);
        let Outcome::Applied(changes) = outcome else {
            panic!("pick should apply");
        };
        assert_eq!(
            changes.displaced_roles.as_slice(),
            &[Turn::new(Side::Ally, 0)]
        );
        assert_eq!(
            session.slot(Turn::new(Side::Ally, 1)).unwrap().role(),
            Some(Role::Top)
        );
        assert_invariants(&session);
    }

    #[test]
    fn test_hover_banned_champion_is_refused() {
        let mut session = DraftSession::new();
        session.ban(ChampionKey::from("Zed"));
        assert_eq!(
            session.hover_champion(Side::Ally, 0, key("Zed"), None),
            Outcome::Ignored(IgnoreReason::ChampionBanned)
        );
    }

    #[test]
    fn test_ban_locked_champion_is_refused() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        let outcome = session.ban(ChampionKey::from("Aatrox"));
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::ChampionLocked));
        assert!(session.slot(Turn::new(Side::Ally, 0)).unwrap().is_locked());
        assert!(session.bans().is_empty());
    }

    #[test]
    fn test_pick_banned_champion_is_refused() {
        let mut session = DraftSession::new();
        assert!(session.ban(ChampionKey::from("Zed")).is_applied());
        assert_eq!(
            session.pick_champion(Side::Ally, 0, key("Zed"), Some(Role::Middle)),
            Outcome::Ignored(IgnoreReason::ChampionBanned)
        );
        assert!(session.unban(&ChampionKey::from("Zed")).is_applied());
        assert!(
            session
                .pick_champion(Side::Ally, 0, key("Zed"), Some(Role::Middle))
                .is_applied()
        );
    }

    #[test]
    fn test_ban_list_capacity() {
        let mut session = DraftSession::new();
        for i in 0..MAX_BANS {
            assert!(session.ban(ChampionKey::new(format!("C{i}"))).is_applied());
        }
        assert_eq!(
            session.ban(ChampionKey::from("Overflow")),
            Outcome::Ignored(IgnoreReason::BanListFull)
        );
        assert_eq!(
            session.ban(ChampionKey::from("C0")),
            Outcome::Ignored(IgnoreReason::AlreadyBanned)
        );
        assert_eq!(
            session.unban(&ChampionKey::from("Overflow")),
            Outcome::Ignored(IgnoreReason::NotBanned)
        );
    }

    #[test]
    fn test_reset_repositions_cursor() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        session.pick_champion(Side::Opponent, 0, key("Ahri"), Some(Role::Middle));
        session.ban(ChampionKey::from("Zed"));

        session.reset_team(Side::Ally);
        assert_eq!(session.current_turn(), Some(Turn::new(Side::Ally, 0)));
        assert!(session.slot(Turn::new(Side::Opponent, 0)).unwrap().is_locked());

        session.reset_all();
        assert_eq!(session.locked_champions().count(), 0);
        assert_eq!(session.bans().len(), 1);
    }

    #[test]
    fn test_revision_tracks_applied_transitions() {
        let mut session = DraftSession::new();
        let r0 = session.revision();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), None);
        assert_eq!(session.revision(), r0 + 1);
        session.ban(ChampionKey::from("Aatrox"));
        assert_eq!(session.revision(), r0 + 1);
    }

    #[test]
    fn test_random_operations_keep_invariants() {
        const POOL: [&str; 14] = [
            "Aatrox", "Ahri", "Garen", "Lux", "Jinx", "Thresh", "LeeSin", "Viego", "Orianna",
            "Kaisa", "Nautilus", "Renekton", "Syndra", "Vi",
        ];
        let mut rng = Pcg64Mcg::seed_from_u64(0x5eed);
        let mut session = DraftSession::new();
        for _ in 0..2_000 {
            let champion = ChampionKey::from(*POOL.choose(&mut rng).unwrap());
            let role = Role::ALL.choose(&mut rng).copied();
            let side = *Side::ALL.choose(&mut rng).unwrap();
            let index = rng.random_range(0..TEAM_SIZE);
            match rng.random_range(0..10) {
                0..=3 => {
                    session.pick_champion(side, index, Some(champion), role);
                }
                4 => {
                    session.pick_champion(side, index, None, None);
                }
                5 | 6 => {
                    session.hover_champion(side, index, Some(champion), role);
                }
                7 => {
                    session.assign_role(side, index, role);
                }
                8 => {
                    session.ban(champion);
                }
                _ => {
                    session.unban(&champion);
                }
            }
            assert_invariants(&session);
        }
    }

    #[test]
    fn test_serialize_session() {
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, key("Aatrox"), Some(Role::Top));
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["teams"][0][0]["champion"], "Aatrox");
        assert_eq!(json["teams"][0][0]["role"], "top");
    }
}
