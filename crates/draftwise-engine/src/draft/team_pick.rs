use serde::{Deserialize, Serialize};

use crate::core::{ChampionKey, Role};

/// Observable state of a [`TeamPick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SlotState {
    Empty,
    Hovering,
    Locked,
}

/// One of the five pick slots of a side.
///
/// `champion` is the locked pick; `hover` is a provisional preview that never
/// consumes a turn. A slot can carry a role with or without a champion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPick {
    champion: Option<ChampionKey>,
    role: Option<Role>,
    hover: Option<ChampionKey>,
}

impl TeamPick {
    #[must_use]
    pub fn champion(&self) -> Option<&ChampionKey> {
        self.champion.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    #[must_use]
    pub fn hover(&self) -> Option<&ChampionKey> {
        self.hover.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> SlotState {
        match (&self.champion, &self.hover) {
            (Some(_), _) => SlotState::Locked,
            (None, Some(_)) => SlotState::Hovering,
            (None, None) => SlotState::Empty,
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.champion.is_some()
    }

    pub(crate) fn lock(&mut self, champion: ChampionKey, role: Option<Role>) {
        self.champion = Some(champion);
        self.hover = None;
        if role.is_some() {
            self.role = role;
        }
    }

    pub(crate) fn set_hover(&mut self, champion: ChampionKey, role: Option<Role>) {
        self.hover = Some(champion);
        if role.is_some() {
            self.role = role;
        }
    }

    pub(crate) fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
    }

    pub(crate) fn clear_hover(&mut self) {
        self.hover = None;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let mut pick = TeamPick::default();
        assert!(pick.state().is_empty());

        pick.set_hover("Ahri".into(), Some(Role::Middle));
        assert!(pick.state().is_hovering());
        assert_eq!(pick.hover().map(ChampionKey::as_str), Some("Ahri"));

        pick.lock("Syndra".into(), None);
        assert!(pick.state().is_locked());
        assert_eq!(pick.hover(), None);
        assert_eq!(pick.role(), Some(Role::Middle));

        pick.clear();
        assert_eq!(pick, TeamPick::default());
    }
}
