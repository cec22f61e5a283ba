use serde::{Deserialize, Serialize};

use crate::core::{ChampionKey, Role};

use super::session::{DraftSession, Outcome};

/// One locked pick of a [`DraftScript`]. Picks are placed in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedPick {
    pub champion: ChampionKey,
    #[serde(default)]
    pub role: Option<Role>,
}

/// An ordered list of bans and picks that can be replayed into a fresh session.
///
/// ```json
/// {
///   "bans": ["Zed", "Yasuo"],
///   "picks": [
///     { "champion": "Aatrox", "role": "top" },
///     { "champion": "Ahri", "role": "mid" }
///   ],
///   "hover": { "champion": "Vi", "role": "jungle" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftScript {
    #[serde(default)]
    pub bans: Vec<ChampionKey>,
    #[serde(default)]
    pub picks: Vec<ScriptedPick>,
    /// Optional preview placed on the turn after the last pick.
    #[serde(default)]
    pub hover: Option<ScriptedPick>,
}

impl DraftScript {
    /// Replays the script into a new session.
    ///
    /// Bans are applied first, then picks in order. Picks that the session
    /// refuses are skipped, so the result is identical for identical scripts.
    #[must_use]
    pub fn replay(&self) -> DraftSession {
        let mut session = DraftSession::new();
        for champion in &self.bans {
            let outcome = session.ban(champion.clone());
            if let Outcome::Ignored(reason) = outcome {
                tracing::debug!(%champion, %reason, "scripted ban ignored");
            }
        }
        for pick in &self.picks {
            let Some(turn) = session.current_turn() else {
                tracing::debug!(champion = %pick.champion, "scripted pick after draft end");
                break;
            };
            let outcome = session.pick_champion(
                turn.side,
                turn.index,
                Some(pick.champion.clone()),
                pick.role,
            );
            if let Outcome::Ignored(reason) = outcome {
                tracing::debug!(champion = %pick.champion, %reason, "scripted pick ignored");
            }
        }
        if let (Some(hover), Some(turn)) = (&self.hover, session.current_turn()) {
            let outcome = session.hover_champion(
                turn.side,
                turn.index,
                Some(hover.champion.clone()),
                hover.role,
            );
            if let Outcome::Ignored(reason) = outcome {
                tracing::debug!(champion = %hover.champion, %reason, "scripted hover ignored");
            }
        }
        session
    }
}
