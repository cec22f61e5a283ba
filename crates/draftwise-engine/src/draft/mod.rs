//! Draft sequence and session state.
//!
//! A draft alternates between the two sides following a fixed snake order:
//!
//! ```text
//! position  0  1  2  3  4  5  6  7  8  9
//! side      A  O  O  A  A  O  O  A  A  O
//! slot      0  0  1  1  2  2  3  3  4  4
//! ```
//!
//! - [`Turn`] / [`PICK_SEQUENCE`] - the fixed sequence
//! - [`TeamPick`] - one slot (locked champion, role, hover preview)
//! - [`DraftSession`] - the ten slots plus the ban list, mutated through
//!   pick/hover/ban/reset operations that never fail but report an [`Outcome`]
//! - [`DraftScript`] - an ordered list of bans and picks replayed into a session
//!
//! # Example
//!
//! ```
//! use draftwise_engine::{ChampionKey, DraftSession, Role, Side, Turn};
//!
//! let mut session = DraftSession::new();
//! assert_eq!(session.current_turn(), Some(Turn::new(Side::Ally, 0)));
//!
//! session.pick_champion(Side::Ally, 0, Some(ChampionKey::from("Aatrox")), Some(Role::Top));
//! assert_eq!(session.current_turn(), Some(Turn::new(Side::Opponent, 0)));
//! ```

pub use self::{script::*, sequence::*, session::*, team_pick::*};

mod script;
mod sequence;
mod session;
mod team_pick;
