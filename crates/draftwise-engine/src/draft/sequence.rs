use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Number of pick slots per side.
pub const TEAM_SIZE: usize = 5;

/// Number of picks in a full draft.
pub const DRAFT_LENGTH: usize = 2 * TEAM_SIZE;

/// A pick slot: which side picks, and into which of its five slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{side}#{index}")]
pub struct Turn {
    pub side: Side,
    pub index: usize,
}

impl Turn {
    #[must_use]
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }

    /// Position of this slot in [`PICK_SEQUENCE`], or `None` for an out-of-range index.
    #[must_use]
    pub fn sequence_position(self) -> Option<usize> {
        PICK_SEQUENCE.iter().position(|turn| *turn == self)
    }
}

/// The fixed snake order in which slots are filled.
pub const PICK_SEQUENCE: [Turn; DRAFT_LENGTH] = [
    Turn::new(Side::Ally, 0),
    Turn::new(Side::Opponent, 0),
    Turn::new(Side::Opponent, 1),
    Turn::new(Side::Ally, 1),
    Turn::new(Side::Ally, 2),
    Turn::new(Side::Opponent, 2),
    Turn::new(Side::Opponent, 3),
    Turn::new(Side::Ally, 3),
    Turn::new(Side::Ally, 4),
    Turn::new(Side::Opponent, 4),
];

/// Positions in [`PICK_SEQUENCE`] after `position` that belong to `side`.
pub fn upcoming_positions(side: Side, position: usize) -> impl Iterator<Item = usize> {
    (position + 1..DRAFT_LENGTH).filter(move |&p| PICK_SEQUENCE[p].side == side)
}

/// Whether the slot at `position` is immediately followed by another pick of
/// the same side (the first pick of a double-pick phase).
#[must_use]
pub fn is_double_pick(position: usize) -> bool {
    position + 1 < DRAFT_LENGTH && PICK_SEQUENCE[position].side == PICK_SEQUENCE[position + 1].side
}
