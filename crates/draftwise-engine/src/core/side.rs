use serde::{Deserialize, Serialize};

/// The two teams of a draft, seen from the advised team's perspective.
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
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[display("ally")]
    Ally,
    #[display("opponent")]
    Opponent,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::Ally, Self::Opponent];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Ally => 0,
            Self::Opponent => 1,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Ally => Self::Opponent,
            Self::Opponent => Self::Ally,
        }
    }
}
