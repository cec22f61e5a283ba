//! Draft domain core and session state machine.
//!
//! - [`core`] holds the vocabulary shared by every crate of the workspace:
//!   [`ChampionKey`], [`Role`], [`RoleMap`] and [`Side`].
//! - [`draft`] implements the ten-slot pick sequence and the
//!   [`DraftSession`] that enforces its legality constraints.

pub use self::{core::*, draft::*};

pub mod core;
pub mod draft;
