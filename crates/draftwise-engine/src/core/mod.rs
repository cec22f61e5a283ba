pub use self::{champion::*, role::*, side::*};

pub(crate) mod champion;
pub(crate) mod role;
pub(crate) mod side;
