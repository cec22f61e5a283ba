use std::{
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// One of the five positions a champion is drafted into.
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
pub enum Role {
    #[display("top")]
    Top,
    #[display("jungle")]
    Jungle,
    #[display("middle")]
    #[serde(alias = "mid")]
    Middle,
    #[display("bottom")]
    #[serde(alias = "bot", alias = "adc")]
    Bottom,
    #[display("support")]
    #[serde(alias = "utility")]
    Support,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Top,
        Self::Jungle,
        Self::Middle,
        Self::Bottom,
        Self::Support,
    ];

    pub const LEN: usize = Self::ALL.len();

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Jungle => 1,
            Self::Middle => 2,
            Self::Bottom => 3,
            Self::Support => 4,
        }
    }

    /// Parses the role tokens found in match exports.
    ///
    /// Accepts the canonical names plus the common aliases (`jng`, `mid`,
    /// `bot`, `adc`, `sup`, `utility`, ...), case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let role = match token.trim().to_ascii_lowercase().as_str() {
            "top" | "toplane" => Self::Top,
            "jungle" | "jng" | "jgl" | "jg" | "jungler" => Self::Jungle,
            "middle" | "mid" | "midlane" => Self::Middle,
            "bottom" | "bot" | "adc" | "carry" | "marksman" => Self::Bottom,
            "support" | "sup" | "supp" | "utility" => Self::Support,
            _ => return None,
        };
        Some(role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unrecognized role token: {token}")]
pub struct ParseRoleError {
    pub token: String,
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| ParseRoleError {
            token: s.to_owned(),
        })
    }
}

/// A fixed-size table holding one value per [`Role`].
///
/// # Example
///
/// ```
/// use draftwise_engine::{Role, RoleMap};
///
/// let mut picks = RoleMap::<Option<&str>>::default();
/// picks[Role::Middle] = Some("Ahri");
/// assert_eq!(picks.iter().filter(|(_, p)| p.is_some()).count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RoleMap<T>([T; Role::LEN]);

impl<T> RoleMap<T> {
    #[must_use]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Role) -> T,
    {
        Self(Role::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> + '_ {
        Role::ALL.into_iter().zip(&self.0)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Role, &mut T)> + '_ {
        Role::ALL.into_iter().zip(&mut self.0)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.0.iter()
    }

    #[must_use]
    pub fn map<U, F>(&self, mut f: F) -> RoleMap<U>
    where
        F: FnMut(Role, &T) -> U,
    {
        RoleMap::from_fn(|role| f(role, &self.0[role.index()]))
    }
}

impl<T> Index<Role> for RoleMap<T> {
    type Output = T;

    fn index(&self, role: Role) -> &Self::Output {
        &self.0[role.index()]
    }
}

impl<T> IndexMut<Role> for RoleMap<T> {
    fn index_mut(&mut self, role: Role) -> &mut Self::Output {
        &mut self.0[role.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, role) in Role::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_from_token_aliases() {
        assert_eq!(Role::from_token("TOP"), Some(Role::Top));
        assert_eq!(Role::from_token(" jng "), Some(Role::Jungle));
        assert_eq!(Role::from_token("mid"), Some(Role::Middle));
        assert_eq!(Role::from_token("ADC"), Some(Role::Bottom));
        assert_eq!(Role::from_token("utility"), Some(Role::Support));
        assert_eq!(Role::from_token("roamer"), None);
        assert_eq!(Role::from_token(""), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "fill".parse::<Role>().unwrap_err();
        assert_eq!(err.token, "fill");
        assert_eq!(err.to_string(), "unrecognized role token: fill");
    }

    #[test]
    fn test_serde_aliases() {
        let role: Role = serde_json::from_str("\"mid\"").unwrap();
        assert_eq!(role, Role::Middle);
        assert_eq!(
            serde_json::to_string(&Role::Support).unwrap(),
            "\"support\""
        );
    }

    #[test]
    fn test_role_map_map() {
        let map = RoleMap::from_fn(Role::index);
        let doubled = map.map(|_, v| v * 2);
        assert_eq!(doubled[Role::Support], 8);
    }
}
