use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Identifier of a champion (e.g. `"Aatrox"`).
///
/// Keys are compared verbatim; normalizing display names into keys is the job
/// of whoever loads the dataset.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use draftwise_engine::ChampionKey;
///
/// let key = ChampionKey::from("Aatrox");
/// let set = HashSet::from([key.clone()]);
/// assert!(set.contains("Aatrox"));
/// assert_eq!(key.to_string(), "Aatrox");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ChampionKey(String);

impl ChampionKey {
    #[must_use]
    pub fn new<S>(key: S) -> Self
    where
        S: Into<String>,
    {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChampionKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl Borrow<str> for ChampionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ChampionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
