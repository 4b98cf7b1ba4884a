use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Opaque identifier of a member in the directory.
///
/// The directory hands these out, this crate never creates new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn inner(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidUserIdError {
    #[error("UserId: {0} is malformed")]
    Malformed(String),
}

impl FromStr for UserId {
    type Err = InvalidUserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| InvalidUserIdError::Malformed(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_user_ids() {
        assert_eq!("42".parse::<UserId>(), Ok(UserId::new(42)));
        assert_eq!(" 7 ".parse::<UserId>(), Ok(UserId::new(7)));
    }

    #[test]
    fn it_rejects_malformed_user_ids() {
        for id in &["", "abc", "1.5", "12a"] {
            assert!(id.parse::<UserId>().is_err());
        }
    }
}
