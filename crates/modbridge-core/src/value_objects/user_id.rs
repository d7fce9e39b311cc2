//! UserId - the stable numeric identity of a game-platform user
//!
//! Every store key and notification refers to a user by this value, so it is
//! the join key across the ban store, the membership index, and the name index.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Positive numeric user identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(u64);

impl UserId {
    /// Create a UserId, rejecting zero
    pub fn new(id: u64) -> Result<Self, UserIdParseError> {
        if id == 0 {
            return Err(UserIdParseError::NotPositive);
        }
        Ok(Self(id))
    }

    /// Get the inner u64 value
    #[inline]
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Key under which this user's record is stored
    pub fn store_key(&self) -> String {
        self.0.to_string()
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, UserIdParseError> {
        let id = s
            .trim()
            .parse::<u64>()
            .map_err(|_| UserIdParseError::InvalidFormat)?;
        Self::new(id)
    }
}

/// Error when building a UserId
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdParseError {
    #[error("user id must be a positive integer")]
    InvalidFormat,

    #[error("user id must be greater than zero")]
    NotPositive,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for UserId {
    type Error = UserIdParseError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse(s)
    }
}

// Serialized as a JSON number; the game servers compare it numerically
impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct UserIdVisitor;

        impl Visitor<'_> for UserIdVisitor {
            type Value = UserId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a positive integer or numeric string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<UserId, E>
            where
                E: de::Error,
            {
                UserId::new(value).map_err(de::Error::custom)
            }

            fn visit_i64<E>(self, value: i64) -> Result<UserId, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map_err(|_| de::Error::custom(UserIdParseError::NotPositive))
                    .and_then(|v| UserId::new(v).map_err(de::Error::custom))
            }

            fn visit_f64<E>(self, value: f64) -> Result<UserId, E>
            where
                E: de::Error,
            {
                if value.fract() != 0.0 || value < 1.0 || value > u64::MAX as f64 {
                    return Err(de::Error::custom(UserIdParseError::InvalidFormat));
                }
                UserId::new(value as u64).map_err(de::Error::custom)
            }

            fn visit_str<E>(self, value: &str) -> Result<UserId, E>
            where
                E: de::Error,
            {
                UserId::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(UserIdVisitor)
    }
}
