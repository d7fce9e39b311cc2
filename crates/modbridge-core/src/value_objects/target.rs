//! Command target - who a moderation command is aimed at

use std::fmt;

use super::UserId;

/// A moderation target, addressed either by raw identity or by handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Numeric identity, used as-is
    Id(UserId),
    /// Username that must be resolved before use
    Handle(String),
}

impl Target {
    /// Build a handle target, trimming surrounding whitespace
    pub fn handle(handle: impl AsRef<str>) -> Self {
        Self::Handle(handle.as_ref().trim().to_string())
    }

    /// The handle, if this target was given by name
    pub fn as_handle(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Handle(h) => Some(h),
        }
    }
}

impl From<UserId> for Target {
    fn from(id: UserId) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Handle(h) => write!(f, "{h}"),
        }
    }
}
