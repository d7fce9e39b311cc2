//! Typed commands parsed from interaction data

use modbridge_core::{Target, UserId};
use thiserror::Error;

use super::model::CommandData;

/// A moderation command with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ban {
        target: Target,
        reason: Option<String>,
    },
    Unban {
        target: Target,
    },
    Kick {
        target: Target,
        reason: Option<String>,
    },
    Check {
        target: Target,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("Unknown command.")]
    Unknown(String),

    #[error("Provide a username or a user id.")]
    MissingTarget,

    #[error("invalid user id: {0}")]
    InvalidUserId(String),
}

impl Command {
    /// Parse a command; the id-keyed and name-keyed spellings are equivalent
    pub fn parse(data: &CommandData) -> Result<Self, CommandParseError> {
        let command = match data.name.as_str() {
            "ban" | "banname" => Self::Ban {
                target: target(data)?,
                reason: data.text_option("reason"),
            },
            "unban" | "unbanname" => Self::Unban {
                target: target(data)?,
            },
            "kick" | "kickname" => Self::Kick {
                target: target(data)?,
                reason: data.text_option("reason"),
            },
            "check" | "checkname" => Self::Check {
                target: target(data)?,
            },
            other => return Err(CommandParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ban { .. } => "ban",
            Self::Unban { .. } => "unban",
            Self::Kick { .. } => "kick",
            Self::Check { .. } => "check",
        }
    }

    pub fn target(&self) -> &Target {
        match self {
            Self::Ban { target, .. }
            | Self::Unban { target }
            | Self::Kick { target, .. }
            | Self::Check { target } => target,
        }
    }
}

/// `userid` wins over `username` when both are given
fn target(data: &CommandData) -> Result<Target, CommandParseError> {
    if let Some(raw) = data.text_option("userid") {
        return UserId::parse(&raw)
            .map(Target::Id)
            .map_err(|_| CommandParseError::InvalidUserId(raw));
    }

    data.text_option("username")
        .map(Target::handle)
        .ok_or(CommandParseError::MissingTarget)
}
