//! Interaction request and response shapes

use modbridge_service::Invoker;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message flag that hides a reply from everyone but the invoker
pub const EPHEMERAL_FLAG: u64 = 1 << 6;

/// Moderator name used when the payload carries no user
const FALLBACK_MODERATOR: &str = "Discord";

/// Interaction kind (`type` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            other => Self::Other(other),
        }
    }
}

/// Inbound interaction
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
    /// Continuation token for editing the reply later
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub data: Option<CommandData>,
    /// Present when invoked inside a guild
    #[serde(default)]
    pub member: Option<GuildMember>,
    /// Present when invoked in a direct message
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl Interaction {
    fn acting_user(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }

    /// Who issued the interaction, with the roles they hold in the guild
    pub fn invoker(&self) -> Invoker {
        let user = self.acting_user();
        let user_id = user.map(|u| u.id.clone()).unwrap_or_default();
        let display_name = user
            .and_then(|u| u.username.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_MODERATOR);
        let roles = self
            .member
            .as_ref()
            .map(|m| m.roles.clone())
            .unwrap_or_default();

        Invoker::new(user_id, display_name).with_roles(roles)
    }
}

impl CommandData {
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_ref())
    }

    /// Option value as trimmed text; blank values count as absent
    pub fn text_option(&self, name: &str) -> Option<String> {
        let text = match self.option(name)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Reply payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub flags: u64,
}

impl InteractionResponse {
    const PONG: u8 = 1;
    const CHANNEL_MESSAGE: u8 = 4;
    const DEFERRED_CHANNEL_MESSAGE: u8 = 5;

    pub fn pong() -> Self {
        Self {
            kind: Self::PONG,
            data: None,
        }
    }

    /// Immediate reply visible only to the invoker
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: Self::CHANNEL_MESSAGE,
            data: Some(ResponseData {
                content: Some(content.into()),
                flags: EPHEMERAL_FLAG,
            }),
        }
    }

    /// Acknowledge now, edit the reply once the command finishes
    pub fn deferred_ephemeral() -> Self {
        Self {
            kind: Self::DEFERRED_CHANNEL_MESSAGE,
            data: Some(ResponseData {
                content: None,
                flags: EPHEMERAL_FLAG,
            }),
        }
    }
}
