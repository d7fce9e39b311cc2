//! Moderation events - advisory messages for live game servers
//!
//! Events are never persisted here. A server that misses one still converges
//! by reading the ban store.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Kind of moderation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationEventType {
    Ban,
    Unban,
    Kick,
}

/// Event payload published to the moderation topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationEvent {
    #[serde(rename = "type")]
    pub event_type: ModerationEventType,
    pub user_id: UserId,
    pub reason: String,
    pub moderator: String,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

impl ModerationEvent {
    /// Create an event stamped with the current time
    pub fn new(
        event_type: ModerationEventType,
        user_id: UserId,
        reason: impl Into<String>,
        moderator: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            user_id,
            reason: reason.into(),
            moderator: moderator.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Override the timestamp
    #[must_use]
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
