//! Ban record - the authoritative per-user moderation document
//!
//! Stored under the user's numeric id in the ban store. Writes always merge
//! over whatever the previous document held so that fields owned by other
//! tools (appeal notes, history, ...) survive a ban or unban.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Document;

/// Reason recorded when a ban is issued without one
pub const DEFAULT_BAN_REASON: &str = "(no reason)";

/// Moderator label shown when a record does not name one
pub const DEFAULT_MODERATOR_LABEL: &str = "Moderator";

/// Fields this bridge owns inside a ban record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRecord {
    pub active: bool,
    pub reason: String,
    pub moderator_name: String,
    /// Seconds since the Unix epoch of the last mutation
    pub timestamp: i64,
}

/// Ban state read back from a stored document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanStatus {
    NotBanned,
    Banned { reason: String, moderator: String },
}

impl BanRecord {
    /// Record for an active ban; blank reasons become the placeholder
    pub fn banned(reason: Option<&str>, moderator: impl Into<String>, timestamp: i64) -> Self {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_BAN_REASON);

        Self {
            active: true,
            reason: reason.to_string(),
            moderator_name: moderator.into(),
            timestamp,
        }
    }

    /// Record for a lifted ban
    pub fn lifted(moderator: impl Into<String>, timestamp: i64) -> Self {
        Self {
            active: false,
            reason: String::new(),
            moderator_name: moderator.into(),
            timestamp,
        }
    }

    /// Shallow-merge this record over a previous document
    ///
    /// Non-object documents are replaced by an empty base.
    pub fn merge_into(&self, base: Document) -> Map<String, Value> {
        let mut merged = base.into_map_or_empty();
        merged.insert("active".into(), Value::Bool(self.active));
        merged.insert("reason".into(), Value::String(self.reason.clone()));
        merged.insert(
            "moderatorName".into(),
            Value::String(self.moderator_name.clone()),
        );
        merged.insert("timestamp".into(), Value::from(self.timestamp));
        merged
    }

    /// Classify a stored document; anything but `active: true` is not banned
    pub fn status_of(doc: &Document) -> BanStatus {
        let Some(map) = doc.as_map() else {
            return BanStatus::NotBanned;
        };

        if map.get("active") != Some(&Value::Bool(true)) {
            return BanStatus::NotBanned;
        }

        let reason = map
            .get("reason")
            .and_then(Value::as_str)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_BAN_REASON);
        let moderator = map
            .get("moderatorName")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODERATOR_LABEL);

        BanStatus::Banned {
            reason: reason.to_string(),
            moderator: moderator.to_string(),
        }
    }
}
