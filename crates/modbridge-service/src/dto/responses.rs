//! Outcome DTOs returned by the moderation service

use modbridge_core::UserId;
use serde::Serialize;
use serde_json::{Map, Value};

/// Result of a best-effort step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum StepOutcome {
    Done,
    /// Not attempted (nothing to do)
    Skipped,
    /// Attempted and failed; carries a truncated diagnostic
    Failed(String),
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Which state change a `BanOutcome` describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BanAction {
    Ban,
    Unban,
}

/// Outcome of a ban or unban whose primary write succeeded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BanOutcome {
    pub action: BanAction,
    pub user_id: UserId,
    /// Handle the command named, when the target was given by name
    pub handle: Option<String>,
    /// Record as written to the ban store
    pub record: Map<String, Value>,
    pub membership_index: StepOutcome,
    pub name_index: StepOutcome,
    pub notification: StepOutcome,
}

impl BanOutcome {
    /// Display label for the target: the handle if known, else the id
    pub fn label(&self) -> String {
        self.handle
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }

    /// One line per auxiliary step that failed
    pub fn caveats(&self) -> Vec<String> {
        [
            ("ban index", &self.membership_index),
            ("name index", &self.name_index),
            ("live servers", &self.notification),
        ]
        .into_iter()
        .filter_map(|(step, outcome)| {
            outcome
                .failure()
                .map(|detail| format!("{step} not updated: {detail}"))
        })
        .collect()
    }

    /// True when every auxiliary step either ran or had nothing to do
    pub fn is_complete(&self) -> bool {
        !(self.membership_index.is_failed()
            || self.name_index.is_failed()
            || self.notification.is_failed())
    }
}

/// Outcome of a kick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KickOutcome {
    pub user_id: UserId,
    pub handle: Option<String>,
    pub notification: StepOutcome,
}

impl KickOutcome {
    pub fn label(&self) -> String {
        self.handle
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }
}

/// Ban state as reported by `check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    NotBanned,
    Banned { reason: String, moderator: String },
    /// The record could not be read; the state is unknown
    Error { detail: String },
}

/// Outcome of a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub user_id: UserId,
    pub handle: Option<String>,
    pub status: CheckStatus,
}

impl CheckOutcome {
    pub fn label(&self) -> String {
        self.handle
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }
}
