//! Reply text for each command outcome
//!
//! Every reply is a single message capped at the platform's content limit.
//! Failed auxiliary steps are appended as warning lines under the headline.

use std::fmt::Display;

use modbridge_core::{truncate_chars, DIAGNOSTIC_LIMIT};
use modbridge_service::{BanAction, BanOutcome, CheckOutcome, CheckStatus, KickOutcome};

/// Maximum characters in one message
pub const MAX_CONTENT_CHARS: usize = 2000;

pub const UNKNOWN_COMMAND: &str = "Unknown command.";

fn with_caveats(headline: String, caveats: &[String]) -> String {
    let mut content = headline;
    for caveat in caveats {
        content.push_str("\n⚠️ ");
        content.push_str(caveat);
    }
    cap(&content)
}

/// Clamp to the message limit
pub fn cap(content: &str) -> String {
    truncate_chars(content, MAX_CONTENT_CHARS)
}

pub fn ban(outcome: &BanOutcome) -> String {
    let headline = match outcome.action {
        BanAction::Ban => format!("✅ Banned **{}** (id: {})", outcome.label(), outcome.user_id),
        BanAction::Unban => format!("🟢 Unbanned **{}** (id: {})", outcome.label(), outcome.user_id),
    };
    with_caveats(headline, &outcome.caveats())
}

pub fn kick(outcome: &KickOutcome) -> String {
    let headline = format!(
        "👢 Kick signal sent to **{}** (id: {})",
        outcome.label(),
        outcome.user_id
    );
    let caveats: Vec<String> = outcome
        .notification
        .failure()
        .map(|detail| format!("live servers not notified: {detail}"))
        .into_iter()
        .collect();
    with_caveats(headline, &caveats)
}

pub fn check(outcome: &CheckOutcome) -> String {
    let label = outcome.label();
    let content = match &outcome.status {
        CheckStatus::Banned { reason, moderator } => format!(
            "🚫 **{label}** (id: {}) is **BANNED** — Reason: {reason} (By: {moderator})",
            outcome.user_id
        ),
        CheckStatus::NotBanned => {
            format!("✅ **{label}** (id: {}) is **NOT banned**", outcome.user_id)
        }
        CheckStatus::Error { detail } => format!(
            "⚠️ Could not read ban status for **{label}** (id: {}): {detail}",
            outcome.user_id
        ),
    };
    cap(&content)
}

/// `❌ <message>` with the message bounded like any other diagnostic
pub fn failure(err: &impl Display) -> String {
    format!("❌ {}", truncate_chars(&err.to_string(), DIAGNOSTIC_LIMIT))
}
