//! Slash command definitions and guild registration
//!
//! Two families are registered: one keyed by numeric user id and one keyed
//! by username. Registration overwrites the whole guild command set.

use std::time::Duration;

use modbridge_common::{AppError, AppResult};
use modbridge_core::{truncate_chars, DIAGNOSTIC_LIMIT};
use serde::Serialize;
use tracing::info;

/// Option type for free text
pub const OPTION_STRING: u8 = 3;

/// Option type for integers; user ids are sent this way
pub const OPTION_INTEGER: u8 = 4;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptionDefinition {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: u8,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionDefinition>,
}

fn userid_option() -> OptionDefinition {
    OptionDefinition {
        name: "userid",
        kind: OPTION_INTEGER,
        description: "Roblox user id",
        required: true,
    }
}

fn username_option() -> OptionDefinition {
    OptionDefinition {
        name: "username",
        kind: OPTION_STRING,
        description: "Roblox username",
        required: true,
    }
}

fn reason_option() -> OptionDefinition {
    OptionDefinition {
        name: "reason",
        kind: OPTION_STRING,
        description: "Reason",
        required: false,
    }
}

fn command(
    name: &'static str,
    description: &'static str,
    options: Vec<OptionDefinition>,
) -> CommandDefinition {
    CommandDefinition {
        name,
        description,
        options,
    }
}

/// The full command set, id-keyed first
pub fn definitions() -> Vec<CommandDefinition> {
    vec![
        command("ban", "Ban a Roblox user by id", vec![userid_option(), reason_option()]),
        command("unban", "Unban a Roblox user by id", vec![userid_option()]),
        command("kick", "Kick a Roblox user by id", vec![userid_option(), reason_option()]),
        command("check", "Check ban status by id", vec![userid_option()]),
        command("banname", "Ban a Roblox user by username", vec![username_option(), reason_option()]),
        command("unbanname", "Unban a Roblox user by username", vec![username_option()]),
        command("kickname", "Kick a Roblox user by username", vec![username_option(), reason_option()]),
        command("checkname", "Check ban status by username", vec![username_option()]),
    ]
}

fn guild_commands_url(api_base: &str, application_id: &str, guild_id: &str) -> String {
    format!(
        "{}/applications/{application_id}/guilds/{guild_id}/commands",
        api_base.trim_end_matches('/')
    )
}

/// Replace the guild's command set with [`definitions`]
///
/// Returns the number of commands registered.
pub async fn register_guild_commands(
    api_base: &str,
    application_id: &str,
    guild_id: &str,
    bot_token: &str,
) -> AppResult<usize> {
    let commands = definitions();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| AppError::Config(format!("registration client: {e}")))?;

    let response = http
        .put(guild_commands_url(api_base, application_id, guild_id))
        .header(reqwest::header::AUTHORIZATION, format!("Bot {bot_token}"))
        .json(&commands)
        .send()
        .await
        .map_err(|e| AppError::external(format!("registration request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::external(format!(
            "registration rejected with status {}: {}",
            status.as_u16(),
            truncate_chars(&body, DIAGNOSTIC_LIMIT)
        )));
    }

    info!(guild_id = %guild_id, count = commands.len(), "Guild commands registered");
    Ok(commands.len())
}
