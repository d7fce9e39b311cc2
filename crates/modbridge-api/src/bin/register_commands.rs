//! Registers the moderation slash commands in one guild
//!
//! Needs `DISCORD_APPLICATION_ID`, `DISCORD_BOT_TOKEN` and `GUILD_ID`.

use anyhow::Context;
use modbridge_common::{try_init_tracing, RegistrationConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = RegistrationConfig::from_env().context("loading registration settings")?;

    let count = modbridge_api::commands::register_guild_commands(
        &config.api_base,
        &config.application_id,
        &config.guild_id,
        &config.bot_token,
    )
    .await
    .context("registering guild commands")?;

    println!("Registered {count} commands in guild {}", config.guild_id);
    Ok(())
}
