//! Command dispatcher
//!
//! Turns one verified application-command interaction into exactly one
//! reply string. Authorization runs before anything else touches the
//! remote platform; every error becomes a `❌` line rather than an HTTP
//! failure.

use modbridge_service::{ModerationService, ServiceContext};
use tracing::{debug, info, instrument, warn};

use crate::interaction::{Command, CommandParseError, Interaction};

use super::render;

/// Routes commands to the moderation service and renders the outcome
pub struct CommandDispatcher<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommandDispatcher<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run the command carried by `interaction` and return the reply text
    #[instrument(skip_all, fields(interaction_id = interaction.id.as_deref().unwrap_or("-")))]
    pub async fn dispatch(&self, interaction: &Interaction) -> String {
        let invoker = interaction.invoker();

        if let Err(e) = self.ctx.access().authorize(&invoker) {
            warn!(user_id = %invoker.user_id, "Command denied");
            return render::failure(&e);
        }

        let Some(data) = interaction.data.as_ref() else {
            return render::failure(&"interaction has no command data");
        };

        let command = match Command::parse(data) {
            Ok(command) => command,
            Err(CommandParseError::Unknown(name)) => {
                debug!(command = %name, "Unknown command");
                return render::UNKNOWN_COMMAND.to_string();
            }
            Err(e) => return render::failure(&e),
        };

        info!(
            command = command.name(),
            target = %command.target(),
            moderator = %invoker.display_name,
            "Dispatching command"
        );

        let moderator = invoker.display_name.as_str();
        let service = ModerationService::new(self.ctx);
        let result = match &command {
            Command::Ban { target, reason } => service
                .ban(target, reason.as_deref(), moderator)
                .await
                .map(|outcome| render::ban(&outcome)),
            Command::Unban { target } => service
                .unban(target, moderator)
                .await
                .map(|outcome| render::ban(&outcome)),
            Command::Kick { target, reason } => service
                .kick(target, reason.as_deref(), moderator)
                .await
                .map(|outcome| render::kick(&outcome)),
            Command::Check { target } => service
                .check(target)
                .await
                .map(|outcome| render::check(&outcome)),
        };

        result.unwrap_or_else(|e| {
            warn!(
                command = command.name(),
                code = e.error_code(),
                error = %e,
                "Command failed"
            );
            render::failure(&e)
        })
    }
}
