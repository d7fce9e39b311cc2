//! Interactions webhook handler
//!
//! POST /interactions

use axum::{extract::State, Json};
use modbridge_common::AppError;
use tracing::{debug, error, warn, Instrument};

use crate::dispatch::{render, CommandDispatcher};
use crate::extractors::VerifiedInteraction;
use crate::interaction::{Interaction, InteractionResponse, InteractionType};
use crate::response::ApiResult;
use crate::state::AppState;

/// Answer one verified interaction
pub async fn handle_interaction(
    State(state): State<AppState>,
    VerifiedInteraction(interaction): VerifiedInteraction,
) -> ApiResult<Json<InteractionResponse>> {
    match interaction.kind {
        InteractionType::Ping => {
            debug!("Ping acknowledged");
            Ok(Json(InteractionResponse::pong()))
        }
        InteractionType::ApplicationCommand => Ok(Json(run_command(&state, interaction).await)),
        InteractionType::Other(kind) => {
            Err(AppError::bad_request(format!("unsupported interaction type {kind}")).into())
        }
    }
}

async fn run_command(state: &AppState, interaction: Interaction) -> InteractionResponse {
    if let Some(followups) = state.followups() {
        if let (Some(application_id), Some(token)) =
            (interaction.application_id.clone(), interaction.token.clone())
        {
            let ctx = state.shared_context();
            let followups = followups.clone();
            let span = tracing::info_span!("deferred_command", application_id = %application_id);

            tokio::spawn(
                async move {
                    let content = CommandDispatcher::new(&ctx).dispatch(&interaction).await;
                    if let Err(e) = followups
                        .edit_original(&application_id, &token, &content)
                        .await
                    {
                        warn!(error = %e, "Deferred reply not delivered");
                    }
                }
                .instrument(span),
            );

            return InteractionResponse::deferred_ephemeral();
        }
        warn!("Interaction has no token, answering inline");
    }

    // Detached so a dropped request cannot stop the pipeline halfway
    let ctx = state.shared_context();
    let task = tokio::spawn(
        async move { CommandDispatcher::new(&ctx).dispatch(&interaction).await }
            .instrument(tracing::Span::current()),
    );

    let content = task.await.unwrap_or_else(|e| {
        error!(error = %e, "Command task failed");
        render::failure(&"command did not complete")
    });
    InteractionResponse::ephemeral(content)
}
