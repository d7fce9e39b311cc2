//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use modbridge_cloud::{CloudClient, OpenCloudDataStore, OpenCloudMessaging, RobloxUserResolver};
use modbridge_common::{AppConfig, AppError, AppResult, SignatureVerifier};
use modbridge_service::{AccessPolicy, ModerationSettings, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::followup::FollowupClient;
use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub fn create_app_state(config: &AppConfig) -> AppResult<AppState> {
    let verifier = SignatureVerifier::from_hex(&config.discord.public_key)
        .map_err(|e| AppError::Config(format!("DISCORD_PUBLIC_KEY: {e}")))?;

    let client = CloudClient::from_config(&config.roblox)
        .map_err(|e| AppError::Config(e.to_string()))?;
    info!(universe_id = %client.universe_id(), "Open Cloud client ready");

    let store = Arc::new(OpenCloudDataStore::new(
        client.clone(),
        config.stores.scope.clone(),
    ));
    let publisher = Arc::new(OpenCloudMessaging::new(client.clone()));
    let resolver = Arc::new(RobloxUserResolver::new(client));

    let access = AccessPolicy::from(&config.access);
    if access.is_locked() {
        warn!("No moderators configured; every command will be refused");
    }

    let service_context = ServiceContextBuilder::new()
        .resolver(resolver)
        .store(store)
        .publisher(publisher)
        .settings(ModerationSettings::from(config))
        .access(access)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let state = AppState::new(service_context, verifier);
    if config.discord.defer_replies {
        let followups = FollowupClient::new(
            config.discord.api_base.clone(),
            Duration::from_secs(config.roblox.request_timeout_secs),
        )?;
        info!("Command replies are deferred");
        return Ok(state.with_followups(followups));
    }

    Ok(state)
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let state = create_app_state(&config)?;
    let app = create_app(state);
    run_server(app, &config.server.address()).await
}
