//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, interactions};
use crate::state::AppState;

/// Interactions webhook and health probe
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/interactions", post(interactions::handle_interaction))
        .route("/health", get(health::health_check))
}
