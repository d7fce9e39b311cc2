//! # modbridge-api
//!
//! Interactions webhook server built with Axum: verifies signed requests,
//! dispatches slash commands to the moderation service and renders replies.

pub mod commands;
pub mod dispatch;
pub mod extractors;
pub mod followup;
pub mod handlers;
pub mod interaction;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
