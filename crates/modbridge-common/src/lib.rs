//! # modbridge-common
//!
//! Shared utilities including configuration, error handling, inbound request
//! signature verification, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{SignatureVerifier, VerificationError, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use config::{
    AccessConfig, AppConfig, AppSettings, ConfigError, DiscordConfig, Environment,
    MessagingConfig, RegistrationConfig, RobloxConfig, ServerConfig, StoreConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
