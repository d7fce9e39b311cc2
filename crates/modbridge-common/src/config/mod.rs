//! Configuration structs

mod app_config;

pub use app_config::{
    AccessConfig, AppConfig, AppSettings, ConfigError, DiscordConfig, Environment,
    MessagingConfig, RegistrationConfig, RobloxConfig, ServerConfig, StoreConfig,
};
