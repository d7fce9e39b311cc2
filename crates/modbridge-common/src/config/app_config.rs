//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). The result is immutable and handed to each component's
//! constructor; nothing reads the environment after startup.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub discord: DiscordConfig,
    pub roblox: RobloxConfig,
    pub stores: StoreConfig,
    pub messaging: MessagingConfig,
    pub access: AccessConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chat platform (Discord) settings
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Hex-encoded Ed25519 application public key
    pub public_key: String,
    #[serde(default = "default_discord_api_base")]
    pub api_base: String,
    /// Acknowledge commands immediately and edit the reply when done
    #[serde(default)]
    pub defer_replies: bool,
}

/// Game platform (Roblox Open Cloud) settings
#[derive(Debug, Clone, Deserialize)]
pub struct RobloxConfig {
    pub universe_id: String,
    pub api_key: String,
    #[serde(default = "default_roblox_api_base")]
    pub api_base: String,
    #[serde(default = "default_roblox_users_base")]
    pub users_base: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Names of the three data stores and their shared scope
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_bans_store")]
    pub bans: String,
    #[serde(default = "default_index_store")]
    pub index: String,
    #[serde(default = "default_name_index_store")]
    pub name_index: String,
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bans: default_bans_store(),
            index: default_index_store(),
            name_index: default_name_index_store(),
            scope: default_scope(),
        }
    }
}

/// Messaging topic settings
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    #[serde(default = "default_topic")]
    pub topic: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
        }
    }
}

/// Who may run moderation commands
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub allowed_role_ids: Vec<String>,
    #[serde(default)]
    pub allowed_user_ids: Vec<String>,
}

impl AccessConfig {
    /// True when neither list names anyone, which locks every command
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed_role_ids.is_empty() && self.allowed_user_ids.is_empty()
    }
}

/// Settings used only by the `register-commands` binary
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    pub application_id: String,
    pub bot_token: String,
    pub guild_id: String,
    pub api_base: String,
}

// Default value functions
fn default_app_name() -> String {
    "modbridge".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_discord_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_roblox_api_base() -> String {
    "https://apis.roblox.com".to_string()
}

fn default_roblox_users_base() -> String {
    "https://users.roblox.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_bans_store() -> String {
    "BANS_V1".to_string()
}

fn default_index_store() -> String {
    "BANS_INDEX_V1".to_string()
}

fn default_name_index_store() -> String {
    "NAME_INDEX_V1".to_string()
}

fn default_scope() -> String {
    "global".to_string()
}

fn default_topic() -> String {
    "moderation".to_string()
}

/// Split a comma-separated list, dropping blanks
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue(name, other.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name, raw.to_string()))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(default_host),
                port: lookup("PORT")
                    .map(|s| parse_number("PORT", &s))
                    .transpose()?
                    .unwrap_or_else(default_port),
            },
            discord: DiscordConfig {
                public_key: required("DISCORD_PUBLIC_KEY")?,
                api_base: lookup("DISCORD_API_BASE").unwrap_or_else(default_discord_api_base),
                defer_replies: lookup("DISCORD_DEFER_REPLIES")
                    .map(|s| parse_bool("DISCORD_DEFER_REPLIES", &s))
                    .transpose()?
                    .unwrap_or(false),
            },
            roblox: RobloxConfig {
                universe_id: required("ROBLOX_UNIVERSE_ID")?,
                api_key: required("ROBLOX_API_KEY")?,
                api_base: lookup("ROBLOX_API_BASE").unwrap_or_else(default_roblox_api_base),
                users_base: lookup("ROBLOX_USERS_BASE").unwrap_or_else(default_roblox_users_base),
                request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                    .map(|s| parse_number("REQUEST_TIMEOUT_SECS", &s))
                    .transpose()?
                    .unwrap_or_else(default_request_timeout),
            },
            stores: StoreConfig {
                bans: lookup("DS_NAME").unwrap_or_else(default_bans_store),
                index: lookup("DS_INDEX").unwrap_or_else(default_index_store),
                name_index: lookup("DS_NAMEIDX").unwrap_or_else(default_name_index_store),
                scope: lookup("DS_SCOPE").unwrap_or_else(default_scope),
            },
            messaging: MessagingConfig {
                topic: lookup("TOPIC_NAME").unwrap_or_else(default_topic),
            },
            access: AccessConfig {
                allowed_role_ids: lookup("MOD_ALLOWED_ROLE_IDS")
                    .map(|s| split_list(&s))
                    .unwrap_or_default(),
                allowed_user_ids: lookup("MOD_ALLOWED_USER_IDS")
                    .map(|s| split_list(&s))
                    .unwrap_or_default(),
            },
        })
    }
}

impl RegistrationConfig {
    /// Load registration settings from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let required =
            |name: &'static str| env::var(name).map_err(|_| ConfigError::MissingVar(name));

        Ok(Self {
            application_id: required("DISCORD_APPLICATION_ID")?,
            bot_token: required("DISCORD_BOT_TOKEN")?,
            guild_id: required("GUILD_ID")?,
            api_base: env::var("DISCORD_API_BASE").unwrap_or_else(|_| default_discord_api_base()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
