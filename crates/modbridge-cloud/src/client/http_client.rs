//! Cloud API client
//!
//! Wraps a pooled `reqwest::Client` together with the base URLs and the API
//! key. Cheap to clone; every adapter holds its own copy.

use std::sync::Arc;
use std::time::Duration;

use modbridge_common::RobloxConfig;
use modbridge_core::{DomainError, RepoResult};
use reqwest::Url;

/// Header carrying the cloud API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Cloud client configuration
#[derive(Clone)]
pub struct CloudConfig {
    /// Universe (experience) id all requests are scoped to
    pub universe_id: String,
    pub api_key: String,
    /// Base URL for data stores and messaging
    pub api_base: String,
    /// Base URL for the users API
    pub users_base: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("universe_id", &self.universe_id)
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("users_base", &self.users_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl From<&RobloxConfig> for CloudConfig {
    fn from(config: &RobloxConfig) -> Self {
        Self {
            universe_id: config.universe_id.clone(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            users_base: config.users_base.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Error type for client construction
#[derive(Debug, thiserror::Error)]
pub enum CloudClientError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

struct Inner {
    http: reqwest::Client,
    api_base: Url,
    users_base: Url,
    universe_id: String,
    api_key: String,
}

/// Shared client for every cloud adapter
#[derive(Clone)]
pub struct CloudClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudClient")
            .field("api_base", &self.inner.api_base.as_str())
            .field("users_base", &self.inner.users_base.as_str())
            .field("universe_id", &self.inner.universe_id)
            .finish()
    }
}

fn parse_base(raw: &str) -> Result<Url, CloudClientError> {
    let url = Url::parse(raw).map_err(|e| CloudClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(CloudClientError::InvalidUrl {
            url: raw.to_string(),
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}

impl CloudClient {
    /// Create a new client with the given configuration
    pub fn new(config: CloudConfig) -> Result<Self, CloudClientError> {
        let api_base = parse_base(&config.api_base)?;
        let users_base = parse_base(&config.users_base)?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        tracing::info!(
            api_base = %api_base,
            users_base = %users_base,
            universe_id = %config.universe_id,
            timeout_secs = config.timeout.as_secs(),
            "Cloud client created"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                api_base,
                users_base,
                universe_id: config.universe_id,
                api_key: config.api_key,
            }),
        })
    }

    /// Create a new client from modbridge-common config
    pub fn from_config(config: &RobloxConfig) -> Result<Self, CloudClientError> {
        Self::new(CloudConfig::from(config))
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub fn universe_id(&self) -> &str {
        &self.inner.universe_id
    }

    /// `{api_base}/<segments...>` with each segment percent-encoded
    pub(crate) fn api_url(&self, segments: &[&str]) -> RepoResult<Url> {
        join_segments(&self.inner.api_base, segments)
    }

    /// `{users_base}/<segments...>`
    pub(crate) fn users_url(&self, segments: &[&str]) -> RepoResult<Url> {
        join_segments(&self.inner.users_base, segments)
    }
}

fn join_segments(base: &Url, segments: &[&str]) -> RepoResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| DomainError::InternalError(format!("cannot extend URL {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
