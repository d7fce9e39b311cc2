//! Deferred reply delivery
//!
//! When replies are deferred the webhook acknowledges immediately and the
//! final text is delivered by editing the original response through the
//! interaction webhook. The interaction token is the only credential needed.

use std::time::Duration;

use modbridge_common::{AppError, AppResult};
use modbridge_core::{truncate_chars, DIAGNOSTIC_LIMIT};
use serde_json::json;
use tracing::debug;

/// Client for editing an interaction's original response
#[derive(Debug, Clone)]
pub struct FollowupClient {
    http: reqwest::Client,
    api_base: String,
}

impl FollowupClient {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("follow-up client: {e}")))?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn original_message_url(&self, application_id: &str, token: &str) -> String {
        format!(
            "{}/webhooks/{application_id}/{token}/messages/@original",
            self.api_base
        )
    }

    /// Replace the deferred placeholder with `content`
    ///
    /// # Errors
    /// Returns `AppError::ExternalService` if the platform rejects the edit
    pub async fn edit_original(
        &self,
        application_id: &str,
        token: &str,
        content: &str,
    ) -> AppResult<()> {
        let response = self
            .http
            .patch(self.original_message_url(application_id, token))
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(|e| AppError::external(format!("follow-up request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external(format!(
                "follow-up rejected with status {}: {}",
                status.as_u16(),
                truncate_chars(&body, DIAGNOSTIC_LIMIT)
            )));
        }

        debug!(application_id = %application_id, "Deferred reply delivered");
        Ok(())
    }
}
