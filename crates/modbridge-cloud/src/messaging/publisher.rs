//! Topic publisher
//!
//! Publishes moderation events to a messaging topic. Delivery is at most
//! once; callers decide what a failure means.

use async_trait::async_trait;
use modbridge_core::{DomainError, EventPublisher, ModerationEvent, RepoResult};
use serde_json::json;
use tracing::{debug, instrument};

use crate::client::{CloudClient, API_KEY_HEADER};
use crate::error::{map_transport_error, response_detail};

/// `EventPublisher` backed by the cloud messaging endpoint
#[derive(Debug, Clone)]
pub struct OpenCloudMessaging {
    client: CloudClient,
}

impl OpenCloudMessaging {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventPublisher for OpenCloudMessaging {
    #[instrument(skip(self, event), fields(event_type = ?event.event_type, user_id = %event.user_id))]
    async fn publish(&self, topic: &str, event: &ModerationEvent) -> RepoResult<()> {
        let url = self.client.api_url(&[
            "messaging-service",
            "v1",
            "universes",
            self.client.universe_id(),
            "topics",
            topic,
        ])?;

        // The message field carries the event as a JSON string, not an object
        let body = json!({ "message": event.to_json()? });

        let response = self
            .client
            .http()
            .post(url)
            .header(API_KEY_HEADER, self.client.api_key())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::PublishFailed {
                status: status.as_u16(),
                detail: response_detail(response).await,
            });
        }

        debug!("Event published");
        Ok(())
    }
}
