//! Best-effort notification publishing
//!
//! Wraps an `EventPublisher` so that a failed publish is logged and turned
//! into a `StepOutcome`, never an error.

use std::sync::Arc;

use modbridge_core::{truncate_chars, EventPublisher, ModerationEvent, DIAGNOSTIC_LIMIT};
use tracing::{debug, warn};

use crate::dto::StepOutcome;

/// Publishes moderation events to the configured topic
#[derive(Clone)]
pub struct NotificationPublisher {
    publisher: Arc<dyn EventPublisher>,
    topic: String,
}

impl NotificationPublisher {
    pub fn new(publisher: Arc<dyn EventPublisher>, topic: impl Into<String>) -> Self {
        Self {
            publisher,
            topic: topic.into(),
        }
    }

    /// Send once; failures come back as `StepOutcome::Failed`
    pub async fn publish(&self, event: &ModerationEvent) -> StepOutcome {
        match self.publisher.publish(&self.topic, event).await {
            Ok(()) => {
                debug!(
                    topic = %self.topic,
                    event_type = ?event.event_type,
                    user_id = %event.user_id,
                    "Notification published"
                );
                StepOutcome::Done
            }
            Err(e) => {
                warn!(
                    topic = %self.topic,
                    event_type = ?event.event_type,
                    user_id = %event.user_id,
                    error = %e,
                    "Notification publish failed"
                );
                StepOutcome::Failed(truncate_chars(&e.to_string(), DIAGNOSTIC_LIMIT))
            }
        }
    }
}

impl std::fmt::Debug for NotificationPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationPublisher")
            .field("topic", &self.topic)
            .finish()
    }
}
