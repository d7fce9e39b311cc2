//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the signature verifier, and the follow-up client when replies are
//! deferred.

use std::sync::Arc;

use modbridge_common::SignatureVerifier;
use modbridge_service::ServiceContext;

use crate::followup::FollowupClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    verifier: Arc<SignatureVerifier>,
    /// Set when commands are acknowledged first and answered later
    followups: Option<FollowupClient>,
}

impl AppState {
    /// Create a new AppState that answers commands inline
    pub fn new(service_context: ServiceContext, verifier: SignatureVerifier) -> Self {
        Self {
            service_context: Arc::new(service_context),
            verifier: Arc::new(verifier),
            followups: None,
        }
    }

    /// Defer command replies and deliver them through `followups`
    #[must_use]
    pub fn with_followups(mut self, followups: FollowupClient) -> Self {
        self.followups = Some(followups);
        self
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Shared handle to the service context for detached tasks
    pub fn shared_context(&self) -> Arc<ServiceContext> {
        Arc::clone(&self.service_context)
    }

    pub fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    pub fn followups(&self) -> Option<&FollowupClient> {
        self.followups.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("verifier", &self.verifier)
            .field("deferred_replies", &self.followups.is_some())
            .finish()
    }
}
