//! Service context - dependency container for services
//!
//! Holds the three remote ports, the store and topic names, and the access
//! policy. Everything is immutable after construction; clones share the
//! same adapters.

use std::sync::Arc;

use modbridge_common::AppConfig;
use modbridge_core::{DocumentStore, EventPublisher, IdentityResolver};

use super::access::AccessPolicy;
use super::error::{ServiceError, ServiceResult};
use super::notify::NotificationPublisher;

/// Names of the stores and topic the moderation workflow touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationSettings {
    pub bans_store: String,
    pub index_store: String,
    pub name_index_store: String,
    pub topic: String,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            bans_store: "BANS_V1".to_string(),
            index_store: "BANS_INDEX_V1".to_string(),
            name_index_store: "NAME_INDEX_V1".to_string(),
            topic: "moderation".to_string(),
        }
    }
}

impl From<&AppConfig> for ModerationSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            bans_store: config.stores.bans.clone(),
            index_store: config.stores.index.clone(),
            name_index_store: config.stores.name_index.clone(),
            topic: config.messaging.topic.clone(),
        }
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    resolver: Arc<dyn IdentityResolver>,
    store: Arc<dyn DocumentStore>,
    notifier: NotificationPublisher,
    settings: Arc<ModerationSettings>,
    access: Arc<AccessPolicy>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        resolver: Arc<dyn IdentityResolver>,
        store: Arc<dyn DocumentStore>,
        publisher: Arc<dyn EventPublisher>,
        settings: ModerationSettings,
        access: AccessPolicy,
    ) -> Self {
        let notifier = NotificationPublisher::new(publisher, settings.topic.clone());

        Self {
            resolver,
            store,
            notifier,
            settings: Arc::new(settings),
            access: Arc::new(access),
        }
    }

    /// Get the identity resolver
    pub fn resolver(&self) -> &dyn IdentityResolver {
        self.resolver.as_ref()
    }

    /// Get the document store
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Get the best-effort notification publisher
    pub fn notifier(&self) -> &NotificationPublisher {
        &self.notifier
    }

    pub fn settings(&self) -> &ModerationSettings {
        &self.settings
    }

    pub fn access(&self) -> &AccessPolicy {
        &self.access
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("ports", &"...")
            .field("settings", &self.settings)
            .field("access", &self.access)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    resolver: Option<Arc<dyn IdentityResolver>>,
    store: Option<Arc<dyn DocumentStore>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    settings: Option<ModerationSettings>,
    access: Option<AccessPolicy>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolver(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn settings(mut self, settings: ModerationSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn access(mut self, access: AccessPolicy) -> Self {
        self.access = Some(access);
        self
    }

    /// Build the ServiceContext
    ///
    /// Settings fall back to the default store names; a missing access
    /// policy denies everyone.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any port is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.resolver
                .ok_or_else(|| ServiceError::validation("resolver is required"))?,
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.publisher
                .ok_or_else(|| ServiceError::validation("publisher is required"))?,
            self.settings.unwrap_or_default(),
            self.access.unwrap_or_else(AccessPolicy::deny_all),
        ))
    }
}
