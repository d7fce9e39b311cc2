//! Port traits - what the domain needs from the remote platform
//!
//! The service layer depends only on these traits; `modbridge-cloud`
//! provides the HTTP implementations and tests provide in-memory ones.

use async_trait::async_trait;
use serde_json::Value;

use crate::document::Document;
use crate::error::DomainError;
use crate::events::ModerationEvent;
use crate::value_objects::UserId;

/// Result type for port operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Identity Resolver
// ============================================================================

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a handle to its numeric identity
    ///
    /// Returns `DomainError::UserNotFound` when no user matches. No retries.
    async fn resolve(&self, handle: &str) -> RepoResult<UserId>;
}

// ============================================================================
// Document Store
// ============================================================================

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one entry; `None` when the store reports not-found
    async fn get(&self, store: &str, key: &str) -> RepoResult<Option<Document>>;

    /// Write one entry verbatim
    async fn set(&self, store: &str, key: &str, value: &Value) -> RepoResult<()>;
}

// ============================================================================
// Event Publisher
// ============================================================================

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Send one event to a topic, at most once
    async fn publish(&self, topic: &str, event: &ModerationEvent) -> RepoResult<()>;
}
