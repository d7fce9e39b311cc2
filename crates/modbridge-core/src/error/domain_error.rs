//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("username not found: {0}")]
    UserNotFound(String),

    #[error("username resolve failed: {0}")]
    ResolutionFailed(String),

    // =========================================================================
    // Remote Platform Errors (wrapped)
    // =========================================================================
    #[error("store request failed with status {status}: {detail}")]
    StoreRequestFailed { status: u16, detail: String },

    #[error("publish failed with status {status}: {detail}")]
    PublishFailed { status: u16, detail: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ResolutionFailed(_) => "RESOLUTION_FAILED",
            Self::StoreRequestFailed { .. } => "STORE_ERROR",
            Self::PublishFailed { .. } => "PUBLISH_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if the handle could not be turned into an identity
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::ResolutionFailed(_))
    }

    /// Check if a remote call failed
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::StoreRequestFailed { .. } | Self::PublishFailed { .. } | Self::Transport(_)
        )
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
