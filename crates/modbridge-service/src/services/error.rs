//! Service layer error types
//!
//! Only failures that stop an operation become errors. Auxiliary steps that
//! fail are reported through `StepOutcome` instead.

use modbridge_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Resolution or remote-call failure from the domain layer
    Domain(DomainError),

    /// Invoker is not on an allow-list
    Unauthorized { user_id: String },

    /// The authoritative ban record could not be written; nothing else ran
    PrimaryWriteFailed(String),

    /// Validation error
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Unauthorized { .. } => {
                write!(f, "You are not allowed to use moderation commands.")
            }
            Self::PrimaryWriteFailed(detail) => write!(f, "ban store write failed: {detail}"),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create an unauthorized error
    pub fn unauthorized(user_id: impl Into<String>) -> Self {
        Self::Unauthorized {
            user_id: user_id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Check if the target could not be resolved
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_resolution())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_resolution() {
                    404
                } else if e.is_remote() {
                    502
                } else {
                    500
                }
            }
            Self::Unauthorized { .. } => 403,
            Self::PrimaryWriteFailed(_) => 502,
            Self::Validation(_) => 400,
        }
    }

    /// Get the error code for logs and API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::PrimaryWriteFailed(_) => "PRIMARY_WRITE_FAILED",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
