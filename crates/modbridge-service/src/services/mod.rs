//! Business logic services
//!
//! The moderation service owns the read-modify-write protocol across the
//! ban store, the membership index, and the name index.

pub mod access;
pub mod context;
pub mod error;
pub mod moderation;
pub mod notify;

pub use access::AccessPolicy;
pub use context::{ModerationSettings, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use moderation::ModerationService;
pub use notify::NotificationPublisher;
