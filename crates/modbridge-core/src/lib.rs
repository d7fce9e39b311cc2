//! # modbridge-core
//!
//! Domain layer for the moderation bridge: identities, ban records, the
//! membership and name indexes, notification events, and the port traits
//! implemented by the remote-platform adapters.
//! This crate has zero dependencies on infrastructure (HTTP, web framework, etc.).

pub mod document;
pub mod entities;
pub mod error;
pub mod events;
pub mod text;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use document::Document;
pub use entities::{
    name_key, user_key, BanRecord, BanStatus, MembershipIndex, DEFAULT_BAN_REASON,
    DEFAULT_MODERATOR_LABEL, MEMBERSHIP_INDEX_KEY,
};
pub use error::DomainError;
pub use events::{ModerationEvent, ModerationEventType};
pub use text::{truncate_chars, DIAGNOSTIC_LIMIT};
pub use traits::{DocumentStore, EventPublisher, IdentityResolver, RepoResult};
pub use value_objects::{Target, UserId, UserIdParseError};
