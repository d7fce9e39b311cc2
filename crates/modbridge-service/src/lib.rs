//! # modbridge-service
//!
//! Application layer: the moderation workflow (ban, unban, kick, check),
//! authorization of invokers, and best-effort notifications.

pub mod dto;
pub mod services;

pub use dto::{
    BanAction, BanOutcome, CheckOutcome, CheckStatus, Invoker, KickOutcome, StepOutcome,
};
pub use services::{
    AccessPolicy, ModerationService, ModerationSettings, NotificationPublisher, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
