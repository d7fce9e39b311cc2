//! Events published to the live game servers

mod moderation_event;

pub use moderation_event::{ModerationEvent, ModerationEventType};
