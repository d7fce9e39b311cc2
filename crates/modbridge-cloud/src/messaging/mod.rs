//! Cross-server messaging

mod publisher;

pub use publisher::OpenCloudMessaging;
