//! # modbridge-cloud
//!
//! HTTP adapters for the game platform's cloud API.
//!
//! ## Features
//!
//! - **Data Stores**: read and write single entries (`OpenCloudDataStore`)
//! - **Messaging**: publish moderation events to live servers (`OpenCloudMessaging`)
//! - **Users**: resolve a username to its numeric id (`RobloxUserResolver`)
//!
//! All three share one `CloudClient`, which owns the connection pool, the
//! API key, and the request timeout.
//!
//! ## Example
//!
//! ```ignore
//! use modbridge_cloud::{CloudClient, OpenCloudDataStore, OpenCloudMessaging};
//!
//! let client = CloudClient::from_config(&config.roblox)?;
//! let store = OpenCloudDataStore::new(client.clone(), &config.stores.scope);
//! let messaging = OpenCloudMessaging::new(client);
//!
//! let record = store.get("BANS_V1", "user:156").await?;
//! ```

pub mod client;
pub mod datastore;
pub mod error;
pub mod messaging;
pub mod users;

pub use client::{CloudClient, CloudClientError, CloudConfig, API_KEY_HEADER};
pub use datastore::OpenCloudDataStore;
pub use messaging::OpenCloudMessaging;
pub use users::RobloxUserResolver;
