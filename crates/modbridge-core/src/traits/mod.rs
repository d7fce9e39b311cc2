//! Port traits implemented by infrastructure adapters

mod ports;

pub use ports::{DocumentStore, EventPublisher, IdentityResolver, RepoResult};
