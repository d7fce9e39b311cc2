//! Axum extractors for request handling

mod verified;

pub use verified::VerifiedInteraction;
