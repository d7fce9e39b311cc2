//! Shared HTTP client for the cloud API

mod http_client;

pub use http_client::{CloudClient, CloudClientError, CloudConfig, API_KEY_HEADER};
