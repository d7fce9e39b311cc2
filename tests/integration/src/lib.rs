//! Integration test utilities for the moderation bridge
//!
//! In-memory implementations of the remote ports, interaction payload
//! builders, and an in-process webhook server that signs its own requests.


pub use fakes::*;
pub use fixtures::*;
pub use helpers::*;
