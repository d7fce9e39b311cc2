//! Data transfer objects
//!
//! Inputs describing who invoked a command, and structured outcomes the
//! presentation layer renders.

mod requests;
mod responses;

pub use requests::Invoker;
pub use responses::{BanAction, BanOutcome, CheckOutcome, CheckStatus, KickOutcome, StepOutcome};
