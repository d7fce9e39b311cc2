//! Value objects - immutable types that represent domain concepts

mod target;
mod user_id;

pub use target::Target;
pub use user_id::{UserId, UserIdParseError};
