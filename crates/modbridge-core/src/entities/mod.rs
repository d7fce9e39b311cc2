//! Domain entities - the documents this bridge keeps in the remote stores

mod ban_record;
mod membership_index;
mod name_index;

pub use ban_record::{BanRecord, BanStatus, DEFAULT_BAN_REASON, DEFAULT_MODERATOR_LABEL};
pub use membership_index::{MembershipIndex, MEMBERSHIP_INDEX_KEY};
pub use name_index::{name_key, user_key};
