//! Name index keys - best-effort handle <-> id lookups

use crate::value_objects::UserId;

/// `name:<lowercased handle>` -> numeric id
pub fn name_key(handle: &str) -> String {
    format!("name:{}", handle.to_lowercase())
}

/// `user:<id>` -> last seen handle, case preserved
pub fn user_key(user_id: UserId) -> String {
    format!("user:{user_id}")
}
