//! Membership index - one document listing every currently banned user
//!
//! The whole map is read, changed, and written back. Two bridges mutating
//! the index at once for different users race and the last write wins; the
//! remote store offers no transaction or compare-and-set to prevent it.

use serde_json::{Map, Value};

use crate::document::Document;
use crate::value_objects::UserId;

/// Key of the single index document within its store
pub const MEMBERSHIP_INDEX_KEY: &str = "INDEX";

/// Set of banned user ids, stored as `{"<id>": true, ...}`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MembershipIndex {
    entries: Map<String, Value>,
}

impl MembershipIndex {
    /// Load from a stored document; any non-object is discarded
    pub fn from_document(doc: Document) -> Self {
        Self {
            entries: doc.into_map_or_empty(),
        }
    }

    /// Mark a user as banned
    pub fn insert(&mut self, user_id: UserId) {
        self.entries.insert(user_id.store_key(), Value::Bool(true));
    }

    /// Drop a user from the index entirely
    pub fn remove(&mut self, user_id: UserId) -> bool {
        self.entries.remove(&user_id.store_key()).is_some()
    }

    /// Apply a ban state change
    pub fn set(&mut self, user_id: UserId, banned: bool) {
        if banned {
            self.insert(user_id);
        } else {
            self.remove(user_id);
        }
    }

    /// Document to write back
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}
