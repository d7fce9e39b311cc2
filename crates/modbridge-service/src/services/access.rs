//! Access policy for moderation commands
//!
//! An invoker is allowed when their user id or any of their role ids is on
//! an allow-list. Both lists empty means nobody is allowed.

use std::collections::HashSet;

use modbridge_common::AccessConfig;

use crate::dto::Invoker;

use super::error::{ServiceError, ServiceResult};

/// Allow-lists of chat user ids and role ids
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    user_ids: HashSet<String>,
    role_ids: HashSet<String>,
}

impl AccessPolicy {
    pub fn new<U, R>(user_ids: U, role_ids: R) -> Self
    where
        U: IntoIterator<Item = String>,
        R: IntoIterator<Item = String>,
    {
        Self {
            user_ids: user_ids.into_iter().collect(),
            role_ids: role_ids.into_iter().collect(),
        }
    }

    /// Policy that admits nobody
    pub fn deny_all() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.user_ids.is_empty() && self.role_ids.is_empty()
    }

    pub fn permits(&self, invoker: &Invoker) -> bool {
        self.user_ids.contains(&invoker.user_id)
            || invoker.role_ids.iter().any(|r| self.role_ids.contains(r))
    }

    /// # Errors
    /// Returns `ServiceError::Unauthorized` when the invoker is not allowed
    pub fn authorize(&self, invoker: &Invoker) -> ServiceResult<()> {
        if self.permits(invoker) {
            Ok(())
        } else {
            Err(ServiceError::unauthorized(invoker.user_id.clone()))
        }
    }
}

impl From<&AccessConfig> for AccessPolicy {
    fn from(config: &AccessConfig) -> Self {
        Self::new(
            config.allowed_user_ids.iter().cloned(),
            config.allowed_role_ids.iter().cloned(),
        )
    }
}
