//! Moderation service
//!
//! Ban, unban, kick, and check against the remote stores. A ban or unban
//! writes the ban record first; the membership index, the name index, and
//! the live-server notification follow as best-effort steps whose failures
//! are reported but never undo the record.

use chrono::Utc;
use modbridge_core::{
    name_key, truncate_chars, user_key, BanRecord, BanStatus, Document, DomainError,
    MembershipIndex, ModerationEvent, ModerationEventType, Target, UserId, DIAGNOSTIC_LIMIT,
    MEMBERSHIP_INDEX_KEY,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::dto::{BanAction, BanOutcome, CheckOutcome, CheckStatus, KickOutcome, StepOutcome};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

fn diagnostic(err: &DomainError) -> String {
    truncate_chars(&err.to_string(), DIAGNOSTIC_LIMIT)
}

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a target to its id, keeping the handle when one was given
    async fn resolve(&self, target: &Target) -> ServiceResult<(UserId, Option<String>)> {
        match target {
            Target::Id(user_id) => Ok((*user_id, None)),
            Target::Handle(handle) => {
                let user_id = self.ctx.resolver().resolve(handle).await?;
                debug!(handle = %handle, user_id = %user_id, "Target resolved");
                Ok((user_id, Some(handle.clone())))
            }
        }
    }

    /// Ban a user
    #[instrument(skip(self), fields(target = %target))]
    pub async fn ban(
        &self,
        target: &Target,
        reason: Option<&str>,
        moderator: &str,
    ) -> ServiceResult<BanOutcome> {
        let record = BanRecord::banned(reason, moderator, Utc::now().timestamp());
        self.apply(target, BanAction::Ban, record).await
    }

    /// Lift a user's ban
    #[instrument(skip(self), fields(target = %target))]
    pub async fn unban(&self, target: &Target, moderator: &str) -> ServiceResult<BanOutcome> {
        let record = BanRecord::lifted(moderator, Utc::now().timestamp());
        self.apply(target, BanAction::Unban, record).await
    }

    async fn apply(
        &self,
        target: &Target,
        action: BanAction,
        record: BanRecord,
    ) -> ServiceResult<BanOutcome> {
        let (user_id, handle) = self.resolve(target).await?;
        let store = &self.ctx.settings().bans_store;
        let key = user_id.store_key();

        // A failed read aborts: merging over a guessed base would drop fields
        let base = Document::from(self.ctx.store().get(store, &key).await?);
        if let Document::Other(_) = &base {
            debug!(user_id = %user_id, "Existing ban record is not an object, replacing");
        }

        let merged = record.merge_into(base);
        if let Err(e) = self
            .ctx
            .store()
            .set(store, &key, &Value::Object(merged.clone()))
            .await
        {
            warn!(user_id = %user_id, error = %e, "Ban record write failed");
            return Err(ServiceError::PrimaryWriteFailed(diagnostic(&e)));
        }

        info!(
            user_id = %user_id,
            moderator = %record.moderator_name,
            active = record.active,
            "Ban record written"
        );

        let membership_index = self.update_membership_index(user_id, record.active).await;

        let name_index = match &handle {
            Some(handle) => self.update_name_index(user_id, handle).await,
            None => StepOutcome::Skipped,
        };

        let event_type = match action {
            BanAction::Ban => ModerationEventType::Ban,
            BanAction::Unban => ModerationEventType::Unban,
        };
        let event = ModerationEvent::new(
            event_type,
            user_id,
            record.reason.clone(),
            record.moderator_name.clone(),
        )
        .at(record.timestamp);
        let notification = self.ctx.notifier().publish(&event).await;

        Ok(BanOutcome {
            action,
            user_id,
            handle,
            record: merged,
            membership_index,
            name_index,
            notification,
        })
    }

    /// Add or remove `user_id` in the membership index
    async fn update_membership_index(&self, user_id: UserId, banned: bool) -> StepOutcome {
        let store = &self.ctx.settings().index_store;

        // Writing after a failed read would wipe every other entry
        let current = match self.ctx.store().get(store, MEMBERSHIP_INDEX_KEY).await {
            Ok(doc) => Document::from(doc),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Ban index read failed");
                return StepOutcome::Failed(diagnostic(&e));
            }
        };

        let mut index = MembershipIndex::from_document(current);
        index.set(user_id, banned);

        match self
            .ctx
            .store()
            .set(store, MEMBERSHIP_INDEX_KEY, &index.into_value())
            .await
        {
            Ok(()) => StepOutcome::Done,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Ban index write failed");
                StepOutcome::Failed(diagnostic(&e))
            }
        }
    }

    /// Record `name:<handle>` and `user:<id>`; both writes are attempted
    async fn update_name_index(&self, user_id: UserId, handle: &str) -> StepOutcome {
        let store = &self.ctx.settings().name_index_store;
        let writes = [
            (name_key(handle), Value::from(u64::from(user_id))),
            (user_key(user_id), Value::String(handle.to_string())),
        ];

        let mut failures = Vec::new();
        for (key, value) in &writes {
            if let Err(e) = self.ctx.store().set(store, key, value).await {
                warn!(user_id = %user_id, key = %key, error = %e, "Name index write failed");
                failures.push(e.to_string());
            }
        }

        if failures.is_empty() {
            StepOutcome::Done
        } else {
            StepOutcome::Failed(truncate_chars(&failures.join("; "), DIAGNOSTIC_LIMIT))
        }
    }

    /// Ask live servers to remove a user; nothing is stored
    #[instrument(skip(self), fields(target = %target))]
    pub async fn kick(
        &self,
        target: &Target,
        reason: Option<&str>,
        moderator: &str,
    ) -> ServiceResult<KickOutcome> {
        let (user_id, handle) = self.resolve(target).await?;
        let reason = reason.map(str::trim).unwrap_or_default();

        let event = ModerationEvent::new(ModerationEventType::Kick, user_id, reason, moderator);
        let notification = self.ctx.notifier().publish(&event).await;

        info!(user_id = %user_id, moderator = %moderator, "Kick requested");

        Ok(KickOutcome {
            user_id,
            handle,
            notification,
        })
    }

    /// Read a user's ban state from the ban record
    #[instrument(skip(self), fields(target = %target))]
    pub async fn check(&self, target: &Target) -> ServiceResult<CheckOutcome> {
        let (user_id, handle) = self.resolve(target).await?;
        let store = &self.ctx.settings().bans_store;

        let status = match self.ctx.store().get(store, &user_id.store_key()).await {
            Ok(doc) => match BanRecord::status_of(&Document::from(doc)) {
                BanStatus::NotBanned => CheckStatus::NotBanned,
                BanStatus::Banned { reason, moderator } => {
                    CheckStatus::Banned { reason, moderator }
                }
            },
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Ban record read failed");
                CheckStatus::Error {
                    detail: diagnostic(&e),
                }
            }
        };

        debug!(user_id = %user_id, status = ?status, "Ban state checked");

        Ok(CheckOutcome {
            user_id,
            handle,
            status,
        })
    }
}
