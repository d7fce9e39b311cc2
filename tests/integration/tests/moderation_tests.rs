//! Moderation workflow tests against in-memory remote ports
//!
//! Run with: cargo test -p integration-tests --test moderation_tests

use integration_tests::{Fakes, StoreCall, BANS, INDEX, NAMES, TOPIC};
use modbridge_core::{ModerationEventType, Target, UserId};
use modbridge_service::{CheckStatus, ModerationService, ServiceError, StepOutcome};
use serde_json::json;

fn builderman() -> Target {
    Target::handle("BuilderMan")
}

fn id(raw: u64) -> Target {
    Target::Id(UserId::new(raw).unwrap())
}

// ============================================================================
// Record merge
// ============================================================================

#[tokio::test]
async fn test_unrelated_record_fields_survive_ban_and_unban() {
    let fakes = Fakes::new();
    fakes.store.seed(
        BANS,
        "156",
        json!({ "appealNote": "contacted support", "history": [1, 2], "active": false }),
    );
    let ctx = fakes.context();
    let service = ModerationService::new(&ctx);

    service
        .ban(&builderman(), Some("exploiting"), "modalice")
        .await
        .unwrap();
    let record = fakes.store.entry(BANS, "156").unwrap();
    assert_eq!(record["appealNote"], "contacted support");
    assert_eq!(record["history"], json!([1, 2]));
    assert_eq!(record["active"], true);
    assert_eq!(record["reason"], "exploiting");
    assert_eq!(record["moderatorName"], "modalice");
    assert!(record["timestamp"].as_i64().unwrap() > 0);

    service.unban(&builderman(), "modbob").await.unwrap();
    let record = fakes.store.entry(BANS, "156").unwrap();
    assert_eq!(record["appealNote"], "contacted support");
    assert_eq!(record["active"], false);
    assert_eq!(record["reason"], "");
    assert_eq!(record["moderatorName"], "modbob");
}

#[tokio::test]
async fn test_non_object_record_is_replaced() {
    let fakes = Fakes::new();
    fakes.store.seed(BANS, "156", json!("legacy string"));
    let ctx = fakes.context();

    ModerationService::new(&ctx)
        .ban(&builderman(), None, "modalice")
        .await
        .unwrap();

    let record = fakes.store.entry(BANS, "156").unwrap();
    assert_eq!(record["active"], true);
    assert_eq!(record["reason"], "(no reason)");
}

// ============================================================================
// Membership index
// ============================================================================

#[tokio::test]
async fn test_index_holds_exactly_the_banned_ids() {
    let fakes = Fakes::new();
    let ctx = fakes.context();
    let service = ModerationService::new(&ctx);

    service.ban(&builderman(), None, "m").await.unwrap();
    service
        .ban(&Target::handle("shedletsky"), None, "m")
        .await
        .unwrap();
    service.ban(&id(1_000), None, "m").await.unwrap();
    service.unban(&builderman(), "m").await.unwrap();

    assert_eq!(
        fakes.store.entry(INDEX, "INDEX").unwrap(),
        json!({ "261": true, "1000": true })
    );
}

#[tokio::test]
async fn test_repeated_ban_is_idempotent() {
    let fakes = Fakes::new();
    let ctx = fakes.context();
    let service = ModerationService::new(&ctx);

    service.ban(&builderman(), Some("spam"), "m").await.unwrap();
    let index_once = fakes.store.entry(INDEX, "INDEX").unwrap();
    service.ban(&builderman(), Some("spam"), "m").await.unwrap();

    assert_eq!(fakes.store.entry(INDEX, "INDEX").unwrap(), index_once);
    let record = fakes.store.entry(BANS, "156").unwrap();
    assert_eq!(record["active"], true);
    assert_eq!(record["reason"], "spam");
}

#[tokio::test]
async fn test_second_ban_overwrites_reason_moderator_and_timestamp() {
    let fakes = Fakes::new();
    let ctx = fakes.context();
    let service = ModerationService::new(&ctx);

    service.ban(&builderman(), Some("spam"), "modalice").await.unwrap();
    let mut stale = fakes.store.entry(BANS, "156").unwrap();
    stale["timestamp"] = json!(1);
    fakes.store.seed(BANS, "156", stale);

    service
        .ban(&builderman(), Some("ban evasion"), "modbob")
        .await
        .unwrap();

    let record = fakes.store.entry(BANS, "156").unwrap();
    assert_eq!(record["active"], true);
    assert_eq!(record["reason"], "ban evasion");
    assert_eq!(record["moderatorName"], "modbob");
    assert!(record["timestamp"].as_i64().unwrap() > 1);
    assert_eq!(
        fakes.store.entry(INDEX, "INDEX").unwrap(),
        json!({ "156": true })
    );
}

#[tokio::test]
async fn test_repeated_unban_is_idempotent() {
    let fakes = Fakes::new();
    fakes.store.seed(INDEX, "INDEX", json!({ "156": true, "261": true }));
    let ctx = fakes.context();
    let service = ModerationService::new(&ctx);

    service.ban(&builderman(), Some("spam"), "m").await.unwrap();

    for moderator in ["modalice", "modbob"] {
        let outcome = service.unban(&builderman(), moderator).await.unwrap();
        assert!(outcome.is_complete());

        let record = fakes.store.entry(BANS, "156").unwrap();
        assert_eq!(record["active"], false);
        assert_eq!(record["reason"], "");
        assert_eq!(record["moderatorName"], moderator);
        assert_eq!(
            fakes.store.entry(INDEX, "INDEX").unwrap(),
            json!({ "261": true })
        );
    }

    let status = service.check(&builderman()).await.unwrap().status;
    assert_eq!(status, CheckStatus::NotBanned);
}

#[tokio::test]
async fn test_unban_of_never_banned_user_leaves_empty_index() {
    let fakes = Fakes::new();
    let ctx = fakes.context();

    let outcome = ModerationService::new(&ctx)
        .unban(&id(77), "m")
        .await
        .unwrap();

    assert!(outcome.is_complete());
    assert_eq!(fakes.store.entry(INDEX, "INDEX").unwrap(), json!({}));
}

#[tokio::test]
async fn test_malformed_index_is_rebuilt() {
    let fakes = Fakes::new();
    fakes.store.seed(INDEX, "INDEX", json!(["156"]));
    let ctx = fakes.context();

    ModerationService::new(&ctx)
        .ban(&id(261), None, "m")
        .await
        .unwrap();

    assert_eq!(
        fakes.store.entry(INDEX, "INDEX").unwrap(),
        json!({ "261": true })
    );
}

// ============================================================================
// Name index and notifications
// ============================================================================

#[tokio::test]
async fn test_handle_targets_update_name_index() {
    let fakes = Fakes::new();
    let ctx = fakes.context();

    let outcome = ModerationService::new(&ctx)
        .ban(&builderman(), None, "m")
        .await
        .unwrap();

    assert_eq!(outcome.name_index, StepOutcome::Done);
    assert_eq!(fakes.store.entry(NAMES, "name:builderman").unwrap(), json!(156));
    assert_eq!(fakes.store.entry(NAMES, "user:156").unwrap(), json!("BuilderMan"));
}

#[tokio::test]
async fn test_id_targets_skip_name_index() {
    let fakes = Fakes::new();
    let ctx = fakes.context();

    let outcome = ModerationService::new(&ctx)
        .ban(&id(156), None, "m")
        .await
        .unwrap();

    assert_eq!(outcome.name_index, StepOutcome::Skipped);
    assert!(fakes
        .store
        .calls()
        .iter()
        .all(|c| !matches!(c, StoreCall::Set { store, .. } if store == NAMES)));
    assert_eq!(fakes.resolver.call_count(), 0);
}

#[tokio::test]
async fn test_ban_publishes_event_with_record_fields() {
    let fakes = Fakes::new();
    let ctx = fakes.context();

    ModerationService::new(&ctx)
        .ban(&builderman(), Some("griefing"), "modalice")
        .await
        .unwrap();

    let events = fakes.publisher.events();
    assert_eq!(events.len(), 1);
    assert_eq!(fakes.publisher.topics(), vec![TOPIC.to_string()]);
    let event = &events[0];
    assert_eq!(event.event_type, ModerationEventType::Ban);
    assert_eq!(event.user_id.into_inner(), 156);
    assert_eq!(event.reason, "griefing");
    assert_eq!(event.moderator, "modalice");

    let record = fakes.store.entry(BANS, "156").unwrap();
    assert_eq!(record["timestamp"].as_i64().unwrap(), event.timestamp);
}

#[tokio::test]
async fn test_kick_only_publishes() {
    let fakes = Fakes::new();
    let ctx = fakes.context();

    let outcome = ModerationService::new(&ctx)
        .kick(&builderman(), None, "modalice")
        .await
        .unwrap();

    assert_eq!(outcome.notification, StepOutcome::Done);
    assert_eq!(fakes.store.call_count(), 0);
    let events = fakes.publisher.events();
    assert_eq!(events[0].event_type, ModerationEventType::Kick);
    assert_eq!(events[0].reason, "");
}

// ============================================================================
// Check
// ============================================================================

#[tokio::test]
async fn test_check_classification() {
    let fakes = Fakes::new();
    let ctx = fakes.context();
    let service = ModerationService::new(&ctx);

    let status = service.check(&id(10)).await.unwrap().status;
    assert_eq!(status, CheckStatus::NotBanned);

    fakes.store.seed(BANS, "11", json!(true));
    let status = service.check(&id(11)).await.unwrap().status;
    assert_eq!(status, CheckStatus::NotBanned);

    fakes.store.seed(BANS, "12", json!({ "active": "true" }));
    let status = service.check(&id(12)).await.unwrap().status;
    assert_eq!(status, CheckStatus::NotBanned);

    fakes.store.seed(BANS, "13", json!({ "active": true, "reason": "" }));
    let status = service.check(&id(13)).await.unwrap().status;
    assert_eq!(
        status,
        CheckStatus::Banned {
            reason: "(no reason)".into(),
            moderator: "Moderator".into(),
        }
    );
}

#[tokio::test]
async fn test_check_read_failure_is_not_reported_as_not_banned() {
    let fakes = Fakes::new();
    fakes.store.fail_reads(BANS);
    let ctx = fakes.context();

    let outcome = ModerationService::new(&ctx)
        .check(&builderman())
        .await
        .unwrap();

    match outcome.status {
        CheckStatus::Error { detail } => assert!(detail.contains("500")),
        other => panic!("expected an error status, got {other:?}"),
    }
}

// ============================================================================
// Failure isolation
// ============================================================================

#[tokio::test]
async fn test_unknown_handle_touches_nothing() {
    let fakes = Fakes::new();
    let ctx = fakes.context();

    let err = ModerationService::new(&ctx)
        .ban(&Target::handle("ghost"), Some("x"), "m")
        .await
        .unwrap_err();

    assert!(err.is_resolution());
    assert_eq!(err.to_string(), "username not found: ghost");
    assert_eq!(fakes.remote_calls(), 0);
}

#[tokio::test]
async fn test_resolver_outage_touches_nothing() {
    let fakes = Fakes::new();
    fakes.resolver.go_down();
    let ctx = fakes.context();

    let err = ModerationService::new(&ctx)
        .unban(&builderman(), "m")
        .await
        .unwrap_err();

    assert!(err.is_resolution());
    assert_eq!(fakes.store.set_count(), 0);
    assert_eq!(fakes.publisher.attempts(), 0);
}

#[tokio::test]
async fn test_index_write_failure_keeps_ban() {
    let fakes = Fakes::new();
    fakes.store.fail_writes(INDEX);
    let ctx = fakes.context();
    let service = ModerationService::new(&ctx);

    let outcome = service.ban(&builderman(), None, "m").await.unwrap();

    assert!(outcome.membership_index.is_failed());
    assert_eq!(outcome.name_index, StepOutcome::Done);
    assert_eq!(outcome.notification, StepOutcome::Done);
    assert!(!outcome.is_complete());
    assert_eq!(outcome.caveats().len(), 1);

    let status = service.check(&builderman()).await.unwrap().status;
    assert!(matches!(status, CheckStatus::Banned { .. }));
}

#[tokio::test]
async fn test_index_read_failure_skips_index_write() {
    let fakes = Fakes::new();
    fakes.store.seed(INDEX, "INDEX", json!({ "261": true }));
    fakes.store.fail_reads(INDEX);
    let ctx = fakes.context();

    let outcome = ModerationService::new(&ctx)
        .ban(&id(156), None, "m")
        .await
        .unwrap();

    assert!(outcome.membership_index.is_failed());
    fakes.store.heal();
    assert_eq!(
        fakes.store.entry(INDEX, "INDEX").unwrap(),
        json!({ "261": true })
    );
}

#[tokio::test]
async fn test_primary_write_failure_aborts_everything_after() {
    let fakes = Fakes::new();
    fakes.store.fail_writes(BANS);
    let ctx = fakes.context();

    let err = ModerationService::new(&ctx)
        .ban(&builderman(), None, "m")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::PrimaryWriteFailed(_)));
    assert_eq!(fakes.store.set_count(), 1);
    assert!(fakes.store.entry(INDEX, "INDEX").is_none());
    assert_eq!(fakes.publisher.attempts(), 0);
}

#[tokio::test]
async fn test_record_read_failure_aborts_before_writing() {
    let fakes = Fakes::new();
    fakes.store.fail_reads(BANS);
    let ctx = fakes.context();

    let result = ModerationService::new(&ctx)
        .ban(&builderman(), None, "m")
        .await;

    assert!(result.is_err());
    assert_eq!(fakes.store.set_count(), 0);
}

#[tokio::test]
async fn test_publish_failure_is_a_caveat() {
    let fakes = Fakes::new();
    fakes.publisher.fail();
    let ctx = fakes.context();

    let outcome = ModerationService::new(&ctx)
        .unban(&builderman(), "m")
        .await
        .unwrap();

    assert!(outcome.notification.is_failed());
    assert_eq!(outcome.membership_index, StepOutcome::Done);
    assert!(outcome
        .caveats()
        .iter()
        .any(|c| c.starts_with("live servers not updated")));
}
