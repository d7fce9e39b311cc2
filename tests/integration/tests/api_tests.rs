//! Interactions webhook tests against an in-process server
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Path, routing::patch, Json, Router};
use ed25519_dalek::SigningKey;
use integration_tests::{
    assert_json, assert_status, command, command_as, ping, reason, sign, signing_key, userid,
    username, Fakes, TestServer, BANS, INDEX, MODERATOR_ROLE, NAMES, TEST_TIMESTAMP,
};
use modbridge_api::{followup::FollowupClient, AppState};
use modbridge_common::{SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use modbridge_core::ModerationEventType;
use modbridge_service::AccessPolicy;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::sync::mpsc;

async fn server() -> (Fakes, TestServer) {
    let fakes = Fakes::new();
    let server = TestServer::start(fakes.context())
        .await
        .expect("Failed to start server");
    (fakes, server)
}

// ============================================================================
// Health and handshake
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (_, server) = server().await;

    let response = server.get("/health").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ping_answered_with_pong() {
    let (fakes, server) = server().await;

    let response = server.interact(&ping()).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({ "type": 1 }));
    assert_eq!(fakes.remote_calls(), 0);
}

#[tokio::test]
async fn test_unsupported_interaction_type_rejected() {
    let (fakes, server) = server().await;

    let response = server
        .interact(&json!({ "id": "3", "type": 3 }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(fakes.remote_calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_rejected_after_verification() {
    let (_, server) = server().await;
    let body = b"{not json".to_vec();
    let signature = sign(&signing_key(), TEST_TIMESTAMP, &body);

    let response = server
        .interact_raw(body, Some(&signature), Some(TEST_TIMESTAMP))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Signature verification
// ============================================================================

#[tokio::test]
async fn test_missing_signature_headers_rejected() {
    let (_, server) = server().await;
    let body = serde_json::to_vec(&ping()).unwrap();

    let response = server
        .interact_raw(body.clone(), None, Some(TEST_TIMESTAMP))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let signature = sign(&signing_key(), TEST_TIMESTAMP, &body);
    let response = server
        .interact_raw(body, Some(&signature), None)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_tampered_body_never_dispatched() {
    let (fakes, server) = server().await;
    let original = serde_json::to_vec(&command("checkname", json!([username("BuilderMan")])))
        .unwrap();
    let signature = sign(&signing_key(), TEST_TIMESTAMP, &original);
    let tampered = serde_json::to_vec(&command("banname", json!([username("BuilderMan")])))
        .unwrap();

    let response = server
        .interact_raw(tampered, Some(&signature), Some(TEST_TIMESTAMP))
        .await
        .unwrap();

    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(fakes.remote_calls(), 0);
    assert_eq!(fakes.resolver.call_count(), 0);
}

#[tokio::test]
async fn test_foreign_key_and_garbage_signatures_rejected() {
    let (_, server) = server().await;
    let body = serde_json::to_vec(&ping()).unwrap();
    let foreign = sign(&SigningKey::from_bytes(&[1u8; 32]), TEST_TIMESTAMP, &body);

    let response = server
        .interact_raw(body.clone(), Some(&foreign), Some(TEST_TIMESTAMP))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .interact_raw(body, Some("zz-not-hex"), Some(TEST_TIMESTAMP))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_unlisted_invoker_denied_without_remote_calls() {
    let (fakes, server) = server().await;

    let reply = server
        .reply_to(&command_as(
            "banname",
            json!([username("BuilderMan")]),
            "12345",
            &["1"],
        ))
        .await
        .unwrap();

    assert_eq!(reply, "❌ You are not allowed to use moderation commands.");
    assert_eq!(fakes.remote_calls(), 0);
    assert_eq!(fakes.resolver.call_count(), 0);
}

#[tokio::test]
async fn test_allowed_role_admits_invoker() {
    let (_, server) = server().await;

    let reply = server
        .reply_to(&command_as(
            "checkname",
            json!([username("BuilderMan")]),
            "12345",
            &["1", MODERATOR_ROLE],
        ))
        .await
        .unwrap();

    assert_eq!(reply, "✅ **BuilderMan** (id: 156) is **NOT banned**");
}

#[tokio::test]
async fn test_empty_allow_lists_lock_every_command() {
    let fakes = Fakes::new();
    let server = TestServer::start(fakes.context_with(AccessPolicy::deny_all()))
        .await
        .unwrap();

    let reply = server
        .reply_to(&command("checkname", json!([username("BuilderMan")])))
        .await
        .unwrap();

    assert!(reply.starts_with("❌"));
    assert_eq!(fakes.remote_calls(), 0);
}

// ============================================================================
// Commands
// ============================================================================

#[tokio::test]
async fn test_unknown_command() {
    let (fakes, server) = server().await;

    let reply = server
        .reply_to(&command("mute", json!([username("BuilderMan")])))
        .await
        .unwrap();

    assert_eq!(reply, "Unknown command.");
    assert_eq!(fakes.remote_calls(), 0);
}

#[tokio::test]
async fn test_missing_target_option() {
    let (_, server) = server().await;

    let reply = server
        .reply_to(&command("banname", json!([reason("x")])))
        .await
        .unwrap();

    assert_eq!(reply, "❌ Provide a username or a user id.");
}

#[tokio::test]
async fn test_ban_then_check_by_name() {
    let (fakes, server) = server().await;

    let reply = server
        .reply_to(&command(
            "banname",
            json!([username("BuilderMan"), reason("cheating")]),
        ))
        .await
        .unwrap();
    assert_eq!(reply, "✅ Banned **BuilderMan** (id: 156)");

    let record = fakes.store.entry(BANS, "156").unwrap();
    assert_eq!(record["active"], true);
    assert_eq!(record["moderatorName"], "modalice");
    assert_eq!(
        fakes.store.entry(INDEX, "INDEX").unwrap(),
        json!({ "156": true })
    );

    let reply = server
        .reply_to(&command("checkname", json!([username("builderman")])))
        .await
        .unwrap();
    assert_eq!(
        reply,
        "🚫 **builderman** (id: 156) is **BANNED** — Reason: cheating (By: modalice)"
    );
}

#[tokio::test]
async fn test_unban_by_id() {
    let (fakes, server) = server().await;
    fakes
        .store
        .seed(BANS, "156", json!({ "active": true, "reason": "x" }));
    fakes.store.seed(INDEX, "INDEX", json!({ "156": true }));

    let reply = server
        .reply_to(&command("unban", json!([userid(156)])))
        .await
        .unwrap();

    assert_eq!(reply, "🟢 Unbanned **156** (id: 156)");
    assert_eq!(fakes.store.entry(INDEX, "INDEX").unwrap(), json!({}));
    assert_eq!(fakes.resolver.call_count(), 0);
}

#[tokio::test]
async fn test_kick_by_name() {
    let (fakes, server) = server().await;

    let reply = server
        .reply_to(&command(
            "kickname",
            json!([username("Shedletsky"), reason("afk")]),
        ))
        .await
        .unwrap();

    assert_eq!(reply, "👢 Kick signal sent to **Shedletsky** (id: 261)");
    assert_eq!(fakes.publisher.events()[0].reason, "afk");
}

#[tokio::test]
async fn test_unknown_username_reply() {
    let (fakes, server) = server().await;

    let reply = server
        .reply_to(&command("banname", json!([username("ghost")])))
        .await
        .unwrap();

    assert_eq!(reply, "❌ username not found: ghost");
    assert_eq!(fakes.store.set_count(), 0);
}

#[tokio::test]
async fn test_auxiliary_failure_rendered_as_caveat() {
    let (fakes, server) = server().await;
    fakes.store.fail_writes(INDEX);
    fakes.publisher.fail();

    let reply = server
        .reply_to(&command("banname", json!([username("BuilderMan")])))
        .await
        .unwrap();

    let mut lines = reply.lines();
    assert_eq!(lines.next(), Some("✅ Banned **BuilderMan** (id: 156)"));
    assert!(lines
        .next()
        .is_some_and(|l| l.starts_with("⚠️ ban index not updated")));
    assert!(lines
        .next()
        .is_some_and(|l| l.starts_with("⚠️ live servers not updated")));
}

#[tokio::test]
async fn test_check_read_failure_reply() {
    let (fakes, server) = server().await;
    fakes.store.fail_reads(BANS);

    let reply = server
        .reply_to(&command("check", json!([userid(156)])))
        .await
        .unwrap();

    assert!(reply.starts_with("⚠️ Could not read ban status for **156** (id: 156)"));
    assert!(!reply.contains("NOT banned"));
}

#[tokio::test]
async fn test_ban_completes_after_caller_disconnects() {
    let (fakes, server) = server().await;
    fakes.store.delay_reads(INDEX, Duration::from_millis(1500));

    let body = serde_json::to_vec(&command("banname", json!([username("BuilderMan")]))).unwrap();
    let signature = sign(&signing_key(), TEST_TIMESTAMP, &body);
    let impatient = reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    let result = impatient
        .post(format!("{}/interactions", server.base_url()))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .header(SIGNATURE_HEADER, signature)
        .header(TIMESTAMP_HEADER, TEST_TIMESTAMP)
        .body(body)
        .send()
        .await;
    assert!(result.is_err(), "caller should have given up first");

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while fakes.publisher.events().is_empty() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(fakes.store.entry(BANS, "156").unwrap()["active"], true);
    assert_eq!(
        fakes.store.entry(INDEX, "INDEX").unwrap(),
        json!({ "156": true })
    );
    assert_eq!(fakes.store.entry(NAMES, "name:builderman").unwrap(), json!(156));
    let events = fakes.publisher.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, ModerationEventType::Ban);
}

// ============================================================================
// Deferred replies
// ============================================================================

#[tokio::test]
async fn test_deferred_reply_delivered_by_followup() {
    let (tx, mut rx) = mpsc::unbounded_channel::<(String, String, Value)>();
    let tx = Arc::new(tx);
    let stub = Router::new().route(
        "/webhooks/:app/:token/messages/@original",
        patch(
            move |Path((app, token)): Path<(String, String)>, Json(body): Json<Value>| {
                let tx = Arc::clone(&tx);
                async move {
                    tx.send((app, token, body.clone())).ok();
                    Json(body)
                }
            },
        ),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let stub_addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, stub).await.ok() });

    let fakes = Fakes::new();
    let key = signing_key();
    let verifier = SignatureVerifier::from_bytes(key.verifying_key().as_bytes()).unwrap();
    let followups =
        FollowupClient::new(format!("http://{stub_addr}"), Duration::from_secs(5)).unwrap();
    let state = AppState::new(fakes.context(), verifier).with_followups(followups);
    let server = TestServer::start_with_state(state, key).await.unwrap();

    let response = server
        .interact(&command("banname", json!([username("BuilderMan")])))
        .await
        .unwrap();
    let ack: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ack, json!({ "type": 5, "data": { "flags": 64 } }));

    let (app, token, body) = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("follow-up not delivered")
        .unwrap();
    assert_eq!(app, "42");
    assert_eq!(token, "tok");
    assert_eq!(body["content"], "✅ Banned **BuilderMan** (id: 156)");
    assert_eq!(fakes.store.entry(BANS, "156").unwrap()["active"], true);
}
