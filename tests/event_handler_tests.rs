mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

use common::{FakeCompletion, FakePlatform};
use standup::api::event_handler::{EventAck, accept_event};
use standup::api::signature::compute_signature;
use standup::api::{AppState, router};
use standup::core::config::AppConfig;
use standup::core::models::DeliveryOutcome;
use standup::worker::FanoutDispatcher;

fn config(signing_secret: Option<&str>) -> AppConfig {
    AppConfig {
        slack_bot_token: "xoxb-test".to_string(),
        slack_signing_secret: signing_secret.map(ToString::to_string),
        slack_client_id: None,
        slack_client_secret: None,
        slack_redirect_url: None,
        openai_api_key: "sk-test".to_string(),
        openai_org_id: None,
        openai_model: "gpt-3.5-turbo".to_string(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        port: 0,
    }
}

fn state(
    signing_secret: Option<&str>,
    platform: &Arc<FakePlatform>,
    completion: &Arc<FakeCompletion>,
) -> AppState {
    let dispatcher = Arc::new(FanoutDispatcher::new(platform.clone(), completion.clone()));
    AppState::new(Arc::new(config(signing_secret)), dispatcher)
}

fn message_body(text: &str) -> Value {
    json!({
        "type": "event_callback",
        "event": {"type": "message", "channel": "CORIGIN", "user": "UAUTHOR", "text": text},
        "authorizations": [{"user_id": "UBOT"}]
    })
}

async fn post_events(app: axum::Router, body: &str, headers: &[(&str, &str)]) -> (StatusCode, String) {
    let mut request = Request::builder()
        .method("POST")
        .uri("/slack/events")
        .header("content-type", "application/json");
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let response = app
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_url_verification_echoes_challenge() {
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("x"));
    let app = router(state(None, &platform, &completion));

    let body = json!({"type": "url_verification", "challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"});
    let (status, text) = post_events(app, &body.to_string(), &[]).await;

    assert_eq!(status, StatusCode::OK);
    let echoed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        echoed["challenge"],
        "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
    );
}

#[tokio::test]
async fn test_message_event_is_acknowledged_and_processed() {
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("Refactored auth."));
    let app_state = state(None, &platform, &completion);

    let ack = accept_event(&app_state, &message_body("Refactored the auth module"));
    let EventAck::Accepted(handle) = ack else {
        panic!("message event should be accepted");
    };

    let outcomes = handle.await.unwrap();
    assert_eq!(
        outcomes,
        vec![DeliveryOutcome::Delivered {
            channel: "CORIGIN".to_string()
        }]
    );
    assert_eq!(platform.posts().len(), 1);
}

#[tokio::test]
async fn test_router_acknowledges_message_events() {
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("x"));
    let app = router(state(None, &platform, &completion));

    let (status, _) = post_events(app, &message_body("wrote docs").to_string(), &[]).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_message_events_are_ignored() {
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("x"));
    let app_state = state(None, &platform, &completion);

    let body = json!({
        "type": "event_callback",
        "event": {"type": "reaction_added", "user": "U1"}
    });
    assert!(matches!(accept_event(&app_state, &body), EventAck::Ignored));
    assert!(matches!(
        accept_event(&app_state, &json!({"type": "app_rate_limited"})),
        EventAck::Ignored
    ));
}

#[tokio::test]
async fn test_missing_authorizations_falls_back_to_auth_test() {
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("x"));
    let app_state = state(None, &platform, &completion);

    let body = json!({
        "type": "event_callback",
        "event": {"type": "message", "channel": "CORIGIN", "user": "UBOT", "text": "my own post"}
    });
    let EventAck::Accepted(handle) = accept_event(&app_state, &body) else {
        panic!("message event should be accepted");
    };

    assert!(handle.await.unwrap().is_empty());
    assert!(platform.posts().is_empty());
}

#[tokio::test]
async fn test_unparseable_body_is_still_acknowledged() {
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("x"));
    let app = router(state(None, &platform, &completion));

    let (status, _) = post_events(app, "not json", &[]).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_signature_is_enforced_when_configured() {
    let secret = "signing-secret";
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("x"));
    let body = json!({"type": "url_verification", "challenge": "abc"}).to_string();

    let (status, _) = post_events(
        router(state(Some(secret), &platform, &completion)),
        &body,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        .to_string();
    let sig = compute_signature(&ts, &body, secret);
    let (status, text) = post_events(
        router(state(Some(secret), &platform, &completion)),
        &body,
        &[
            ("X-Slack-Signature", sig.as_str()),
            ("X-Slack-Request-Timestamp", ts.as_str()),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("abc"));
}

#[tokio::test]
async fn test_oauth_redirect_without_code() {
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("x"));
    let app = router(state(None, &platform, &completion));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/slack/oauth_redirect")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oauth_redirect_without_client_config() {
    let platform = Arc::new(FakePlatform::new());
    let completion = Arc::new(FakeCompletion::replying("x"));
    let app = router(state(None, &platform, &completion));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/slack/oauth_redirect?code=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
