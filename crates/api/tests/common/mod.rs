#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use lessongate_api::auth::capability::{CapabilityConfig, JwtCapabilitySigner};
use lessongate_api::auth::jwt::{generate_access_token, JwtConfig};
use lessongate_api::config::ServerConfig;
use lessongate_api::router::build_app_router;
use lessongate_api::state::AppState;
use lessongate_core::access::{EntitlementRecord, LessonAccessRecord};
use lessongate_core::authorization::VideoAuthorizer;
use lessongate_core::memory::InMemoryAccessStore;
use lessongate_core::types::VideoId;

pub const JWT_SECRET: &str = "identity-secret-for-integration-tests";
pub const CAPABILITY_SECRET: &str = "capability-secret-for-integration-tests";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_device_id: "web-browser".to_string(),
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        capability: CapabilityConfig {
            secret: CAPABILITY_SECRET.to_string(),
        },
    }
}

pub fn lesson(id: &str, video: &str, is_premium: bool, is_active: bool) -> LessonAccessRecord {
    LessonAccessRecord {
        lesson_id: id.to_string(),
        video_id: VideoId::new(video),
        is_premium,
        is_active,
    }
}

/// Store seeded with the fixture catalog:
///
/// | lesson | video       | premium | active |
/// |--------|-------------|---------|--------|
/// | L1     | vid-premium | yes     | yes    |
/// | L2     | vid-free    | no      | yes    |
/// | L3     | vid-draft   | no      | no     |
/// | L4     | vid-retired | yes     | no     |
///
/// Users: `U1` active for one more year, `U2` deactivated, `U3` expired
/// yesterday, `U4` active without expiry.
pub fn seeded_store() -> Arc<InMemoryAccessStore> {
    let now = Utc::now();
    let store = Arc::new(InMemoryAccessStore::new());
    store.insert_lesson(lesson("L1", "vid-premium", true, true));
    store.insert_lesson(lesson("L2", "vid-free", false, true));
    store.insert_lesson(lesson("L3", "vid-draft", false, false));
    store.insert_lesson(lesson("L4", "vid-retired", true, false));

    for (user, is_active, expiry) in [
        ("U1", true, Some(now + Duration::days(365))),
        ("U2", false, None),
        ("U3", true, Some(now - Duration::days(1))),
        ("U4", true, None),
    ] {
        store.insert_entitlement(EntitlementRecord {
            user_id: user.to_string(),
            is_active,
            expiry_date: expiry,
        });
    }
    store
}

/// Build the full application router over the given store.
///
/// Uses the same `build_app_router` as production so integration tests
/// exercise the real middleware stack.
pub fn build_test_app_with_store(store: Arc<InMemoryAccessStore>) -> Router {
    let config = test_config();
    build_app_router(test_state(&config, store), &config)
}

/// Application state over `store`, signing with the test capability secret.
pub fn test_state(config: &ServerConfig, store: Arc<InMemoryAccessStore>) -> AppState {
    let signer = Arc::new(JwtCapabilitySigner::new(&config.capability));
    AppState {
        config: Arc::new(config.clone()),
        authorizer: Arc::new(VideoAuthorizer::new(store.clone(), store, signer)),
    }
}

pub fn build_test_app() -> Router {
    build_test_app_with_store(seeded_store())
}

/// Identity token for `user_id`, signed with the test secret.
pub fn identity_token(user_id: &str) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string(), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    post_raw(app, uri, body.to_string(), Some(token)).await
}

pub async fn post_raw(app: Router, uri: &str, body: String, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
