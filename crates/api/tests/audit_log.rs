//! Audit trail emitted by `POST /api/v1/videos/authorize`.
//!
//! A capturing `tracing` layer records every event while each request runs,
//! so these tests check both the audit entries and that nothing logged
//! anywhere carries the video id or the capability token.

mod common;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use common::{body_json, build_test_app, identity_token, post_json, post_json_auth, post_raw};
use lessongate_core::audit::AUDIT_TARGET;
use lessongate_core::hashing::sha256_hex;

const AUTHORIZE: &str = "/api/v1/videos/authorize";

#[derive(Debug, Clone)]
struct CapturedEvent {
    target: String,
    fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

/// Layer that keeps every event it sees.
#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    fn take(&self) -> Vec<CapturedEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        self.events.lock().unwrap().push(CapturedEvent {
            target: event.metadata().target().to_string(),
            fields: recorder.0,
        });
    }
}

fn audit_entries(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events.iter().filter(|e| e.target == AUDIT_TARGET).collect()
}

fn rendered(events: &[CapturedEvent]) -> String {
    format!("{events:?}")
}

#[tokio::test]
async fn each_request_writes_exactly_one_audit_entry() {
    let capture = CaptureLayer::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));
    let app = build_test_app();

    // Grant.
    let response = post_json_auth(
        app.clone(),
        AUTHORIZE,
        json!({ "lessonId": "L1", "deviceId": "tablet-3" }),
        &identity_token("U1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"]
        .as_str()
        .expect("grant carries a token")
        .to_string();

    let events = capture.take();
    let audit = audit_entries(&events);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].field("outcome"), Some("granted"));
    assert_eq!(audit[0].field("lesson_id"), Some("L1"));
    assert_eq!(audit[0].field("caller"), Some("user:U1"));
    assert_eq!(audit[0].field("device_id"), Some("tablet-3"));
    let fingerprint = sha256_hex(token.as_bytes());
    assert_eq!(audit[0].field("token_fingerprint"), Some(fingerprint.as_str()));

    let log = rendered(&events);
    assert!(!log.contains("vid-premium"), "video id leaked into logs");
    assert!(!log.contains(&token), "capability token leaked into logs");

    // Anonymous caller on a premium lesson.
    let response = post_json(app.clone(), AUTHORIZE, json!({ "lessonId": "L1" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let events = capture.take();
    let audit = audit_entries(&events);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].field("outcome"), Some("Unauthorized"));
    assert_eq!(audit[0].field("caller"), Some("guest"));
    assert_eq!(audit[0].field("device_id"), Some("web-browser"));
    assert!(audit[0].field("token_fingerprint").is_none());
    assert!(!rendered(&events).contains("vid-premium"));

    // Malformed body.
    let response = post_raw(app, AUTHORIZE, "{not json".to_string(), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let events = capture.take();
    let audit = audit_entries(&events);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].field("outcome"), Some("InvalidRequest"));
}

#[tokio::test]
async fn unverified_identity_is_audited_as_such() {
    let capture = CaptureLayer::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));
    let app = build_test_app();

    let response = post_json_auth(app, AUTHORIZE, json!({ "lessonId": "L2" }), "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let events = capture.take();
    let audit = audit_entries(&events);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].field("caller"), Some("unverified"));
    assert_eq!(audit[0].field("outcome"), Some("Unauthorized"));
    assert!(!rendered(&events).contains("vid-free"));
}
