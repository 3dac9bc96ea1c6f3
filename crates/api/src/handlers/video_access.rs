//! Handler for `POST /videos/authorize`.
//!
//! Every request produces exactly one audit entry under the `audit` target,
//! whether access is granted or refused.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use lessongate_core::audit::{AccessAuditEntry, AUDIT_TARGET};
use lessongate_core::authorization::AccessRequest;
use lessongate_core::capability::Capability;
use lessongate_core::video_access::{AuthorizeVideoGrant, AuthorizeVideoRequest};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CallerIdentity;
use crate::state::AppState;

/// Caller label recorded when the identity token could not be verified.
const UNVERIFIED_CALLER: &str = "unverified";

/// POST /api/v1/videos/authorize
///
/// Decide whether the caller may watch the lesson's video. On success the
/// body carries the video id, an opaque capability token, and the number of
/// seconds the player may keep the video mounted.
pub async fn authorize_video(
    State(state): State<AppState>,
    identity: Result<CallerIdentity, AppError>,
    payload: Result<Json<AuthorizeVideoRequest>, JsonRejection>,
) -> AppResult<Json<AuthorizeVideoGrant>> {
    let body = payload.map(|Json(body)| body);

    let (lesson_id, device_id) = match &body {
        Ok(body) => (body.lesson_id.clone(), body.device_id.as_deref()),
        Err(_) => (None, None),
    };
    let request = AccessRequest::new(lesson_id, device_id, &state.config.default_device_id);

    let caller_label = match &identity {
        Ok(CallerIdentity(caller)) => caller.to_string(),
        Err(_) => UNVERIFIED_CALLER.to_string(),
    };

    match decide(&state, identity, body, &request).await {
        Ok(capability) => {
            emit_audit(&AccessAuditEntry::granted(&capability));
            Ok(Json(capability.into()))
        }
        Err(err) => {
            emit_audit(&AccessAuditEntry::refused(
                request.lesson_id.as_deref(),
                caller_label,
                &request.device_id,
                err.refusal_kind(),
            ));
            Err(err)
        }
    }
}

/// Validate the input, resolve the caller, and run the authorizer.
async fn decide(
    state: &AppState,
    identity: Result<CallerIdentity, AppError>,
    body: Result<AuthorizeVideoRequest, JsonRejection>,
    request: &AccessRequest,
) -> AppResult<Capability> {
    let body = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    body.validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid request: {e}")))?;

    let CallerIdentity(caller) = identity?;

    let capability = state
        .authorizer
        .authorize(request, &caller, Utc::now())
        .await?;

    Ok(capability)
}

fn emit_audit(entry: &AccessAuditEntry) {
    if entry.is_granted() {
        tracing::info!(
            target: AUDIT_TARGET,
            lesson_id = %entry.lesson_id,
            caller = %entry.caller,
            device_id = %entry.device_id,
            outcome = entry.outcome,
            token_fingerprint = entry.token_fingerprint.as_deref().unwrap_or_default(),
            "Video access granted",
        );
    } else {
        tracing::warn!(
            target: AUDIT_TARGET,
            lesson_id = %entry.lesson_id,
            caller = %entry.caller,
            device_id = %entry.device_id,
            outcome = entry.outcome,
            "Video access refused",
        );
    }
}
