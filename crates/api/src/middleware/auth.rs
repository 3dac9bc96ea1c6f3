//! JWT-based identity resolution for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use lessongate_core::access::Caller;
use lessongate_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller resolved from the `Authorization` header.
///
/// Unlike an authentication guard this never rejects a request for lacking
/// credentials: a missing header yields [`Caller::Anonymous`]. A header that
/// is present but malformed, expired, or wrongly signed is rejected with
/// `Unauthorized`, because the client evidently meant to identify itself.
///
/// ```ignore
/// async fn my_handler(CallerIdentity(caller): CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(%caller, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Caller);

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(CallerIdentity(Caller::Anonymous));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(CallerIdentity(Caller::User(claims.sub)))
    }
}
