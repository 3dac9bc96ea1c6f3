use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lessongate_core::error::CoreError;
use lessongate_core::video_access::{AuthorizeVideoRefusal, RefusalKind};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] producing the `{ "ok": false, ... }` refusal
/// envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lessongate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The client-visible refusal kind of this error.
    pub fn refusal_kind(&self) -> RefusalKind {
        match self {
            AppError::Core(core) => RefusalKind::from(core),
            AppError::BadRequest(_) => RefusalKind::InvalidRequest,
            AppError::InternalError(_) => RefusalKind::InternalError,
        }
    }

    /// Client-facing message. Internal details are logged, never returned.
    fn public_message(&self) -> String {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
                CoreError::Validation(msg)
                | CoreError::Unauthorized(msg)
                | CoreError::Forbidden(msg) => msg.clone(),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    "An internal error occurred".to_string()
                }
            },
            AppError::BadRequest(msg) => msg.clone(),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "An internal error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.refusal_kind();
        let status = StatusCode::from_u16(kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = AuthorizeVideoRefusal::new(kind, self.public_message());

        (status, axum::Json(body)).into_response()
    }
}
