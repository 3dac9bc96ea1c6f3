//! JSON contract of `POST /api/v1/videos/authorize`.
//!
//! Shared by the API handler and the player's HTTP client. Field names are
//! camelCase on the wire. TypeScript bindings are exported with `ts-rs` for
//! the web player.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::capability::Capability;
use crate::error::CoreError;
use crate::types::VideoId;

/// Request body. Both fields are optional at the serde level so that a
/// missing `lessonId` surfaces as `InvalidRequest` instead of a generic
/// body rejection. Lesson ids are capped at 128 characters and device ids
/// at 256.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthorizeVideoRequest {
    #[validate(length(max = 128))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
    #[validate(length(max = 256))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// Success body.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthorizeVideoGrant {
    /// Always `true`.
    pub ok: bool,
    #[ts(type = "string")]
    pub video_id: VideoId,
    pub token: String,
    /// Seconds until the player must tear down.
    #[ts(type = "number")]
    pub expires_in: u64,
}

impl From<Capability> for AuthorizeVideoGrant {
    fn from(capability: Capability) -> Self {
        Self {
            ok: true,
            video_id: capability.video_id,
            token: capability.token,
            expires_in: capability.expires_in.as_secs(),
        }
    }
}

/// Failure body. Never carries a video id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthorizeVideoRefusal {
    /// Always `false`.
    pub ok: bool,
    /// One of the [`RefusalKind`] names, e.g. `"Unauthorized"`.
    pub error: String,
    /// Upper-snake error code, e.g. `"UNAUTHORIZED"`.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Either response body, distinguished by the presence of `videoId`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AuthorizeVideoResponse {
    Granted(AuthorizeVideoGrant),
    Refused(AuthorizeVideoRefusal),
}

/// Refusal taxonomy visible to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefusalKind {
    InvalidRequest,
    NotFound,
    Unauthorized,
    Forbidden,
    InternalError,
}

impl RefusalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RefusalKind::InvalidRequest => "InvalidRequest",
            RefusalKind::NotFound => "NotFound",
            RefusalKind::Unauthorized => "Unauthorized",
            RefusalKind::Forbidden => "Forbidden",
            RefusalKind::InternalError => "InternalError",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            RefusalKind::InvalidRequest => "INVALID_REQUEST",
            RefusalKind::NotFound => "NOT_FOUND",
            RefusalKind::Unauthorized => "UNAUTHORIZED",
            RefusalKind::Forbidden => "FORBIDDEN",
            RefusalKind::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            RefusalKind::InvalidRequest => 400,
            RefusalKind::Unauthorized => 401,
            RefusalKind::Forbidden => 403,
            RefusalKind::NotFound => 404,
            RefusalKind::InternalError => 500,
        }
    }

    /// Parse the wire name. Unknown names are treated as internal errors.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "InvalidRequest" => RefusalKind::InvalidRequest,
            "NotFound" => RefusalKind::NotFound,
            "Unauthorized" => RefusalKind::Unauthorized,
            "Forbidden" => RefusalKind::Forbidden,
            _ => RefusalKind::InternalError,
        }
    }
}

impl From<&CoreError> for RefusalKind {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::Validation(_) => RefusalKind::InvalidRequest,
            CoreError::NotFound { .. } => RefusalKind::NotFound,
            CoreError::Unauthorized(_) => RefusalKind::Unauthorized,
            CoreError::Forbidden(_) => RefusalKind::Forbidden,
            CoreError::Internal(_) => RefusalKind::InternalError,
        }
    }
}

impl AuthorizeVideoRefusal {
    pub fn new(kind: RefusalKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: kind.as_str().to_string(),
            code: kind.code().to_string(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RefusalKind {
        RefusalKind::from_wire(&self.error)
    }
}
