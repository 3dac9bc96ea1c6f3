//! HTTP client for the video authorization endpoint.
//!
//! Wraps `POST /api/v1/videos/authorize` using [`reqwest`]. One call is one
//! authorization round trip; nothing is cached or retried here.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use lessongate_core::types::VideoId;
use lessongate_core::video_access::{
    AuthorizeVideoRequest, AuthorizeVideoResponse, RefusalKind,
};

use crate::config::PlaybackConfig;

/// A capability as the player needs it.
#[derive(Debug, Clone)]
pub struct PlaybackGrant {
    pub video_id: VideoId,
    /// Opaque; kept only so the embedding app can attach it to support
    /// reports.
    pub token: String,
    pub expires_in: Duration,
}

/// Errors from an authorization attempt.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizeError {
    /// The server refused access.
    #[error("Authorization refused ({}): {message}", .kind.as_str())]
    Refused { kind: RefusalKind, message: String },

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a body that is not part of the contract.
    #[error("Malformed authorization response ({status}): {detail}")]
    Malformed { status: u16, detail: String },
}

impl AuthorizeError {
    /// How the failure should be presented. Transport and protocol failures
    /// count as internal errors.
    pub fn refusal_kind(&self) -> RefusalKind {
        match self {
            AuthorizeError::Refused { kind, .. } => *kind,
            AuthorizeError::Request(_) | AuthorizeError::Malformed { .. } => {
                RefusalKind::InternalError
            }
        }
    }
}

/// Source of capabilities for the playback controller.
#[async_trait]
pub trait AuthorizeVideo: Send + Sync {
    async fn authorize(&self, lesson_id: &str) -> Result<PlaybackGrant, AuthorizeError>;
}

/// [`AuthorizeVideo`] over HTTP.
pub struct HttpAuthorizeClient {
    client: reqwest::Client,
    config: PlaybackConfig,
    access_token: RwLock<Option<String>>,
}

impl HttpAuthorizeClient {
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: PlaybackConfig) -> Self {
        let access_token = RwLock::new(config.access_token.clone());
        Self {
            client,
            config,
            access_token,
        }
    }

    /// Replace the identity token after login, or clear it on logout.
    pub fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    fn current_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl AuthorizeVideo for HttpAuthorizeClient {
    async fn authorize(&self, lesson_id: &str) -> Result<PlaybackGrant, AuthorizeError> {
        let body = AuthorizeVideoRequest {
            lesson_id: Some(lesson_id.to_string()),
            device_id: Some(self.config.device_id.clone()),
        };

        let mut request = self.client.post(self.config.authorize_url()).json(&body);
        if let Some(token) = self.current_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        interpret_response(status, &bytes)
    }
}

/// Turn a status and body into a grant or an error.
fn interpret_response(status: u16, body: &[u8]) -> Result<PlaybackGrant, AuthorizeError> {
    let parsed: AuthorizeVideoResponse =
        serde_json::from_slice(body).map_err(|e| AuthorizeError::Malformed {
            status,
            detail: e.to_string(),
        })?;

    match parsed {
        AuthorizeVideoResponse::Granted(grant) if (200..300).contains(&status) && grant.ok => {
            Ok(PlaybackGrant {
                video_id: grant.video_id,
                token: grant.token,
                expires_in: Duration::from_secs(grant.expires_in),
            })
        }
        AuthorizeVideoResponse::Granted(_) => Err(AuthorizeError::Malformed {
            status,
            detail: "grant body on a failure status".into(),
        }),
        AuthorizeVideoResponse::Refused(refusal) => Err(AuthorizeError::Refused {
            kind: refusal.kind(),
            message: refusal.message,
        }),
    }
}
