//! Capability tokens for granted video access.
//!
//! A capability token is an HS256 JWT over the binding
//! `{lesson, caller, device, issue time}` with a fixed audience. Clients
//! treat it as opaque. Nothing validates it on the playback path; it exists
//! so an issued grant can be traced back from logs or support tickets via
//! [`decode_capability_token`].

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lessongate_core::capability::{CapabilityBinding, CapabilitySigner};
use lessongate_core::error::CoreError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audience claim of every capability token.
pub const CAPABILITY_AUDIENCE: &str = "lesson-video";

/// Claims embedded in a capability token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CapabilityClaims {
    /// Caller, rendered as `user:<id>` or `guest`.
    pub sub: String,
    /// Lesson id.
    pub lid: String,
    /// Client-supplied device id.
    pub dev: String,
    pub aud: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Signing secret for capability tokens.
#[derive(Clone)]
pub struct CapabilityConfig {
    pub secret: String,
}

impl std::fmt::Debug for CapabilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl CapabilityConfig {
    /// Load from `CAPABILITY_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if `CAPABILITY_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("CAPABILITY_SECRET")
            .expect("CAPABILITY_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "CAPABILITY_SECRET must not be empty");
        Self { secret }
    }
}

/// [`CapabilitySigner`] producing HS256 JWTs.
pub struct JwtCapabilitySigner {
    key: EncodingKey,
}

impl JwtCapabilitySigner {
    pub fn new(config: &CapabilityConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.secret.as_bytes()),
        }
    }
}

impl CapabilitySigner for JwtCapabilitySigner {
    fn sign(&self, binding: &CapabilityBinding) -> Result<String, CoreError> {
        let iat = binding.issued_at.timestamp();
        let claims = CapabilityClaims {
            sub: binding.caller.to_string(),
            lid: binding.lesson_id.clone(),
            dev: binding.device_id.clone(),
            aud: CAPABILITY_AUDIENCE.to_string(),
            iat,
            exp: iat + binding.expires_in.as_secs() as i64,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.key)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))
    }
}

/// Verify a capability token's signature, audience and expiry and return
/// its claims.
pub fn decode_capability_token(
    token: &str,
    config: &CapabilityConfig,
) -> Result<CapabilityClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_audience(&[CAPABILITY_AUDIENCE]);

    let token_data = decode::<CapabilityClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
