//! Capabilities minted by the authorizer.
//!
//! A capability is never persisted. Its only lifetime enforcement is the
//! player's teardown timer, so an issued token cannot be revoked early and
//! is not single-use.

use std::time::Duration;

use crate::access::Caller;
use crate::error::CoreError;
use crate::types::{LessonId, Timestamp, VideoId};

/// Lifetime of every capability, in seconds.
pub const CAPABILITY_TTL_SECS: u64 = 600;

/// Device id bound into the token when the client does not send one.
pub const DEFAULT_DEVICE_ID: &str = "web-browser";

/// What a capability token is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityBinding {
    pub lesson_id: LessonId,
    pub caller: Caller,
    /// Client supplied; audit value only.
    pub device_id: String,
    pub issued_at: Timestamp,
    pub expires_in: Duration,
}

/// A granted, time-bounded right to play one lesson video.
#[derive(Debug, Clone)]
pub struct Capability {
    pub video_id: VideoId,
    pub token: String,
    pub expires_in: Duration,
    pub binding: CapabilityBinding,
}

/// Turns a binding into an opaque bearer token.
pub trait CapabilitySigner: Send + Sync {
    fn sign(&self, binding: &CapabilityBinding) -> Result<String, CoreError>;
}

/// Resolve the device id to bind, falling back to `default` when the
/// client sent nothing usable.
pub fn resolve_device_id(device_id: Option<&str>, default: &str) -> String {
    match device_id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => default.to_string(),
    }
}
