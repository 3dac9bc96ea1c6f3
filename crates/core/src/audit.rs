//! Audit entries for video access decisions.
//!
//! One entry is emitted per authorization request, on grant and on refusal.
//! Entries never contain the video id or the bearer token; a granted entry
//! carries the token's SHA-256 fingerprint instead.

use serde::Serialize;

use crate::capability::Capability;
use crate::hashing;
use crate::video_access::RefusalKind;

/// Audit log target used with `tracing`.
pub const AUDIT_TARGET: &str = "audit";

/// Outcome value recorded for a successful authorization.
pub const OUTCOME_GRANTED: &str = "granted";

/// A single access decision, ready to be logged.
#[derive(Debug, Clone, Serialize)]
pub struct AccessAuditEntry {
    pub lesson_id: String,
    pub caller: String,
    pub device_id: String,
    /// `"granted"` or the refusal kind name.
    pub outcome: &'static str,
    pub token_fingerprint: Option<String>,
}

impl AccessAuditEntry {
    pub fn granted(capability: &Capability) -> Self {
        Self {
            lesson_id: capability.binding.lesson_id.clone(),
            caller: capability.binding.caller.to_string(),
            device_id: capability.binding.device_id.clone(),
            outcome: OUTCOME_GRANTED,
            token_fingerprint: Some(token_fingerprint(&capability.token)),
        }
    }

    /// `caller` is the rendered [`Caller`](crate::access::Caller), or a placeholder when the
    /// identity could not be verified.
    pub fn refused(
        lesson_id: Option<&str>,
        caller: impl Into<String>,
        device_id: &str,
        kind: RefusalKind,
    ) -> Self {
        Self {
            lesson_id: lesson_id.unwrap_or_default().to_string(),
            caller: caller.into(),
            device_id: device_id.to_string(),
            outcome: kind.as_str(),
            token_fingerprint: None,
        }
    }

    pub fn is_granted(&self) -> bool {
        self.outcome == OUTCOME_GRANTED
    }
}

/// SHA-256 hex fingerprint of a capability token.
pub fn token_fingerprint(token: &str) -> String {
    hashing::sha256_hex(token.as_bytes())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::access::Caller;
    use crate::capability::CapabilityBinding;
    use crate::types::VideoId;

    #[test]
    fn granted_entry_fingerprints_token_and_omits_video() {
        let cap = Capability {
            video_id: VideoId::new("secret-video"),
            token: "bearer-token".into(),
            expires_in: Duration::from_secs(600),
            binding: CapabilityBinding {
                lesson_id: "L1".into(),
                caller: Caller::User("U1".into()),
                device_id: "web-browser".into(),
                issued_at: Utc::now(),
                expires_in: Duration::from_secs(600),
            },
        };

        let entry = AccessAuditEntry::granted(&cap);
        assert!(entry.is_granted());
        assert_eq!(entry.caller, "user:U1");
        assert_eq!(
            entry.token_fingerprint.as_deref(),
            Some(token_fingerprint("bearer-token").as_str())
        );

        let rendered = serde_json::to_string(&entry).unwrap();
        assert!(!rendered.contains("secret-video"));
        assert!(!rendered.contains("bearer-token"));
    }

    #[test]
    fn refused_entry_records_kind() {
        let entry = AccessAuditEntry::refused(
            Some("L1"),
            Caller::Anonymous.to_string(),
            "web-browser",
            RefusalKind::Unauthorized,
        );
        assert!(!entry.is_granted());
        assert_eq!(entry.outcome, "Unauthorized");
        assert_eq!(entry.caller, "guest");
        assert!(entry.token_fingerprint.is_none());
    }
}
