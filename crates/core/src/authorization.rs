//! Video access authorization.
//!
//! [`VideoAuthorizer::authorize`] runs the checks below in order; the first
//! failing check decides the outcome.
//!
//! 1. lesson exists, else `NotFound`
//! 2. lesson is active, else `Forbidden`
//! 3. free lesson: grant to anyone
//! 4. premium lesson and anonymous caller: `Unauthorized`
//! 5. premium lesson: caller must hold an active, unexpired entitlement,
//!    else `Forbidden`
//!
//! Lookup failures surface as `Internal` and are not retried here.

use std::sync::Arc;
use std::time::Duration;

use crate::access::Caller;
use crate::capability::{
    resolve_device_id, Capability, CapabilityBinding, CapabilitySigner, CAPABILITY_TTL_SECS,
};
use crate::error::CoreError;
use crate::lookup::{EntitlementLookup, LessonLookup};
use crate::types::Timestamp;

/// One authorization request after transport decoding.
#[derive(Debug, Clone)]
pub struct AccessRequest {
    pub lesson_id: Option<String>,
    /// Already resolved to the default when the client sent none.
    pub device_id: String,
}

impl AccessRequest {
    pub fn new(
        lesson_id: Option<String>,
        device_id: Option<&str>,
        default_device_id: &str,
    ) -> Self {
        Self {
            lesson_id,
            device_id: resolve_device_id(device_id, default_device_id),
        }
    }
}

/// Stateless gate between the lookups and the token signer.
///
/// Cheap to share behind an `Arc`; holds no mutable state.
pub struct VideoAuthorizer {
    lessons: Arc<dyn LessonLookup>,
    entitlements: Arc<dyn EntitlementLookup>,
    signer: Arc<dyn CapabilitySigner>,
}

impl VideoAuthorizer {
    pub fn new(
        lessons: Arc<dyn LessonLookup>,
        entitlements: Arc<dyn EntitlementLookup>,
        signer: Arc<dyn CapabilitySigner>,
    ) -> Self {
        Self {
            lessons,
            entitlements,
            signer,
        }
    }

    /// The lesson lookup, exposed for health probing.
    pub fn lessons(&self) -> &Arc<dyn LessonLookup> {
        &self.lessons
    }

    /// Decide whether `caller` may watch the requested lesson at `now`.
    pub async fn authorize(
        &self,
        request: &AccessRequest,
        caller: &Caller,
        now: Timestamp,
    ) -> Result<Capability, CoreError> {
        let lesson_id = request
            .lesson_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::Validation("lessonId is required".into()))?;

        let lesson = self
            .lessons
            .get_lesson(lesson_id)
            .await
            .map_err(|e| CoreError::Internal(format!("lesson lookup failed: {e}")))?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Lesson",
                id: lesson_id.to_string(),
            })?;

        if !lesson.is_active {
            return Err(CoreError::Forbidden("lesson not active".into()));
        }

        if lesson.is_premium {
            let user_id = caller
                .user_id()
                .ok_or_else(|| CoreError::Unauthorized("authentication required".into()))?;

            let entitled = self
                .entitlements
                .get_entitlement(user_id)
                .await
                .map_err(|e| CoreError::Internal(format!("entitlement lookup failed: {e}")))?
                .is_some_and(|record| record.is_entitled(now));

            if !entitled {
                return Err(CoreError::Forbidden("subscription required".into()));
            }
        }

        let binding = CapabilityBinding {
            lesson_id: lesson.lesson_id.clone(),
            caller: caller.clone(),
            device_id: request.device_id.clone(),
            issued_at: now,
            expires_in: Duration::from_secs(CAPABILITY_TTL_SECS),
        };

        let token = self
            .signer
            .sign(&binding)
            .map_err(|e| CoreError::Internal(format!("capability signing failed: {e}")))?;

        Ok(Capability {
            video_id: lesson.video_id,
            token,
            expires_in: binding.expires_in,
            binding,
        })
    }
}
