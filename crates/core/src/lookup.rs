//! Lookup seams for the external stores.
//!
//! The authorizer only reads through these traits; the PostgreSQL adapters
//! live in `lessongate-db`, the in-memory one in [`crate::memory`].

use async_trait::async_trait;

use crate::access::{EntitlementRecord, LessonAccessRecord};
use crate::error::CoreError;

#[async_trait]
pub trait LessonLookup: Send + Sync {
    /// Fetch the access record of a lesson, `None` if it does not exist.
    async fn get_lesson(&self, lesson_id: &str) -> Result<Option<LessonAccessRecord>, CoreError>;

    /// Cheap reachability probe used by `/health`.
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[async_trait]
pub trait EntitlementLookup: Send + Sync {
    /// Fetch a user's entitlement, `None` if the user has none on record.
    async fn get_entitlement(&self, user_id: &str)
        -> Result<Option<EntitlementRecord>, CoreError>;
}
