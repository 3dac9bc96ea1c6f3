//! Core lookup traits backed by PostgreSQL.

use async_trait::async_trait;
use lessongate_core::access::{EntitlementRecord, LessonAccessRecord};
use lessongate_core::error::CoreError;
use lessongate_core::lookup::{EntitlementLookup, LessonLookup};

use crate::repositories::{EntitlementRepo, LessonRepo};
use crate::DbPool;

/// Implements [`LessonLookup`] and [`EntitlementLookup`] over a pool.
///
/// Database errors are logged and reported as [`CoreError::Internal`];
/// the caller decides whether to retry.
#[derive(Clone)]
pub struct PgAccessStore {
    pool: DbPool,
}

impl PgAccessStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn internal(context: &'static str, err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, context, "Access store query failed");
    CoreError::Internal(format!("{context}: {err}"))
}

#[async_trait]
impl LessonLookup for PgAccessStore {
    async fn get_lesson(&self, lesson_id: &str) -> Result<Option<LessonAccessRecord>, CoreError> {
        let row = LessonRepo::find_access_by_id(&self.pool, lesson_id)
            .await
            .map_err(|e| internal("lesson query", e))?;
        Ok(row.map(|r| r.into_record()))
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| internal("health check", e))
    }
}

#[async_trait]
impl EntitlementLookup for PgAccessStore {
    async fn get_entitlement(
        &self,
        user_id: &str,
    ) -> Result<Option<EntitlementRecord>, CoreError> {
        let row = EntitlementRepo::find_by_user(&self.pool, user_id)
            .await
            .map_err(|e| internal("entitlement query", e))?;
        Ok(row.map(Into::into))
    }
}
