//! Repository for the `lessons` table (read-only).

use sqlx::PgPool;

use crate::models::lesson::LessonAccessRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, video_id, is_premium, is_active";

/// Read access to lesson rows.
pub struct LessonRepo;

impl LessonRepo {
    /// Find the access projection of a lesson by id.
    pub async fn find_access_by_id(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<LessonAccessRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lessons WHERE id = $1");
        sqlx::query_as::<_, LessonAccessRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
