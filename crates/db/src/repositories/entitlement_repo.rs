//! Repository for the `user_entitlements` table (read-only).

use sqlx::PgPool;

use crate::models::entitlement::EntitlementRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, is_active, expiry_date";

/// Read access to entitlement rows.
pub struct EntitlementRepo;

impl EntitlementRepo {
    /// Find the entitlement of a user, if any.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<EntitlementRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_entitlements WHERE user_id = $1");
        sqlx::query_as::<_, EntitlementRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
