//! Entitlement row projection.

use lessongate_core::access::EntitlementRecord;
use lessongate_core::types::Timestamp;
use sqlx::FromRow;

/// A row of `user_entitlements`.
#[derive(Debug, Clone, FromRow)]
pub struct EntitlementRow {
    pub user_id: String,
    pub is_active: bool,
    pub expiry_date: Option<Timestamp>,
}

impl From<EntitlementRow> for EntitlementRecord {
    fn from(row: EntitlementRow) -> Self {
        EntitlementRecord {
            user_id: row.user_id,
            is_active: row.is_active,
            expiry_date: row.expiry_date,
        }
    }
}
