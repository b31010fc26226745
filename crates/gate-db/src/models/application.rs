//! Application database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for applications table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: Uuid,
    pub user_id: i64,
    pub status: String,
    pub invite_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationModel {
    /// Check if the row is still awaiting a decision
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}
