//! Invite database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for invites table
#[derive(Debug, Clone, FromRow)]
pub struct InviteModel {
    pub id: Uuid,
    pub chat_id: i64,
    pub invite_link: String,
    pub bound_user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub max_uses: i32,
    pub creates_join_request: bool,
    pub is_revoked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InviteModel {
    /// Check if invite is expired
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
