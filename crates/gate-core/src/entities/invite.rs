//! Invite entity - a single-use, identity-bound admission credential

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{ChatId, UserId};

/// Invite entity.
///
/// Created together with its platform-level invite link when an application
/// is approved. Usable at most once: the `is_revoked` flag flips on the first
/// consumption attempt (successful or not) and never flips back. Rows are
/// kept forever as an audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub id: Uuid,
    pub chat_id: ChatId,
    /// The platform-level invite link string (unique)
    pub invite_link: String,
    /// The only user this credential admits
    pub bound_user_id: UserId,
    pub expires_at: DateTime<Utc>,
    /// Always 1 for personal invites
    pub max_uses: i32,
    /// Always true: the platform must hold the join pending for confirmation
    /// instead of auto-admitting, which is what lets validation intercept it
    pub creates_join_request: bool,
    pub is_revoked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invite {
    /// Create a new personal Invite around a platform link
    pub fn new(
        chat_id: ChatId,
        bound_user_id: UserId,
        invite_link: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            chat_id,
            invite_link: invite_link.into(),
            bound_user_id,
            expires_at,
            max_uses: 1,
            creates_join_request: true,
            is_revoked: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the invite is past its expiry instant
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if the invite can still admit someone at `now`
    #[inline]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked && !self.is_expired_at(now)
    }

    /// Check if the invite is bound to the given user
    #[inline]
    pub fn is_bound_to(&self, user_id: UserId) -> bool {
        self.bound_user_id == user_id
    }
}
