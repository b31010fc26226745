//! Application entity - a request to join the governed group

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::UserId;

/// Status of a membership application.
///
/// `Pending -> Approved` is the only transition; denial deletes the row
/// instead of recording a state, and all rows for a user are purged once
/// that user joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
}

impl ApplicationStatus {
    /// Stable string form used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }

    /// Parse the persisted string form; unknown values fall back to `Pending`
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            _ => Self::Pending,
        }
    }
}

/// Application entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: Uuid,
    pub user_id: UserId,
    pub status: ApplicationStatus,
    /// Set when the application is approved and an invite is minted
    pub invite_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Create a new pending Application for a user
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            status: ApplicationStatus::Pending,
            invite_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the application is still awaiting a decision
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// Record approval, linking the minted invite
    pub fn approve(&mut self, invite_id: Uuid) {
        self.status = ApplicationStatus::Approved;
        self.invite_id = Some(invite_id);
        self.updated_at = Utc::now();
    }
}
