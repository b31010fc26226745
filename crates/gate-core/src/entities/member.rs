//! Member entity - an admitted user of the governed group

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::UserId;

/// Maximum stored bio length; longer input is truncated on write.
pub const MAX_BIO_LEN: usize = 4000;

/// Role of a member within the community. Informational only - nothing in the
/// admission flow branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberRole {
    #[default]
    Member,
    Admin,
    Elevated,
}

impl MemberRole {
    /// Stable string form used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Elevated => "elevated",
        }
    }

    /// Parse the persisted string form; unknown values fall back to `Member`
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "elevated" => Self::Elevated,
            _ => Self::Member,
        }
    }
}

/// Name fields reported by the platform for a user.
///
/// Carried on inbound events so a member row can be created or refreshed
/// without a separate profile lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl UserProfile {
    pub fn new(
        username: Option<String>,
        first_name: impl Into<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            username,
            first_name: first_name.into(),
            last_name,
        }
    }

    /// Human-readable full name
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

/// Member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub user_id: UserId,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role: MemberRole,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new Member from a platform profile
    pub fn new(user_id: UserId, profile: &UserProfile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            role: MemberRole::Member,
            bio: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the name fields from a newer platform profile.
    /// Bio and role are deliberately left untouched.
    pub fn apply_profile(&mut self, profile: &UserProfile) {
        self.username = profile.username.clone();
        self.first_name = profile.first_name.clone();
        self.last_name = profile.last_name.clone();
        self.updated_at = Utc::now();
    }

    /// Set the free-text bio, truncated to [`MAX_BIO_LEN`] characters
    pub fn set_bio(&mut self, bio: &str) {
        self.bio = truncate_bio(bio);
        self.updated_at = Utc::now();
    }

    /// Display name: full name, falling back to @username
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() {
            if let Some(username) = &self.username {
                return format!("@{username}");
            }
        }
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

/// Truncate bio input at the storage cap, respecting char boundaries
pub fn truncate_bio(bio: &str) -> String {
    bio.chars().take(MAX_BIO_LEN).collect()
}
