//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::UserId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Application not found: {0}")]
    ApplicationNotFound(Uuid),

    #[error("Invite not found: {0}")]
    InviteNotFound(String),

    #[error("Member not found: {0}")]
    MemberNotFound(UserId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Application is not pending: {0}")]
    ApplicationNotPending(Uuid),

    #[error("A pending application already exists for this user")]
    PendingApplicationExists,

    #[error("Invite link already exists")]
    InviteLinkExists,

    #[error("Invite already consumed or revoked: {0}")]
    InviteAlreadyRevoked(Uuid),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ApplicationNotFound(_) | Self::InviteNotFound(_) | Self::MemberNotFound(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ApplicationNotPending(_)
                | Self::PendingApplicationExists
                | Self::InviteLinkExists
                | Self::InviteAlreadyRevoked(_)
        )
    }
}
