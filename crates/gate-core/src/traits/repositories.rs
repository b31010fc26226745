//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the entity store; the
//! infrastructure layer provides the implementation. Simple reads and
//! single-row mutations live on the per-entity repositories. The two
//! multi-row sequences of the admission flow live on [`AdmissionStore`],
//! whose implementations must make each call atomic (one transaction per
//! inbound event).

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Application, Invite, Member, UserProfile};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by platform user id
    async fn find_by_user_id(&self, user_id: UserId) -> RepoResult<Option<Member>>;

    /// Find member by username (without the leading `@`)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>>;

    /// Create or refresh a member keyed by platform user id.
    ///
    /// Conflict resolution: the name fields are overwritten from `profile`;
    /// bio and role are preserved. Returns the stored row.
    async fn upsert_by_user_id(&self, user_id: UserId, profile: &UserProfile)
        -> RepoResult<Member>;

    /// Upsert a member and set their bio in one atomic operation.
    /// Name fields are overwritten; role is preserved.
    async fn set_bio(&self, user_id: UserId, profile: &UserProfile, bio: &str)
        -> RepoResult<Member>;

    /// Remove a member by platform user id.
    /// Returns false (not an error) if no such member existed.
    async fn delete_by_user_id(&self, user_id: UserId) -> RepoResult<bool>;
}

// ============================================================================
// Application Repository
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find application by id
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Application>>;

    /// Find the pending application for a user, if any
    async fn find_pending_by_user(&self, user_id: UserId) -> RepoResult<Option<Application>>;

    /// Create a new application.
    ///
    /// A second pending row for the same user must be rejected with
    /// [`DomainError::PendingApplicationExists`].
    async fn create(&self, application: &Application) -> RepoResult<()>;

    /// Delete an application by id.
    /// Returns false (not an error) if the row was already gone.
    async fn delete_by_id(&self, id: Uuid) -> RepoResult<bool>;

    /// Delete every application (pending or approved) for a user.
    /// Returns the number of rows removed.
    async fn delete_all_for_user(&self, user_id: UserId) -> RepoResult<u64>;
}

// ============================================================================
// Invite Repository
// ============================================================================

#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Find invite by its platform link string
    async fn find_by_link(&self, invite_link: &str) -> RepoResult<Option<Invite>>;

    /// Find invite by id
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invite>>;

    /// Mark an invite revoked if it is not already.
    ///
    /// Returns true if this call performed the revocation, false if the
    /// invite was already revoked. A missing invite is an error.
    async fn revoke(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Admission Store - compound transactional writes
// ============================================================================

/// Result of an atomic admission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmitOutcome {
    /// The invite was consumed by this call and the member row now exists
    Admitted(Member),
    /// Another attempt consumed the invite first; nothing was changed
    AlreadyConsumed,
}

/// The two multi-row write sequences of the admission flow.
///
/// Implementations must execute each method inside a single transaction:
/// either every row change persists or none does.
#[async_trait]
pub trait AdmissionStore: Send + Sync {
    /// Persist a freshly minted invite and flip its application from pending
    /// to approved, as one unit.
    ///
    /// Fails with [`DomainError::ApplicationNotPending`] (nothing persisted)
    /// if the application is missing or no longer pending.
    async fn approve_application(&self, application_id: Uuid, invite: &Invite) -> RepoResult<()>;

    /// Consume an invite and materialize the member, as one unit:
    /// conditionally revoke the invite (the serialization point for
    /// concurrent attempts), upsert the member row by platform user id, and
    /// purge every application for that user.
    ///
    /// Returns [`AdmitOutcome::AlreadyConsumed`] without side effects when
    /// the invite was revoked by an earlier attempt.
    async fn admit_member(
        &self,
        invite_id: Uuid,
        user_id: UserId,
        profile: &UserProfile,
    ) -> RepoResult<AdmitOutcome>;
}
