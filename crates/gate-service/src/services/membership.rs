//! Membership service
//!
//! The lifecycle side of membership: removing members who leave and the bio
//! read/write paths that share the member rows.

use gate_core::entities::{truncate_bio, UserProfile};
use gate_core::value_objects::{ChatId, UserId};
use gate_core::MembershipStatus;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{BioOutcome, DepartureOutcome, SetBioRequest};
use crate::texts;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Membership service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    /// Create a new MembershipService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// React to a membership change reported by the platform.
    ///
    /// Only departures (left, kicked, banned) from the governed chat matter;
    /// everything else is ignored. Deleting an absent member is a no-op.
    #[instrument(skip(self))]
    pub async fn on_membership_changed(
        &self,
        user: UserId,
        chat: ChatId,
        status: MembershipStatus,
    ) -> ServiceResult<DepartureOutcome> {
        if chat != self.ctx.settings().group_chat {
            return Ok(DepartureOutcome::Ignored);
        }
        if !status.is_departure() {
            return Ok(DepartureOutcome::Ignored);
        }

        let removed = self.ctx.member_repo().delete_by_user_id(user).await?;
        if removed {
            info!(user = %user, ?status, "Member departed, record removed");
            Ok(DepartureOutcome::Departed)
        } else {
            Ok(DepartureOutcome::Ignored)
        }
    }

    /// Store a user's bio, creating or refreshing their member row
    #[instrument(skip(self, profile, bio))]
    pub async fn set_bio(
        &self,
        user: UserId,
        profile: &UserProfile,
        bio: &str,
    ) -> ServiceResult<BioOutcome> {
        // Truncate to the storage cap first; validation then only rejects
        // the empty case
        let request = SetBioRequest {
            bio: truncate_bio(bio),
        };
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let member = self
            .ctx
            .member_repo()
            .set_bio(user, profile, &request.bio)
            .await?;

        info!(user = %user, "Bio saved");
        self.notify(user, texts::BIO_SAVED_TEXT).await;

        Ok(BioOutcome::Saved(member))
    }

    /// Look up a member's bio by username and send it to the requester.
    /// A missing member is an ordinary outcome, not an error.
    #[instrument(skip(self))]
    pub async fn lookup_bio(&self, requester: UserId, username: &str) -> ServiceResult<BioOutcome> {
        let username = username.trim_start_matches('@');

        match self.ctx.member_repo().find_by_username(username).await? {
            Some(member) => {
                self.notify(requester, &texts::bio_card(&member)).await;
                Ok(BioOutcome::Found(member))
            }
            None => {
                self.notify(requester, texts::MEMBER_NOT_FOUND_TEXT).await;
                Ok(BioOutcome::NotFound)
            }
        }
    }

    /// Fire-and-forget user notification
    async fn notify(&self, target: UserId, text: &str) {
        if let Err(e) = self.ctx.gateway().send_message(target, text, None).await {
            warn!(target = %target, error = %e, "Failed to send notification");
        }
    }
}
