//! Admission service
//!
//! Validates join attempts against invites. This is the security-critical
//! path: it enforces the identity binding and the single-use guarantee at the
//! moment someone knocks on the door.

use chrono::Utc;
use gate_core::entities::UserProfile;
use gate_core::traits::AdmitOutcome;
use gate_core::value_objects::{ChatId, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{JoinOutcome, RejectReason};
use crate::texts;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Admission service
pub struct AdmissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdmissionService<'a> {
    /// Create a new AdmissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate one inbound join attempt.
    ///
    /// Gate order: a link must be presented; the link must be known, not
    /// revoked, bound to the claimed chat, and not expired; and the
    /// attempting identity must match the bound identity. A mismatch burns
    /// the invite for everyone, the legitimate holder included. The happy
    /// path consumes the invite, materializes the member, and purges the
    /// user's applications in one transaction before the platform is told to
    /// let them in.
    #[instrument(skip(self, profile))]
    pub async fn handle_join_attempt(
        &self,
        invite_link: Option<&str>,
        user: UserId,
        profile: &UserProfile,
        chat: ChatId,
    ) -> ServiceResult<JoinOutcome> {
        let Some(link) = invite_link else {
            self.decline(chat, user).await;
            return Ok(JoinOutcome::Rejected(RejectReason::NoInvite));
        };

        let Some(invite) = self.ctx.invite_repo().find_by_link(link).await? else {
            self.decline(chat, user).await;
            return Ok(JoinOutcome::Rejected(RejectReason::UnknownInvite));
        };

        if invite.is_revoked {
            self.decline(chat, user).await;
            return Ok(JoinOutcome::Rejected(RejectReason::Revoked));
        }

        if invite.chat_id != chat {
            self.decline(chat, user).await;
            return Ok(JoinOutcome::Rejected(RejectReason::WrongChat));
        }

        if invite.is_expired_at(Utc::now()) {
            self.decline(chat, user).await;
            // Expiry is observed lazily; persist it as a revocation so the
            // row reads as inert from now on
            self.ctx.invite_repo().revoke(invite.id).await?;
            info!(invite_id = %invite.id, "Expired invite observed and revoked");
            return Ok(JoinOutcome::Rejected(RejectReason::Expired));
        }

        if !invite.is_bound_to(user) {
            return self.reject_impersonation(&invite, user, chat).await;
        }

        // Consume-and-admit is the one transaction of this event; losing the
        // conditional revoke means another attempt got here first.
        match self
            .ctx
            .admission_store()
            .admit_member(invite.id, user, profile)
            .await?
        {
            AdmitOutcome::AlreadyConsumed => {
                self.decline(chat, user).await;
                Ok(JoinOutcome::Rejected(RejectReason::Revoked))
            }
            AdmitOutcome::Admitted(member) => {
                info!(user = %user, invite_id = %invite.id, "Join attempt admitted");

                if let Err(e) = self.ctx.gateway().approve_join(chat, user).await {
                    warn!(user = %user, error = %e, "Failed to approve join at gateway");
                }
                if let Err(e) = self
                    .ctx
                    .gateway()
                    .revoke_invite_link(chat, &invite.invite_link)
                    .await
                {
                    warn!(error = %e, "Failed to revoke platform invite link");
                }
                if let Err(e) = self
                    .ctx
                    .gateway()
                    .send_message(user, texts::WELCOME_ABOARD_TEXT, None)
                    .await
                {
                    warn!(user = %user, error = %e, "Failed to send welcome message");
                }

                Ok(JoinOutcome::Admitted(member))
            }
        }
    }

    /// Identity mismatch: turn the attempt away and burn the credential
    /// entirely. A link in the wrong hands is treated as compromised, so the
    /// legitimate holder loses it too.
    async fn reject_impersonation(
        &self,
        invite: &gate_core::entities::Invite,
        attempter: UserId,
        chat: ChatId,
    ) -> ServiceResult<JoinOutcome> {
        warn!(
            invite_id = %invite.id,
            bound_user = %invite.bound_user_id,
            attempter = %attempter,
            "Impersonation attempt: invite presented by the wrong user"
        );

        self.decline(chat, attempter).await;

        if let Err(e) = self.ctx.gateway().remove_member(chat, attempter).await {
            warn!(attempter = %attempter, error = %e, "Failed to remove impersonator from chat");
        }
        if let Err(e) = self
            .ctx
            .gateway()
            .revoke_invite_link(chat, &invite.invite_link)
            .await
        {
            warn!(error = %e, "Failed to revoke platform invite link");
        }

        // The local revocation is the part that must stick
        self.ctx.invite_repo().revoke(invite.id).await?;

        Ok(JoinOutcome::ImpersonationRejected)
    }

    /// Fire-and-forget decline at the gateway
    async fn decline(&self, chat: ChatId, user: UserId) {
        if let Err(e) = self.ctx.gateway().decline_join(chat, user).await {
            warn!(user = %user, error = %e, "Failed to decline join at gateway");
        }
    }
}
