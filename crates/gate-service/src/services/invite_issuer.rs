//! Invite issuer
//!
//! Mints personal, single-use, expiring invite credentials. The platform
//! artifact is created first; the local record is only persisted later, as
//! part of the approval transaction, so a platform failure leaves no state
//! behind.

use chrono::Utc;
use gate_core::entities::Invite;
use gate_core::traits::InviteConstraints;
use gate_core::value_objects::{ChatId, UserId};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Invite issuer
pub struct InviteIssuer<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteIssuer<'a> {
    /// Create a new InviteIssuer
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mint a personal invite bound to one user.
    ///
    /// Asks the gateway for a platform-level link constrained to a single
    /// member with join confirmation required, then builds the local entity
    /// around the returned link string. The caller is responsible for
    /// persisting it atomically with whatever approved it.
    #[instrument(skip(self))]
    pub async fn issue_personal_invite(
        &self,
        chat: ChatId,
        bound_user: UserId,
    ) -> ServiceResult<Invite> {
        let expires_at = Utc::now() + self.ctx.settings().invite_ttl;
        let constraints = InviteConstraints::personal(expires_at);

        let link = self
            .ctx
            .gateway()
            .create_invite_link(chat, &constraints)
            .await?;

        info!(
            chat = %chat,
            bound_user = %bound_user,
            expires_at = %expires_at,
            "Personal invite link created"
        );

        Ok(Invite::new(chat, bound_user, link, expires_at))
    }
}
