//! Application service
//!
//! Handles the first half of the admission funnel: taking applications and
//! resolving them with an administrator decision.

use gate_core::entities::{Application, UserProfile};
use gate_core::error::DomainError;
use gate_core::traits::MessageAction;
use gate_core::value_objects::UserId;
use gate_core::Decision;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{ApplyOutcome, DecisionOutcome};
use crate::texts;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::invite_issuer::InviteIssuer;

/// Application service
pub struct ApplicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApplicationService<'a> {
    /// Create a new ApplicationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Take a membership application.
    ///
    /// Idempotent: a user with a pending application gets the same
    /// application back, and the administrator is notified again. An
    /// existing member gets a polite refusal and no application.
    #[instrument(skip(self, profile))]
    pub async fn request_application(
        &self,
        requester: UserId,
        profile: &UserProfile,
    ) -> ServiceResult<ApplyOutcome> {
        if self
            .ctx
            .member_repo()
            .find_by_user_id(requester)
            .await?
            .is_some()
        {
            self.notify(requester, texts::ALREADY_MEMBER_TEXT).await;
            return Ok(ApplyOutcome::AlreadyMember);
        }

        let application = match self
            .ctx
            .application_repo()
            .find_pending_by_user(requester)
            .await?
        {
            Some(existing) => existing,
            None => {
                let application = Application::new(requester);
                match self.ctx.application_repo().create(&application).await {
                    Ok(()) => application,
                    // Lost the create race: the other apply's row wins
                    Err(DomainError::PendingApplicationExists) => self
                        .ctx
                        .application_repo()
                        .find_pending_by_user(requester)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::internal("pending application vanished after conflict")
                        })?,
                    Err(e) => return Err(e.into()),
                }
            }
        };

        info!(requester = %requester, application_id = %application.id, "Application submitted");

        let admin = self.ctx.settings().admin_user;
        let actions = vec![
            MessageAction::new("Approve", format!("approve:{}", application.id)),
            MessageAction::new("Deny", format!("deny:{}", application.id)),
        ];
        if let Err(e) = self
            .ctx
            .gateway()
            .send_message(
                admin,
                &texts::application_received(requester, profile),
                Some(actions),
            )
            .await
        {
            warn!(error = %e, "Failed to notify administrator about application");
        }

        self.notify(requester, texts::APPLICATION_SUBMITTED_TEXT)
            .await;

        Ok(ApplyOutcome::Submitted(application))
    }

    /// Resolve an application with an administrator decision.
    ///
    /// Denial deletes the application; a missing row is reported as not
    /// found, never as a failure. Approval mints a personal invite and
    /// commits it together with the status flip; if the platform artifact
    /// cannot be created the application stays pending and the error
    /// propagates as retryable.
    #[instrument(skip(self))]
    pub async fn resolve_application(
        &self,
        application_id: Uuid,
        decision: Decision,
    ) -> ServiceResult<DecisionOutcome> {
        match decision {
            Decision::Deny => self.deny(application_id).await,
            Decision::Approve => self.approve(application_id).await,
        }
    }

    async fn deny(&self, application_id: Uuid) -> ServiceResult<DecisionOutcome> {
        let deleted = self
            .ctx
            .application_repo()
            .delete_by_id(application_id)
            .await?;

        if deleted {
            info!(application_id = %application_id, "Application denied");
            Ok(DecisionOutcome::Denied)
        } else {
            Ok(DecisionOutcome::NotFound)
        }
    }

    async fn approve(&self, application_id: Uuid) -> ServiceResult<DecisionOutcome> {
        let Some(application) = self
            .ctx
            .application_repo()
            .find_by_id(application_id)
            .await?
        else {
            return Ok(DecisionOutcome::NotFound);
        };
        if !application.is_pending() {
            return Ok(DecisionOutcome::NotFound);
        }

        let group_chat = self.ctx.settings().group_chat;
        let issuer = InviteIssuer::new(self.ctx);
        let invite = issuer
            .issue_personal_invite(group_chat, application.user_id)
            .await?;

        if let Err(e) = self
            .ctx
            .admission_store()
            .approve_application(application.id, &invite)
            .await
        {
            // The platform link exists but nothing committed locally: burn
            // the orphaned artifact so the failure leaves no live credential.
            if let Err(revoke_err) = self
                .ctx
                .gateway()
                .revoke_invite_link(group_chat, &invite.invite_link)
                .await
            {
                warn!(error = %revoke_err, "Failed to revoke orphaned invite link");
            }
            return Err(e.into());
        }

        info!(
            application_id = %application.id,
            bound_user = %application.user_id,
            "Application approved, invite issued"
        );

        let ttl_hours = self.ctx.settings().invite_ttl.num_hours();
        self.notify(
            application.user_id,
            &texts::invite_issued(&invite.invite_link, ttl_hours),
        )
        .await;

        Ok(DecisionOutcome::Approved(invite))
    }

    /// Fire-and-forget user notification
    async fn notify(&self, target: UserId, text: &str) {
        if let Err(e) = self.ctx.gateway().send_message(target, text, None).await {
            warn!(target = %target, error = %e, "Failed to send notification");
        }
    }
}
