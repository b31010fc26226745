//! Event dispatcher
//!
//! Routes typed gateway events to the right service. The transport layer
//! only has to produce `GatewayEvent` values; everything after that is
//! testable without a live platform.

use gate_core::events::GatewayEvent;
use tracing::instrument;

use crate::dto::EventOutcome;

use super::admission::AdmissionService;
use super::application::ApplicationService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::membership::MembershipService;

/// Event dispatcher
pub struct EventDispatcher {
    ctx: ServiceContext,
}

impl EventDispatcher {
    /// Create a new EventDispatcher
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Access the underlying service context
    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Handle one inbound event to completion
    #[instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn handle(&self, event: GatewayEvent) -> ServiceResult<EventOutcome> {
        match event {
            GatewayEvent::ApplyRequested { requester, profile } => {
                let outcome = ApplicationService::new(&self.ctx)
                    .request_application(requester, &profile)
                    .await?;
                Ok(EventOutcome::Apply(outcome))
            }
            GatewayEvent::DecisionMade {
                application_id,
                decision,
            } => {
                let outcome = ApplicationService::new(&self.ctx)
                    .resolve_application(application_id, decision)
                    .await?;
                Ok(EventOutcome::Decision(outcome))
            }
            GatewayEvent::JoinAttempted {
                invite_link,
                user,
                profile,
                chat,
            } => {
                let outcome = AdmissionService::new(&self.ctx)
                    .handle_join_attempt(invite_link.as_deref(), user, &profile, chat)
                    .await?;
                Ok(EventOutcome::Join(outcome))
            }
            GatewayEvent::MembershipChanged { user, chat, status } => {
                let outcome = MembershipService::new(&self.ctx)
                    .on_membership_changed(user, chat, status)
                    .await?;
                Ok(EventOutcome::Departure(outcome))
            }
            GatewayEvent::BioSet { user, profile, bio } => {
                let outcome = MembershipService::new(&self.ctx)
                    .set_bio(user, &profile, &bio)
                    .await?;
                Ok(EventOutcome::Bio(outcome))
            }
            GatewayEvent::BioLookup {
                requester,
                username,
            } => {
                let outcome = MembershipService::new(&self.ctx)
                    .lookup_bio(requester, &username)
                    .await?;
                Ok(EventOutcome::Bio(outcome))
            }
        }
    }
}
