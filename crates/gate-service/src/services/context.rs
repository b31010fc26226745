//! Service context - dependency container for services
//!
//! Holds the entity-store ports, the chat gateway, and the group settings.
//! Everything arrives through the constructor; there is no process-wide
//! mutable state.

use std::sync::Arc;

use chrono::Duration;
use gate_core::traits::{
    AdmissionStore, ApplicationRepository, ChatGateway, InviteRepository, MemberRepository,
};
use gate_core::value_objects::{ChatId, UserId};

/// Static facts about the governed group
#[derive(Debug, Clone)]
pub struct GroupSettings {
    /// The one chat this engine governs
    pub group_chat: ChatId,
    /// The administrator who decides applications
    pub admin_user: UserId,
    /// How long a personal invite stays valid
    pub invite_ttl: Duration,
}

impl GroupSettings {
    pub fn new(group_chat: ChatId, admin_user: UserId, invite_ttl: Duration) -> Self {
        Self {
            group_chat,
            admin_user,
            invite_ttl,
        }
    }
}

/// Service context containing all dependencies
///
/// This is the dependency container handed to every service. It provides
/// access to:
/// - Entity-store repositories and the transactional admission store
/// - The chat gateway for outbound platform calls
/// - The governed group's settings
#[derive(Clone)]
pub struct ServiceContext {
    settings: GroupSettings,

    // Entity store
    member_repo: Arc<dyn MemberRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    invite_repo: Arc<dyn InviteRepository>,
    admission_store: Arc<dyn AdmissionStore>,

    // Platform
    gateway: Arc<dyn ChatGateway>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        settings: GroupSettings,
        member_repo: Arc<dyn MemberRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        invite_repo: Arc<dyn InviteRepository>,
        admission_store: Arc<dyn AdmissionStore>,
        gateway: Arc<dyn ChatGateway>,
    ) -> Self {
        Self {
            settings,
            member_repo,
            application_repo,
            invite_repo,
            admission_store,
            gateway,
        }
    }

    /// Get the governed group settings
    pub fn settings(&self) -> &GroupSettings {
        &self.settings
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the application repository
    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    /// Get the invite repository
    pub fn invite_repo(&self) -> &dyn InviteRepository {
        self.invite_repo.as_ref()
    }

    /// Get the admission store
    pub fn admission_store(&self) -> &dyn AdmissionStore {
        self.admission_store.as_ref()
    }

    /// Get the chat gateway
    pub fn gateway(&self) -> &dyn ChatGateway {
        self.gateway.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("settings", &self.settings)
            .field("repositories", &"...")
            .field("gateway", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    settings: Option<GroupSettings>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    application_repo: Option<Arc<dyn ApplicationRepository>>,
    invite_repo: Option<Arc<dyn InviteRepository>>,
    admission_store: Option<Arc<dyn AdmissionStore>>,
    gateway: Option<Arc<dyn ChatGateway>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            settings: None,
            member_repo: None,
            application_repo: None,
            invite_repo: None,
            admission_store: None,
            gateway: None,
        }
    }

    pub fn settings(mut self, settings: GroupSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn application_repo(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.application_repo = Some(repo);
        self
    }

    pub fn invite_repo(mut self, repo: Arc<dyn InviteRepository>) -> Self {
        self.invite_repo = Some(repo);
        self
    }

    pub fn admission_store(mut self, store: Arc<dyn AdmissionStore>) -> Self {
        self.admission_store = Some(store);
        self
    }

    pub fn gateway(mut self, gateway: Arc<dyn ChatGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.settings
                .ok_or_else(|| ServiceError::validation("settings is required"))?,
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.application_repo
                .ok_or_else(|| ServiceError::validation("application_repo is required"))?,
            self.invite_repo
                .ok_or_else(|| ServiceError::validation("invite_repo is required"))?,
            self.admission_store
                .ok_or_else(|| ServiceError::validation("admission_store is required"))?,
            self.gateway
                .ok_or_else(|| ServiceError::validation("gateway is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
