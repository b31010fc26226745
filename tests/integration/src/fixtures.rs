//! Test fixtures: in-memory entity store and recording gateway

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use gate_core::entities::{truncate_bio, Application, Invite, Member, UserProfile};
use gate_core::error::DomainError;
use gate_core::traits::{
    AdmissionStore, AdmitOutcome, ApplicationRepository, ChatGateway, GatewayError, GatewayResult,
    InviteConstraints, InviteRepository, MemberRepository, MessageAction, RepoResult,
};
use gate_core::value_objects::{ChatId, UserId};

// ============================================================================
// In-memory entity store
// ============================================================================

#[derive(Debug, Default)]
struct StoreState {
    members: HashMap<i64, Member>,
    applications: HashMap<Uuid, Application>,
    invites: HashMap<Uuid, Invite>,
}

/// In-memory implementation of every entity-store port.
///
/// Mutations take the single state lock for their whole duration, which
/// gives the same all-or-nothing visibility the SQL transactions provide.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of application rows currently stored for a user
    pub fn application_count_for(&self, user_id: UserId) -> usize {
        let state = self.state.lock().unwrap();
        state
            .applications
            .values()
            .filter(|a| a.user_id == user_id)
            .count()
    }

    /// Number of invite rows currently stored
    pub fn invite_count(&self) -> usize {
        self.state.lock().unwrap().invites.len()
    }

    /// Fetch a stored invite by id
    pub fn invite(&self, id: Uuid) -> Option<Invite> {
        self.state.lock().unwrap().invites.get(&id).cloned()
    }

    /// Fetch a stored member by platform user id
    pub fn member(&self, user_id: UserId) -> Option<Member> {
        self.state
            .lock()
            .unwrap()
            .members
            .get(&user_id.into_inner())
            .cloned()
    }

    /// Plant a member row directly (for departure and bio tests)
    pub fn insert_member(&self, member: Member) {
        self.state
            .lock()
            .unwrap()
            .members
            .insert(member.user_id.into_inner(), member);
    }

    /// Plant an invite row directly (for expiry and mismatch tests)
    pub fn insert_invite(&self, invite: Invite) {
        self.state.lock().unwrap().invites.insert(invite.id, invite);
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn find_by_user_id(&self, user_id: UserId) -> RepoResult<Option<Member>> {
        Ok(self.member(user_id))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .values()
            .find(|m| m.username.as_deref() == Some(username))
            .cloned())
    }

    async fn upsert_by_user_id(
        &self,
        user_id: UserId,
        profile: &UserProfile,
    ) -> RepoResult<Member> {
        let mut state = self.state.lock().unwrap();
        let member = state
            .members
            .entry(user_id.into_inner())
            .and_modify(|m| m.apply_profile(profile))
            .or_insert_with(|| Member::new(user_id, profile));
        Ok(member.clone())
    }

    async fn set_bio(
        &self,
        user_id: UserId,
        profile: &UserProfile,
        bio: &str,
    ) -> RepoResult<Member> {
        let mut state = self.state.lock().unwrap();
        let member = state
            .members
            .entry(user_id.into_inner())
            .and_modify(|m| m.apply_profile(profile))
            .or_insert_with(|| Member::new(user_id, profile));
        member.bio = truncate_bio(bio);
        Ok(member.clone())
    }

    async fn delete_by_user_id(&self, user_id: UserId) -> RepoResult<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(state.members.remove(&user_id.into_inner()).is_some())
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Application>> {
        Ok(self.state.lock().unwrap().applications.get(&id).cloned())
    }

    async fn find_pending_by_user(&self, user_id: UserId) -> RepoResult<Option<Application>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .applications
            .values()
            .find(|a| a.user_id == user_id && a.is_pending())
            .cloned())
    }

    async fn create(&self, application: &Application) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let duplicate = state
            .applications
            .values()
            .any(|a| a.user_id == application.user_id && a.is_pending());
        if duplicate {
            return Err(DomainError::PendingApplicationExists);
        }
        state
            .applications
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<bool> {
        let mut state = self.state.lock().unwrap();
        Ok(state.applications.remove(&id).is_some())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.applications.len();
        state.applications.retain(|_, a| a.user_id != user_id);
        Ok((before - state.applications.len()) as u64)
    }
}

#[async_trait]
impl InviteRepository for InMemoryStore {
    async fn find_by_link(&self, invite_link: &str) -> RepoResult<Option<Invite>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .invites
            .values()
            .find(|i| i.invite_link == invite_link)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invite>> {
        Ok(self.invite(id))
    }

    async fn revoke(&self, id: Uuid) -> RepoResult<bool> {
        let mut state = self.state.lock().unwrap();
        let invite = state
            .invites
            .get_mut(&id)
            .ok_or_else(|| DomainError::InviteNotFound(id.to_string()))?;
        if invite.is_revoked {
            Ok(false)
        } else {
            invite.is_revoked = true;
            Ok(true)
        }
    }
}

#[async_trait]
impl AdmissionStore for InMemoryStore {
    async fn approve_application(&self, application_id: Uuid, invite: &Invite) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        match state.applications.get_mut(&application_id) {
            Some(application) if application.is_pending() => {
                application.approve(invite.id);
                state.invites.insert(invite.id, invite.clone());
                Ok(())
            }
            _ => Err(DomainError::ApplicationNotPending(application_id)),
        }
    }

    async fn admit_member(
        &self,
        invite_id: Uuid,
        user_id: UserId,
        profile: &UserProfile,
    ) -> RepoResult<AdmitOutcome> {
        let mut state = self.state.lock().unwrap();

        let invite = state
            .invites
            .get_mut(&invite_id)
            .ok_or_else(|| DomainError::InviteNotFound(invite_id.to_string()))?;
        if invite.is_revoked {
            return Ok(AdmitOutcome::AlreadyConsumed);
        }
        invite.is_revoked = true;

        let member = state
            .members
            .entry(user_id.into_inner())
            .and_modify(|m| m.apply_profile(profile))
            .or_insert_with(|| Member::new(user_id, profile))
            .clone();

        state.applications.retain(|_, a| a.user_id != user_id);

        Ok(AdmitOutcome::Admitted(member))
    }
}

// ============================================================================
// Recording gateway
// ============================================================================

/// One recorded outbound platform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    SendMessage {
        target: UserId,
        text: String,
        actions: Option<Vec<MessageAction>>,
    },
    CreateInviteLink {
        chat: ChatId,
        creates_join_request: bool,
    },
    RevokeInviteLink {
        chat: ChatId,
        invite_link: String,
    },
    ApproveJoin {
        chat: ChatId,
        user: UserId,
    },
    DeclineJoin {
        chat: ChatId,
        user: UserId,
    },
    RemoveMember {
        chat: ChatId,
        user: UserId,
    },
}

/// Recording implementation of the chat gateway.
///
/// Every call is appended to a log the tests can inspect; link creation can
/// be switched to fail to exercise the upstream-failure path.
#[derive(Debug, Default)]
pub struct FakeGateway {
    calls: Mutex<Vec<GatewayCall>>,
    fail_create_invite: AtomicBool,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_invite_link` calls fail
    pub fn fail_invite_creation(&self, fail: bool) {
        self.fail_create_invite.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every recorded call, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Texts of the messages sent to one user, in order
    pub fn messages_to(&self, target: UserId) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                GatewayCall::SendMessage { target: t, text, .. } if *t == target => {
                    Some(text.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Whether a join was approved for the user
    pub fn approved_join_for(&self, user: UserId) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| matches!(c, GatewayCall::ApproveJoin { user: u, .. } if *u == user))
    }

    /// Whether a join was declined for the user
    pub fn declined_join_for(&self, user: UserId) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| matches!(c, GatewayCall::DeclineJoin { user: u, .. } if *u == user))
    }

    /// Whether the user was removed from the chat
    pub fn removed_member(&self, user: UserId) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| matches!(c, GatewayCall::RemoveMember { user: u, .. } if *u == user))
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatGateway for FakeGateway {
    async fn send_message(
        &self,
        target: UserId,
        text: &str,
        actions: Option<Vec<MessageAction>>,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SendMessage {
            target,
            text: text.to_string(),
            actions,
        });
        Ok(())
    }

    async fn create_invite_link(
        &self,
        chat: ChatId,
        constraints: &InviteConstraints,
    ) -> GatewayResult<String> {
        if self.fail_create_invite.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("link service unavailable".to_string()));
        }
        self.record(GatewayCall::CreateInviteLink {
            chat,
            creates_join_request: constraints.creates_join_request,
        });
        Ok(format!("https://t.me/+{:08x}", rand::random::<u32>()))
    }

    async fn revoke_invite_link(&self, chat: ChatId, invite_link: &str) -> GatewayResult<()> {
        self.record(GatewayCall::RevokeInviteLink {
            chat,
            invite_link: invite_link.to_string(),
        });
        Ok(())
    }

    async fn approve_join(&self, chat: ChatId, user: UserId) -> GatewayResult<()> {
        self.record(GatewayCall::ApproveJoin { chat, user });
        Ok(())
    }

    async fn decline_join(&self, chat: ChatId, user: UserId) -> GatewayResult<()> {
        self.record(GatewayCall::DeclineJoin { chat, user });
        Ok(())
    }

    async fn remove_member(&self, chat: ChatId, user: UserId) -> GatewayResult<()> {
        self.record(GatewayCall::RemoveMember { chat, user });
        Ok(())
    }
}
