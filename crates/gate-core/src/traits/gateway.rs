//! Chat gateway port - the outbound interface to the messaging platform
//!
//! Every call except `create_invite_link` is fire-and-forget from the
//! engine's perspective: failures are logged, never allowed to abort an
//! event. `create_invite_link` is the one call whose result is persisted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::value_objects::{ChatId, UserId};

/// Errors reported by the platform transport
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never completed (network, timeout, serialization)
    #[error("gateway transport error: {0}")]
    Transport(String),

    /// The platform answered with a refusal
    #[error("gateway request rejected: {0}")]
    Rejected(String),
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// An inline action attached to a message (rendered as a button)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAction {
    pub label: String,
    /// Opaque payload echoed back in the resulting `DecisionMade` event
    pub callback_data: String,
}

impl MessageAction {
    pub fn new(label: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Constraints for a platform-level invite link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteConstraints {
    pub expires_at: DateTime<Utc>,
    pub member_limit: i32,
    pub creates_join_request: bool,
}

impl InviteConstraints {
    /// Constraints for a personal single-use invite: one member, and the
    /// join is held as a request so validation can intercept it.
    pub fn personal(expires_at: DateTime<Utc>) -> Self {
        Self {
            expires_at,
            member_limit: 1,
            creates_join_request: true,
        }
    }
}

/// Outbound operations on the messaging platform
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send a text message to a user, optionally with inline actions
    async fn send_message(
        &self,
        target: UserId,
        text: &str,
        actions: Option<Vec<MessageAction>>,
    ) -> GatewayResult<()>;

    /// Create a platform-level invite link for a chat. The returned link
    /// string is the credential the engine persists and later validates.
    async fn create_invite_link(
        &self,
        chat: ChatId,
        constraints: &InviteConstraints,
    ) -> GatewayResult<String>;

    /// Revoke a platform-level invite link
    async fn revoke_invite_link(&self, chat: ChatId, invite_link: &str) -> GatewayResult<()>;

    /// Let a pending join request through
    async fn approve_join(&self, chat: ChatId, user: UserId) -> GatewayResult<()>;

    /// Turn a pending join request away
    async fn decline_join(&self, chat: ChatId, user: UserId) -> GatewayResult<()>;

    /// Remove a user from the chat
    async fn remove_member(&self, chat: ChatId, user: UserId) -> GatewayResult<()>;
}
