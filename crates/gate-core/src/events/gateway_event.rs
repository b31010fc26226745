//! Gateway events - typed inbound events from the messaging platform
//!
//! The gateway adapter translates transport-specific updates into this tagged
//! union; the admission engine only ever reacts to these values, which keeps
//! it testable without a live transport.

use uuid::Uuid;

use crate::entities::UserProfile;
use crate::value_objects::{ChatId, UserId};

/// An administrator's verdict on an application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

/// Membership state reported by the platform for a chat member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipStatus {
    Joined,
    Left,
    Kicked,
    Banned,
}

impl MembershipStatus {
    /// Whether this status means the user is gone from the chat
    #[inline]
    pub fn is_departure(&self) -> bool {
        matches!(self, Self::Left | Self::Kicked | Self::Banned)
    }
}

/// All inbound events the admission engine reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    /// A user asked to join the community
    ApplyRequested {
        requester: UserId,
        profile: UserProfile,
    },

    /// The administrator approved or denied an application
    DecisionMade {
        application_id: Uuid,
        decision: Decision,
    },

    /// Someone presented (or failed to present) an invite link at the door
    JoinAttempted {
        invite_link: Option<String>,
        user: UserId,
        profile: UserProfile,
        chat: ChatId,
    },

    /// The platform reported a membership change in some chat
    MembershipChanged {
        user: UserId,
        chat: ChatId,
        status: MembershipStatus,
    },

    /// A user set their free-text bio
    BioSet {
        user: UserId,
        profile: UserProfile,
        bio: String,
    },

    /// A user asked to see another member's bio
    BioLookup { requester: UserId, username: String },
}

impl GatewayEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ApplyRequested { .. } => "APPLY_REQUESTED",
            Self::DecisionMade { .. } => "DECISION_MADE",
            Self::JoinAttempted { .. } => "JOIN_ATTEMPTED",
            Self::MembershipChanged { .. } => "MEMBERSHIP_CHANGED",
            Self::BioSet { .. } => "BIO_SET",
            Self::BioLookup { .. } => "BIO_LOOKUP",
        }
    }
}
