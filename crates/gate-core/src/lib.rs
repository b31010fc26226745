//! # gate-core
//!
//! Domain layer containing entities, value objects, ports, and inbound events.
//! This crate has zero dependencies on infrastructure (database, transport, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Application, ApplicationStatus, Invite, Member, MemberRole, UserProfile};
pub use error::DomainError;
pub use events::{Decision, GatewayEvent, MembershipStatus};
pub use traits::{
    AdmissionStore, AdmitOutcome, ApplicationRepository, ChatGateway, GatewayError, GatewayResult,
    InviteConstraints, InviteRepository, MemberRepository, MessageAction, RepoResult,
};
pub use value_objects::{ChatId, UserId};
