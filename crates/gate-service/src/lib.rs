//! # gate-service
//!
//! Application layer containing the admission state machine, the credential
//! issuer, the membership lifecycle manager, and the event dispatcher.

pub mod dto;
pub mod services;
pub mod texts;

// Re-export commonly used types at crate root
pub use dto::{
    ApplyOutcome, BioOutcome, DecisionOutcome, DepartureOutcome, EventOutcome, JoinOutcome,
    RejectReason, SetBioRequest,
};
pub use services::{
    AdmissionService, ApplicationService, EventDispatcher, GroupSettings, InviteIssuer,
    MembershipService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
