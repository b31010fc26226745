//! Data transfer objects for service inputs and outcomes
//!
//! This module provides:
//! - Request DTOs with validation for inbound inputs
//! - Outcome types the services return to the gateway adapter

pub mod outcomes;
pub mod requests;

pub use outcomes::{
    ApplyOutcome, BioOutcome, DecisionOutcome, DepartureOutcome, EventOutcome, JoinOutcome,
    RejectReason,
};
pub use requests::SetBioRequest;
