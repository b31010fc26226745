//! Inbound gateway events

mod gateway_event;

pub use gateway_event::{Decision, GatewayEvent, MembershipStatus};
