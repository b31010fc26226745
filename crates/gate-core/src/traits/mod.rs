//! Ports - interfaces the domain expects its collaborators to implement

mod gateway;
mod repositories;

pub use gateway::{ChatGateway, GatewayError, GatewayResult, InviteConstraints, MessageAction};
pub use repositories::{
    AdmissionStore, AdmitOutcome, ApplicationRepository, InviteRepository, MemberRepository,
    RepoResult,
};
