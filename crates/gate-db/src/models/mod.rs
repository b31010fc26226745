//! Database models - SQLx-compatible structs for PostgreSQL tables

mod application;
mod invite;
mod member;

pub use application::ApplicationModel;
pub use invite::InviteModel;
pub use member::MemberModel;
