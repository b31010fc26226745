//! Domain entities - core business objects

mod application;
mod invite;
mod member;

pub use application::{Application, ApplicationStatus};
pub use invite::Invite;
pub use member::{truncate_bio, Member, MemberRole, UserProfile, MAX_BIO_LEN};
