//! Repository implementations
//!
//! PostgreSQL implementations of the entity-store ports defined in gate-core.
//! The per-entity repositories handle single-row operations; the admission
//! store wraps the multi-row sequences of the admission flow in transactions.

mod admission;
mod application;
mod error;
mod invite;
mod member;

pub use admission::PgAdmissionStore;
pub use application::PgApplicationRepository;
pub use invite::PgInviteRepository;
pub use member::PgMemberRepository;
