//! # gate-db
//!
//! Database layer implementing the entity-store ports with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `gate-core`. It handles:
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the transactional admission store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gate_db::pool::{create_pool, DatabaseConfig};
//! use gate_db::repositories::PgMemberRepository;
//! use gate_core::traits::MemberRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let member_repo = PgMemberRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgAdmissionStore, PgApplicationRepository, PgInviteRepository, PgMemberRepository,
};
