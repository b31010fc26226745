//! Entity to model mappers
//!
//! This module provides conversions between domain entities (gate-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects

mod application;
mod invite;
mod member;
