//! Value objects - typed wrappers over primitive identifiers

mod ids;

pub use ids::{ChatId, UserId};
