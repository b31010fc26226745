//! # gate-bot
//!
//! Gateway adapter: a Telegram Bot API long-polling client that translates
//! platform updates into typed gateway events and relays the engine's
//! outbound calls.

pub mod runner;
pub mod telegram;
pub mod updates;

pub use runner::run;
