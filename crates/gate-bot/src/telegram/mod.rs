//! Telegram Bot API transport

mod api;
mod gateway;
pub mod types;

pub use api::{ApiError, BotApi};
pub use gateway::TelegramGateway;
