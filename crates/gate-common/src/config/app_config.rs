//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use chrono::Duration;
use gate_core::{ChatId, UserId};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub invite: InviteConfig,
    pub database: DatabaseConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Gateway bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot API token
    pub token: String,
    /// The governed group chat
    pub group_chat_id: ChatId,
    /// The administrator who decides applications
    pub admin_user_id: UserId,
    /// Long-poll timeout in seconds
    pub poll_timeout_secs: u64,
}

/// Invite issuance configuration
#[derive(Debug, Clone)]
pub struct InviteConfig {
    /// Hours a personal invite stays valid
    pub ttl_hours: i64,
}

impl InviteConfig {
    /// The TTL as a chrono duration
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::hours(self.ttl_hours)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

// Default value functions
fn default_app_name() -> String {
    "gatekeeper".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_invite_ttl_hours() -> i64 {
    24
}

fn default_poll_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            bot: BotConfig {
                token: env::var("BOT_TOKEN").map_err(|_| ConfigError::MissingVar("BOT_TOKEN"))?,
                group_chat_id: env::var("GROUP_CHAT_ID")
                    .map_err(|_| ConfigError::MissingVar("GROUP_CHAT_ID"))?
                    .parse::<i64>()
                    .map(ChatId::new)
                    .map_err(|e| ConfigError::InvalidValue("GROUP_CHAT_ID", e.to_string()))?,
                admin_user_id: env::var("ADMIN_USER_ID")
                    .map_err(|_| ConfigError::MissingVar("ADMIN_USER_ID"))?
                    .parse::<i64>()
                    .map(UserId::new)
                    .map_err(|e| ConfigError::InvalidValue("ADMIN_USER_ID", e.to_string()))?,
                poll_timeout_secs: env::var("POLL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_poll_timeout_secs),
            },
            invite: InviteConfig {
                ttl_hours: env::var("INVITE_TTL_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_invite_ttl_hours),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
