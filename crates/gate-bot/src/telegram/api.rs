//! Thin Bot API HTTP client
//!
//! One reqwest client, one generic `call` per Bot API method. Only the
//! methods the admission flow needs are wrapped.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use super::types::{ApiResponse, BotCommand, ChatInviteLink, InlineKeyboardMarkup, Update};

/// Bot API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("api call {method} rejected: {description}")]
    Api { method: String, description: String },
}

/// Bot API client
#[derive(Debug, Clone)]
pub struct BotApi {
    client: Client,
    base_url: String,
}

impl BotApi {
    /// Create a client for the given bot token
    pub fn new(token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("https://api.telegram.org/bot{token}"),
        }
    }

    /// Create a client against a custom API server (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Invoke one Bot API method with a JSON body
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ApiError> {
        let url = format!("{}/{method}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await?
            .json::<ApiResponse<T>>()
            .await?;

        if response.ok {
            response.result.ok_or_else(|| ApiError::Api {
                method: method.to_string(),
                description: "ok response without result".to_string(),
            })
        } else {
            Err(ApiError::Api {
                method: method.to_string(),
                description: response
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            })
        }
    }

    /// Long-poll for updates
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
        allowed_updates: &[&str],
    ) -> Result<Vec<Update>, ApiError> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": allowed_updates,
            }),
        )
        .await
    }

    /// Send a text message, optionally with an inline keyboard
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<Value, ApiError> {
        let mut params = json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });
        if let Some(markup) = reply_markup {
            params["reply_markup"] = serde_json::to_value(markup).map_err(|e| ApiError::Api {
                method: "sendMessage".to_string(),
                description: e.to_string(),
            })?;
        }
        self.call("sendMessage", params).await
    }

    /// Create an invite link with the given constraints
    pub async fn create_chat_invite_link(
        &self,
        chat_id: i64,
        expire_date: i64,
        member_limit: i32,
        creates_join_request: bool,
    ) -> Result<ChatInviteLink, ApiError> {
        // The Bot API refuses member_limit together with creates_join_request;
        // join-request links are single-use by way of our own revocation.
        let params = if creates_join_request {
            json!({
                "chat_id": chat_id,
                "expire_date": expire_date,
                "creates_join_request": true,
            })
        } else {
            json!({
                "chat_id": chat_id,
                "expire_date": expire_date,
                "member_limit": member_limit,
            })
        };
        self.call("createChatInviteLink", params).await
    }

    /// Revoke an invite link
    pub async fn revoke_chat_invite_link(
        &self,
        chat_id: i64,
        invite_link: &str,
    ) -> Result<Value, ApiError> {
        self.call(
            "revokeChatInviteLink",
            json!({ "chat_id": chat_id, "invite_link": invite_link }),
        )
        .await
    }

    /// Approve a pending join request
    pub async fn approve_chat_join_request(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<bool, ApiError> {
        self.call(
            "approveChatJoinRequest",
            json!({ "chat_id": chat_id, "user_id": user_id }),
        )
        .await
    }

    /// Decline a pending join request
    pub async fn decline_chat_join_request(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<bool, ApiError> {
        self.call(
            "declineChatJoinRequest",
            json!({ "chat_id": chat_id, "user_id": user_id }),
        )
        .await
    }

    /// Remove a user from the chat
    pub async fn ban_chat_member(&self, chat_id: i64, user_id: i64) -> Result<bool, ApiError> {
        self.call(
            "banChatMember",
            json!({ "chat_id": chat_id, "user_id": user_id }),
        )
        .await
    }

    /// Acknowledge a callback query with a short notice
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: &str,
    ) -> Result<bool, ApiError> {
        self.call(
            "answerCallbackQuery",
            json!({ "callback_query_id": callback_query_id, "text": text }),
        )
        .await
    }

    /// Register the private-chat command menu
    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<bool, ApiError> {
        self.call(
            "setMyCommands",
            json!({
                "commands": commands,
                "scope": { "type": "all_private_chats" },
            }),
        )
        .await
    }
}
