//! ChatGateway implementation over the Bot API

use async_trait::async_trait;

use gate_core::traits::{ChatGateway, GatewayError, GatewayResult, InviteConstraints, MessageAction};
use gate_core::value_objects::{ChatId, UserId};

use super::api::{ApiError, BotApi};
use super::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// ChatGateway implementation over the Bot API
#[derive(Debug, Clone)]
pub struct TelegramGateway {
    api: BotApi,
}

impl TelegramGateway {
    /// Create a new TelegramGateway
    pub fn new(api: BotApi) -> Self {
        Self { api }
    }
}

fn map_api_error(e: ApiError) -> GatewayError {
    match e {
        ApiError::Request(inner) => GatewayError::Transport(inner.to_string()),
        ApiError::Api { description, .. } => GatewayError::Rejected(description),
    }
}

fn to_markup(actions: Vec<MessageAction>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![actions
            .into_iter()
            .map(|a| InlineKeyboardButton {
                text: a.label,
                callback_data: a.callback_data,
            })
            .collect()],
    }
}

#[async_trait]
impl ChatGateway for TelegramGateway {
    async fn send_message(
        &self,
        target: UserId,
        text: &str,
        actions: Option<Vec<MessageAction>>,
    ) -> GatewayResult<()> {
        self.api
            .send_message(target.into_inner(), text, actions.map(to_markup))
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn create_invite_link(
        &self,
        chat: ChatId,
        constraints: &InviteConstraints,
    ) -> GatewayResult<String> {
        let link = self
            .api
            .create_chat_invite_link(
                chat.into_inner(),
                constraints.expires_at.timestamp(),
                constraints.member_limit,
                constraints.creates_join_request,
            )
            .await
            .map_err(map_api_error)?;

        Ok(link.invite_link)
    }

    async fn revoke_invite_link(&self, chat: ChatId, invite_link: &str) -> GatewayResult<()> {
        self.api
            .revoke_chat_invite_link(chat.into_inner(), invite_link)
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn approve_join(&self, chat: ChatId, user: UserId) -> GatewayResult<()> {
        self.api
            .approve_chat_join_request(chat.into_inner(), user.into_inner())
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn decline_join(&self, chat: ChatId, user: UserId) -> GatewayResult<()> {
        self.api
            .decline_chat_join_request(chat.into_inner(), user.into_inner())
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }

    async fn remove_member(&self, chat: ChatId, user: UserId) -> GatewayResult<()> {
        self.api
            .ban_chat_member(chat.into_inner(), user.into_inner())
            .await
            .map(|_| ())
            .map_err(map_api_error)
    }
}
