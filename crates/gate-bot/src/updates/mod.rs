//! Update translation
//!
//! Turns raw Bot API updates into typed gateway events, or into local
//! replies for the purely conversational commands that never reach the
//! engine.

use uuid::Uuid;

use gate_core::entities::UserProfile;
use gate_core::events::{Decision, GatewayEvent, MembershipStatus};
use gate_core::value_objects::{ChatId, UserId};
use gate_service::texts;

use crate::telegram::types::{CallbackQuery, ChatJoinRequest, ChatMemberUpdated, Message, TgUser, Update};

/// What one update translates into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedUpdate {
    /// Dispatch this event to the engine. `callback_id` is set when the
    /// event came from an inline button and the press must be acknowledged.
    Event {
        event: GatewayEvent,
        callback_id: Option<String>,
    },
    /// Answer directly in the originating chat; the engine is not involved
    Reply { chat_id: i64, text: String },
    /// Acknowledge an inline button press without dispatching anything
    AnswerCallback { callback_id: String, text: String },
    /// Nothing to do
    Ignore,
}

fn profile_of(user: &TgUser) -> UserProfile {
    UserProfile::new(
        user.username.clone(),
        user.first_name.clone(),
        user.last_name.clone(),
    )
}

/// Translate one update
pub fn map_update(update: Update) -> MappedUpdate {
    if let Some(message) = update.message {
        return map_message(message);
    }
    if let Some(callback) = update.callback_query {
        return map_callback(callback);
    }
    if let Some(request) = update.chat_join_request {
        return map_join_request(request);
    }
    if let Some(change) = update.chat_member {
        return map_chat_member(change);
    }
    MappedUpdate::Ignore
}

fn map_message(message: Message) -> MappedUpdate {
    // Commands are honored in private chats only
    if !message.chat.is_private() {
        return MappedUpdate::Ignore;
    }
    let (Some(from), Some(text)) = (message.from, message.text) else {
        return MappedUpdate::Ignore;
    };
    if !text.starts_with('/') {
        return MappedUpdate::Ignore;
    }

    let mut parts = text.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match command {
        "/start" | "/help" => MappedUpdate::Reply {
            chat_id: message.chat.id,
            text: texts::WELCOME_TEXT.to_string(),
        },
        "/apply" => MappedUpdate::Event {
            event: GatewayEvent::ApplyRequested {
                requester: UserId::new(from.id),
                profile: profile_of(&from),
            },
            callback_id: None,
        },
        "/setbio" => {
            if argument.is_empty() {
                MappedUpdate::Reply {
                    chat_id: message.chat.id,
                    text: texts::BIO_USAGE_TEXT.to_string(),
                }
            } else {
                MappedUpdate::Event {
                    event: GatewayEvent::BioSet {
                        user: UserId::new(from.id),
                        profile: profile_of(&from),
                        bio: argument.to_string(),
                    },
                    callback_id: None,
                }
            }
        }
        "/look_bio" => {
            if argument.is_empty() {
                MappedUpdate::Reply {
                    chat_id: message.chat.id,
                    text: texts::BIO_LOOKUP_USAGE_TEXT.to_string(),
                }
            } else {
                MappedUpdate::Event {
                    event: GatewayEvent::BioLookup {
                        requester: UserId::new(from.id),
                        username: argument.trim_start_matches('@').to_string(),
                    },
                    callback_id: None,
                }
            }
        }
        _ => MappedUpdate::Reply {
            chat_id: message.chat.id,
            text: texts::UNKNOWN_COMMAND_TEXT.to_string(),
        },
    }
}

fn map_callback(callback: CallbackQuery) -> MappedUpdate {
    let Some(data) = callback.data.as_deref() else {
        return MappedUpdate::Ignore;
    };

    let (decision, raw_id) = if let Some(id) = data.strip_prefix("approve:") {
        (Decision::Approve, id)
    } else if let Some(id) = data.strip_prefix("deny:") {
        (Decision::Deny, id)
    } else {
        return MappedUpdate::Ignore;
    };

    match Uuid::parse_str(raw_id) {
        Ok(application_id) => MappedUpdate::Event {
            event: GatewayEvent::DecisionMade {
                application_id,
                decision,
            },
            callback_id: Some(callback.id),
        },
        Err(_) => MappedUpdate::AnswerCallback {
            callback_id: callback.id,
            text: texts::APPLICATION_NOT_FOUND_TEXT.to_string(),
        },
    }
}

fn map_join_request(request: ChatJoinRequest) -> MappedUpdate {
    MappedUpdate::Event {
        event: GatewayEvent::JoinAttempted {
            invite_link: request.invite_link.map(|l| l.invite_link),
            user: UserId::new(request.from.id),
            profile: profile_of(&request.from),
            chat: ChatId::new(request.chat.id),
        },
        callback_id: None,
    }
}

fn map_chat_member(change: ChatMemberUpdated) -> MappedUpdate {
    let status = match change.new_chat_member.status.as_str() {
        "left" => MembershipStatus::Left,
        "kicked" => MembershipStatus::Kicked,
        "banned" => MembershipStatus::Banned,
        "member" | "administrator" | "creator" => MembershipStatus::Joined,
        _ => return MappedUpdate::Ignore,
    };

    MappedUpdate::Event {
        event: GatewayEvent::MembershipChanged {
            user: UserId::new(change.new_chat_member.user.id),
            chat: ChatId::new(change.chat.id),
            status,
        },
        callback_id: None,
    }
}
